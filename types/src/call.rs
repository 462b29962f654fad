use crate::primitives::{Address, Selector, U256, calldata_selector};

/// An inbound call to the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Original caller; facets observe this, never the proxy.
    pub caller: Address,
    /// Value attached to the call. Carried through to facet logic unchanged.
    pub value: U256,
    pub data: Vec<u8>,
}

impl Call {
    #[must_use]
    pub fn new(caller: Address, data: Vec<u8>) -> Self {
        Self {
            caller,
            value: U256::ZERO,
            data,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// The routing key, or `None` if the calldata is shorter than four bytes.
    #[must_use]
    pub fn selector(&self) -> Option<Selector> {
        (self.data.len() >= 4).then(|| calldata_selector(&self.data))
    }

    /// Argument body following the selector.
    #[must_use]
    pub fn args(&self) -> &[u8] {
        self.data.get(4..).unwrap_or_default()
    }
}
