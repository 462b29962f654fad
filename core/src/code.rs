//! Deployed facet code, addressable by `Address`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use alloy_sol_types::SolInterface;
use diamond_types::{Address, DiamondError, Selector, keccak256, label_address};

use crate::context::CallContext;

/// A unit of logic the proxy can delegate to.
///
/// Implementations hold no state of their own: everything they read or write
/// goes through the [`CallContext`], which borrows the proxy's storage.
pub trait Facet: Send + Sync {
    fn name(&self) -> &'static str;

    /// Selectors of the functions this facet implements.
    fn selectors(&self) -> Vec<Selector>;

    /// Run `selector` with its ABI-encoded `args`, returning ABI-encoded output.
    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError>;
}

/// Selector list of a generated `*Calls` enum.
#[must_use]
pub fn interface_selectors(selectors: &[[u8; 4]]) -> Vec<Selector> {
    selectors.iter().copied().map(Selector::new).collect()
}

/// Decode `args` into the interface call `selector` names.
///
/// Unknown selectors fail as `FunctionNotFound`; malformed arguments as
/// `InvalidCalldata`.
pub fn decode_call<I: SolInterface>(selector: Selector, args: &[u8]) -> Result<I, DiamondError> {
    if !I::valid_selector(selector.0) {
        return Err(DiamondError::FunctionNotFound { selector });
    }
    Ok(I::abi_decode_raw(selector.0, args)?)
}

/// Address space of deployed code.
///
/// Code is immutable once deployed: addresses are never reused and entries
/// are never replaced.
pub struct CodeRegistry {
    code: HashMap<Address, Arc<dyn Facet>>,
    deployer: Address,
    nonce: u64,
}

impl fmt::Debug for CodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(Address, &'static str)> =
            self.code.iter().map(|(a, c)| (*a, c.name())).collect();
        names.sort();
        f.debug_struct("CodeRegistry")
            .field("code", &names)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_deployer(label_address("deployer"))
    }

    /// Registry whose derived addresses are namespaced by `deployer`.
    #[must_use]
    pub fn with_deployer(deployer: Address) -> Self {
        Self {
            code: HashMap::new(),
            deployer,
            nonce: 0,
        }
    }

    /// Next fresh address: `keccak256(deployer ‖ nonce)`, low 20 bytes.
    pub fn allocate_address(&mut self) -> Address {
        loop {
            let mut preimage = [0u8; 28];
            preimage[..20].copy_from_slice(self.deployer.as_slice());
            preimage[20..].copy_from_slice(&self.nonce.to_be_bytes());
            self.nonce += 1;
            let address = Address::from_word(keccak256(preimage));
            if !address.is_zero() && !self.code.contains_key(&address) {
                return address;
            }
        }
    }

    /// Deploy `facet` at a fresh address.
    pub fn deploy(&mut self, facet: impl Facet + 'static) -> Address {
        let address = self.allocate_address();
        let name = facet.name();
        self.code.insert(address, Arc::new(facet));
        tracing::debug!(%address, facet = name, "Deployed facet");
        address
    }

    /// Deploy shared code at a chosen address.
    pub fn deploy_at(&mut self, address: Address, facet: Arc<dyn Facet>) -> Result<(), DiamondError> {
        if address.is_zero() || self.code.contains_key(&address) {
            return Err(DiamondError::AddressInUse { address });
        }
        tracing::debug!(%address, facet = facet.name(), "Deployed facet");
        self.code.insert(address, facet);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, address: Address) -> Option<&Arc<dyn Facet>> {
        self.code.get(&address)
    }

    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.code.contains_key(&address)
    }

    /// Deployed addresses with their facet names, sorted by address.
    #[must_use]
    pub fn deployments(&self) -> Vec<(Address, &'static str)> {
        let mut out: Vec<_> = self.code.iter().map(|(a, c)| (*a, c.name())).collect();
        out.sort();
        out
    }
}
