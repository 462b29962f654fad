//! Execution context handed to facet logic.
//!
//! A facet never owns storage. The proxy lends its state to the facet for the
//! duration of one call through this handle, together with the identity of the
//! original caller and the attached value.

use diamond_types::{
    Address, B256, Bytes, DiamondError, DiamondEvent, U256, calldata_selector, keccak256,
    slot_offset, uint, word_from_u64,
};

use crate::code::CodeRegistry;
use crate::selector_table::SelectorTable;
use crate::state::DiamondState;

/// Maximum nesting of delegated calls within one inbound call.
pub const MAX_CALL_DEPTH: usize = 1024;

/// Longest byte string [`CallContext::store_bytes`] writes or
/// [`CallContext::load_bytes`] reads back.
pub const MAX_STORED_BYTES: usize = 1 << 20;

pub struct CallContext<'a> {
    code: &'a CodeRegistry,
    state: &'a mut DiamondState,
    this: Address,
    caller: Address,
    value: U256,
    depth: usize,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        code: &'a CodeRegistry,
        state: &'a mut DiamondState,
        this: Address,
        caller: Address,
        value: U256,
    ) -> Self {
        Self {
            code,
            state,
            this,
            caller,
            value,
            depth: 0,
        }
    }

    /// Address of the proxy whose storage is being used.
    #[must_use]
    pub fn this(&self) -> Address {
        self.this
    }

    /// The original external caller, unchanged by delegation.
    #[must_use]
    pub fn msg_sender(&self) -> Address {
        self.caller
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.value
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn code(&self) -> &CodeRegistry {
        self.code
    }

    /// Current routing, read-only.
    #[must_use]
    pub fn routes(&self) -> &SelectorTable {
        self.state.routes()
    }

    pub(crate) fn state(&self) -> &DiamondState {
        self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut DiamondState {
        self.state
    }

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------

    #[must_use]
    pub fn sload(&self, slot: &B256) -> B256 {
        self.state.sload(slot)
    }

    pub fn sstore(&mut self, slot: B256, value: B256) {
        self.state.sstore(slot, value);
    }

    /// Read a byte string stored with [`store_bytes`](Self::store_bytes).
    ///
    /// A length word above [`MAX_STORED_BYTES`] was not written by
    /// `store_bytes` and reverts with `InvalidStoredLength`.
    pub fn load_bytes(&self, slot: &B256) -> Result<Vec<u8>, DiamondError> {
        let len = stored_len(self.sload(slot))
            .ok_or_else(|| DiamondError::revert("InvalidStoredLength"))?;
        let data_base = keccak256(slot);
        let mut out = Vec::with_capacity(len);
        let mut index = 0u64;
        while out.len() < len {
            let chunk = self.sload(&slot_offset(data_base, index));
            let take = (len - out.len()).min(32);
            out.extend_from_slice(&chunk[..take]);
            index += 1;
        }
        Ok(out)
    }

    /// Store a byte string: its length at `slot`, its body in 32-byte chunks
    /// starting at `keccak256(slot)`. Chunks left over from a longer previous
    /// value are cleared.
    pub fn store_bytes(&mut self, slot: B256, bytes: &[u8]) -> Result<(), DiamondError> {
        if bytes.len() > MAX_STORED_BYTES {
            return Err(DiamondError::revert("StoredValueTooLong"));
        }
        let old_len = stored_len(self.sload(&slot)).unwrap_or(0) as u64;
        let data_base = keccak256(slot);
        let mut index = 0u64;
        for chunk in bytes.chunks(32) {
            let mut padded = B256::ZERO;
            padded[..chunk.len()].copy_from_slice(chunk);
            self.sstore(slot_offset(data_base, index), padded);
            index += 1;
        }
        let old_chunks = old_len.div_ceil(32);
        while index < old_chunks {
            self.sstore(slot_offset(data_base, index), B256::ZERO);
            index += 1;
        }
        self.sstore(slot, word_from_u64(bytes.len() as u64));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Emit a log attributed to the proxy.
    pub fn emit_log(&mut self, topics: Vec<B256>, data: Bytes) {
        let emitter = self.this;
        self.state.emit(DiamondEvent::Log {
            emitter,
            topics,
            data,
        });
    }

    pub(crate) fn emit(&mut self, event: DiamondEvent) {
        self.state.emit(event);
    }

    // ------------------------------------------------------------------
    // Delegation
    // ------------------------------------------------------------------

    /// Execute the code at `target` in this storage context.
    ///
    /// Caller and value are preserved. Changes made by the delegated code are
    /// rolled back if it fails; the failure is returned unchanged.
    pub fn delegate(&mut self, target: Address, calldata: &[u8]) -> Result<Vec<u8>, DiamondError> {
        let facet = self
            .code
            .get(target)
            .cloned()
            .ok_or(DiamondError::NoCodeAtAddress { address: target })?;
        if self.depth >= MAX_CALL_DEPTH {
            return Err(DiamondError::revert("CallDepthExceeded"));
        }
        let selector = calldata_selector(calldata);
        let args = calldata.get(4..).unwrap_or_default();

        let checkpoint = self.state.checkpoint();
        self.depth += 1;
        let result = facet.execute(selector, args, self);
        self.depth -= 1;
        match &result {
            Ok(_) => self.state.commit(checkpoint),
            Err(_) => self.state.revert_to(checkpoint),
        }
        result
    }
}

/// Length held in a `store_bytes` length word, if it is within bounds.
fn stored_len(len_word: B256) -> Option<usize> {
    let len = uint(len_word);
    (len <= U256::from(MAX_STORED_BYTES as u64)).then(|| len.as_limbs()[0] as usize)
}
