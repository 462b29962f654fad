//! EVM value types and the storage-word arithmetic the diamond layout needs.
//!
//! `Address`, `B256`, `U256`, `Selector` and `Bytes` are the `alloy-primitives`
//! types. This module only adds what a diamond needs on top of them: selector
//! derivation, ERC-165 interface ids, Solidity slot arithmetic and stable
//! addresses for named test accounts.

pub use alloy_primitives::{Address, B256, Bytes, Selector, U256, hex, keccak256};

/// Selector of a canonical signature such as `transferOwnership(address)`.
///
/// The signature is hashed as given: no spaces, no parameter names.
#[must_use]
pub fn selector(signature: &str) -> Selector {
    let digest = keccak256(signature.as_bytes());
    Selector::new([digest[0], digest[1], digest[2], digest[3]])
}

/// Routing key of raw calldata, zero-padding input shorter than four bytes.
#[must_use]
pub fn calldata_selector(data: &[u8]) -> Selector {
    let mut out = [0u8; 4];
    let n = data.len().min(4);
    out[..n].copy_from_slice(&data[..n]);
    Selector::new(out)
}

/// ERC-165 interface id: XOR of every selector in the interface.
#[must_use]
pub const fn interface_id(selectors: &[[u8; 4]]) -> Selector {
    let mut id = [0u8; 4];
    let mut i = 0;
    while i < selectors.len() {
        let mut b = 0;
        while b < 4 {
            id[b] ^= selectors[i][b];
            b += 1;
        }
        i += 1;
    }
    Selector::new(id)
}

/// Stable address for a named account: low 20 bytes of `keccak256(label)`.
#[must_use]
pub fn label_address(label: &str) -> Address {
    Address::from_word(keccak256(label.as_bytes()))
}

/// Big-endian storage word of an integer.
#[must_use]
pub fn word(value: U256) -> B256 {
    B256::new(value.to_be_bytes())
}

#[must_use]
pub fn word_from_u64(value: u64) -> B256 {
    word(U256::from(value))
}

/// Integer value of a storage word.
#[must_use]
pub fn uint(word: B256) -> U256 {
    U256::from_be_bytes(word.0)
}

/// `base + n` modulo 2^256: the slot of the n-th field after `base`.
#[must_use]
pub fn slot_offset(base: B256, n: u64) -> B256 {
    word(uint(base).wrapping_add(U256::from(n)))
}

/// Solidity mapping slot: `keccak256(key ‖ base)`.
#[must_use]
pub fn mapping_slot(key: B256, base: B256) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(key.as_slice());
    preimage[32..].copy_from_slice(base.as_slice());
    keccak256(preimage)
}
