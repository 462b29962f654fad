//! Storage layout of the diamond's own namespace.
//!
//! ```text
//! base     = keccak256("diamond.standard.diamond.storage")
//! base + 0 : contract owner (address, left-padded)
//! base + 1 : supportedInterfaces mapping (bytes4 => bool)
//! ```
//!
//! The selector routing itself is held natively by the proxy, not in slots.

use std::sync::LazyLock;

use diamond_types::{
    Address, B256, DiamondError, DiamondEvent, Selector, keccak256, mapping_slot, slot_offset,
    word_from_u64,
};

use crate::state::DiamondState;

pub const DIAMOND_STORAGE_NAMESPACE: &str = "diamond.standard.diamond.storage";

static DIAMOND_STORAGE_POSITION: LazyLock<B256> =
    LazyLock::new(|| keccak256(DIAMOND_STORAGE_NAMESPACE));

#[must_use]
pub fn diamond_storage_position() -> B256 {
    *DIAMOND_STORAGE_POSITION
}

#[must_use]
pub fn owner_slot() -> B256 {
    diamond_storage_position()
}

/// Slot of `supportedInterfaces[interface_id]`.
#[must_use]
pub fn supported_interface_slot(interface_id: Selector) -> B256 {
    let mut key = B256::ZERO;
    key[..4].copy_from_slice(interface_id.as_slice());
    mapping_slot(key, slot_offset(diamond_storage_position(), 1))
}

#[must_use]
pub fn owner(state: &DiamondState) -> Address {
    Address::from_word(state.sload(&owner_slot()))
}

pub(crate) fn set_owner(state: &mut DiamondState, new_owner: Address) -> Address {
    let previous_owner = owner(state);
    state.sstore(owner_slot(), new_owner.into_word());
    state.emit(DiamondEvent::OwnershipTransferred {
        previous_owner,
        new_owner,
    });
    tracing::debug!(previous = %previous_owner, new = %new_owner, "Ownership transfer staged");
    previous_owner
}

pub(crate) fn enforce_is_contract_owner(
    state: &DiamondState,
    caller: Address,
) -> Result<(), DiamondError> {
    let owner = owner(state);
    if caller != owner {
        return Err(DiamondError::NotContractOwner { caller, owner });
    }
    Ok(())
}

#[must_use]
pub fn supports_interface(state: &DiamondState, interface_id: Selector) -> bool {
    !state.sload(&supported_interface_slot(interface_id)).is_zero()
}

pub(crate) fn set_supports_interface(state: &mut DiamondState, interface_id: Selector, supported: bool) {
    state.sstore(
        supported_interface_slot(interface_id),
        word_from_u64(u64::from(supported)),
    );
}
