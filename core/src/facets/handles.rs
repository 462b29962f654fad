//! Handle registry: mints unique lowercase names as token ids.
//!
//! ```text
//! base     = keccak256("diamond.handles.storage")
//! base + 0 : owners mapping (tokenId => address)
//! base + 1 : names mapping  (tokenId => string)
//! ```

use std::sync::LazyLock;

use alloy_sol_types::{SolEvent, SolValue};
use diamond_types::abi::IHandleRegistry::{self, IHandleRegistryCalls};
use diamond_types::{
    Address, B256, Bytes, DiamondError, Selector, U256, keccak256, mapping_slot, slot_offset,
    uint, word,
};

use crate::code::{Facet, decode_call, interface_selectors};
use crate::context::CallContext;

pub const HANDLES_STORAGE_NAMESPACE: &str = "diamond.handles.storage";

pub const MAX_HANDLE_LENGTH: usize = 32;

static HANDLES_BASE: LazyLock<B256> = LazyLock::new(|| keccak256(HANDLES_STORAGE_NAMESPACE));

/// Token id of a handle: its keccak digest read as a uint256.
#[must_use]
pub fn token_id(handle: &str) -> U256 {
    uint(keccak256(handle))
}

/// Check length (1..=32) and alphabet (`[a-z0-9_]`).
pub fn validate_handle(handle: &str) -> Result<(), DiamondError> {
    if handle.is_empty() || handle.len() > MAX_HANDLE_LENGTH {
        return Err(DiamondError::revert("HandleLengthOutOfRange"));
    }
    let valid = handle
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if !valid {
        return Err(DiamondError::revert("HandleContainsInvalidCharacters"));
    }
    Ok(())
}

fn owner_slot(id: U256) -> B256 {
    mapping_slot(word(id), *HANDLES_BASE)
}

fn name_slot(id: U256) -> B256 {
    mapping_slot(word(id), slot_offset(*HANDLES_BASE, 1))
}

fn owner_of(ctx: &CallContext<'_>, id: U256) -> Result<Address, DiamondError> {
    let owner = Address::from_word(ctx.sload(&owner_slot(id)));
    if owner.is_zero() {
        return Err(DiamondError::revert("NonexistentToken"));
    }
    Ok(owner)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HandleRegistryFacet;

impl HandleRegistryFacet {
    fn mint(ctx: &mut CallContext<'_>, to: Address, handle: &str) -> Result<U256, DiamondError> {
        validate_handle(handle)?;
        if to.is_zero() {
            return Err(DiamondError::revert("InvalidReceiver"));
        }
        let id = token_id(handle);
        // ERC-721 `_mint` over an existing token.
        if !ctx.sload(&owner_slot(id)).is_zero() {
            return Err(DiamondError::revert("ERC721InvalidSender"));
        }
        ctx.sstore(owner_slot(id), to.into_word());
        ctx.store_bytes(name_slot(id), handle.as_bytes())?;
        ctx.emit_log(
            vec![
                IHandleRegistry::Transfer::SIGNATURE_HASH,
                B256::ZERO,
                to.into_word(),
                word(id),
            ],
            Bytes::new(),
        );
        tracing::debug!(handle, %to, "Handle minted");
        Ok(id)
    }
}

impl Facet for HandleRegistryFacet {
    fn name(&self) -> &'static str {
        "HandleRegistryFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        interface_selectors(IHandleRegistryCalls::SELECTORS)
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        match decode_call::<IHandleRegistryCalls>(selector, args)? {
            IHandleRegistryCalls::mintHandle(call) => {
                Ok(Self::mint(ctx, call.to, &call.handle)?.abi_encode())
            }
            IHandleRegistryCalls::getTokenId(call) => Ok(token_id(&call.handle).abi_encode()),
            IHandleRegistryCalls::getLocalName(call) => {
                owner_of(ctx, call.tokenId)?;
                let name = String::from_utf8(ctx.load_bytes(&name_slot(call.tokenId))?)
                    .map_err(|_| DiamondError::revert("CorruptHandleName"))?;
                Ok(name.abi_encode())
            }
            IHandleRegistryCalls::ownerOf(call) => Ok(owner_of(ctx, call.tokenId)?.abi_encode()),
        }
    }
}
