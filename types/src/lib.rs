//! Core domain types for the diamond proxy.
//!
//! This crate contains pure domain types with no IO and no mutable state:
//! identifiers, the Solidity interfaces, cut requests, events and the error
//! taxonomy. Everything here can be used from any layer, including off-chain
//! clients that only build calldata.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

pub mod abi;
mod call;
mod cut;
mod error;
mod event;
mod primitives;
pub mod selectors;

pub use call::Call;
pub use cut::{DiamondCutCall, FacetCut, FacetCutAction, FacetInfo};
pub use error::DiamondError;
pub use event::DiamondEvent;
pub use primitives::{
    Address, B256, Bytes, Selector, U256, calldata_selector, hex, interface_id, keccak256,
    label_address, mapping_slot, selector, slot_offset, uint, word, word_from_u64,
};
