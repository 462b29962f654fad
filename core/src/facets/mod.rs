//! Built-in facets.
//!
//! `DiamondLoupeFacet`, `OwnershipFacet` and `DiamondInit` make up the
//! standard diamond. The rest are sample business facets.

mod data;
mod handles;
mod init;
mod loupe;
mod ownership;

pub use data::{DATA_STORAGE_NAMESPACE, DataFacet, HashingDataFacet, data_slot};
pub use handles::{
    HANDLES_STORAGE_NAMESPACE, HandleRegistryFacet, MAX_HANDLE_LENGTH, token_id, validate_handle,
};
pub use init::{DiamondInit, STANDARD_INTERFACES};
pub use loupe::DiamondLoupeFacet;
pub use ownership::OwnershipFacet;
