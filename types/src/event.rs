//! Events recorded by the proxy for off-chain observers.

use serde::Serialize;

use crate::cut::FacetCut;
use crate::primitives::{Address, B256, Bytes};

/// Audit trail entry. Reverted calls leave no events behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiamondEvent {
    /// One per applied cut batch.
    DiamondCut {
        cuts: Vec<FacetCut>,
        init: Address,
        calldata: Bytes,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    /// Arbitrary log emitted by facet logic.
    Log {
        emitter: Address,
        topics: Vec<B256>,
        data: Bytes,
    },
}
