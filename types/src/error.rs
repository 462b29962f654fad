use thiserror::Error;

use crate::cut::FacetCutAction;
use crate::primitives::{Address, Selector};

/// Every way a call into the diamond can fail.
///
/// All failures are fatal to the call: the proxy rolls back whatever the call
/// changed before returning one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiamondError {
    #[error("function not found: {selector}")]
    FunctionNotFound { selector: Selector },
    #[error("selector {selector} already exists")]
    SelectorAlreadyExists { selector: Selector },
    #[error("selector {selector} not found")]
    SelectorNotFound { selector: Selector },
    #[error("no selectors provided in {action} cut for facet {facet}")]
    NoSelectorsProvided {
        action: FacetCutAction,
        facet: Address,
    },
    #[error("cannot replace selector {selector} with the facet that already serves it ({facet})")]
    CannotReplaceWithSameFacet { selector: Selector, facet: Address },
    #[error("facet address is zero in {action} cut")]
    FacetAddressIsZero { action: FacetCutAction },
    #[error("no code at address {address}")]
    NoCodeAtAddress { address: Address },
    #[error("remove cut facet address must be zero, got {facet}")]
    RemoveFacetAddressMustBeZero { facet: Address },
    #[error("selector {selector} is reserved by the proxy")]
    ReservedSelector { selector: Selector },
    #[error("initialization target is zero but payload is not empty")]
    InitializationTargetIsZero,
    #[error("initialization payload is empty for target {target}")]
    InitializationPayloadIsEmpty { target: Address },
    #[error("initialization via {target} failed: {reason}")]
    InitializationFailed {
        target: Address,
        reason: Box<DiamondError>,
    },
    #[error("caller {caller} is not the contract owner {owner}")]
    NotContractOwner { caller: Address, owner: Address },
    #[error("address {address} already has code")]
    AddressInUse { address: Address },
    #[error("invalid calldata: {reason}")]
    InvalidCalldata { reason: String },
    #[error("execution reverted: {reason}")]
    Reverted { reason: String },
}

impl From<alloy_sol_types::Error> for DiamondError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::InvalidCalldata {
            reason: err.to_string(),
        }
    }
}

impl DiamondError {
    /// Facet-defined failure, identified by a custom error name.
    pub fn revert(reason: impl Into<String>) -> Self {
        Self::Reverted {
            reason: reason.into(),
        }
    }

    /// Custom-error style name, as a revert would be matched by an off-chain client.
    ///
    /// Facet reverts report their own reason.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::FunctionNotFound { .. } => "FunctionNotFound",
            Self::SelectorAlreadyExists { .. } => "SelectorAlreadyExists",
            Self::SelectorNotFound { .. } => "SelectorNotFound",
            Self::NoSelectorsProvided { .. } => "NoSelectorsProvided",
            Self::CannotReplaceWithSameFacet { .. } => "CannotReplaceWithSameFacet",
            Self::FacetAddressIsZero { .. } => "FacetAddressIsZero",
            Self::NoCodeAtAddress { .. } => "NoCodeAtAddress",
            Self::RemoveFacetAddressMustBeZero { .. } => "RemoveFacetAddressMustBeZero",
            Self::ReservedSelector { .. } => "ReservedSelector",
            Self::InitializationTargetIsZero => "InitializationTargetIsZero",
            Self::InitializationPayloadIsEmpty { .. } => "InitializationPayloadIsEmpty",
            Self::InitializationFailed { .. } => "InitializationFailed",
            Self::NotContractOwner { .. } => "NotContractOwner",
            Self::AddressInUse { .. } => "AddressInUse",
            Self::InvalidCalldata { .. } => "InvalidCalldata",
            Self::Reverted { reason } => reason,
        }
    }
}
