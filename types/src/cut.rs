//! Facet cut requests and loupe records, with their ABI counterparts.

use std::fmt;

use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::abi::{IDiamondCut, IDiamondLoupe};
use crate::error::DiamondError;
use crate::primitives::{Address, Bytes, Selector};

/// What a cut does to its selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FacetCutAction {
    Add = 0,
    Replace = 1,
    Remove = 2,
}

impl FacetCutAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for FacetCutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for FacetCutAction {
    type Error = DiamondError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Add),
            1 => Ok(Self::Replace),
            2 => Ok(Self::Remove),
            _ => Err(DiamondError::InvalidCalldata {
                reason: format!("unknown FacetCutAction {value}"),
            }),
        }
    }
}

/// One requested change to the selector-to-facet mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCut {
    pub facet_address: Address,
    pub action: FacetCutAction,
    pub function_selectors: Vec<Selector>,
}

impl FacetCut {
    #[must_use]
    pub fn add(facet_address: Address, function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Add,
            function_selectors,
        }
    }

    #[must_use]
    pub fn replace(facet_address: Address, function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address,
            action: FacetCutAction::Replace,
            function_selectors,
        }
    }

    /// Removal is not facet-specific; the facet address is always zero.
    #[must_use]
    pub fn remove(function_selectors: Vec<Selector>) -> Self {
        Self {
            facet_address: Address::ZERO,
            action: FacetCutAction::Remove,
            function_selectors,
        }
    }
}

impl From<&FacetCut> for IDiamondCut::FacetCut {
    fn from(cut: &FacetCut) -> Self {
        Self {
            facetAddress: cut.facet_address,
            action: cut.action as u8,
            functionSelectors: cut.function_selectors.clone(),
        }
    }
}

impl TryFrom<IDiamondCut::FacetCut> for FacetCut {
    type Error = DiamondError;

    fn try_from(cut: IDiamondCut::FacetCut) -> Result<Self, Self::Error> {
        Ok(Self {
            facet_address: cut.facetAddress,
            action: FacetCutAction::try_from(cut.action)?,
            function_selectors: cut.functionSelectors,
        })
    }
}

/// A facet and the selectors it currently serves, as reported by the loupe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetInfo {
    pub facet_address: Address,
    pub function_selectors: Vec<Selector>,
}

impl From<FacetInfo> for IDiamondLoupe::Facet {
    fn from(info: FacetInfo) -> Self {
        Self {
            facetAddress: info.facet_address,
            functionSelectors: info.function_selectors,
        }
    }
}

impl From<IDiamondLoupe::Facet> for FacetInfo {
    fn from(facet: IDiamondLoupe::Facet) -> Self {
        Self {
            facet_address: facet.facetAddress,
            function_selectors: facet.functionSelectors,
        }
    }
}

/// Arguments of `diamondCut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiamondCutCall {
    pub cuts: Vec<FacetCut>,
    pub init: Address,
    pub calldata: Vec<u8>,
}

impl DiamondCutCall {
    /// Full calldata including the `diamondCut` selector.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        IDiamondCut::diamondCutCall::from(self).abi_encode()
    }

    /// Decode the argument body (calldata without its selector).
    pub fn decode(args: &[u8]) -> Result<Self, DiamondError> {
        IDiamondCut::diamondCutCall::abi_decode_raw(args)?.try_into()
    }
}

impl From<&DiamondCutCall> for IDiamondCut::diamondCutCall {
    fn from(call: &DiamondCutCall) -> Self {
        Self {
            _diamondCut: call.cuts.iter().map(IDiamondCut::FacetCut::from).collect(),
            _init: call.init,
            _calldata: Bytes::copy_from_slice(&call.calldata),
        }
    }
}

impl TryFrom<IDiamondCut::diamondCutCall> for DiamondCutCall {
    type Error = DiamondError;

    fn try_from(call: IDiamondCut::diamondCutCall) -> Result<Self, Self::Error> {
        let cuts = call
            ._diamondCut
            .into_iter()
            .map(FacetCut::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            cuts,
            init: call._init,
            calldata: call._calldata.to_vec(),
        })
    }
}
