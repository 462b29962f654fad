//! Typed client that talks to a diamond through calldata only.
//!
//! Every method builds ABI-encoded calldata, sends it through
//! [`Diamond::call`], and decodes the result, the same way an off-chain
//! caller would. Nothing here reads diamond state directly.

use alloy_sol_types::SolCall;
use diamond_types::abi::{IDiamondCut, IDiamondLoupe, IERC165, IERC173};
use diamond_types::{Address, Call, DiamondCutCall, DiamondError, FacetCut, FacetInfo, Selector};

use crate::code::CodeRegistry;
use crate::diamond::Diamond;

pub struct DiamondClient<'a> {
    diamond: &'a mut Diamond,
    code: &'a CodeRegistry,
    caller: Address,
}

impl<'a> DiamondClient<'a> {
    pub fn new(diamond: &'a mut Diamond, code: &'a CodeRegistry, caller: Address) -> Self {
        Self {
            diamond,
            code,
            caller,
        }
    }

    /// Same diamond, different `msg.sender`.
    #[must_use]
    pub fn as_caller(self, caller: Address) -> Self {
        Self { caller, ..self }
    }

    #[must_use]
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Send raw calldata.
    pub fn call_raw(&mut self, data: Vec<u8>) -> Result<Vec<u8>, DiamondError> {
        self.diamond.call(self.code, &Call::new(self.caller, data))
    }

    /// Send a typed call and decode what it returns.
    pub fn call<C: SolCall>(&mut self, call: &C) -> Result<C::Return, DiamondError> {
        let raw = self.call_raw(call.abi_encode())?;
        Ok(C::abi_decode_returns(&raw)?)
    }

    pub fn diamond_cut(
        &mut self,
        cuts: Vec<FacetCut>,
        init: Address,
        calldata: Vec<u8>,
    ) -> Result<(), DiamondError> {
        let call = DiamondCutCall {
            cuts,
            init,
            calldata,
        };
        self.call(&IDiamondCut::diamondCutCall::from(&call))
            .map(|_| ())
    }

    pub fn owner(&mut self) -> Result<Address, DiamondError> {
        self.call(&IERC173::ownerCall {})
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), DiamondError> {
        self.call(&IERC173::transferOwnershipCall {
            newOwner: new_owner,
        })
        .map(|_| ())
    }

    pub fn facets(&mut self) -> Result<Vec<FacetInfo>, DiamondError> {
        let facets = self.call(&IDiamondLoupe::facetsCall {})?;
        Ok(facets.into_iter().map(FacetInfo::from).collect())
    }

    pub fn facet_function_selectors(&mut self, facet: Address) -> Result<Vec<Selector>, DiamondError> {
        self.call(&IDiamondLoupe::facetFunctionSelectorsCall { facet })
    }

    pub fn facet_addresses(&mut self) -> Result<Vec<Address>, DiamondError> {
        self.call(&IDiamondLoupe::facetAddressesCall {})
    }

    pub fn facet_address(&mut self, selector: Selector) -> Result<Address, DiamondError> {
        self.call(&IDiamondLoupe::facetAddressCall {
            functionSelector: selector,
        })
    }

    pub fn supports_interface(&mut self, interface_id: Selector) -> Result<bool, DiamondError> {
        self.call(&IERC165::supportsInterfaceCall {
            interfaceId: interface_id,
        })
    }
}
