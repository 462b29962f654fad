//! Shared test utilities and fixtures

#![allow(dead_code)]

use diamond_core::facets::{
    DataFacet, DiamondInit, DiamondLoupeFacet, HandleRegistryFacet, HashingDataFacet,
    OwnershipFacet,
};
use diamond_core::{CodeRegistry, Diamond, DiamondArgs, DiamondClient, Facet};
use alloy_sol_types::SolCall;
use diamond_types::abi::IDataFacet;
use diamond_types::{Address, B256, FacetCut, Selector, label_address, selector, selectors};

/// A diamond built from the standard facets, with the sample facets deployed
/// but not yet routed.
pub struct Harness {
    pub code: CodeRegistry,
    pub diamond: Diamond,
    pub owner: Address,
    pub loupe: Address,
    pub ownership: Address,
    pub init: Address,
    pub data: Address,
    pub hashing_data: Address,
    pub handles: Address,
}

impl Harness {
    pub fn new() -> Self {
        let mut code = CodeRegistry::new();
        let owner = label_address("owner");
        let loupe = code.deploy(DiamondLoupeFacet);
        let ownership = code.deploy(OwnershipFacet);
        let init = code.deploy(DiamondInit);
        let data = code.deploy(DataFacet);
        let hashing_data = code.deploy(HashingDataFacet);
        let handles = code.deploy(HandleRegistryFacet);
        let diamond = Diamond::deploy(
            &mut code,
            &[
                FacetCut::add(loupe, DiamondLoupeFacet.selectors()),
                FacetCut::add(ownership, OwnershipFacet.selectors()),
            ],
            DiamondArgs::new(owner).with_init(init, selectors::INIT.to_vec()),
        )
        .expect("standard diamond deploys");
        Self {
            code,
            diamond,
            owner,
            loupe,
            ownership,
            init,
            data,
            hashing_data,
            handles,
        }
    }

    pub fn client(&mut self) -> DiamondClient<'_> {
        DiamondClient::new(&mut self.diamond, &self.code, self.owner)
    }

    pub fn client_as(&mut self, caller: Address) -> DiamondClient<'_> {
        DiamondClient::new(&mut self.diamond, &self.code, caller)
    }

    pub fn cut(&mut self, cuts: Vec<FacetCut>) -> Result<(), diamond_types::DiamondError> {
        self.client().diamond_cut(cuts, Address::ZERO, Vec::new())
    }
}

pub fn sig(signature: &str) -> Selector {
    selector(signature)
}

pub fn set_data_a(value: B256) -> Vec<u8> {
    IDataFacet::setDataACall { dataA: value }.abi_encode()
}

pub fn get_data_a() -> Vec<u8> {
    IDataFacet::getDataACall {}.abi_encode()
}
