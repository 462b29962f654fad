//! Dispatch, ownership and ERC-165 through calldata

use diamond_core::facets::STANDARD_INTERFACES;
use diamond_types::{
    Address, Call, DiamondError, DiamondEvent, FacetCut, Selector, calldata_selector,
    label_address, selectors,
};

use crate::common::{Harness, sig};

#[test]
fn standard_diamond_answers_loupe_queries() {
    let mut h = Harness::new();
    let (loupe, ownership) = (h.loupe, h.ownership);
    let mut client = h.client();
    let mut expected = vec![loupe, ownership];
    expected.sort_unstable();
    assert_eq!(client.facet_addresses().unwrap(), expected);
    assert_eq!(client.facets().unwrap().len(), 2);
    assert_eq!(client.facet_address(selectors::OWNER).unwrap(), ownership);
    assert_eq!(client.facet_address(selectors::FACETS).unwrap(), loupe);
}

#[test]
fn diamond_cut_is_not_a_routed_selector() {
    let mut h = Harness::new();
    let mut client = h.client();
    assert_eq!(
        client.facet_address(selectors::DIAMOND_CUT).unwrap(),
        Address::ZERO
    );
}

#[test]
fn init_seeds_supported_interfaces() {
    let mut h = Harness::new();
    let mut client = h.client();
    for id in STANDARD_INTERFACES {
        assert!(client.supports_interface(id).unwrap(), "{id}");
    }
    assert!(!client.supports_interface(Selector::new([0xff; 4])).unwrap());
}

#[test]
fn calldata_shorter_than_a_selector_is_not_found() {
    let mut h = Harness::new();
    for data in [vec![], vec![0x8d], vec![0x8d, 0xa5, 0xcb]] {
        let err = h.diamond.call(&h.code, &Call::new(h.owner, data.clone())).unwrap_err();
        assert_eq!(
            err,
            DiamondError::FunctionNotFound {
                selector: calldata_selector(&data)
            }
        );
    }
}

#[test]
fn unknown_selector_is_not_found() {
    let mut h = Harness::new();
    let selector = sig("doesNotExist(uint256)");
    let err = h.client().call_raw(selector.to_vec()).unwrap_err();
    assert_eq!(err, DiamondError::FunctionNotFound { selector });
}

#[test]
fn malformed_arguments_are_rejected() {
    let mut h = Harness::new();
    let mut data = selectors::TRANSFER_OWNERSHIP.to_vec();
    data.extend_from_slice(&[0u8; 7]);
    let err = h.client().call_raw(data).unwrap_err();
    assert_eq!(err.name(), "InvalidCalldata");
}

#[test]
fn ownership_gates_diamond_cut() {
    let mut h = Harness::new();
    let (owner, data) = (h.owner, h.data);
    let next = label_address("next owner");
    let cut = vec![FacetCut::add(data, vec![sig("getDataA()")])];

    let err = h
        .client_as(next)
        .diamond_cut(cut.clone(), Address::ZERO, Vec::new())
        .unwrap_err();
    assert_eq!(err, DiamondError::NotContractOwner { caller: next, owner });

    h.client().transfer_ownership(next).unwrap();
    assert_eq!(h.diamond.owner(), next);
    assert_eq!(
        h.diamond.events().last(),
        Some(&DiamondEvent::OwnershipTransferred {
            previous_owner: owner,
            new_owner: next
        })
    );

    assert!(h.cut(cut.clone()).is_err());
    h.client_as(next)
        .diamond_cut(cut, Address::ZERO, Vec::new())
        .unwrap();
}

#[test]
fn renouncing_ownership_freezes_the_table() {
    let mut h = Harness::new();
    let data = h.data;
    h.client().transfer_ownership(Address::ZERO).unwrap();
    let err = h
        .cut(vec![FacetCut::add(data, vec![sig("getDataA()")])])
        .unwrap_err();
    assert_eq!(err.name(), "NotContractOwner");
}
