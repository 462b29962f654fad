//! Cut processing through the public `diamondCut` entry point

use diamond_core::Facet;
use diamond_core::facets::{DataFacet, HashingDataFacet, data_slot};
use diamond_types::abi::IDataFacet;
use diamond_types::{Address, Bytes, DiamondError, DiamondEvent, FacetCut, keccak256, word_from_u64};

use crate::common::{Harness, get_data_a, set_data_a, sig};

#[test]
fn add_routes_every_selector_to_the_facet() {
    let mut h = Harness::new();
    let data = h.data;
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();

    let mut client = h.client();
    let mut expected = DataFacet.selectors();
    expected.sort_unstable();
    assert_eq!(client.facet_function_selectors(data).unwrap(), expected);
    assert_eq!(client.facet_address(sig("getDataA()")).unwrap(), data);
    assert!(client.facet_addresses().unwrap().contains(&data));
}

#[test]
fn replace_repoints_selectors() {
    let mut h = Harness::new();
    let (data, hashing) = (h.data, h.hashing_data);
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();
    h.cut(vec![FacetCut::replace(hashing, vec![sig("setDataA(bytes32)")])])
        .unwrap();

    let mut client = h.client();
    assert_eq!(client.facet_address(sig("setDataA(bytes32)")).unwrap(), hashing);
    assert_eq!(client.facet_address(sig("getDataA()")).unwrap(), data);
    assert_eq!(
        client.facet_function_selectors(hashing).unwrap(),
        vec![sig("setDataA(bytes32)")]
    );
}

#[test]
fn replace_with_same_facet_fails_without_changes() {
    let mut h = Harness::new();
    let data = h.data;
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();
    let routes = h.diamond.state().routes().clone();
    let events = h.diamond.events().len();

    let err = h
        .cut(vec![FacetCut::replace(data, vec![sig("getDataA()")])])
        .unwrap_err();
    assert_eq!(
        err,
        DiamondError::CannotReplaceWithSameFacet {
            selector: sig("getDataA()"),
            facet: data
        }
    );
    assert_eq!(h.diamond.state().routes(), &routes);
    assert_eq!(h.diamond.events().len(), events);
}

#[test]
fn bad_removes_fail_without_changes() {
    let mut h = Harness::new();
    let data = h.data;
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();
    let routes = h.diamond.state().routes().clone();

    let mut with_facet = FacetCut::remove(vec![sig("getDataA()")]);
    with_facet.facet_address = data;
    assert_eq!(
        h.cut(vec![with_facet]).unwrap_err(),
        DiamondError::RemoveFacetAddressMustBeZero { facet: data }
    );

    let unknown = sig("neverAdded()");
    assert_eq!(
        h.cut(vec![FacetCut::remove(vec![sig("getDataA()"), unknown])])
            .unwrap_err(),
        DiamondError::SelectorNotFound { selector: unknown }
    );
    assert_eq!(h.diamond.state().routes(), &routes);
}

#[test]
fn removing_all_selectors_drops_the_facet() {
    let mut h = Harness::new();
    let data = h.data;
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();
    h.cut(vec![FacetCut::remove(DataFacet.selectors())]).unwrap();

    let owner = h.owner;
    let mut client = h.client();
    assert!(client.facet_function_selectors(data).unwrap().is_empty());
    assert!(!client.facet_addresses().unwrap().contains(&data));
    assert_eq!(client.facet_address(sig("getDataA()")).unwrap(), Address::ZERO);
    let err = h
        .diamond
        .call(&h.code, &diamond_types::Call::new(owner, get_data_a()))
        .unwrap_err();
    assert_eq!(
        err,
        DiamondError::FunctionNotFound {
            selector: sig("getDataA()")
        }
    );
}

#[test]
fn add_then_remove_restores_the_table() {
    let mut h = Harness::new();
    let before = h.diamond.state().routes().clone();
    let data = h.data;
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();
    assert_ne!(h.diamond.state().routes(), &before);
    h.cut(vec![FacetCut::remove(DataFacet.selectors())]).unwrap();
    assert_eq!(h.diamond.state().routes(), &before);
    assert!(h.diamond.state().routes().is_consistent());
}

#[test]
fn upgrade_keeps_storage_and_changes_behaviour() {
    let mut h = Harness::new();
    let (data, hashing) = (h.data, h.hashing_data);
    h.cut(vec![FacetCut::add(data, DataFacet.selectors())]).unwrap();

    let value = keccak256("first value");
    let mut client = h.client();
    client.call_raw(set_data_a(value)).unwrap();
    let read = client.call(&IDataFacet::getDataACall {}).unwrap();
    assert_eq!(read, value);

    h.cut(vec![FacetCut::replace(hashing, HashingDataFacet.selectors())])
        .unwrap();
    let mut client = h.client();
    let raw = client.call_raw(get_data_a()).unwrap();
    assert_eq!(raw, value.to_vec());

    client.call_raw(set_data_a(value)).unwrap();
    assert_eq!(h.diamond.storage_at(&data_slot()), keccak256(value));
}

#[test]
fn batch_is_all_or_nothing() {
    let mut h = Harness::new();
    let (data, hashing) = (h.data, h.hashing_data);
    let routes = h.diamond.state().routes().clone();
    let events = h.diamond.events().to_vec();

    let err = h
        .cut(vec![
            FacetCut::add(data, DataFacet.selectors()),
            FacetCut::add(hashing, HashingDataFacet.selectors()),
        ])
        .unwrap_err();
    assert_eq!(
        err,
        DiamondError::SelectorAlreadyExists {
            selector: sig("setDataA(bytes32)")
        }
    );
    assert_eq!(h.diamond.state().routes(), &routes);
    assert_eq!(h.diamond.events(), events.as_slice());
}

#[test]
fn successful_cut_is_announced_once() {
    let mut h = Harness::new();
    let data = h.data;
    let before = h.diamond.events().len();
    let cuts = vec![FacetCut::add(data, DataFacet.selectors())];
    h.cut(cuts.clone()).unwrap();
    assert_eq!(h.diamond.events().len(), before + 1);
    assert_eq!(
        h.diamond.events().last(),
        Some(&DiamondEvent::DiamondCut {
            cuts,
            init: Address::ZERO,
            calldata: Bytes::new(),
        })
    );
}

#[test]
fn initializer_failure_rolls_back_the_batch() {
    let mut h = Harness::new();
    let (data, init) = (h.data, h.init);
    let routes = h.diamond.state().routes().clone();
    let err = h
        .client()
        .diamond_cut(
            vec![FacetCut::add(data, DataFacet.selectors())],
            init,
            sig("missing()").to_vec(),
        )
        .unwrap_err();
    assert!(matches!(err, DiamondError::InitializationFailed { target, .. } if target == init));
    assert_eq!(h.diamond.state().routes(), &routes);
}

#[test]
fn initializer_runs_in_diamond_storage() {
    let mut h = Harness::new();
    let (data, hashing) = (h.data, h.hashing_data);
    h.cut(vec![FacetCut::add(hashing, HashingDataFacet.selectors())])
        .unwrap();
    // Seed storage through a facet used as an initializer.
    let value = word_from_u64(42);
    h.client()
        .diamond_cut(Vec::new(), data, set_data_a(value))
        .unwrap();
    assert_eq!(h.diamond.storage_at(&data_slot()), value);
}
