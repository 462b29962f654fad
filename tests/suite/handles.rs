//! Handle registry facet routed through a diamond

use alloy_sol_types::SolEvent;
use diamond_core::Facet;
use diamond_core::facets::{HandleRegistryFacet, token_id};
use diamond_types::abi::IHandleRegistry;
use diamond_types::{Address, B256, DiamondError, DiamondEvent, FacetCut, U256, label_address, word};

use crate::common::Harness;

fn with_handles() -> Harness {
    let mut h = Harness::new();
    let handles = h.handles;
    h.cut(vec![FacetCut::add(handles, HandleRegistryFacet.selectors())])
        .unwrap();
    h
}

fn mint(h: &mut Harness, to: Address, handle: &str) -> Result<U256, DiamondError> {
    h.client().call(&IHandleRegistry::mintHandleCall {
        to,
        handle: handle.to_string(),
    })
}

#[test]
fn mint_then_resolve() {
    let mut h = with_handles();
    let wallet = label_address("wallet1");
    mint(&mut h, wallet, "test").unwrap();

    let mut client = h.client();
    let id = client
        .call(&IHandleRegistry::getTokenIdCall {
            handle: "test".into(),
        })
        .unwrap();
    assert_eq!(id, token_id("test"));
    let name = client
        .call(&IHandleRegistry::getLocalNameCall { tokenId: id })
        .unwrap();
    assert_eq!(name, "test");
    let owner = client
        .call(&IHandleRegistry::ownerOfCall { tokenId: id })
        .unwrap();
    assert_eq!(owner, wallet);
}

#[test]
fn mint_emits_transfer_log() {
    let mut h = with_handles();
    let wallet = label_address("wallet1");
    mint(&mut h, wallet, "logged").unwrap();
    let diamond = h.diamond.address();
    match h.diamond.events().last() {
        Some(DiamondEvent::Log {
            emitter, topics, ..
        }) => {
            assert_eq!(*emitter, diamond);
            assert_eq!(
                topics,
                &vec![
                    IHandleRegistry::Transfer::SIGNATURE_HASH,
                    B256::ZERO,
                    wallet.into_word(),
                    word(token_id("logged")),
                ]
            );
        }
        other => panic!("expected a log, got {other:?}"),
    }
}

#[test]
fn duplicate_and_invalid_handles_revert() {
    let mut h = with_handles();
    let wallet = label_address("wallet1");
    mint(&mut h, wallet, "test").unwrap();
    let events = h.diamond.events().len();

    let cases = [
        (wallet, "test", "ERC721InvalidSender"),
        (label_address("wallet2"), "test", "ERC721InvalidSender"),
        (wallet, "Test", "HandleContainsInvalidCharacters"),
        (wallet, "", "HandleLengthOutOfRange"),
        (Address::ZERO, "fresh", "InvalidReceiver"),
    ];
    for (to, handle, expected) in cases {
        let err = mint(&mut h, to, handle).unwrap_err();
        assert_eq!(err.name(), expected, "{handle:?}");
    }
    assert_eq!(h.diamond.events().len(), events);
}

#[test]
fn long_names_span_storage_words() {
    let mut h = with_handles();
    let handle = "a_rather_long_handle_of_32_chars";
    assert_eq!(handle.len(), 32);
    mint(&mut h, label_address("wallet2"), handle).unwrap();
    let name = h
        .client()
        .call(&IHandleRegistry::getLocalNameCall {
            tokenId: token_id(handle),
        })
        .unwrap();
    assert_eq!(name, handle);
}

#[test]
fn unknown_token_reverts() {
    let mut h = with_handles();
    let err = h
        .client()
        .call(&IHandleRegistry::getLocalNameCall {
            tokenId: U256::from(1),
        })
        .unwrap_err();
    assert_eq!(err.name(), "NonexistentToken");
}
