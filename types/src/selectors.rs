//! Well-known selectors and interface ids of the standard diamond interfaces.

use alloy_sol_types::SolCall;

use crate::abi::{IDiamondCut, IDiamondInit, IDiamondLoupe, IERC165, IERC173};
use crate::primitives::{Selector, interface_id};

/// `diamondCut((address,uint8,bytes4[])[],address,bytes)`; also the IDiamondCut interface id.
pub const DIAMOND_CUT: Selector = Selector::new(IDiamondCut::diamondCutCall::SELECTOR);

pub const FACETS: Selector = Selector::new(IDiamondLoupe::facetsCall::SELECTOR);
pub const FACET_FUNCTION_SELECTORS: Selector =
    Selector::new(IDiamondLoupe::facetFunctionSelectorsCall::SELECTOR);
pub const FACET_ADDRESSES: Selector = Selector::new(IDiamondLoupe::facetAddressesCall::SELECTOR);
pub const FACET_ADDRESS: Selector = Selector::new(IDiamondLoupe::facetAddressCall::SELECTOR);

/// `supportsInterface(bytes4)`; also the IERC165 interface id.
pub const SUPPORTS_INTERFACE: Selector = Selector::new(IERC165::supportsInterfaceCall::SELECTOR);

pub const OWNER: Selector = Selector::new(IERC173::ownerCall::SELECTOR);
pub const TRANSFER_OWNERSHIP: Selector = Selector::new(IERC173::transferOwnershipCall::SELECTOR);

pub const INIT: Selector = Selector::new(IDiamondInit::initCall::SELECTOR);

pub const IERC165_ID: Selector = interface_id(IERC165::IERC165Calls::SELECTORS);
pub const IDIAMOND_CUT_ID: Selector = interface_id(IDiamondCut::IDiamondCutCalls::SELECTORS);
pub const IDIAMOND_LOUPE_ID: Selector = interface_id(IDiamondLoupe::IDiamondLoupeCalls::SELECTORS);
pub const IERC173_ID: Selector = interface_id(IERC173::IERC173Calls::SELECTORS);

/// Selectors the proxy serves itself; they can never be routed to a facet.
pub const RESERVED: &[Selector] = &[DIAMOND_CUT];
