use diamond_types::abi::IDiamondInit::IDiamondInitCalls;
use diamond_types::{DiamondError, Selector, selectors};

use crate::code::{Facet, decode_call, interface_selectors};
use crate::context::CallContext;
use crate::layout;

/// Interfaces every diamond built from the standard facets implements.
pub const STANDARD_INTERFACES: [Selector; 4] = [
    selectors::IERC165_ID,
    selectors::IDIAMOND_CUT_ID,
    selectors::IDIAMOND_LOUPE_ID,
    selectors::IERC173_ID,
];

/// Initializer delegated to at construction: seeds ERC-165 support flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiamondInit;

impl Facet for DiamondInit {
    fn name(&self) -> &'static str {
        "DiamondInit"
    }

    fn selectors(&self) -> Vec<Selector> {
        interface_selectors(IDiamondInitCalls::SELECTORS)
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        let IDiamondInitCalls::init(_) = decode_call::<IDiamondInitCalls>(selector, args)?;
        for id in STANDARD_INTERFACES {
            layout::set_supports_interface(ctx.state_mut(), id, true);
        }
        Ok(Vec::new())
    }
}
