use alloy_sol_types::SolValue;
use diamond_types::abi::IERC173::IERC173Calls;
use diamond_types::{DiamondError, Selector};

use crate::code::{Facet, decode_call, interface_selectors};
use crate::context::CallContext;
use crate::layout;

/// ERC-173 ownership over the diamond storage namespace.
///
/// The owner recorded here is the one the proxy checks before a cut.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipFacet;

impl Facet for OwnershipFacet {
    fn name(&self) -> &'static str {
        "OwnershipFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        interface_selectors(IERC173Calls::SELECTORS)
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        match decode_call::<IERC173Calls>(selector, args)? {
            IERC173Calls::owner(_) => Ok(layout::owner(ctx.state()).abi_encode()),
            IERC173Calls::transferOwnership(call) => {
                layout::enforce_is_contract_owner(ctx.state(), ctx.msg_sender())?;
                layout::set_owner(ctx.state_mut(), call.newOwner);
                Ok(Vec::new())
            }
        }
    }
}
