use alloy_sol_types::{SolInterface, SolValue};
use diamond_types::abi::IDiamondLoupe::{self, IDiamondLoupeCalls};
use diamond_types::abi::IERC165::IERC165Calls;
use diamond_types::{DiamondError, Selector};

use crate::code::{Facet, decode_call, interface_selectors};
use crate::context::CallContext;
use crate::layout;
use crate::loupe::Loupe;

/// EIP-2535 loupe functions plus ERC-165 `supportsInterface`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiamondLoupeFacet;

impl Facet for DiamondLoupeFacet {
    fn name(&self) -> &'static str {
        "DiamondLoupeFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        let mut out = interface_selectors(IDiamondLoupeCalls::SELECTORS);
        out.extend(interface_selectors(IERC165Calls::SELECTORS));
        out
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        if IERC165Calls::valid_selector(selector.0) {
            let IERC165Calls::supportsInterface(call) = decode_call::<IERC165Calls>(selector, args)?;
            return Ok(layout::supports_interface(ctx.state(), call.interfaceId).abi_encode());
        }
        let loupe = Loupe::new(ctx.routes());
        let out = match decode_call::<IDiamondLoupeCalls>(selector, args)? {
            IDiamondLoupeCalls::facets(_) => loupe
                .facets()
                .into_iter()
                .map(IDiamondLoupe::Facet::from)
                .collect::<Vec<_>>()
                .abi_encode(),
            IDiamondLoupeCalls::facetFunctionSelectors(call) => {
                loupe.facet_function_selectors(call.facet).abi_encode()
            }
            IDiamondLoupeCalls::facetAddresses(_) => loupe.facet_addresses().abi_encode(),
            IDiamondLoupeCalls::facetAddress(call) => {
                loupe.facet_address(call.functionSelector).abi_encode()
            }
        };
        Ok(out)
    }
}
