//! Two interchangeable implementations of the same `setDataA`/`getDataA`
//! interface, sharing one storage slot. Swapping one for the other with a
//! Replace cut keeps previously written data readable.

use std::sync::LazyLock;

use alloy_sol_types::SolValue;
use diamond_types::abi::IDataFacet::IDataFacetCalls;
use diamond_types::{B256, DiamondError, Selector, keccak256};

use crate::code::{Facet, decode_call, interface_selectors};
use crate::context::CallContext;

pub const DATA_STORAGE_NAMESPACE: &str = "diamond.sample.data.storage";

static DATA_SLOT: LazyLock<B256> = LazyLock::new(|| keccak256(DATA_STORAGE_NAMESPACE));

/// Slot both data facets read and write.
#[must_use]
pub fn data_slot() -> B256 {
    *DATA_SLOT
}

fn execute_data(
    selector: Selector,
    args: &[u8],
    ctx: &mut CallContext<'_>,
    transform: fn(B256) -> B256,
) -> Result<Vec<u8>, DiamondError> {
    match decode_call::<IDataFacetCalls>(selector, args)? {
        IDataFacetCalls::setDataA(call) => {
            ctx.sstore(data_slot(), transform(call.dataA));
            Ok(Vec::new())
        }
        IDataFacetCalls::getDataA(_) => Ok(ctx.sload(&data_slot()).abi_encode()),
    }
}

/// Stores the value as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataFacet;

impl Facet for DataFacet {
    fn name(&self) -> &'static str {
        "DataFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        interface_selectors(IDataFacetCalls::SELECTORS)
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        execute_data(selector, args, ctx, |value| value)
    }
}

/// Stores `keccak256(value)` instead of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashingDataFacet;

impl Facet for HashingDataFacet {
    fn name(&self) -> &'static str {
        "HashingDataFacet"
    }

    fn selectors(&self) -> Vec<Selector> {
        interface_selectors(IDataFacetCalls::SELECTORS)
    }

    fn execute(
        &self,
        selector: Selector,
        args: &[u8],
        ctx: &mut CallContext<'_>,
    ) -> Result<Vec<u8>, DiamondError> {
        execute_data(selector, args, ctx, keccak256)
    }
}
