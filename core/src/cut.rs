//! Cut Processor: validates and applies a batch of facet cuts.
//!
//! Cuts are applied one after another, so a later cut sees the routes left by
//! an earlier one. The first failing check aborts the batch, and every change
//! the batch made (routes, storage written by the initializer, events) is
//! rolled back before the error is returned.

use diamond_types::{
    Address, Bytes, DiamondError, DiamondEvent, FacetCut, FacetCutAction, Selector, selectors,
};

use crate::context::CallContext;
use crate::init;

/// Apply `cuts`, then run the initializer. All or nothing.
pub(crate) fn diamond_cut(
    ctx: &mut CallContext<'_>,
    cuts: &[FacetCut],
    init: Address,
    calldata: &[u8],
) -> Result<(), DiamondError> {
    let checkpoint = ctx.state_mut().checkpoint();
    match apply_batch(ctx, cuts, init, calldata) {
        Ok(()) => {
            ctx.state_mut().commit(checkpoint);
            tracing::info!(
                cuts = cuts.len(),
                %init,
                routed = ctx.routes().len(),
                "Diamond cut applied"
            );
            Ok(())
        }
        Err(e) => {
            ctx.state_mut().revert_to(checkpoint);
            tracing::warn!(error = %e, "Diamond cut reverted");
            Err(e)
        }
    }
}

fn apply_batch(
    ctx: &mut CallContext<'_>,
    cuts: &[FacetCut],
    init: Address,
    calldata: &[u8],
) -> Result<(), DiamondError> {
    for cut in cuts {
        if cut.function_selectors.is_empty() {
            return Err(DiamondError::NoSelectorsProvided {
                action: cut.action,
                facet: cut.facet_address,
            });
        }
        match cut.action {
            FacetCutAction::Add => add_functions(ctx, cut.facet_address, &cut.function_selectors)?,
            FacetCutAction::Replace => {
                replace_functions(ctx, cut.facet_address, &cut.function_selectors)?;
            }
            FacetCutAction::Remove => {
                remove_functions(ctx, cut.facet_address, &cut.function_selectors)?;
            }
        }
    }
    ctx.emit(DiamondEvent::DiamondCut {
        cuts: cuts.to_vec(),
        init,
        calldata: Bytes::copy_from_slice(calldata),
    });
    init::initialize(ctx, init, calldata)
}

fn enforce_has_code(
    ctx: &CallContext<'_>,
    facet: Address,
    action: FacetCutAction,
) -> Result<(), DiamondError> {
    if facet.is_zero() {
        return Err(DiamondError::FacetAddressIsZero { action });
    }
    if !ctx.code().has_code(facet) {
        return Err(DiamondError::NoCodeAtAddress { address: facet });
    }
    Ok(())
}

fn add_functions(
    ctx: &mut CallContext<'_>,
    facet: Address,
    function_selectors: &[Selector],
) -> Result<(), DiamondError> {
    enforce_has_code(ctx, facet, FacetCutAction::Add)?;
    for &selector in function_selectors {
        if selectors::RESERVED.contains(&selector) {
            return Err(DiamondError::ReservedSelector { selector });
        }
        if ctx.routes().contains(selector) {
            return Err(DiamondError::SelectorAlreadyExists { selector });
        }
        ctx.state_mut().route(selector, facet);
    }
    Ok(())
}

fn replace_functions(
    ctx: &mut CallContext<'_>,
    facet: Address,
    function_selectors: &[Selector],
) -> Result<(), DiamondError> {
    enforce_has_code(ctx, facet, FacetCutAction::Replace)?;
    for &selector in function_selectors {
        let current = ctx
            .routes()
            .lookup(selector)
            .ok_or(DiamondError::SelectorNotFound { selector })?;
        if current == facet {
            return Err(DiamondError::CannotReplaceWithSameFacet { selector, facet });
        }
        ctx.state_mut().route(selector, facet);
    }
    Ok(())
}

fn remove_functions(
    ctx: &mut CallContext<'_>,
    facet: Address,
    function_selectors: &[Selector],
) -> Result<(), DiamondError> {
    if !facet.is_zero() {
        return Err(DiamondError::RemoveFacetAddressMustBeZero { facet });
    }
    for &selector in function_selectors {
        ctx.state_mut()
            .unroute(selector)
            .ok_or(DiamondError::SelectorNotFound { selector })?;
    }
    Ok(())
}
