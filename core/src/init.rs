//! Initializer Hook run after a cut batch (and at construction).

use diamond_types::{Address, DiamondError};

use crate::context::CallContext;

/// Delegate `calldata` to `target` once, in the proxy's storage context.
///
/// A zero target with an empty payload is a no-op. Any other mismatch between
/// target and payload is rejected before anything runs.
pub(crate) fn initialize(
    ctx: &mut CallContext<'_>,
    target: Address,
    calldata: &[u8],
) -> Result<(), DiamondError> {
    if target.is_zero() {
        if calldata.is_empty() {
            return Ok(());
        }
        return Err(DiamondError::InitializationTargetIsZero);
    }
    if calldata.is_empty() {
        return Err(DiamondError::InitializationPayloadIsEmpty { target });
    }
    if !ctx.code().has_code(target) {
        return Err(DiamondError::NoCodeAtAddress { address: target });
    }
    tracing::debug!(%target, "Running diamond initializer");
    ctx.delegate(target, calldata)
        .map(|_| ())
        .map_err(|reason| DiamondError::InitializationFailed {
            target,
            reason: Box::new(reason),
        })
}
