//! The proxy itself: owns the diamond state and dispatches inbound calls.

use diamond_types::{
    Address, B256, Call, DiamondCutCall, DiamondError, DiamondEvent, FacetCut, Selector, U256,
    calldata_selector, selectors,
};

use crate::code::CodeRegistry;
use crate::context::CallContext;
use crate::cut;
use crate::layout;
use crate::loupe::Loupe;
use crate::state::DiamondState;

/// Construction parameters beyond the initial cuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiamondArgs {
    pub owner: Address,
    /// Initializer delegated to after the initial cuts; zero for none.
    pub init: Address,
    pub init_calldata: Vec<u8>,
}

impl DiamondArgs {
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            init: Address::ZERO,
            init_calldata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_init(mut self, init: Address, calldata: Vec<u8>) -> Self {
        self.init = init;
        self.init_calldata = calldata;
        self
    }
}

#[derive(Debug)]
pub struct Diamond {
    address: Address,
    state: DiamondState,
}

impl Diamond {
    /// Deploy a diamond: record the owner, then apply `cuts` and the initializer.
    ///
    /// The initial cut runs without an ownership check. Fails without leaving
    /// a diamond behind if any cut or the initializer fails.
    pub fn deploy(
        code: &mut CodeRegistry,
        cuts: &[FacetCut],
        args: DiamondArgs,
    ) -> Result<Self, DiamondError> {
        let address = code.allocate_address();
        let mut state = DiamondState::new();
        let checkpoint = state.checkpoint();
        layout::set_owner(&mut state, args.owner);
        let mut ctx = CallContext::new(code, &mut state, address, args.owner, U256::ZERO);
        cut::diamond_cut(&mut ctx, cuts, args.init, &args.init_calldata)?;
        state.commit(checkpoint);
        tracing::info!(%address, owner = %args.owner, "Diamond deployed");
        Ok(Self { address, state })
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn state(&self) -> &DiamondState {
        &self.state
    }

    #[must_use]
    pub fn loupe(&self) -> Loupe<'_> {
        Loupe::new(self.state.routes())
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        layout::owner(&self.state)
    }

    #[must_use]
    pub fn storage_at(&self, slot: &B256) -> B256 {
        self.state.sload(slot)
    }

    /// Events emitted by every successful call so far.
    #[must_use]
    pub fn events(&self) -> &[DiamondEvent] {
        self.state.events()
    }

    pub fn take_events(&mut self) -> Vec<DiamondEvent> {
        self.state.take_events()
    }

    /// Route one inbound call.
    ///
    /// `diamondCut` is served by the proxy itself and gated on the owner.
    /// Every other selector is looked up in the routing table and executed
    /// against this diamond's storage. On failure no state change survives.
    pub fn call(&mut self, code: &CodeRegistry, call: &Call) -> Result<Vec<u8>, DiamondError> {
        let Some(selector) = call.selector() else {
            return Err(DiamondError::FunctionNotFound {
                selector: calldata_selector(&call.data),
            });
        };
        let checkpoint = self.state.checkpoint();
        let mut ctx = CallContext::new(code, &mut self.state, self.address, call.caller, call.value);
        let result = dispatch(&mut ctx, selector, call.args());
        match &result {
            Ok(_) => self.state.commit(checkpoint),
            Err(e) => {
                self.state.revert_to(checkpoint);
                tracing::debug!(%selector, error = %e, "Call reverted");
            }
        }
        result
    }

    /// Typed `diamondCut` entry point; same gate and atomicity as [`Self::call`].
    pub fn diamond_cut(
        &mut self,
        code: &CodeRegistry,
        caller: Address,
        cuts: &[FacetCut],
        init: Address,
        calldata: &[u8],
    ) -> Result<(), DiamondError> {
        let data = DiamondCutCall {
            cuts: cuts.to_vec(),
            init,
            calldata: calldata.to_vec(),
        }
        .encode();
        self.call(code, &Call::new(caller, data)).map(|_| ())
    }
}

fn dispatch(
    ctx: &mut CallContext<'_>,
    selector: Selector,
    args: &[u8],
) -> Result<Vec<u8>, DiamondError> {
    if selector == selectors::DIAMOND_CUT {
        layout::enforce_is_contract_owner(ctx.state(), ctx.msg_sender())?;
        let DiamondCutCall {
            cuts,
            init,
            calldata,
        } = DiamondCutCall::decode(args)?;
        cut::diamond_cut(ctx, &cuts, init, &calldata)?;
        return Ok(Vec::new());
    }

    let facet_address = ctx
        .routes()
        .lookup(selector)
        .ok_or(DiamondError::FunctionNotFound { selector })?;
    let facet = ctx
        .code()
        .get(facet_address)
        .cloned()
        .ok_or(DiamondError::NoCodeAtAddress {
            address: facet_address,
        })?;
    tracing::debug!(%selector, facet = facet.name(), "Dispatching");
    facet.execute(selector, args, ctx)
}
