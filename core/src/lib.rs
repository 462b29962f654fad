//! Diamond proxy engine.
//!
//! A [`Diamond`] routes each inbound call by its four-byte selector to one of
//! many deployed [`Facet`]s and runs that facet against the diamond's own
//! storage. The routing table is changed only through `diamondCut`, which
//! applies a batch of Add/Replace/Remove cuts and an optional initializer as
//! one atomic step.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod client;
mod code;
mod context;
mod cut;
mod diamond;
pub mod facets;
mod init;
pub mod layout;
mod loupe;
mod selector_table;
mod state;

pub use client::DiamondClient;
pub use code::{CodeRegistry, Facet, decode_call, interface_selectors};
pub use context::{CallContext, MAX_CALL_DEPTH, MAX_STORED_BYTES};
pub use diamond::{Diamond, DiamondArgs};
pub use loupe::Loupe;
pub use selector_table::SelectorTable;
pub use state::{Checkpoint, DiamondState};
