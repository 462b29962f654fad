//! Proxy-owned state and the undo journal that makes calls atomic.
//!
//! Every mutation of routes, storage or the event log records its inverse.
//! A [`Checkpoint`] is a journal length; reverting to it replays inverses in
//! reverse order until the journal is that long again. Checkpoints nest, so a
//! delegated initializer can fail and unwind without touching the outer call
//! until the outer call itself decides. The journal is dropped once the last
//! open checkpoint is closed, and nothing is recorded while none is open.

use std::collections::HashMap;

use diamond_types::{Address, B256, DiamondEvent, Selector};

use crate::selector_table::SelectorTable;

#[derive(Debug, Clone)]
enum JournalEntry {
    Route {
        selector: Selector,
        previous: Option<Address>,
    },
    Slot {
        slot: B256,
        previous: B256,
    },
    Event,
}

/// Position in the journal to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a checkpoint must be committed or reverted"]
pub struct Checkpoint(usize);

#[derive(Debug, Default)]
pub struct DiamondState {
    routes: SelectorTable,
    slots: HashMap<B256, B256>,
    events: Vec<DiamondEvent>,
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl DiamondState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a checkpoint. Every checkpoint must be closed by exactly one
    /// [`commit`](Self::commit) or [`revert_to`](Self::revert_to).
    pub fn checkpoint(&mut self) -> Checkpoint {
        self.open_checkpoints += 1;
        Checkpoint(self.journal.len())
    }

    /// Undo everything recorded since `checkpoint`.
    pub fn revert_to(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.0 {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::Route { selector, previous } => match previous {
                    Some(facet) => {
                        self.routes.set(selector, facet);
                    }
                    None => {
                        self.routes.unset(selector);
                    }
                },
                JournalEntry::Slot { slot, previous } => {
                    if previous.is_zero() {
                        self.slots.remove(&slot);
                    } else {
                        self.slots.insert(slot, previous);
                    }
                }
                JournalEntry::Event => {
                    self.events.pop();
                }
            }
        }
        self.close_checkpoint();
    }

    /// Keep everything since `checkpoint`. The outermost commit drops the journal.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.journal.len(), "stale checkpoint");
        self.close_checkpoint();
    }

    fn record(&mut self, entry: JournalEntry) {
        if self.open_checkpoints > 0 {
            self.journal.push(entry);
        }
    }

    fn close_checkpoint(&mut self) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }

    // ------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------

    #[must_use]
    pub fn routes(&self) -> &SelectorTable {
        &self.routes
    }

    pub(crate) fn route(&mut self, selector: Selector, facet: Address) -> Option<Address> {
        let previous = self.routes.set(selector, facet);
        self.record(JournalEntry::Route { selector, previous });
        previous
    }

    pub(crate) fn unroute(&mut self, selector: Selector) -> Option<Address> {
        let previous = self.routes.unset(selector)?;
        self.record(JournalEntry::Route {
            selector,
            previous: Some(previous),
        });
        Some(previous)
    }

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------

    /// Unwritten slots read as zero.
    #[must_use]
    pub fn sload(&self, slot: &B256) -> B256 {
        self.slots.get(slot).copied().unwrap_or(B256::ZERO)
    }

    pub(crate) fn sstore(&mut self, slot: B256, value: B256) {
        let previous = if value.is_zero() {
            self.slots.remove(&slot)
        } else {
            self.slots.insert(slot, value)
        }
        .unwrap_or(B256::ZERO);
        if previous != value {
            self.record(JournalEntry::Slot { slot, previous });
        }
    }

    /// Number of non-zero slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    #[must_use]
    pub fn events(&self) -> &[DiamondEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: DiamondEvent) {
        self.events.push(event);
        self.record(JournalEntry::Event);
    }

    /// Hand committed events to the caller. Only valid outside a call.
    pub(crate) fn take_events(&mut self) -> Vec<DiamondEvent> {
        debug_assert!(self.journal.is_empty(), "events taken mid-call");
        std::mem::take(&mut self.events)
    }
}
