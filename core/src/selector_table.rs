//! Selector Table and its inverse, the Facet Registry.
//!
//! The two maps are owned by one struct and only mutated through [`set`] and
//! [`unset`], so every change lands on both sides together.
//!
//! [`set`]: SelectorTable::set
//! [`unset`]: SelectorTable::unset

use std::collections::{HashMap, HashSet};

use diamond_types::{Address, Selector};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectorTable {
    facet_of: HashMap<Selector, Address>,
    selectors_of: HashMap<Address, HashSet<Selector>>,
}

impl SelectorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lookup(&self, selector: Selector) -> Option<Address> {
        self.facet_of.get(&selector).copied()
    }

    #[must_use]
    pub fn contains(&self, selector: Selector) -> bool {
        self.facet_of.contains_key(&selector)
    }

    /// Route `selector` to `facet`, returning the facet it was routed to before.
    pub fn set(&mut self, selector: Selector, facet: Address) -> Option<Address> {
        let previous = self.facet_of.insert(selector, facet);
        if let Some(old) = previous {
            self.detach(old, selector);
        }
        self.selectors_of.entry(facet).or_default().insert(selector);
        previous
    }

    /// Drop the route for `selector`, returning the facet that served it.
    pub fn unset(&mut self, selector: Selector) -> Option<Address> {
        let previous = self.facet_of.remove(&selector)?;
        self.detach(previous, selector);
        Some(previous)
    }

    fn detach(&mut self, facet: Address, selector: Selector) {
        if let Some(set) = self.selectors_of.get_mut(&facet) {
            set.remove(&selector);
            if set.is_empty() {
                self.selectors_of.remove(&facet);
            }
        }
    }

    /// Facets currently serving at least one selector. Unordered.
    pub fn facets(&self) -> impl Iterator<Item = Address> + '_ {
        self.selectors_of.keys().copied()
    }

    /// Selectors served by `facet`. Empty for unknown facets.
    #[must_use]
    pub fn selectors_of(&self, facet: Address) -> Option<&HashSet<Selector>> {
        self.selectors_of.get(&facet)
    }

    /// Number of routed selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facet_of.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facet_of.is_empty()
    }

    /// Whether the registry is the exact inverse of the table.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.facet_of.iter().all(|(sel, facet)| {
            self.selectors_of
                .get(facet)
                .is_some_and(|set| set.contains(sel))
        });
        let reverse_count: usize = self.selectors_of.values().map(HashSet::len).sum();
        let no_empty_sets = self.selectors_of.values().all(|set| !set.is_empty());
        forward_ok && no_empty_sets && reverse_count == self.facet_of.len()
    }
}
