//! Read-only projections of the Facet Registry.
//!
//! Results are sorted (facets by address, selectors by value). The registry
//! itself is unordered; sorting only makes output reproducible.

use diamond_types::{Address, FacetInfo, Selector};

use crate::selector_table::SelectorTable;

#[derive(Debug, Clone, Copy)]
pub struct Loupe<'a> {
    routes: &'a SelectorTable,
}

impl<'a> Loupe<'a> {
    #[must_use]
    pub fn new(routes: &'a SelectorTable) -> Self {
        Self { routes }
    }

    /// All facets with the selectors each one serves.
    #[must_use]
    pub fn facets(&self) -> Vec<FacetInfo> {
        self.facet_addresses()
            .into_iter()
            .map(|facet_address| FacetInfo {
                facet_address,
                function_selectors: self.facet_function_selectors(facet_address),
            })
            .collect()
    }

    /// Selectors served by `facet`; empty if it serves none.
    #[must_use]
    pub fn facet_function_selectors(&self, facet: Address) -> Vec<Selector> {
        let mut out: Vec<Selector> = self
            .routes
            .selectors_of(facet)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        out.sort_unstable();
        out
    }

    #[must_use]
    pub fn facet_addresses(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self.routes.facets().collect();
        out.sort_unstable();
        out
    }

    /// Facet serving `selector`, or the zero address.
    #[must_use]
    pub fn facet_address(&self, selector: Selector) -> Address {
        self.routes.lookup(selector).unwrap_or(Address::ZERO)
    }
}
