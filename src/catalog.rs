//! Static product catalog.
//!
//! Maps product names to the quantity choices offered for them. The
//! catalog is ordered: product matching scans entries front to back and
//! the first match wins, so adding an entry never changes how existing
//! entries resolve.

/// One sellable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductEntry {
    /// Substring matched (case-sensitively) against the user's text.
    pub key: &'static str,
    /// Keyboard label shown when offering this product.
    pub label: &'static str,
    /// Quantity choices offered once this product is selected.
    pub quantities: &'static [&'static str],
}

/// Ordered product-to-quantities mapping.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ProductEntry>,
}

impl Catalog {
    /// The fixed three-product catalog of the reference flow.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ProductEntry {
                    key: "Product A",
                    label: "☘️ Product A",
                    quantities: &["2", "5", "10"],
                },
                ProductEntry {
                    key: "Product B",
                    label: "❄️ Product B",
                    quantities: &["1", "2", "3"],
                },
                ProductEntry {
                    key: "Product C",
                    label: "💎 Product C",
                    quantities: &["1", "2", "5"],
                },
            ],
        }
    }

    /// Resolve free text to a catalog entry by substring containment,
    /// first match wins in catalog order.
    pub fn match_product(&self, text: &str) -> Option<&ProductEntry> {
        self.entries.iter().find(|entry| text.contains(entry.key))
    }

    /// Keyboard labels for the product prompt, in catalog order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.label).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
