//! Cart store: ordered line items keyed by product id.
//!
//! All mutation goes through the four operations here; consumers never
//! touch items directly. Adding an existing product merges quantities
//! (repeated "add to cart" clicks accumulate rather than duplicating
//! rows), and every mutation re-establishes `subtotal == quantity *
//! unit_price`. All operations are total functions - no error paths.
//!
//! Which items participate in a checkout is caller-local selection state,
//! so [`CartStore::total`] takes the selection as an argument instead of
//! storing it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use shopfront_core::{CartItem, Price, ProductId};

/// Shared handle to the cart, cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    path: Option<PathBuf>,
    items: RwLock<Vec<CartItem>>,
}

impl CartStore {
    /// Create an empty in-memory cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(None, Vec::new())
    }

    /// Open a cart persisted at `path`, loading any existing items.
    ///
    /// A missing or unreadable file yields an empty cart.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let items = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding corrupt cart file");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        Self::with_state(Some(path), items)
    }

    fn with_state(path: Option<PathBuf>, items: Vec<CartItem>) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                path,
                items: RwLock::new(items),
            }),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a line item.
    ///
    /// If an item with the same product id exists its quantity grows by
    /// `item.quantity` and the subtotal is recomputed; otherwise the item
    /// is appended, preserving insertion order.
    pub fn add(&self, item: CartItem) {
        self.mutate(|items| {
            match items.iter_mut().find(|line| line.product_id == item.product_id) {
                Some(line) => line.add_quantity(item.quantity),
                None => items.push(item),
            }
        });
    }

    /// Remove the item for `product_id`.
    ///
    /// Removing an absent id is a no-op, not an error - the operation is
    /// idempotent.
    pub fn remove(&self, product_id: ProductId) {
        self.mutate(|items| items.retain(|line| line.product_id != product_id));
    }

    /// Overwrite the quantity for `product_id` and recompute its subtotal.
    ///
    /// Quantities below 1 are a caller error and are ignored without
    /// mutating anything; so is an absent product id.
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        self.mutate(|items| {
            if let Some(line) = items.iter_mut().find(|line| line.product_id == product_id) {
                line.set_quantity(quantity);
            }
        });
    }

    /// Empty the cart. Used after a successful checkout.
    pub fn clear(&self) {
        self.mutate(Vec::clear);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Snapshot of the items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.read().clone()
    }

    /// Snapshot of the items whose product id is in `selected`.
    #[must_use]
    pub fn selected_items(&self, selected: &HashSet<ProductId>) -> Vec<CartItem> {
        self.read()
            .iter()
            .filter(|line| selected.contains(&line.product_id))
            .cloned()
            .collect()
    }

    /// Sum of subtotals over the items whose product id is in `selected`.
    ///
    /// Derived on demand, never stored. An empty selection totals zero.
    #[must_use]
    pub fn total(&self, selected: &HashSet<ProductId>) -> Price {
        self.read()
            .iter()
            .filter(|line| selected.contains(&line.product_id))
            .map(|line| line.subtotal)
            .sum()
    }

    /// Number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CartItem>> {
        self.inner
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, apply: impl FnOnce(&mut Vec<CartItem>)) {
        let snapshot = {
            let mut items = self
                .inner
                .items
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            apply(&mut items);
            items.clone()
        };
        self.persist(&snapshot);
    }

    fn persist(&self, items: &[CartItem]) {
        let Some(path) = &self.inner.path else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(path = %path.display(), error = %e, "failed to create cart state dir");
            return;
        }
        match serde_json::to_vec_pretty(items) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(path, bytes) {
                    warn!(path = %path.display(), error = %e, "failed to persist cart");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cart"),
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("path", &self.inner.path)
            .field("items", &self.items())
            .finish()
    }
}
