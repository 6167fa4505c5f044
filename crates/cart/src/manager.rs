//! Cart state manager.
//!
//! `CartManager` owns the current [`Cart`] and its three collaborators: a
//! [`Catalog`] for product and stock lookups, a [`KeyValueStore`] holding the
//! serialized snapshot, and a [`Notifier`] for shopper-facing messages.
//!
//! # Lifecycle
//!
//! The cart is read from the store once, in [`CartManager::load`]. Every
//! successful mutation computes a whole new cart, swaps it in, and writes the
//! full snapshot back under the same key. Store write failures are logged and
//! ignored; the in-memory cart stays updated.
//!
//! # Failures
//!
//! A failed operation leaves the cart untouched, sends exactly one notice, and
//! returns the typed [`CartError`] so callers can branch on it.
//!
//! Mutations take `&mut self`, so two of them can never interleave on the same
//! manager.

use rocketshoes_core::{Cart, CartItem, ProductId};
use tracing::{debug, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{CartError, CartOperation};
use crate::notify::{Notice, Notifier};
use crate::storage::{CART_KEY, KeyValueStore};

/// Shopping cart backed by a catalog, a key-value store and a notifier.
pub struct CartManager<C, S, N> {
    cart: Cart,
    catalog: C,
    store: S,
    notifier: N,
    key: String,
}

impl<C, S, N> CartManager<C, S, N>
where
    C: Catalog,
    S: KeyValueStore,
    N: Notifier,
{
    /// Restore the cart stored under the default key.
    ///
    /// See [`CartManager::load_with_key`].
    pub fn load(catalog: C, store: S, notifier: N) -> Self {
        Self::load_with_key(catalog, store, notifier, CART_KEY)
    }

    /// Restore the cart stored under `key`.
    ///
    /// Starts empty when nothing is stored. A snapshot that cannot be read or
    /// parsed is logged and also yields an empty cart; the store is not
    /// touched until the next successful mutation.
    pub fn load_with_key(catalog: C, store: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = restore(&store, &key);
        debug!(key = %key, items = cart.len(), "Cart loaded");

        Self {
            cart,
            catalog,
            store,
            notifier,
            key,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Store key the snapshot is written under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add one unit of `product_id`.
    ///
    /// A product not yet in the cart is fetched from the catalog and appended
    /// with amount 1; an existing line is incremented in place.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if stock cannot cover the new amount
    /// - `CartError::Transport` if the stock or product lookup fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<&Cart, CartError> {
        let next = self.next_with_added(product_id).await;
        self.settle(CartOperation::Add, product_id, next)
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the product is not in the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<&Cart, CartError> {
        let next = if self.cart.contains(product_id) {
            Ok(self.cart.without(product_id))
        } else {
            Err(CartError::NotFound(product_id))
        };
        self.settle(CartOperation::Remove, product_id, next)
    }

    /// Set the quantity of `product_id` to `amount`.
    ///
    /// Amounts of zero or less are ignored: no lookup, no notice, no write.
    /// A product with no line in the cart is still checked against stock; when
    /// the check passes the unchanged cart is committed and written back.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if stock cannot cover `amount`
    /// - `CartError::Transport` if the stock lookup fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<&Cart, CartError> {
        if amount <= 0 {
            debug!(amount, "Ignoring non-positive amount");
            return Ok(&self.cart);
        }

        let next = self.next_with_amount(product_id, amount).await;
        self.settle(CartOperation::UpdateAmount, product_id, next)
    }

    /// Hand back the collaborators, consuming the manager.
    pub fn into_parts(self) -> (Cart, C, S, N) {
        (self.cart, self.catalog, self.store, self.notifier)
    }

    async fn next_with_added(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let existing = self.cart.find(product_id);
        let stock = self.catalog.stock(product_id).await?;

        let requested = existing.map_or(0, |item| item.amount).saturating_add(1);
        if !stock.covers(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        match existing {
            Some(_) => Ok(self.cart.with_amount(product_id, requested)),
            None => {
                let product = self.catalog.product(product_id).await?;
                Ok(self.cart.with_item(CartItem::new(product, 1)))
            }
        }
    }

    async fn next_with_amount(&self, product_id: ProductId, amount: i64) -> Result<Cart, CartError> {
        let stock = self.catalog.stock(product_id).await?;

        let requested = u32::try_from(amount).unwrap_or(u32::MAX);
        if !stock.covers(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if !self.cart.contains(product_id) {
            debug!(amount, "Product not in cart; amount left unchanged");
        }

        Ok(self.cart.with_amount(product_id, requested))
    }

    /// Commit `next` on success; notify and pass the error through otherwise.
    fn settle(
        &mut self,
        operation: CartOperation,
        product_id: ProductId,
        next: Result<Cart, CartError>,
    ) -> Result<&Cart, CartError> {
        match next {
            Ok(cart) => {
                self.commit(cart);
                Ok(&self.cart)
            }
            Err(err) => {
                warn!(
                    operation = operation.as_str(),
                    error = %err,
                    "Cart operation failed"
                );
                self.notifier
                    .notify(Notice::error(err.notice_message(operation), product_id));
                Err(err)
            }
        }
    }

    fn commit(&mut self, cart: Cart) {
        self.cart = cart;
        persist(&self.store, &self.key, &self.cart);
    }
}

/// Read and parse the snapshot under `key`, falling back to an empty cart.
fn restore<S: KeyValueStore>(store: &S, key: &str) -> Cart {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                let clean = cart.normalized();
                if clean.len() != cart.len() {
                    warn!(
                        key = %key,
                        dropped = cart.len() - clean.len(),
                        "Dropped duplicate or empty lines from cart snapshot"
                    );
                }
                clean
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read cart snapshot");
            Cart::new()
        }
    }
}

/// Write the full snapshot. Failures are logged and swallowed.
fn persist<S: KeyValueStore>(store: &S, key: &str, cart: &Cart) {
    let raw = match serde_json::to_string(cart) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Failed to serialize cart");
            return;
        }
    };

    if let Err(e) = store.set(key, &raw) {
        tracing::error!(key = %key, error = %e, "Failed to persist cart");
    }
}
