//! Cart value type.
//!
//! A `Cart` is an ordered list of line items, unique by product ID. It is a
//! plain value: every transformation returns a new `Cart` and leaves the
//! original untouched, so a caller can compute the next state, validate it
//! against stock, and only then swap it in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// A product in the cart together with the quantity chosen.
///
/// Serializes flat, as the product fields plus `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog data captured when the item was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity in the cart.
    pub amount: u32,
}

impl CartItem {
    /// Create a line item for `product` with the given quantity.
    #[must_use]
    pub const fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    /// Product ID of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// Ordered cart contents. Serializes as a bare JSON array of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether `id` has a line in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Current quantity of `id`, or 0 when absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |item| item.amount)
    }

    /// A new cart with `item` appended.
    ///
    /// An existing line for the same product is replaced in place instead, so
    /// the result stays unique by ID.
    #[must_use]
    pub fn with_item(&self, item: CartItem) -> Self {
        if self.contains(item.id()) {
            let id = item.id();
            let mut replacement = Some(item);
            return Self {
                items: self
                    .items
                    .iter()
                    .map(|existing| {
                        if existing.id() == id {
                            replacement.take().unwrap_or_else(|| existing.clone())
                        } else {
                            existing.clone()
                        }
                    })
                    .collect(),
            };
        }

        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// A new cart with the quantity of `id` set to `amount`.
    ///
    /// Other lines are unchanged. When `id` is absent the result equals `self`.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id() == id {
                        CartItem {
                            amount,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    /// A new cart without the line for `id`.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    /// Total units across all lines (header badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Quantity per product, for per-product badges on listing pages.
    #[must_use]
    pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
        self.items
            .iter()
            .map(|item| (item.id(), item.amount))
            .collect()
    }

    /// This cart with lines that break the cart's invariants dropped.
    ///
    /// Lines with a zero amount are removed, and only the first line for each
    /// product ID is kept. Order is otherwise preserved.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut seen = std::collections::BTreeSet::new();
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.amount > 0 && seen.insert(item.id()))
                .cloned()
                .collect(),
        }
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            price: Price::from_cents(cents),
            image: format!("https://example.com/{id}.jpg"),
        }
    }

    fn sample_cart() -> Cart {
        Cart::from(vec![
            CartItem::new(product(1, 17990), 2),
            CartItem::new(product(2, 13990), 1),
        ])
    }

    #[test]
    fn test_cart_serializes_as_flat_array() {
        let cart = Cart::from(vec![CartItem::new(product(1, 1000), 2)]);
        let value = serde_json::to_value(&cart).unwrap();

        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["amount"], 2);
        assert_eq!(first["title"], "Shoe 1");
    }

    #[test]
    fn test_cart_reads_snapshot_with_numeric_prices() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":3,"title":"Trail","price":139.9,"image":"x.jpg","amount":4}]"#,
        )
        .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(3)), 4);
        assert_eq!(cart.items()[0].product.price, Price::from_cents(13990));
    }

    #[test]
    fn test_cart_snapshot_reads_back_identical() {
        let cart = sample_cart();
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_with_item_appends_new_product() {
        let cart = sample_cart();
        let next = cart.with_item(CartItem::new(product(3, 500), 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(next.len(), 3);
        assert_eq!(next.items()[2].id(), ProductId::new(3));
    }

    #[test]
    fn test_with_item_replaces_existing_line_in_place() {
        let next = sample_cart().with_item(CartItem::new(product(1, 17990), 5));

        assert_eq!(next.len(), 2);
        assert_eq!(next.items()[0].amount, 5);
        assert_eq!(next.items()[1].id(), ProductId::new(2));
    }

    #[test]
    fn test_with_amount_only_touches_target() {
        let cart = sample_cart();
        let next = cart.with_amount(ProductId::new(2), 3);

        assert_eq!(next.items()[0], cart.items()[0]);
        assert_eq!(next.amount_of(ProductId::new(2)), 3);
    }

    #[test]
    fn test_with_amount_absent_id_is_identity() {
        let cart = sample_cart();
        assert_eq!(cart.with_amount(ProductId::new(99), 3), cart);
    }

    #[test]
    fn test_without_removes_only_target() {
        let next = sample_cart().without(ProductId::new(1));

        assert_eq!(next.len(), 1);
        assert!(!next.contains(ProductId::new(1)));
        assert_eq!(next.amount_of(ProductId::new(2)), 1);
    }

    #[test]
    fn test_totals() {
        let cart = sample_cart();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_cents(2 * 17990 + 13990));
        assert_eq!(cart.items()[0].subtotal(), Price::from_cents(35980));
    }

    #[test]
    fn test_amounts_map() {
        let amounts = sample_cart().amounts();

        assert_eq!(amounts.get(&ProductId::new(1)), Some(&2));
        assert_eq!(amounts.get(&ProductId::new(2)), Some(&1));
        assert_eq!(amounts.get(&ProductId::new(3)), None);
    }

    #[test]
    fn test_normalized_drops_zero_amounts_and_duplicates() {
        let cart = Cart::from(vec![
            CartItem::new(product(1, 17990), 2),
            CartItem::new(product(2, 13990), 0),
            CartItem::new(product(3, 500), 1),
            CartItem::new(product(1, 17990), 4),
        ]);

        let clean = cart.normalized();

        let ids: Vec<i32> = clean.iter().map(|i| i.id().as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(clean.amount_of(ProductId::new(1)), 2);
    }

    #[test]
    fn test_normalized_valid_cart_is_identity() {
        let cart = sample_cart();
        assert_eq!(cart.normalized(), cart);
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(serde_json::to_string(&cart).unwrap(), "[]");
    }
}
