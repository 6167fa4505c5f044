//! Cart operation errors.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Shown when a requested quantity exceeds available stock.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// Why a cart operation did not complete.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: i64,
    },

    /// Product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotFound(ProductId),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Transport(#[from] CatalogError),
}

impl CartError {
    /// Text shown to the shopper when `operation` fails with this error.
    ///
    /// Only stock shortages get their own message; every other failure is
    /// reported with the operation's generic text.
    #[must_use]
    pub const fn notice_message(&self, operation: CartOperation) -> &'static str {
        match self {
            Self::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
            Self::NotFound(_) | Self::Transport(_) => operation.failure_message(),
        }
    }
}

/// The mutating operations a cart supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Generic failure text for this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => "Failed to add product",
            Self::Remove => "Failed to remove product",
            Self::UpdateAmount => "Failed to update product amount",
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::UpdateAmount => "update_amount",
        }
    }
}
