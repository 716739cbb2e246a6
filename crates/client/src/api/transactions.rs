//! Checkout and purchase history.

use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use shopfront_core::{CartItem, Price, Transaction, TransactionId, UserId};

use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, Method, Transport};

#[derive(Debug, Serialize)]
struct CheckoutRequest<'a> {
    user_id: UserId,
    code: String,
    total: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    items: &'a [CartItem],
}

/// Transaction codes are minted client-side from the checkout instant.
fn transaction_code() -> String {
    format!("TRX-{}", Utc::now().timestamp_millis())
}

impl<T: Transport> ApiClient<T> {
    /// Check out `items` into a new transaction.
    ///
    /// The total is the sum of the item subtotals; the server re-verifies
    /// prices and stock on its side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptySelection`] without contacting the server
    /// if `items` is empty, or an error if the request fails.
    #[instrument(skip(self, items, note), fields(user_id = %user_id, item_count = items.len()))]
    pub async fn checkout(
        &self,
        user_id: UserId,
        items: &[CartItem],
        note: Option<&str>,
    ) -> Result<Transaction> {
        if items.is_empty() {
            return Err(ApiError::EmptySelection);
        }
        let body = CheckoutRequest {
            user_id,
            code: transaction_code(),
            total: items.iter().map(|item| item.subtotal).sum(),
            note,
            items,
        };
        let request = ApiRequest::json(Method::Post, "/transactions", serde_json::to_value(&body)?);
        self.execute(request).await
    }

    /// Fetch the caller's transactions, newest first as the server orders
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.execute(ApiRequest::get("/transactions")).await
    }

    /// Fetch a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction> {
        self.execute(ApiRequest::get(format!("/transactions/{id}")))
            .await
    }

    /// Delete a transaction (e.g. an abandoned pending order).
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("/transactions/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopfront_core::{Product, ProductId};

    #[test]
    fn test_transaction_code_shape() {
        let code = transaction_code();
        assert!(code.starts_with("TRX-"));
        assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_checkout_request_totals_subtotals() {
        let kettle = Product {
            id: ProductId::new(5),
            name: "Kettle".to_string(),
            price: Price::from(1000),
            stock: 10,
            image: None,
        };
        let items = vec![CartItem::new(&kettle, 3)];
        let body = CheckoutRequest {
            user_id: UserId::new(1),
            code: transaction_code(),
            total: items.iter().map(|item| item.subtotal).sum(),
            note: None,
            items: &items,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["total"], serde_json::json!("3000"));
        assert_eq!(value["items"][0]["quantity"], serde_json::json!(3));
        // `note: None` is omitted entirely
        assert!(value.get("note").is_none());
    }
}
