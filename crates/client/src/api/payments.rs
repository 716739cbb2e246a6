//! Payment submission and pending-payment details.

use serde::Serialize;
use tracing::instrument;

use shopfront_core::{Payment, PaymentDetails, PaymentMethod, TransactionId};

use crate::api::ApiClient;
use crate::error::Result;
use crate::transport::{ApiRequest, Method, Transport};

#[derive(Debug, Serialize)]
struct PaymentRequest {
    transaction_id: TransactionId,
    method: PaymentMethod,
}

impl<T: Transport> ApiClient<T> {
    /// Submit a payment for a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist, is not payable,
    /// or the request fails.
    #[instrument(skip(self), fields(transaction_id = %transaction_id, method = %method))]
    pub async fn submit_payment(
        &self,
        transaction_id: TransactionId,
        method: PaymentMethod,
    ) -> Result<Payment> {
        let body = PaymentRequest {
            transaction_id,
            method,
        };
        let request = ApiRequest::json(Method::Post, "/payments", serde_json::to_value(&body)?);
        self.execute(request).await
    }

    /// Fetch the details needed to complete a submitted payment (virtual
    /// account number, amount due, chosen method).
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not exist or has no
    /// payment attached.
    #[instrument(skip(self))]
    pub async fn payment_details(&self, transaction_id: TransactionId) -> Result<PaymentDetails> {
        self.execute(ApiRequest::get(format!(
            "/transactions/{transaction_id}/payment-details"
        )))
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_request_wire_shape() {
        let body = PaymentRequest {
            transaction_id: TransactionId::new(42),
            method: PaymentMethod::Transfer,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "transaction_id": 42, "method": "TRANSFER" })
        );
    }
}
