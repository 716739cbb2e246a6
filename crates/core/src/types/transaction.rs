//! Transaction and payment records.
//!
//! These mirror the canonical wire schema. Transactions are created by
//! checkout and only ever read back afterwards; payments attach to a
//! transaction once a method has been chosen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::cart::CartItem;
use crate::types::id::{PaymentId, TransactionId, UserId};
use crate::types::price::Price;
use crate::types::status::{PaymentMethod, PaymentStatus, TransactionStatus};

/// A checkout transaction with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Client-generated transaction code (`TRX-{unix-millis}`).
    pub code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Sum of line-item subtotals at checkout time.
    pub total: Price,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Optional free-form note entered at checkout.
    #[serde(default)]
    pub note: Option<String>,
    /// The purchased line items.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// The payment, once one has been submitted.
    #[serde(default)]
    pub payment: Option<Payment>,
}

/// A payment attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Server-assigned payment ID.
    pub id: PaymentId,
    /// Chosen payment method.
    pub method: PaymentMethod,
    /// Amount paid.
    pub amount: Price,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Outcome status.
    pub status: PaymentStatus,
    /// Optional free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Instructions for completing a pending payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Virtual account number to transfer to.
    pub virtual_account: String,
    /// Amount due.
    pub amount: Price,
    /// Method the payment was submitted with.
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_optional_fields_default() {
        let parsed: Transaction = serde_json::from_value(serde_json::json!({
            "id": 9,
            "user_id": 1,
            "code": "TRX-1700000000000",
            "created_at": "2026-01-02T03:04:05Z",
            "total": "3000",
            "status": "pending",
        }))
        .unwrap();
        assert_eq!(parsed.id, TransactionId::new(9));
        assert_eq!(parsed.status, TransactionStatus::Pending);
        assert!(parsed.items.is_empty());
        assert!(parsed.payment.is_none());
        assert!(parsed.note.is_none());
    }

    #[test]
    fn test_payment_wire_shape() {
        let parsed: Payment = serde_json::from_value(serde_json::json!({
            "id": 2,
            "method": "TRANSFER",
            "amount": "3000",
            "created_at": "2026-01-02T03:04:05Z",
            "status": "SUCCESS",
        }))
        .unwrap();
        assert_eq!(parsed.method, PaymentMethod::Transfer);
        assert_eq!(parsed.status, PaymentStatus::Success);
        assert_eq!(parsed.amount, Price::from(3000));
    }
}
