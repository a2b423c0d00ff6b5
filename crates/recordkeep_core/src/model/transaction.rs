//! Account transaction record.

use crate::model::entity::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TransactionId = u32;

/// Immutable debit record. Amounts are in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount_cents: i64,
    pub category: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount_cents: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            amount_cents,
            category: category.into(),
        }
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}

/// Formats cents as a currency string, e.g. `1050 -> "$10.50"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
