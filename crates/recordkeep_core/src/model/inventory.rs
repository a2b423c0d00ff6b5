//! Inventory records for the warehouse and the JSON inventory log.
//!
//! # Invariants
//! - `id` is unique within one repository, not across item kinds.
//! - `quantity` is never negative once stored.

use crate::model::entity::{Entity, Stocked};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type ItemId = u32;

/// Electronic stock item with brand and warranty metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub brand: String,
    pub warranty_months: u32,
}

impl ElectronicItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        quantity: i64,
        brand: impl Into<String>,
        warranty_months: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            brand: brand.into(),
            warranty_months,
        }
    }
}

impl Display for ElectronicItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), Qty: {}, Warranty: {} months",
            self.name, self.brand, self.quantity, self.warranty_months
        )
    }
}

/// Perishable stock item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
}

impl GroceryItem {
    pub fn new(id: ItemId, name: impl Into<String>, quantity: i64, expiry_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            expiry_date,
        }
    }

    /// Returns whether the item is past its expiry date on `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

impl Display for GroceryItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, Qty: {}, Expires: {}",
            self.name, self.quantity, self.expiry_date
        )
    }
}

/// Logged inventory entry persisted by `InventoryLog`.
///
/// Serialized field names are the on-disk JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    /// UTC timestamp the entry was recorded.
    pub date_added: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        quantity: i64,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            date_added,
        }
    }
}

impl Display for InventoryItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (ID: {}) - Qty: {}, Added: {}",
            self.name,
            self.id,
            self.quantity,
            self.date_added.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

macro_rules! impl_stocked {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                type Id = ItemId;

                fn id(&self) -> ItemId {
                    self.id
                }
            }

            impl Stocked for $ty {
                fn quantity(&self) -> i64 {
                    self.quantity
                }

                fn set_quantity(&mut self, quantity: i64) {
                    self.quantity = quantity;
                }
            }
        )+
    };
}

impl_stocked!(ElectronicItem, GroceryItem, InventoryItem);
