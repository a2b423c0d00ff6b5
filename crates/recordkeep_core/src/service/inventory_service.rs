//! Stock maintenance use-cases.
//!
//! # Responsibility
//! - Provide seeding, lookup and maintenance entry points over one inventory.
//! - Run the warehouse scenario across electronics and groceries.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Repository errors are returned unchanged; services only add logging.

use crate::model::entity::Stocked;
use crate::model::inventory::{ElectronicItem, GroceryItem, ItemId};
use crate::repo::keyed_repo::{
    DuplicateIdError, KeyedRepository, NotFoundError, RepoError, UpdateError,
};
use chrono::{Months, NaiveDate};
use log::{info, warn};
use std::fmt::Display;

/// Use-case wrapper for one stocked repository.
#[derive(Debug, Clone)]
pub struct InventoryService<T: Stocked> {
    repo: KeyedRepository<T>,
}

impl<T: Stocked> Default for InventoryService<T> {
    fn default() -> Self {
        Self {
            repo: KeyedRepository::new(),
        }
    }
}

impl<T: Stocked + Clone> InventoryService<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every item, stopping at the first duplicate.
    ///
    /// Items before the duplicate stay stored; seeding is a sequence of
    /// independent `add` calls.
    pub fn seed(
        &mut self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), DuplicateIdError<T::Id>> {
        for item in items {
            self.repo.add(item)?;
        }
        info!(
            "event=inventory_seed module=service status=ok records={}",
            self.repo.len()
        );
        Ok(())
    }

    pub fn add_item(&mut self, item: T) -> Result<(), DuplicateIdError<T::Id>> {
        self.repo.add(item)
    }

    pub fn get_item(&self, id: &T::Id) -> Result<&T, NotFoundError<T::Id>> {
        self.repo.get_by_id(id)
    }

    pub fn list_items(&self) -> Vec<T> {
        self.repo.list_all()
    }

    pub fn update_quantity(&mut self, id: &T::Id, quantity: i64) -> Result<(), UpdateError<T::Id>> {
        self.repo.update_quantity(id, quantity)
    }

    /// Adds `delta` units to an item and returns the new quantity.
    pub fn increase_stock(&mut self, id: &T::Id, delta: i64) -> Result<i64, UpdateError<T::Id>> {
        match self.repo.increase_stock(id, delta) {
            Ok(quantity) => {
                info!(
                    "event=stock_increase module=service status=ok id={} quantity={}",
                    id, quantity
                );
                Ok(quantity)
            }
            Err(err) => {
                warn!(
                    "event=stock_increase module=service status=error id={} error={}",
                    id, err
                );
                Err(err)
            }
        }
    }

    pub fn remove_item(&mut self, id: &T::Id) -> Result<T, NotFoundError<T::Id>> {
        let removed = self.repo.remove(id)?;
        info!("event=item_remove module=service status=ok id={}", id);
        Ok(removed)
    }
}

/// Failure category observed by a maintenance call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    DuplicateId,
    NotFound,
    InvalidQuantity,
}

impl<K> From<&RepoError<K>> for FailureKind {
    fn from(value: &RepoError<K>) -> Self {
        match value {
            RepoError::DuplicateId(_) => Self::DuplicateId,
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::InvalidQuantity(_) => Self::InvalidQuantity,
        }
    }
}

/// One reported, recovered failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub operation: &'static str,
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReport {
    fn from_error<K: Display>(operation: &'static str, err: impl Into<RepoError<K>>) -> Self {
        let err = err.into();
        Self {
            operation,
            kind: FailureKind::from(&err),
            message: err.to_string(),
        }
    }
}

/// Warehouse with separate electronics and groceries inventories.
///
/// Ids are unique per inventory, so electronics `1` and groceries `1` coexist.
#[derive(Debug, Clone, Default)]
pub struct WarehouseManager {
    electronics: InventoryService<ElectronicItem>,
    groceries: InventoryService<GroceryItem>,
}

impl WarehouseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the baseline stock. Grocery expiry dates are relative to `today`.
    pub fn seed_data(&mut self, today: NaiveDate) -> Result<(), DuplicateIdError<ItemId>> {
        self.electronics.seed([
            ElectronicItem::new(1, "Laptop", 5, "Dell", 24),
            ElectronicItem::new(2, "Phone", 10, "Samsung", 12),
        ])?;
        self.groceries.seed([
            GroceryItem::new(1, "Rice", 50, months_after(today, 6)),
            GroceryItem::new(2, "Milk", 30, months_after(today, 1)),
        ])?;
        Ok(())
    }

    pub fn electronics(&self) -> &InventoryService<ElectronicItem> {
        &self.electronics
    }

    pub fn electronics_mut(&mut self) -> &mut InventoryService<ElectronicItem> {
        &mut self.electronics
    }

    pub fn groceries(&self) -> &InventoryService<GroceryItem> {
        &self.groceries
    }

    pub fn groceries_mut(&mut self) -> &mut InventoryService<GroceryItem> {
        &mut self.groceries
    }

    /// Runs one duplicate add, one missing removal and one negative update.
    ///
    /// Each failure is recovered and reported; calls that unexpectedly
    /// succeed produce no report.
    pub fn run_failure_drill(&mut self) -> Vec<FailureReport> {
        let mut reports = Vec::new();

        if let Err(err) = self
            .electronics
            .add_item(ElectronicItem::new(1, "Duplicate Laptop", 3, "HP", 12))
        {
            reports.push(FailureReport::from_error::<ItemId>("add_electronic", err));
        }

        if let Err(err) = self.groceries.remove_item(&999) {
            reports.push(FailureReport::from_error::<ItemId>("remove_grocery", err));
        }

        if let Err(err) = self.electronics.update_quantity(&2, -5) {
            reports.push(FailureReport::from_error::<ItemId>("update_electronic", err));
        }

        reports
    }
}

fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
