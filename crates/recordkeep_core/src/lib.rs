//! Core record-keeping logic for Recordkeep.
//! Every domain stores its records through the generic `KeyedRepository`.

pub mod import;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod report;
pub mod service;

pub use import::grades::{read_students, read_students_from_path};
pub use import::{ImportError, ImportResult};
pub use logging::{default_log_level, init_logging, logging_status, normalize_level, LoggingConfig};
pub use model::entity::{Entity, Stocked};
pub use model::health::{Patient, PatientId, Prescription, PrescriptionId};
pub use model::inventory::{ElectronicItem, GroceryItem, InventoryItem, ItemId};
pub use model::student::{Grade, Student, StudentId};
pub use model::transaction::{format_cents, Transaction, TransactionId};
pub use persist::{JsonFileStore, StoreError, StoreResult};
pub use repo::keyed_repo::{
    DuplicateIdError, InvalidQuantityError, KeyedRepository, NotFoundError, RepoError,
    UpdateError,
};
pub use report::{grade_report_line, render_listing, write_grade_report, write_grade_report_to_path};
pub use service::finance::{
    Account, BankTransferProcessor, CheckingAccount, CryptoWalletProcessor, FinanceError,
    FinanceLedger, LedgerEntry, MobileMoneyProcessor, SavingsAccount, TransactionProcessor,
};
pub use service::health_service::HealthService;
pub use service::inventory_log::{InventoryLog, InventoryLogError};
pub use service::inventory_service::{
    FailureKind, FailureReport, InventoryService, WarehouseManager,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
