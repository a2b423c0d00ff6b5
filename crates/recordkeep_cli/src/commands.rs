//! Subcommand runners.
//!
//! # Responsibility
//! - Drive core services and render their results.
//! - Turn unrecovered failures into categorized `CliError`s.
//!
//! # Invariants
//! - Recoverable repository failures are printed and the run continues.
//! - Runners write to the given sink only; `main` owns stdout/stderr.

use crate::cli::Command;
use chrono::{NaiveDate, Utc};
use recordkeep_core::{
    format_cents, read_students_from_path, render_listing, write_grade_report_to_path, Account,
    BankTransferProcessor, CryptoWalletProcessor, FinanceError, FinanceLedger, HealthService,
    ImportError, InventoryItem, InventoryLog, InventoryLogError, MobileMoneyProcessor,
    SavingsAccount, Transaction, TransactionProcessor, WarehouseManager,
};
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::Path;

/// Unrecovered failure, tagged with the category shown to the user.
#[derive(Debug)]
pub enum CliError {
    Config(String),
    File(String),
    Data(String),
    Storage(String),
    Unexpected(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "Config Error: {message}"),
            Self::File(message) => write!(f, "File Error: {message}"),
            Self::Data(message) => write!(f, "Data Error: {message}"),
            Self::Storage(message) => write!(f, "Storage Error: {message}"),
            Self::Unexpected(message) => write!(f, "Unexpected Error: {message}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Unexpected(value.to_string())
    }
}

impl From<ImportError> for CliError {
    fn from(value: ImportError) -> Self {
        if value.is_data_error() {
            Self::Data(value.to_string())
        } else {
            Self::File(value.to_string())
        }
    }
}

impl From<InventoryLogError<u32>> for CliError {
    fn from(value: InventoryLogError<u32>) -> Self {
        match value {
            InventoryLogError::Store(err) => Self::Storage(err.to_string()),
            InventoryLogError::DuplicateId(err) => Self::Data(err.to_string()),
        }
    }
}

/// Runs one subcommand and returns its confirmation line.
pub fn run(command: &Command, out: &mut impl Write) -> Result<&'static str, CliError> {
    let today = Utc::now().date_naive();
    match command {
        Command::Warehouse => run_warehouse(today, out),
        Command::Health { patient } => run_health(today, *patient, out),
        Command::Grades { input, output } => run_grades(input, output),
        Command::Inventory { file } => run_inventory(file, out),
        Command::Finance => run_finance(today, out),
    }
}

fn run_warehouse(today: NaiveDate, out: &mut impl Write) -> Result<&'static str, CliError> {
    let mut warehouse = WarehouseManager::new();
    warehouse
        .seed_data(today)
        .map_err(|err| CliError::Data(err.to_string()))?;

    let mut groceries = warehouse.groceries().list_items();
    groceries.sort_by_key(|item| item.id);
    writeln!(out, "Grocery Items:")?;
    write!(out, "{}", render_listing(&groceries))?;

    let mut electronics = warehouse.electronics().list_items();
    electronics.sort_by_key(|item| item.id);
    writeln!(out, "\nElectronic Items:")?;
    write!(out, "{}", render_listing(&electronics))?;

    match warehouse.electronics_mut().increase_stock(&1, 3) {
        Ok(_) => {
            let item = warehouse
                .electronics()
                .get_item(&1)
                .map_err(|err| CliError::Unexpected(err.to_string()))?;
            writeln!(
                out,
                "Stock updated: {}, New Qty: {}",
                item.name, item.quantity
            )?;
        }
        Err(err) => writeln!(out, "Error: {err}")?,
    }

    for report in warehouse.run_failure_drill() {
        writeln!(out, "Caught: {}", report.message)?;
    }

    Ok("Warehouse run complete.")
}

fn run_health(
    today: NaiveDate,
    patient_id: u32,
    out: &mut impl Write,
) -> Result<&'static str, CliError> {
    let mut health = HealthService::new();
    health
        .seed_data(today)
        .map_err(|err| CliError::Data(err.to_string()))?;

    write!(out, "{}", render_listing(health.patients()))?;
    writeln!(out, "\nPrescriptions for Patient ID {patient_id}:")?;
    let prescriptions = health.prescriptions_for(patient_id);
    if prescriptions.is_empty() {
        writeln!(out, "No prescriptions found.")?;
    } else {
        write!(out, "{}", render_listing(prescriptions))?;
    }

    Ok("Health records listed.")
}

fn run_grades(input: &Path, output: &Path) -> Result<&'static str, CliError> {
    let students = read_students_from_path(input)?;
    write_grade_report_to_path(&students, output).map_err(|err| {
        CliError::File(format!("cannot write `{}`: {err}", output.display()))
    })?;
    Ok("Report generated successfully.")
}

fn run_inventory(file: &Path, out: &mut impl Write) -> Result<&'static str, CliError> {
    let now = Utc::now();
    let mut log: InventoryLog<InventoryItem> = InventoryLog::new(file);
    for item in [
        InventoryItem::new(1, "Keyboard", 10, now),
        InventoryItem::new(2, "Mouse", 20, now),
        InventoryItem::new(3, "Monitor", 5, now),
    ] {
        log.add(item)
            .map_err(|err| CliError::Data(err.to_string()))?;
    }
    log.save()?;
    writeln!(out, "Data saved to file.")?;

    print_stored_inventory(file, out)?;
    Ok("Inventory round trip complete.")
}

fn print_stored_inventory(file: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let mut reloaded: InventoryLog<InventoryItem> = InventoryLog::new(file);
    reloaded.load()?;
    let mut items = reloaded.list();
    items.sort_by_key(|item| item.id);
    writeln!(out, "Loaded items:")?;
    write!(out, "{}", render_listing(items))?;
    Ok(())
}

fn run_finance(today: NaiveDate, out: &mut impl Write) -> Result<&'static str, CliError> {
    let mut ledger = FinanceLedger::new(SavingsAccount::new("ACC12345", 100_000));
    let batch: [(Transaction, &dyn TransactionProcessor); 3] = [
        (
            Transaction::new(1, today, 10_000, "Groceries"),
            &MobileMoneyProcessor,
        ),
        (
            Transaction::new(2, today, 20_000, "Utilities"),
            &BankTransferProcessor,
        ),
        (
            Transaction::new(3, today, 5_000, "Entertainment"),
            &CryptoWalletProcessor,
        ),
    ];

    for (transaction, processor) in batch {
        match ledger.apply(transaction, processor) {
            Ok(entry) => {
                writeln!(out, "{}", entry.confirmation)?;
                writeln!(
                    out,
                    "Transaction applied. Updated balance: {}",
                    format_cents(entry.balance_cents)
                )?;
            }
            Err(FinanceError::InsufficientFunds { .. }) => writeln!(out, "Insufficient funds")?,
            Err(err) => return Err(CliError::Data(err.to_string())),
        }
    }

    writeln!(
        out,
        "Final balance for {}: {}",
        ledger.account().account_number(),
        format_cents(ledger.account().balance_cents())
    )?;
    Ok("Transactions processed.")
}

#[cfg(test)]
mod tests {
    use super::{
        print_stored_inventory, run, run_finance, run_health, run_warehouse, CliError,
    };
    use crate::cli::Command;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn output_of(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn warehouse_prints_listing_and_caught_failures() {
        let mut out = Vec::new();
        run_warehouse(day(), &mut out).unwrap();
        let text = output_of(out);

        assert!(text.starts_with("Grocery Items:\nRice, Qty: 50, Expires: 2027-04-15\n"));
        assert!(text.contains("Laptop (Dell), Qty: 5, Warranty: 24 months"));
        assert!(text.contains("Stock updated: Laptop, New Qty: 8"));
        assert!(text.contains("Caught: item with id 1 already exists"));
        assert!(text.contains("Caught: item with id 999 not found"));
        assert!(text.contains("Caught: quantity cannot be negative (got -5)"));
    }

    #[test]
    fn health_reports_missing_prescriptions() {
        let mut out = Vec::new();
        run_health(day(), 7, &mut out).unwrap();
        let text = output_of(out);
        assert!(text.contains("Alice (ID: 1, Age: 28, Gender: Female)"));
        assert!(text.ends_with("Prescriptions for Patient ID 7:\nNo prescriptions found.\n"));
    }

    #[test]
    fn finance_prints_running_balance() {
        let mut out = Vec::new();
        run_finance(day(), &mut out).unwrap();
        let text = output_of(out);
        assert!(text.contains("[Mobile Money] Processed $100.00 for Groceries"));
        assert!(text.contains("Transaction applied. Updated balance: $700.00"));
        assert!(text.ends_with("Final balance for ACC12345: $650.00\n"));
    }

    #[test]
    fn grades_with_missing_input_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::Grades {
            input: dir.path().join("input.txt"),
            output: dir.path().join("output.txt"),
        };
        let err = run(&command, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::File(_)));
        assert!(err.to_string().starts_with("File Error: "));
    }

    #[test]
    fn grades_with_bad_line_is_data_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        std::fs::write(&input, "1,Ama,90\n2,Kojo\n").unwrap();

        let command = Command::Grades {
            input,
            output: output.clone(),
        };
        let err = run(&command, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Data(_)));
        assert!(!output.exists());
    }

    #[test]
    fn inventory_round_trip_lists_saved_items() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::Inventory {
            file: dir.path().join("inventory.json"),
        };
        let mut out = Vec::new();
        let confirmation = run(&command, &mut out).unwrap();
        let text = output_of(out);

        assert_eq!(confirmation, "Inventory round trip complete.");
        assert!(text.starts_with("Data saved to file.\nLoaded items:\nKeyboard (ID: 1) - Qty: 10"));
        assert!(text.contains("Monitor (ID: 3) - Qty: 5"));
    }

    #[test]
    fn unwritable_inventory_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::create_dir(&file).unwrap();

        let err = run(&Command::Inventory { file }, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
    }

    #[test]
    fn malformed_inventory_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("inventory.json");
        std::fs::write(&file, "[{\"id\": 1, \"name\": ").unwrap();

        let mut out = Vec::new();
        let err = print_stored_inventory(&file, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
        assert!(err.to_string().starts_with("Storage Error: "));
        assert!(out.is_empty());
    }
}
