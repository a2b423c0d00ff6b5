//! Account debits and transaction processing.
//!
//! # Responsibility
//! - Describe payment channels and account balance rules.
//! - Record applied transactions by id.
//!
//! # Invariants
//! - A rejected transaction leaves both the balance and the ledger unchanged.
//! - A transaction id is applied at most once per ledger.

use crate::model::transaction::{format_cents, Transaction, TransactionId};
use crate::repo::keyed_repo::{DuplicateIdError, KeyedRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinanceError {
    InsufficientFunds {
        balance_cents: i64,
        requested_cents: i64,
    },
    NegativeAmount(i64),
    BalanceOverflow,
    DuplicateTransaction(DuplicateIdError<TransactionId>),
}

impl Display for FinanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds {
                balance_cents,
                requested_cents,
            } => write!(
                f,
                "insufficient funds: balance {}, requested {}",
                format_cents(*balance_cents),
                format_cents(*requested_cents)
            ),
            Self::NegativeAmount(amount) => {
                write!(f, "transaction amount cannot be negative: {amount}")
            }
            Self::BalanceOverflow => write!(f, "balance out of range"),
            Self::DuplicateTransaction(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FinanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateTransaction(err) => Some(err),
            _ => None,
        }
    }
}

/// Payment channel that handles a transaction.
pub trait TransactionProcessor {
    fn channel(&self) -> &'static str;

    /// Returns the processing confirmation for `transaction`.
    fn process(&self, transaction: &Transaction) -> String {
        format!(
            "[{}] Processed {} for {}",
            self.channel(),
            format_cents(transaction.amount_cents),
            transaction.category
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BankTransferProcessor;

impl TransactionProcessor for BankTransferProcessor {
    fn channel(&self) -> &'static str {
        "Bank Transfer"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMoneyProcessor;

impl TransactionProcessor for MobileMoneyProcessor {
    fn channel(&self) -> &'static str {
        "Mobile Money"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoWalletProcessor;

impl TransactionProcessor for CryptoWalletProcessor {
    fn channel(&self) -> &'static str {
        "Crypto Wallet"
    }
}

/// Debitable account.
pub trait Account {
    fn account_number(&self) -> &str;
    fn balance_cents(&self) -> i64;

    /// Debits `transaction.amount_cents` and returns the new balance.
    fn apply_transaction(&mut self, transaction: &Transaction) -> Result<i64, FinanceError>;
}

/// Account that always debits, possibly into a negative balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckingAccount {
    account_number: String,
    balance_cents: i64,
}

impl CheckingAccount {
    pub fn new(account_number: impl Into<String>, balance_cents: i64) -> Self {
        Self {
            account_number: account_number.into(),
            balance_cents,
        }
    }
}

impl Account for CheckingAccount {
    fn account_number(&self) -> &str {
        &self.account_number
    }

    fn balance_cents(&self) -> i64 {
        self.balance_cents
    }

    fn apply_transaction(&mut self, transaction: &Transaction) -> Result<i64, FinanceError> {
        let amount = debit_amount(transaction)?;
        self.balance_cents = self
            .balance_cents
            .checked_sub(amount)
            .ok_or(FinanceError::BalanceOverflow)?;
        Ok(self.balance_cents)
    }
}

/// Account that refuses debits larger than its balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsAccount {
    account_number: String,
    balance_cents: i64,
}

impl SavingsAccount {
    pub fn new(account_number: impl Into<String>, balance_cents: i64) -> Self {
        Self {
            account_number: account_number.into(),
            balance_cents,
        }
    }
}

impl Account for SavingsAccount {
    fn account_number(&self) -> &str {
        &self.account_number
    }

    fn balance_cents(&self) -> i64 {
        self.balance_cents
    }

    fn apply_transaction(&mut self, transaction: &Transaction) -> Result<i64, FinanceError> {
        let amount = debit_amount(transaction)?;
        if amount > self.balance_cents {
            return Err(FinanceError::InsufficientFunds {
                balance_cents: self.balance_cents,
                requested_cents: amount,
            });
        }
        self.balance_cents -= amount;
        Ok(self.balance_cents)
    }
}

fn debit_amount(transaction: &Transaction) -> Result<i64, FinanceError> {
    if transaction.amount_cents < 0 {
        return Err(FinanceError::NegativeAmount(transaction.amount_cents));
    }
    Ok(transaction.amount_cents)
}

/// Outcome of one applied transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub confirmation: String,
    pub balance_cents: i64,
}

/// Account plus the record of transactions applied to it.
pub struct FinanceLedger<A: Account> {
    account: A,
    transactions: KeyedRepository<Transaction>,
}

impl<A: Account> FinanceLedger<A> {
    pub fn new(account: A) -> Self {
        Self {
            account,
            transactions: KeyedRepository::new(),
        }
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    /// Processes `transaction` through `processor` and debits the account.
    ///
    /// # Errors
    /// - `DuplicateTransaction` when the id was already applied; checked before
    ///   the account is touched.
    /// - Account errors (`InsufficientFunds`, `NegativeAmount`) unchanged.
    pub fn apply(
        &mut self,
        transaction: Transaction,
        processor: &dyn TransactionProcessor,
    ) -> Result<LedgerEntry, FinanceError> {
        if self.transactions.contains(&transaction.id) {
            return Err(FinanceError::DuplicateTransaction(DuplicateIdError {
                id: transaction.id,
            }));
        }

        let confirmation = processor.process(&transaction);
        let balance_cents = match self.account.apply_transaction(&transaction) {
            Ok(balance) => balance,
            Err(err) => {
                warn!(
                    "event=transaction_apply module=finance status=error id={} channel={} error={}",
                    transaction.id,
                    processor.channel(),
                    err
                );
                return Err(err);
            }
        };

        info!(
            "event=transaction_apply module=finance status=ok id={} channel={}",
            transaction.id,
            processor.channel()
        );
        self.transactions
            .add(transaction)
            .map_err(FinanceError::DuplicateTransaction)?;

        Ok(LedgerEntry {
            confirmation,
            balance_cents,
        })
    }

    /// Applied transactions ordered by id.
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut list = self.transactions.list_all();
        list.sort_by_key(|transaction| transaction.id);
        list
    }
}
