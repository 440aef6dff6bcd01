use crate::error::{BookingError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::sync::atomic::{AtomicU64, Ordering};

/// Money held in a wallet.
///
/// Thin wrapper over `rust_decimal::Decimal` so a stored balance cannot be
/// mixed up with a fare or a movement magnitude in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// The magnitude of a single wallet movement.
///
/// Construction rejects zero and negative values; the direction of a movement
/// lives in [`TransactionKind`], never in the sign.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BookingError::Validation(vec![
                "amount must be positive".to_string(),
            ]))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = BookingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }
}

/// A single movement against a wallet.
///
/// The timestamp is stored as a display-formatted string, matching the shape
/// the wallet history screen renders directly.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub description: String,
    pub timestamp: String,
}

impl Transaction {
    pub fn withdrawal(amount: Amount, description: impl Into<String>) -> Self {
        Self::record(TransactionKind::Withdrawal, amount, description)
    }

    pub fn deposit(amount: Amount, description: impl Into<String>) -> Self {
        Self::record(TransactionKind::Deposit, amount, description)
    }

    fn record(kind: TransactionKind, amount: Amount, description: impl Into<String>) -> Self {
        // Millisecond timestamps repeat under load; the sequence number keeps
        // ids unique within the process.
        static TXN_SEQ: AtomicU64 = AtomicU64::new(0);
        let now = Utc::now();
        let seq = TXN_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("TXN-{}-{seq}", now.timestamp_millis()),
            kind,
            amount,
            description: description.into(),
            timestamp: now.format("%b %d, %Y %H:%M").to_string(),
        }
    }
}

/// A stored balance plus its reverse-chronological transaction log.
///
/// The log is ordered newest first: every mutation prepends, so
/// `transactions[0]` is always the latest movement.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Wallet {
    pub balance: Balance,
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    /// Balance a wallet opens with when none has been persisted yet.
    pub const OPENING_BALANCE: Decimal = dec!(50000);

    pub fn with_opening_balance(balance: Balance) -> Self {
        Self {
            balance,
            transactions: Vec::new(),
        }
    }

    /// Removes funds and prepends the withdrawal to the log.
    pub fn debit(&mut self, tx: Transaction) -> Result<()> {
        let amount = Balance::from(tx.amount);
        if self.balance >= amount {
            self.balance -= amount;
            self.transactions.insert(0, tx);
            Ok(())
        } else {
            Err(BookingError::InsufficientFunds {
                required: tx.amount.value(),
                available: self.balance.0,
            })
        }
    }

    /// Adds funds and prepends the deposit to the log.
    pub fn credit(&mut self, tx: Transaction) {
        self.balance += Balance::from(tx.amount);
        self.transactions.insert(0, tx);
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::with_opening_balance(Balance::new(Self::OPENING_BALANCE))
    }
}
