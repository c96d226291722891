use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money leaving the account (spending)
    Debit,
    /// Money entering the account (income, refunds)
    Credit,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Debit => write!(f, "Debit"),
            TransactionType::Credit => write!(f, "Credit"),
        }
    }
}

/// A read-only snapshot of a bank/card transaction.
///
/// `amount` is positive by convention; direction lives in `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Booking date (daily granularity)
    pub date: NaiveDate,

    /// Amount moved (always positive)
    pub amount: f64,

    /// Debit or Credit
    pub transaction_type: TransactionType,

    /// Spending category label (e.g., "Groceries")
    pub category: String,

    /// Counterparty, when the statement names one
    #[serde(default)]
    pub merchant: Option<String>,

    /// Raw statement description
    #[serde(default)]
    pub description: String,

    /// Excluded from burn-rate and trend figures (transfers, reimbursements)
    #[serde(default)]
    pub excluded: bool,
}

impl Transaction {
    /// Create a debit with a merchant attached.
    pub fn debit(
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            transaction_type: TransactionType::Debit,
            category: category.into(),
            merchant: Some(merchant.into()),
            description: String::new(),
            excluded: false,
        }
    }

    /// Create a credit with a merchant attached.
    pub fn credit(
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Credit,
            ..Self::debit(date, amount, category, merchant)
        }
    }

    /// Builder-style setter for the statement description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style setter for the exclusion flag.
    pub fn excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    /// True for debits that count toward spending figures.
    #[must_use]
    pub fn is_spend(&self) -> bool {
        self.transaction_type == TransactionType::Debit && !self.excluded
    }

    /// Amount with non-finite values read as zero.
    #[must_use]
    pub fn clean_amount(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}
