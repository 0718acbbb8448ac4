//! Defines the core data model for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was spent.
    Expense,
    /// Money that was earned.
    Income,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and pass the
/// builder to [crate::TransactionStore::create].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is an expense or income.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The amount of money spent or earned, always zero or more.
    pub amount: f64,
    /// The category of the transaction, e.g. "Food", "Bills".
    pub category: CategoryName,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// Check a transaction that did not come from a [TransactionBuilder], e.g. one read from storage.
    ///
    /// # Errors
    /// Returns the same errors as [TransactionBuilder::validate].
    pub fn validate(&self) -> Result<(), Error> {
        validate_fields(self.amount, &self.category)
    }

    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        type_: TransactionType,
        amount: f64,
        date: Date,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            type_,
            amount,
            category: CategoryName::new_unchecked(OTHER_CATEGORY),
            date,
            description: description.to_owned(),
        }
    }
}

/// The fields of a [Transaction] without its ID.
///
/// Used to create new transactions and to replace the fields of existing ones.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is an expense or income.
    pub type_: TransactionType,
    /// The amount of money, must be finite and zero or more.
    pub amount: f64,
    /// The category, defaults to "Other".
    pub category: CategoryName,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: CategoryName) -> Self {
        self.category = category;
        self
    }

    /// Check the builder's fields describe a valid transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is NaN, infinite or negative,
    /// - or [Error::EmptyCategoryName] if the category is blank.
    pub fn validate(&self) -> Result<(), Error> {
        validate_fields(self.amount, &self.category)
    }

    /// Create the transaction with the given `id`.
    pub(crate) fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            type_: self.type_,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
        }
    }
}

fn validate_fields(amount: f64, category: &CategoryName) -> Result<(), Error> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount(amount));
    }

    if category.0.trim().is_empty() {
        return Err(Error::EmptyCategoryName);
    }

    Ok(())
}

// ============================================================================
// CATEGORIES
// ============================================================================

const OTHER_CATEGORY: &str = "Other";

/// The categories offered in forms. Any other non-empty name is also allowed.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Education",
    OTHER_CATEGORY,
];

/// The name of a transaction category.
///
/// Must be a non-empty string once surrounding whitespace is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The first user-perceived character of the name, used for category badges.
    pub fn initial(&self) -> &str {
        self.0.graphemes(true).next().unwrap_or("?")
    }

    /// The tailwind background class used to colour this category.
    ///
    /// Categories outside [DEFAULT_CATEGORIES] are grey.
    pub fn color_class(&self) -> &'static str {
        match self.0.as_str() {
            "Food" => "bg-red-500",
            "Transportation" => "bg-blue-500",
            "Shopping" => "bg-green-500",
            "Entertainment" => "bg-yellow-500",
            "Bills" => "bg-purple-500",
            "Health" => "bg-pink-500",
            "Education" => "bg-indigo-500",
            _ => "bg-gray-500",
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
