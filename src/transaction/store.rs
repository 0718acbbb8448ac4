//! The store that owns the transaction collection and keeps it in sync with durable storage.

use std::collections::HashSet;

use crate::{
    Error,
    storage::Storage,
    transaction::{Transaction, TransactionBuilder, TransactionId},
};

/// The storage key holding the JSON array of all transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The storage key that unreadable transaction data is copied to before it is replaced.
pub const CORRUPT_TRANSACTIONS_KEY: &str = "transactions.corrupt";

const FIRST_ID: TransactionId = 1;

/// The number of transactions affected by an update or delete.
pub type RowsAffected = usize;

/// The single source of truth for the user's transactions.
///
/// Transactions are kept in the order they were created. Every change is
/// written back to [Storage] before it becomes visible through
/// [TransactionStore::transactions].
#[derive(Debug)]
pub struct TransactionStore {
    storage: Box<dyn Storage>,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl TransactionStore {
    /// Load the transactions held in `storage`.
    ///
    /// This never fails: if nothing has been stored yet, or the stored data
    /// cannot be read, the store starts with no transactions. Unreadable data
    /// is copied to [CORRUPT_TRANSACTIONS_KEY] so that it survives the next write.
    pub fn load(storage: impl Storage + 'static) -> Self {
        let mut storage: Box<dyn Storage> = Box::new(storage);

        let (transactions, next_id) = match read_transactions(storage.as_ref()) {
            Ok(loaded) => loaded,
            Err(Error::MalformedTransactions(raw)) => {
                tracing::error!(
                    "Stored transactions are malformed, starting with no transactions. \
                    The stored data has been copied to the key \"{CORRUPT_TRANSACTIONS_KEY}\"."
                );

                if let Err(error) = storage.set_item(CORRUPT_TRANSACTIONS_KEY, &raw) {
                    tracing::error!("Could not back up malformed transactions: {error}");
                }

                (Vec::new(), FIRST_ID)
            }
            Err(error) => {
                tracing::error!("Could not read stored transactions: {error}");
                (Vec::new(), FIRST_ID)
            }
        };

        tracing::info!("Loaded {} transactions from storage", transactions.len());

        Self {
            storage,
            transactions,
            next_id,
        }
    }

    /// All transactions in the order they were created.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the transaction with `id`, if it exists.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Create a new transaction with a fresh ID and append it to the collection.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is NaN, infinite or negative,
    /// - [Error::EmptyCategoryName] if the category is blank,
    /// - or [Error::StorageError] if the IDs have run out or the collection
    ///   could not be written to storage.
    ///
    /// The store is left unchanged on error.
    pub fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        builder.validate()?;

        let following_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::StorageError("no transaction IDs are left".to_owned()))?;
        let transaction = builder.finalize(self.next_id);

        let mut transactions = self.transactions.clone();
        transactions.push(transaction.clone());
        self.commit(transactions)?;
        self.next_id = following_id;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Replace the fields of the transaction with `id`, keeping its ID and position.
    ///
    /// Returns `Ok(0)` without touching storage if there is no transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is NaN, infinite or negative,
    /// - [Error::EmptyCategoryName] if the category is blank,
    /// - or [Error::StorageError] if the collection could not be written to storage.
    ///
    /// The store is left unchanged on error.
    pub fn update(
        &mut self,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<RowsAffected, Error> {
        builder.validate()?;

        let mut transactions = self.transactions.clone();
        let Some(transaction) = transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        else {
            return Ok(0);
        };
        *transaction = builder.finalize(id);

        self.commit(transactions)?;

        Ok(1)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `Ok(0)` without touching storage if there is no transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the collection could not be written to
    /// storage, in which case the store is left unchanged.
    pub fn delete(&mut self, id: TransactionId) -> Result<RowsAffected, Error> {
        let mut transactions = self.transactions.clone();
        let count_before = transactions.len();
        transactions.retain(|transaction| transaction.id != id);
        let rows_affected = count_before - transactions.len();

        if rows_affected == 0 {
            return Ok(0);
        }

        self.commit(transactions)?;

        Ok(rows_affected)
    }

    /// Write `transactions` to storage and, only if that succeeds, make them the current collection.
    fn commit(&mut self, transactions: Vec<Transaction>) -> Result<(), Error> {
        let json = serde_json::to_string(&transactions)?;

        self.storage
            .set_item(TRANSACTIONS_KEY, &json)
            .inspect_err(|error| tracing::error!("Could not save transactions: {error}"))?;

        self.transactions = transactions;

        Ok(())
    }
}

/// Read and parse the transactions held in `storage`, along with the next free ID.
///
/// # Errors
/// This function will return a:
/// - [Error::MalformedTransactions] holding the raw stored text if it is not a
///   valid list of transactions, contains an invalid transaction or duplicate
///   IDs, or leaves no room for another ID,
/// - or [Error::StorageError] if the storage could not be read.
fn read_transactions(storage: &dyn Storage) -> Result<(Vec<Transaction>, TransactionId), Error> {
    let Some(raw) = storage.get_item(TRANSACTIONS_KEY)? else {
        return Ok((Vec::new(), FIRST_ID));
    };

    let transactions: Vec<Transaction> = match serde_json::from_str(&raw) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::warn!("Could not parse stored transactions: {error}");
            return Err(Error::MalformedTransactions(raw));
        }
    };

    let mut seen_ids = HashSet::with_capacity(transactions.len());
    if let Some(duplicate) = transactions
        .iter()
        .find(|transaction| !seen_ids.insert(transaction.id))
    {
        tracing::warn!("Stored transactions contain the ID {} more than once", duplicate.id);
        return Err(Error::MalformedTransactions(raw));
    }

    for transaction in &transactions {
        if let Err(error) = transaction.validate() {
            tracing::warn!("Stored transaction {} is invalid: {error}", transaction.id);
            return Err(Error::MalformedTransactions(raw));
        }
    }

    let next_id = match transactions.iter().map(|transaction| transaction.id).max() {
        None => FIRST_ID,
        Some(max_id) => match max_id.checked_add(1) {
            Some(next_id) => next_id,
            None => {
                tracing::warn!("Stored transaction IDs leave no room for new transactions");
                return Err(Error::MalformedTransactions(raw));
            }
        },
    };

    Ok((transactions, next_id))
}
