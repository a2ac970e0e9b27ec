pub mod json_backend;

use crate::domain::{Budget, Goal, Transaction};
use crate::errors::Result;

/// Supplies stored transactions.
///
/// `list` returns every owner's records; insight code should read through
/// `list_for_owner` so one user's totals never include another's.
pub trait TransactionSource: Send + Sync {
    fn list(&self) -> Result<Vec<Transaction>>;

    fn list_for_owner(&self, owner: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|txn| txn.owner == owner)
            .collect())
    }
}

/// Supplies current budget totals.
pub trait BudgetSource: Send + Sync {
    fn list(&self) -> Result<Vec<Budget>>;
}

/// Supplies current savings goals.
pub trait GoalSource: Send + Sync {
    fn list(&self) -> Result<Vec<Goal>>;
}

pub use json_backend::{JsonStore, BUDGETS_FILE, GOALS_FILE, TRANSACTIONS_FILE};
