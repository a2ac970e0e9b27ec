use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::store::write_atomic;
use crate::domain::{
    normalize_budget, normalize_goal, normalize_transactions, Budget, Goal, Identifiable,
    RawBudget, RawGoal, RawTransaction, Transaction, TransactionPatch,
};
use crate::errors::{BuddyError, Result};

use super::{BudgetSource, GoalSource, TransactionSource};

pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const GOALS_FILE: &str = "goals.json";

/// Keeps transactions, budgets, and goals as JSON arrays under one directory.
///
/// Records are read through their raw shapes and normalized on every load, so
/// files exported from the REST API can be dropped in as-is. A missing file
/// reads as an empty list.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.root.join(TRANSACTIONS_FILE)
    }

    pub fn budgets_path(&self) -> PathBuf {
        self.root.join(BUDGETS_FILE)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.root.join(GOALS_FILE)
    }

    pub fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let raws: Vec<RawTransaction> = read_array(&self.transactions_path())?;
        Ok(normalize_transactions(raws))
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        write_array(&self.transactions_path(), transactions)
    }

    pub fn transactions_for_owner(&self, owner: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .load_transactions()?
            .into_iter()
            .filter(|txn| txn.owner == owner)
            .collect())
    }

    pub fn add_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.load_transactions()?;
        if position_of(&transactions, transaction.id()).is_some() {
            return Err(BuddyError::Invalid(format!(
                "transaction `{}` already exists",
                transaction.id
            )));
        }
        transactions.push(transaction.clone());
        self.save_transactions(&transactions)?;
        tracing::info!(id = %transaction.id, "transaction added");
        Ok(transaction)
    }

    pub fn update_transaction(&self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        let mut transactions = self.load_transactions()?;
        let idx = position_of(&transactions, id)
            .ok_or_else(|| BuddyError::NotFound(format!("transaction `{id}`")))?;
        transactions[idx].apply_patch(patch);
        let updated = transactions[idx].clone();
        self.save_transactions(&transactions)?;
        tracing::info!(id, "transaction updated");
        Ok(updated)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<()> {
        let mut transactions = self.load_transactions()?;
        if !remove_by_id(&mut transactions, id) {
            return Err(BuddyError::NotFound(format!("transaction `{id}`")));
        }
        self.save_transactions(&transactions)?;
        tracing::info!(id, "transaction deleted");
        Ok(())
    }

    pub fn load_budgets(&self) -> Result<Vec<Budget>> {
        let raws: Vec<RawBudget> = read_array(&self.budgets_path())?;
        Ok(raws.into_iter().map(normalize_budget).collect())
    }

    /// Replaces the budget with the same id, or appends it.
    pub fn upsert_budget(&self, budget: Budget) -> Result<Budget> {
        let mut budgets = self.load_budgets()?;
        upsert_by_id(&mut budgets, budget.clone());
        write_array(&self.budgets_path(), &budgets)?;
        Ok(budget)
    }

    pub fn delete_budget(&self, id: &str) -> Result<()> {
        let mut budgets = self.load_budgets()?;
        if !remove_by_id(&mut budgets, id) {
            return Err(BuddyError::NotFound(format!("budget `{id}`")));
        }
        write_array(&self.budgets_path(), &budgets)
    }

    pub fn load_goals(&self) -> Result<Vec<Goal>> {
        let raws: Vec<RawGoal> = read_array(&self.goals_path())?;
        Ok(raws.into_iter().map(normalize_goal).collect())
    }

    /// Replaces the goal with the same id, or appends it.
    pub fn upsert_goal(&self, goal: Goal) -> Result<Goal> {
        let mut goals = self.load_goals()?;
        upsert_by_id(&mut goals, goal.clone());
        write_array(&self.goals_path(), &goals)?;
        Ok(goal)
    }

    pub fn delete_goal(&self, id: &str) -> Result<()> {
        let mut goals = self.load_goals()?;
        if !remove_by_id(&mut goals, id) {
            return Err(BuddyError::NotFound(format!("goal `{id}`")));
        }
        write_array(&self.goals_path(), &goals)
    }
}

impl TransactionSource for JsonStore {
    fn list(&self) -> Result<Vec<Transaction>> {
        self.load_transactions()
    }

    fn list_for_owner(&self, owner: &str) -> Result<Vec<Transaction>> {
        self.transactions_for_owner(owner)
    }
}

impl BudgetSource for JsonStore {
    fn list(&self) -> Result<Vec<Budget>> {
        self.load_budgets()
    }
}

impl GoalSource for JsonStore {
    fn list(&self) -> Result<Vec<Goal>> {
        self.load_goals()
    }
}

fn position_of<T: Identifiable>(records: &[T], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// Replaces the record sharing `record`'s id in place, or appends it.
fn upsert_by_id<T: Identifiable>(records: &mut Vec<T>, record: T) {
    match position_of(records, record.id()) {
        Some(idx) => records[idx] = record,
        None => records.push(record),
    }
}

/// Removes every record with `id`; `false` when none matched.
fn remove_by_id<T: Identifiable>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<T> = serde_json::from_str(&data)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

fn write_array<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, &json)
}
