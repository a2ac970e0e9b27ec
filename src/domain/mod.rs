pub mod budget;
pub mod common;
pub mod goal;
pub mod transaction;

pub use budget::{normalize_budget, Budget, RawBudget};
pub use common::{Displayable, Identifiable};
pub use goal::{normalize_goal, Goal, RawGoal};
pub use transaction::{
    normalize_transaction, normalize_transactions, RawTransaction, Transaction, TransactionKind,
    TransactionPatch,
};
