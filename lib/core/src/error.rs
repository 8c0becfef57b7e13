use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Computation budget exceeded: {pairs} pairs to compare, budget is {budget}")]
    ComputationBudgetExceeded { pairs: u64, budget: u64 },
}
