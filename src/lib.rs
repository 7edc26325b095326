pub mod block_frequency;
pub mod branch_probability;


pub use block_frequency::BlockFrequency;
pub use branch_probability::{BranchProbability, ProbabilityError};
