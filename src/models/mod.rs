pub mod outcome;
pub mod types;
