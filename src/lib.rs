pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod idxstats;
pub mod label;
pub mod pipeline;
pub mod reference;
pub mod score;
pub mod utils;
pub mod verdict;

pub use error::{SexCheckError, SexCheckResult};
