pub mod config;
pub mod edit;
pub mod error;
pub mod math;
pub mod notification;
pub mod operations;
pub mod topology;

pub use config::{ClosedChainPolicy, MakeParallelConfig};
pub use error::{ParallelError, Result};
