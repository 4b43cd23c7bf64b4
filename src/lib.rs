pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod load;
pub mod process;
pub mod summary;

pub use dataset::{merge, merge_all, CountyTable, Dataset, StateTable, Table};
pub use error::{PipelineError, Result};
pub use process::{process, process_with, RawTable, ReshapeOptions};
