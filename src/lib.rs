pub mod algorithm;
pub mod config;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod report;
pub mod search;
pub mod session_log;

pub use algorithm::Algorithm;
pub use error::SearchError;
pub use grid::{CellKind, Grid};
pub use report::{CellStatus, ChangeReport};
pub use search::{manhattan, Search, SearchStats, SearchStatus, StepOutcome};
