pub mod dataframe;
pub mod error;
pub mod io;
pub mod ml;
pub mod na;
pub mod preprocess;
pub mod series;

// Re-export commonly used types
pub use dataframe::{Column, ColumnType, DataFrame};
pub use error::{Error, Result};
pub use na::NA;
pub use series::{NASeries, Series};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
