pub mod error;
pub mod invoice;
pub mod multicolumn;
pub mod table;

pub use error::ReportError;
