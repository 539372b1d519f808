pub mod csv;
pub mod fixed;

pub use csv::{export_to_csv, write_csv, CsvOptions, TIMED_HEADER, UNTIMED_HEADER};
pub use fixed::to_fixed;
