//! Read and write CSV files as rows of field name → text maps.
//!
//! ```no_run
//! use dictcsv::{read_fieldnames, read_rows, read_rows_indexed, write_rows, Row};
//!
//! let mut row = Row::new();
//! row.insert("ID".to_string(), "101".to_string());
//! row.insert("Name".to_string(), "Dharani".to_string());
//! write_rows("students.csv", &[row], &["ID", "Name"])?;
//!
//! assert_eq!(read_fieldnames("students.csv")?, vec!["ID", "Name"]);
//! assert_eq!(read_rows("students.csv")?[0]["Name"], "Dharani");
//! assert_eq!(read_rows_indexed("students.csv", "ID")?["101"]["Name"], "Dharani");
//! # Ok::<(), dictcsv::DictCsvError>(())
//! ```

pub mod config;
pub mod error;
pub mod read;
pub mod record;
pub mod write;

pub use config::{CsvOptions, LineTerminator};
pub use error::{DictCsvError, ErrorKind, Result};
pub use read::{
    read_fieldnames, read_fieldnames_from_reader, read_fieldnames_with, read_rows,
    read_rows_from_reader, read_rows_indexed, read_rows_indexed_from_reader,
    read_rows_indexed_with, read_rows_with,
};
pub use record::{IndexedTable, Row, RowSource, Table};
pub use write::{write_rows, write_rows_to_writer, write_rows_with};
