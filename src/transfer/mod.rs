//! Moving data in and out: the JSON backup document and CSV files.

mod backup;
mod csv_io;

pub(crate) use backup::{parse_import, ExportDocument};
pub(crate) use csv_io::{export_csv, import_csv};
