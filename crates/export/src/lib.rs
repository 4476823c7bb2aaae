pub mod csv;

pub use csv::{dated_file_name, export_to_dir, header, to_csv_string, write_csv};
