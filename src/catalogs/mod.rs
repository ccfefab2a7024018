pub mod binary;
pub mod csv_export;
