use std::path::PathBuf;

/// The catalog bytes do not match the fixed record layout.
///
/// Always fatal: a load that hits one of these returns no records at all.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(
        "record {record}: truncated in {field} (needed {needed} bytes at offset {offset}, {available} remaining)"
    )]
    Truncated {
        record: usize,
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("record {record}: name of {code_units} code units is not valid UTF-16")]
    InvalidName {
        record: usize,
        code_units: usize,
        #[source]
        source: std::string::FromUtf16Error,
    },
}

/// Failure to load a catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}
