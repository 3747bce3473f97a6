use std::env;
use std::path::{Path, PathBuf};

use polars::prelude::*;

/// Directory holding the lookup tables and ΔΔG shards. `DDG_DATA_ROOT`
/// overrides the default `./data`.
pub fn data_root() -> PathBuf {
    match env::var_os("DDG_DATA_ROOT") {
        Some(val) => PathBuf::from(val),
        None => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("data"),
    }
}

pub fn read_csv(file_path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
        .finish()
}
