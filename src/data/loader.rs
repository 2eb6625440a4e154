use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use super::model::{RawListing, RawTable};

/// Columns every input file must carry (after lower-casing).
pub const REQUIRED_COLUMNS: [&str; 5] = ["price", "latitude", "longitude", "sublocality", "type"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings CSV from disk.
///
/// Column names are lower-cased right after the header is read, so the
/// rest of the pipeline only ever sees normalised names. NA markers in
/// numeric columns load as missing values; any other malformed record fails
/// the whole load and no partial table is returned.
pub fn load(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let table = read_csv(file, path)?;
    log::info!(
        "Read {} records from {} (columns: {:?})",
        table.len(),
        path.display(),
        table.columns
    );
    Ok(table)
}

/// Parse CSV text from any reader. `path` is only used for error messages.
pub fn read_csv<R: Read>(input: R, path: &Path) -> Result<RawTable, LoadError> {
    let parse_err = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|req| !columns.iter().any(|c| c == *req))
    {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        });
    }

    reader.set_headers(StringRecord::from(columns.clone()));

    let records = reader
        .deserialize::<RawListing>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(parse_err)?;

    Ok(RawTable { columns, records })
}
