use super::{AdapterError, Fetched};
use crate::RawRecord;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Company", "Open", "Close"];

/// Reads a daily price table with at least `Date,Company,Open,Close` columns.
///
/// Header names are matched exactly; extra columns are ignored. Rows that
/// fail to deserialize are skipped and counted, the rest keep file order.
pub fn from_reader<R: Read>(reader: R) -> Result<Fetched, AdapterError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AdapterError::MissingColumn(column));
        }
    }

    let mut fetched = Fetched::default();

    for result in reader.deserialize::<RawRecord>() {
        match result {
            Ok(record) => fetched.records.push(record),
            Err(err) => {
                let line = err.position().map_or(0, |pos| pos.line());
                log::warn!("Skipping malformed row at line {line}: {err}");
                fetched.skipped += 1;
            }
        }
    }

    Ok(fetched)
}

pub fn load(path: &Path) -> Result<Fetched, AdapterError> {
    let file = File::open(path).map_err(|e| AdapterError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let fetched = from_reader(file)?;

    if fetched.records.is_empty() {
        return Err(AdapterError::Empty(path.to_path_buf()));
    }

    log::info!(
        "Loaded {} price records from {} ({} skipped)",
        fetched.records.len(),
        path.display(),
        fetched.skipped
    );

    Ok(fetched)
}

/// [`load`] on tokio's blocking pool, so the UI executor never waits on the disk.
pub async fn fetch(path: PathBuf) -> Result<Fetched, AdapterError> {
    let join_path = path.clone();

    tokio::task::spawn_blocking(move || load(&path))
        .await
        .map_err(|e| AdapterError::Io {
            path: join_path,
            reason: e.to_string(),
        })?
}
