use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// One entity collection persisted as a delimited flat file.
///
/// Format: one header line naming fields in record order, one record per
/// line, comma-delimited with RFC 4180 quoting, so field values may
/// contain the delimiter safely. A missing file reads as an empty
/// collection. The store never validates uniqueness — callers do.
///
/// All operations go through one exclusive lock per collection. Plain
/// `load_all`/`overwrite_all` pairs still have last-writer-wins snapshot
/// semantics; callers needing read-then-write atomicity use [`rewrite`]
/// or [`append_if`].
///
/// [`rewrite`]: Collection::rewrite
/// [`append_if`]: Collection::append_if
pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

fn storage(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {e}", path.display()))
}

fn from_csv(path: &Path, e: csv::Error) -> Error {
    if matches!(e.kind(), csv::ErrorKind::Io(_)) {
        storage(path, e)
    } else {
        Error::Malformed(format!("{}: {e}", path.display()))
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in storage order. A nonexistent file is an empty
    /// collection, not an error.
    pub fn load_all(&self) -> Result<Vec<T>, Error> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_rows()
    }

    /// Append one record without reading the rest. Writes the header line
    /// first iff the file is empty or absent.
    pub fn append_one(&self, row: &T) -> Result<(), Error> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.append_row(row)
    }

    /// Replace the whole collection with the given records.
    ///
    /// Writes a temp file, fsyncs, then renames over the collection, so a
    /// crash mid-rewrite never leaves a half-written file behind. An empty
    /// slice produces an empty file with no header.
    pub fn overwrite_all(&self, rows: &[T]) -> Result<(), Error> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_snapshot(rows)
    }

    /// Load, transform, and overwrite in one critical section.
    ///
    /// Returns the rows as written. Two concurrent `rewrite` calls cannot
    /// lose each other's effect; this is the single-writer path that
    /// update and removal run through.
    pub fn rewrite<F>(&self, f: F) -> Result<Vec<T>, Error>
    where
        F: FnOnce(Vec<T>) -> Result<Vec<T>, Error>,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = f(self.read_rows()?)?;
        self.write_snapshot(&rows)?;
        Ok(rows)
    }

    /// Run `check` against the latest rows, then append — all under the
    /// collection lock. Nothing is written when the check fails.
    pub fn append_if<F>(&self, row: &T, check: F) -> Result<(), Error>
    where
        F: FnOnce(&[T]) -> Result<(), Error>,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = self.read_rows()?;
        check(&rows)?;
        self.append_row(row)
    }

    fn read_rows(&self) -> Result<Vec<T>, Error> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage(&self.path, e)),
        };
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record.map_err(|e| from_csv(&self.path, e))?);
        }
        Ok(rows)
    }

    fn append_row(&self, row: &T) -> Result<(), Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| storage(&self.path, e))?;
        let header = file.metadata().map_err(|e| storage(&self.path, e))?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(header)
            .from_writer(file);
        writer.serialize(row).map_err(|e| from_csv(&self.path, e))?;
        writer.flush().map_err(|e| storage(&self.path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| storage(&self.path, e))?;
        file.sync_all().map_err(|e| storage(&self.path, e))
    }

    fn write_snapshot(&self, rows: &[T]) -> Result<(), Error> {
        let tmp_path = self.path.with_extension("csv.tmp");
        let file = File::create(&tmp_path).map_err(|e| storage(&tmp_path, e))?;
        if rows.is_empty() {
            // Empty collection: empty file, no header line.
            file.sync_all().map_err(|e| storage(&tmp_path, e))?;
        } else {
            let mut writer = csv::Writer::from_writer(file);
            for row in rows {
                writer.serialize(row).map_err(|e| from_csv(&tmp_path, e))?;
            }
            writer.flush().map_err(|e| storage(&tmp_path, e))?;
            let file = writer
                .into_inner()
                .map_err(|e| storage(&tmp_path, e))?;
            file.sync_all().map_err(|e| storage(&tmp_path, e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| storage(&self.path, e))
    }
}
