// Rust guideline compliant 2026-10-12

//! Storage module for JSONL resource records.
//!
//! Records are kept one JSON object per line. Each record is keyed by its
//! `(resourceType, id)` pair; records without an id are append-only.

use crate::{Error, ResourceRecord, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// JSONL-backed store of resource records.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    /// Path to the JSONL file.
    path: PathBuf,
}

impl ResourceStore {
    /// Creates a new ResourceStore instance.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSONL file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(Self { path })
    }

    /// Returns a reference to the JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceStore {
    /// Loads all records from the JSONL file, one record per line.
    ///
    /// Malformed lines are skipped with a warning on stderr. Well-formed
    /// values that are not valid records fail the load.
    ///
    /// # Returns
    ///
    /// All records in file order. A missing file yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - A record fails validation
    pub fn load_all(&self) -> Result<Vec<ResourceRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ResourceRecord>(&line) {
                Ok(record) => {
                    record.validate()?;
                    records.push(record);
                }
                Err(e) => {
                    eprintln!("Warning: Skipping malformed JSON line {}: {}", index + 1, e);
                }
            }
        }

        Ok(records)
    }

    /// Loads all records of one resource type.
    ///
    /// # Arguments
    ///
    /// * `resource_type` - The `resourceType` to match exactly
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded.
    pub fn load_by_type(&self, resource_type: &str) -> Result<Vec<ResourceRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|record| record.resource_type() == Some(resource_type))
            .collect())
    }

    /// Loads a single record by type and id.
    ///
    /// # Arguments
    ///
    /// * `resource_type` - The `resourceType` of the record
    /// * `id` - The logical id of the record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be loaded
    /// - No record has this type and id
    pub fn load_by_id(&self, resource_type: &str, id: &str) -> Result<ResourceRecord> {
        self.load_by_type(resource_type)?
            .into_iter()
            .find(|record| record.id() == Some(id))
            .ok_or_else(|| Error::NotFound(format!("{}/{}", resource_type, id)))
    }
}

impl ResourceStore {
    /// Saves a single record.
    ///
    /// A record with the same `(resourceType, id)` is replaced in place;
    /// otherwise the record is appended. Records without an id are always
    /// appended.
    ///
    /// # Arguments
    ///
    /// * `record` - The record to save
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record fails validation
    /// - The file cannot be read or written
    pub fn save(&self, record: &ResourceRecord) -> Result<()> {
        record.validate()?;

        let mut records = self.load_all()?;
        let position = record.id().and_then(|id| {
            records.iter().position(|existing| {
                existing.resource_type() == record.resource_type() && existing.id() == Some(id)
            })
        });

        match position {
            Some(pos) => records[pos] = record.clone(),
            None => records.push(record.clone()),
        }

        self.save_all(&records)
    }

    /// Replaces the entire file with the provided records.
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target so readers never observe a partial file.
    ///
    /// # Arguments
    ///
    /// * `records` - The records to save
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any record fails validation
    /// - The file cannot be written
    /// - The atomic rename fails
    pub fn save_all(&self, records: &[ResourceRecord]) -> Result<()> {
        for record in records {
            record.validate()?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for record in records {
                let json = serde_json::to_string(record)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Deletes a record by type and id.
    ///
    /// # Arguments
    ///
    /// * `resource_type` - The `resourceType` of the record
    /// * `id` - The logical id of the record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or written
    /// - No record has this type and id
    pub fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        let mut records = self.load_all()?;
        let initial_len = records.len();
        records.retain(|record| {
            !(record.resource_type() == Some(resource_type) && record.id() == Some(id))
        });

        if records.len() == initial_len {
            return Err(Error::NotFound(format!("{}/{}", resource_type, id)));
        }

        self.save_all(&records)
    }
}

impl ResourceStore {
    /// Executes a closure with an exclusive lock on the storage file.
    ///
    /// # Arguments
    ///
    /// * `f` - The closure to execute while holding the lock
    ///
    /// # Returns
    ///
    /// The result of the closure execution.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock is held by another process
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.try_lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        let result = f();
        let _ = lock_file.unlock();

        result
    }
}
