//! Astro store over one JSON document.
//!
//! # Responsibility
//! - Own the ordered in-memory astro collection.
//! - Mirror every successful mutation to the backing document in full.
//!
//! # Invariants
//! - Names are unique after every successful mutation.
//! - Mutations compute the next collection, write it, and only then swap it
//!   in; a failed write leaves the in-memory collection untouched.
//! - Stored records are normalized, validated and placed on the canvas.
//! - A load failure resets the collection to empty.

use crate::config::StoreConfig;
use crate::model::astro::{AstroRecord, AstroValidationError};
use crate::provider::file::FileProvider;
use crate::store::placement::{Placement, RandomPlacement};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing document could not be turned into a collection.
#[derive(Debug)]
pub enum LoadError {
    /// The document exists but the provider could not read it.
    Read { path: String },
    /// The document is not a JSON array of astro objects.
    Parse {
        path: String,
        source: serde_json::Error,
    },
    /// The document was missing and creating it failed.
    Materialize(SaveError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path } => write!(f, "failed to read astro data file `{path}`"),
            Self::Parse { path, source } => {
                write!(f, "astro data file `{path}` is not a valid astro array: {source}")
            }
            Self::Materialize(err) => write!(f, "failed to create astro data file: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { .. } => None,
            Self::Parse { source, .. } => Some(source),
            Self::Materialize(err) => Some(err),
        }
    }
}

/// Collection could not be written to the backing document.
#[derive(Debug)]
pub enum SaveError {
    Serialize(serde_json::Error),
    /// The provider reported the write did not take effect.
    Write { path: String },
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize astro data: {err}"),
            Self::Write { path } => write!(f, "failed to write astro data file `{path}`"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Write { .. } => None,
        }
    }
}

/// Error returned by store operations.
#[derive(Debug)]
pub enum StoreError {
    Load(LoadError),
    Save(SaveError),
    /// Another record already uses this name.
    DuplicateName(String),
    NotFound(String),
    Validation(AstroValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "{err}"),
            Self::Save(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "an astro named `{name}` already exists"),
            Self::NotFound(name) => write!(f, "astro not found: `{name}`"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Save(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateName(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<LoadError> for StoreError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<SaveError> for StoreError {
    fn from(value: SaveError) -> Self {
        Self::Save(value)
    }
}

impl From<AstroValidationError> for StoreError {
    fn from(value: AstroValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Which path a successful upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended as a new record.
    Created,
    /// Replaced an existing record in place.
    Updated,
}

/// In-memory astro collection mirrored to a JSON array document.
pub struct AstroStore<P: FileProvider> {
    provider: P,
    config: StoreConfig,
    placement: Box<dyn Placement>,
    astros: Vec<AstroRecord>,
}

impl<P: FileProvider> AstroStore<P> {
    /// Creates an empty, unloaded store with random placement.
    pub fn new(provider: P, config: StoreConfig) -> Self {
        Self::with_placement(provider, config, RandomPlacement)
    }

    pub fn with_placement(
        provider: P,
        config: StoreConfig,
        placement: impl Placement + 'static,
    ) -> Self {
        Self {
            provider,
            config,
            placement: Box::new(placement),
            astros: Vec::new(),
        }
    }

    /// Creates a store and loads its document.
    pub fn open(provider: P, config: StoreConfig) -> StoreResult<Self> {
        let mut store = Self::new(provider, config);
        store.load()?;
        Ok(store)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replaces the collection with the backing document's content.
    ///
    /// - Missing document: empty collection, written immediately.
    /// - Empty or whitespace-only document: empty collection, no write.
    /// - Otherwise parsed as an astro array; unplaced records get coordinates.
    ///
    /// # Errors
    /// Returns `StoreError::Load`; the collection is empty afterwards.
    pub fn load(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        info!(
            "event=store_load module=store status=start path={}",
            self.config.data_file
        );

        match self.read_collection() {
            Ok(astros) => {
                info!(
                    "event=store_load module=store status=ok duration_ms={} count={}",
                    started_at.elapsed().as_millis(),
                    astros.len()
                );
                self.astros = astros;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.astros.clear();
                Err(err.into())
            }
        }
    }

    /// Writes the current collection as one pretty-printed document.
    pub fn save(&self) -> StoreResult<()> {
        self.write_collection(&self.astros)?;
        Ok(())
    }

    /// Creates, renames or updates one astro.
    ///
    /// With a non-empty `original_name` that matches a record, that record is
    /// replaced in place (keeping its coordinates when `record` has none).
    /// Otherwise `record` is appended. Empty `original_name` means create.
    ///
    /// # Errors
    /// - `Validation` when the name or star name is blank.
    /// - `DuplicateName` when another record already has `record.name`.
    /// - `Save` when the write fails; nothing changes in memory.
    pub fn upsert(
        &mut self,
        mut record: AstroRecord,
        original_name: Option<&str>,
    ) -> StoreResult<UpsertOutcome> {
        record.normalize();
        record.validate()?;

        let target = original_name
            .filter(|name| !name.is_empty())
            .and_then(|name| self.index_of(name));
        let mut next = self.astros.clone();

        let outcome = match target {
            Some(index) => {
                if self.name_taken_by_other(&record.name, Some(index)) {
                    return Err(StoreError::DuplicateName(record.name));
                }
                if record.position.is_none() {
                    record.position = next[index].position;
                }
                if record.position.is_none() {
                    record.position = Some(self.placement.place(self.config.canvas));
                }
                next[index] = record;
                UpsertOutcome::Updated
            }
            None => {
                if original_name.is_some_and(|name| !name.is_empty()) {
                    warn!("event=astro_upsert module=store status=stale_target action=append");
                }
                if self.name_taken_by_other(&record.name, None) {
                    return Err(StoreError::DuplicateName(record.name));
                }
                if record.position.is_none() {
                    record.position = Some(self.placement.place(self.config.canvas));
                }
                next.push(record);
                UpsertOutcome::Created
            }
        };

        self.commit(next)?;
        info!(
            "event=astro_upsert module=store status=ok outcome={:?} count={}",
            outcome,
            self.astros.len()
        );
        Ok(outcome)
    }

    /// Removes every record named `name` and writes the collection.
    ///
    /// A missing name still writes. Returns how many records were removed.
    pub fn delete(&mut self, name: &str) -> StoreResult<usize> {
        let next: Vec<AstroRecord> = self
            .astros
            .iter()
            .filter(|astro| astro.name != name)
            .cloned()
            .collect();
        let removed = self.astros.len() - next.len();

        self.commit(next)?;
        info!(
            "event=astro_delete module=store status=ok removed={} count={}",
            removed,
            self.astros.len()
        );
        Ok(removed)
    }

    /// Copy of the collection in insertion order.
    pub fn list(&self) -> Vec<AstroRecord> {
        self.astros.clone()
    }

    /// Borrowed view of the collection in insertion order.
    pub fn astros(&self) -> &[AstroRecord] {
        &self.astros
    }

    /// First record with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&AstroRecord> {
        self.astros.iter().find(|astro| astro.name == name)
    }

    /// Like [`Self::find_by_name`], with a `NotFound` error on miss.
    pub fn get(&self, name: &str) -> StoreResult<&AstroRecord> {
        self.find_by_name(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.astros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.astros.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.astros.iter().position(|astro| astro.name == name)
    }

    fn name_taken_by_other(&self, name: &str, skip: Option<usize>) -> bool {
        self.astros
            .iter()
            .enumerate()
            .any(|(index, astro)| Some(index) != skip && astro.name == name)
    }

    fn commit(&mut self, next: Vec<AstroRecord>) -> StoreResult<()> {
        self.write_collection(&next)?;
        self.astros = next;
        Ok(())
    }

    fn read_collection(&mut self) -> Result<Vec<AstroRecord>, LoadError> {
        let path = self.config.data_file.clone();

        if !self.provider.exists(&path) {
            self.ensure_parent_directory();
            self.write_collection(&[]).map_err(LoadError::Materialize)?;
            return Ok(Vec::new());
        }

        let content = self
            .provider
            .read(&path)
            .ok_or_else(|| LoadError::Read { path: path.clone() })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut astros: Vec<AstroRecord> = serde_json::from_str(&content)
            .map_err(|source| LoadError::Parse { path, source })?;
        for astro in &mut astros {
            if astro.position.is_none() {
                astro.position = Some(self.placement.place(self.config.canvas));
            }
        }
        Ok(astros)
    }

    fn write_collection(&self, astros: &[AstroRecord]) -> Result<(), SaveError> {
        let started_at = Instant::now();
        let path = self.config.data_file.as_str();
        let json = serde_json::to_string_pretty(astros).map_err(SaveError::Serialize)?;

        if !self.provider.write(path, &json) {
            error!(
                "event=store_save module=store status=error duration_ms={} error_code=write_failed path={}",
                started_at.elapsed().as_millis(),
                path
            );
            return Err(SaveError::Write {
                path: path.to_string(),
            });
        }

        info!(
            "event=store_save module=store status=ok duration_ms={} count={} bytes={}",
            started_at.elapsed().as_millis(),
            astros.len(),
            json.len()
        );
        Ok(())
    }

    fn ensure_parent_directory(&self) {
        let parent = Path::new(&self.config.data_file)
            .parent()
            .and_then(Path::to_str)
            .filter(|parent| !parent.is_empty());
        if let Some(parent) = parent {
            if !self.provider.ensure_directory(parent) {
                warn!("event=store_load module=store status=warn error_code=mkdir_failed path={parent}");
            }
        }
    }
}
