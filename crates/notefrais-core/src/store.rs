use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bill::Bill;

const STORE_VERSION: i64 = 1;

/// A store rejection. The message is the human-readable string the remote
/// side produced ("Erreur 404" style) and must reach the view unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The persistence collaborator. Each call resolves or rejects exactly once;
/// `create` and `update` return the full updated collection.
pub trait BillStore {
    fn fetch_all(&self) -> Result<Vec<Bill>, StoreError>;
    fn create(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError>;
    fn update(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoreFile {
    version: i64,
    #[serde(rename = "bill", default)]
    bills: Vec<Bill>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            bills: Vec::new(),
        }
    }
}

/// File-backed store keeping the whole collection in one TOML document.
/// Writes go through a `.tmp` sibling and a rename so a failed write never
/// leaves a half-written collection behind.
#[derive(Debug, Clone)]
pub struct TomlBillStore {
    path: PathBuf,
}

pub fn resolve_store_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| {
        StoreError::new("could not resolve home directory for bill store path")
    })?;
    Ok(base_dirs
        .home_dir()
        .join(".local")
        .join("share")
        .join("notefrais")
        .join("bills.toml"))
}

impl TomlBillStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> Result<StoreFile, StoreError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| {
            StoreError::new(format!(
                "failed to read bill store at {}: {source}",
                self.path.display()
            ))
        })?;

        let parsed: StoreFile = toml::from_str(&raw).map_err(|source| {
            StoreError::new(format!(
                "failed to parse bill store at {}: {source}",
                self.path.display()
            ))
        })?;

        if parsed.version != STORE_VERSION {
            return Err(StoreError::new(format!(
                "unsupported bill store version (expected {STORE_VERSION}, found {})",
                parsed.version
            )));
        }

        Ok(parsed)
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                StoreError::new(format!(
                    "failed to create bill store directory {}: {source}",
                    parent.display()
                ))
            })?;
        }

        let serialized = toml::to_string(file).map_err(|source| {
            StoreError::new(format!("failed to serialize bill store: {source}"))
        })?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, serialized).map_err(|source| {
            StoreError::new(format!(
                "failed to write bill store at {}: {source}",
                temp_path.display()
            ))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|source| {
            StoreError::new(format!(
                "failed to write bill store at {}: {source}",
                self.path.display()
            ))
        })
    }

    fn next_id(bills: &[Bill]) -> String {
        let highest = bills
            .iter()
            .filter_map(|bill| bill.id.as_deref())
            .filter_map(|id| id.strip_prefix("bill-"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("bill-{:04}", highest + 1)
    }
}

impl BillStore for TomlBillStore {
    fn fetch_all(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self.load_file()?.bills)
    }

    fn create(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError> {
        let mut file = self.load_file()?;

        let mut persisted = bill.clone();
        persisted.id = Some(Self::next_id(&file.bills));
        file.bills.push(persisted);

        self.write_file(&file)?;
        Ok(file.bills)
    }

    fn update(&self, bill: &Bill) -> Result<Vec<Bill>, StoreError> {
        let Some(id) = bill.id.as_deref() else {
            return Err(StoreError::new("cannot update a bill without an id"));
        };

        let mut file = self.load_file()?;
        let Some(slot) = file
            .bills
            .iter_mut()
            .find(|existing| existing.id.as_deref() == Some(id))
        else {
            return Err(StoreError::new(format!("no bill with id '{id}'")));
        };

        *slot = bill.clone();
        self.write_file(&file)?;
        Ok(file.bills)
    }
}
