use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::models::University;

/// Errors that can occur while loading the university catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid catalog entry '{name}': {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Duplicate university name: {0}")]
    DuplicateName(String),

    #[error("Catalog contains no universities")]
    Empty,
}

/// On-disk layout shared by the JSON and TOML formats
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    universities: Vec<University>,
}

/// Validated, read-only set of universities available for matching
///
/// Loaded once at startup and shared between workers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    universities: Vec<University>,
}

impl Catalog {
    /// Load a catalog from disk
    ///
    /// Files ending in `.toml` are read as TOML with a top-level
    /// `[[universities]]` array; anything else is read as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading university catalog from {}", path.display());

        let raw = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let catalog = if is_toml {
            Self::from_toml_str(&raw)?
        } else {
            Self::from_json_str(&raw)?
        };

        tracing::info!("Catalog loaded with {} universities", catalog.len());
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::from_universities(file.universities)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::from_universities(file.universities)
    }

    /// Build a catalog, validating every entry against the schema
    pub fn from_universities(universities: Vec<University>) -> Result<Self, CatalogError> {
        if universities.is_empty() {
            return Err(CatalogError::Empty);
        }

        {
            let mut seen = HashSet::with_capacity(universities.len());
            for university in &universities {
                university
                    .validate()
                    .map_err(|source| CatalogError::InvalidEntry {
                        name: university.name.clone(),
                        source,
                    })?;

                if !seen.insert(university.name.as_str()) {
                    return Err(CatalogError::DuplicateName(university.name.clone()));
                }
            }
        }

        Ok(Self { universities })
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    /// Look up a university by its exact name
    pub fn find(&self, name: &str) -> Option<&University> {
        self.universities.iter().find(|university| university.name == name)
    }

    /// Universities located in `country`, in catalog order
    pub fn in_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a University> + 'a {
        self.universities
            .iter()
            .filter(move |university| university.country == country)
    }
}
