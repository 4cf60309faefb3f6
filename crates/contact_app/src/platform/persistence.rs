use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use contact_core::FormState;
use form_logging::{form_info, form_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::AppError;

/// Field answers kept on disk between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Draft {
    pub values: BTreeMap<String, String>,
}

impl Draft {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            values: form
                .fields()
                .iter()
                .filter(|field| !field.value().is_empty())
                .map(|field| (field.name().to_string(), field.value().to_string()))
                .collect(),
        }
    }
}

/// The draft file of one form. Saving goes through a temp file in the same
/// directory followed by a rename, so a reader never sees half a draft.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty draft.
    pub fn load(&self) -> Result<Draft, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Draft::default());
            }
            Err(source) => {
                return Err(AppError::DraftRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let draft = ron::from_str(&content).map_err(|err| AppError::DraftParse {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        form_info!("Loaded draft from {:?}", self.path);
        Ok(draft)
    }

    pub fn save(&self, draft: &Draft) -> Result<(), AppError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(draft, pretty)
            .map_err(|err| AppError::DraftEncode(err.to_string()))?;

        self.write_atomic(&content).map_err(|source| AppError::DraftWrite {
            path: self.path.clone(),
            source,
        })?;
        form_info!("Saved draft to {:?}", self.path);
        Ok(())
    }

    /// Removes the draft once it has been sent; a missing file is fine.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => form_info!("Removed draft {:?}", self.path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => form_warn!("Failed to remove draft {:?}: {}", self.path, err),
        }
    }

    fn write_atomic(&self, content: &str) -> io::Result<()> {
        let dir = self.dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
