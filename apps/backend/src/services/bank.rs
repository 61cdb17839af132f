//! Question bank loading.
//!
//! Sets are parsed once at startup and held immutably for the lifetime of
//! the process; canonical answers stay server-side.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{ApiError, Result};
use prep_core::types::QuestionSet;

/// A parsed question set together with its source file metadata.
#[derive(Debug, Clone)]
pub struct LoadedSet {
    pub set: QuestionSet,
    pub source_file: String,
    pub content_hash: String,
}

/// In-memory question bank keyed by section.
#[derive(Debug, Default)]
pub struct QuestionBank {
    sets: HashMap<String, LoadedSet>,
}

impl QuestionBank {
    /// Load every `.txt`/`.md` question-set file directly under `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .map_err(|e| ApiError::Bank(format!("cannot read {}: {}", dir.display(), e)))?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ApiError::Bank(e.to_string()))?;
            let path = entry.path();
            let is_bank_file = path
                .extension()
                .map_or(false, |ext| ext == "txt" || ext == "md");
            if !is_bank_file {
                continue;
            }

            let content = fs::read_to_string(&path)
                .map_err(|e| ApiError::Bank(format!("cannot read {}: {}", path.display(), e)))?;
            sources.push((path.display().to_string(), content));
        }

        Self::from_sources(sources)
    }

    /// Build a bank from (source name, content) pairs.
    pub fn from_sources(sources: Vec<(String, String)>) -> Result<Self> {
        let mut sets = HashMap::new();

        for (source_file, content) in sources {
            let set = prep_core::parse(&content)
                .map_err(|e| ApiError::Bank(format!("{}: {}", source_file, e)))?;
            let section = set.section.clone();

            let loaded = LoadedSet {
                set,
                content_hash: hash_content(&content),
                source_file: source_file.clone(),
            };
            if sets.insert(section.clone(), loaded).is_some() {
                return Err(ApiError::Bank(format!(
                    "duplicate section {} in {}",
                    section, source_file
                )));
            }
        }

        Ok(Self { sets })
    }

    /// Look up a set by section key.
    pub fn get(&self, section: &str) -> Option<&LoadedSet> {
        self.sets.get(section)
    }

    /// All sets, ordered by block then section.
    pub fn sections(&self) -> Vec<&LoadedSet> {
        let mut all: Vec<&LoadedSet> = self.sets.values().collect();
        all.sort_by(|a, b| {
            (a.set.block.as_str(), a.set.section.as_str())
                .cmp(&(b.set.block.as_str(), b.set.section.as_str()))
        });
        all
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Calculate SHA256 hash of content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
