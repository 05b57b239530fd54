//! Board seed format.

use crate::elements::{Element, now_millis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Board loading/saving errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Failed to parse board: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named element collection, as handed to and returned from a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default = "now_millis")]
    pub created_at: u64,
    #[serde(default = "now_millis")]
    pub updated_at: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            elements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the elements and bump `updated_at`.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.updated_at = now_millis().max(self.updated_at);
    }

    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
