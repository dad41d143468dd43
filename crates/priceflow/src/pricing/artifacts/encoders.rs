use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fitted vocabulary for one categorical column. The code of a class is its
/// position in the fitted ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryEncoder {
    classes: Vec<String>,
}

impl CategoryEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Unseen values take code 0, the same code as the first fitted class.
    pub fn encode(&self, value: &str) -> u32 {
        self.classes
            .iter()
            .position(|class| class == value)
            .unwrap_or(0) as u32
    }

    pub fn class_for(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

/// Per-column encoders keyed by training column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnEncoders {
    columns: BTreeMap<String, CategoryEncoder>,
}

impl ColumnEncoders {
    pub fn new(columns: BTreeMap<String, CategoryEncoder>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&CategoryEncoder> {
        self.columns.get(column)
    }
}
