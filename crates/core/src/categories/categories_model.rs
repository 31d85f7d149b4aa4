use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::validation::required_text;

/// A tag describing the kind of donated goods (clothes, toys, books, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            name: required_text("name", &self.name, 64)?,
        })
    }
}
