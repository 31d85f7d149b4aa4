//! Institution domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::validation::required_text;

/// Kind of charity recipient. Only used to group institutions on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstitutionKind {
    /// A registered foundation
    Foundation,
    /// A non-governmental organisation
    Ngo,
    /// A local collection drive
    LocalCollection,
}

impl InstitutionKind {
    pub const ALL: [InstitutionKind; 3] = [
        InstitutionKind::Foundation,
        InstitutionKind::Ngo,
        InstitutionKind::LocalCollection,
    ];

    /// Value stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionKind::Foundation => "FOUNDATION",
            InstitutionKind::Ngo => "NGO",
            InstitutionKind::LocalCollection => "LOCAL_COLLECTION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstitutionKind::Foundation => "Foundation",
            InstitutionKind::Ngo => "Non-governmental organization",
            InstitutionKind::LocalCollection => "Local collection",
        }
    }
}

impl fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstitutionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InstitutionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(ValidationError::field(
                    "kind",
                    format!("unknown institution kind '{s}'"),
                ))
            })
    }
}

/// Domain model representing a charity recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub kind: InstitutionKind,
}

impl Institution {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        required_text("name", &self.name, 255)?;
        Ok(())
    }
}

/// Input model for creating an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstitution {
    pub name: String,
    pub description: Option<String>,
    pub kind: InstitutionKind,
}

impl NewInstitution {
    pub fn validated(self) -> Result<Self> {
        let name = required_text("name", &self.name, 255)?;
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            name,
            description,
            kind: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_storage_value() {
        for kind in InstitutionKind::ALL {
            assert_eq!(kind.as_str().parse::<InstitutionKind>().unwrap(), kind);
        }
        assert_eq!(
            "local_collection".parse::<InstitutionKind>().unwrap(),
            InstitutionKind::LocalCollection
        );
        assert!("CHURCH".parse::<InstitutionKind>().is_err());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&InstitutionKind::LocalCollection).unwrap(),
            "\"LOCAL_COLLECTION\""
        );
        assert_eq!(
            serde_json::from_str::<InstitutionKind>("\"NGO\"").unwrap(),
            InstitutionKind::Ngo
        );
    }

    #[test]
    fn test_new_institution_drops_blank_description() {
        let new = NewInstitution {
            name: "  Fundacja Dbam o Zdrowie ".into(),
            description: Some("   ".into()),
            kind: InstitutionKind::Foundation,
        }
        .validated()
        .unwrap();
        assert_eq!(new.name, "Fundacja Dbam o Zdrowie");
        assert_eq!(new.description, None);
    }

    #[test]
    fn test_new_institution_requires_name() {
        let new = NewInstitution {
            name: String::new(),
            description: None,
            kind: InstitutionKind::Ngo,
        };
        assert!(new.validated().is_err());
    }
}
