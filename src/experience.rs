//! Work-experience data for the about page.
//!
//! `content/experience.json` is a JSON array, most recent role first:
//!
//! ```json
//! [
//!   {
//!     "dates": "2021 - Present",
//!     "role": "iOS Engineer",
//!     "company": "Acme",
//!     "description": "Building the Acme app in SwiftUI.",
//!     "logo": "/assets/logos/acme.png"
//!   }
//! ]
//! ```
//!
//! The file order is the presentation order; nothing here sorts. The records
//! are loaded once per build and handed to the about-page renderer as a plain
//! slice.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperienceError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid experience data in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceRecord {
    pub dates: String,
    pub role: String,
    pub company: String,
    pub description: String,
    /// Image path, used as-is in `src`.
    pub logo: String,
}

pub fn parse_experience(json: &str) -> Result<Vec<ExperienceRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read the experience file. Returns an empty list when it does not exist.
pub fn load_experience(path: &Path) -> Result<Vec<ExperienceRecord>, ExperienceError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path).map_err(|source| ExperienceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_experience(&json).map_err(|source| ExperienceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_ROLES: &str = r#"[
        {"dates": "2021 - Present", "role": "iOS Engineer", "company": "Acme",
         "description": "SwiftUI all day.", "logo": "/assets/acme.png"},
        {"dates": "2018 - 2021", "role": "Mobile Developer", "company": "Initech",
         "description": "UIKit and Objective-C.", "logo": "/assets/initech.png"}
    ]"#;

    #[test]
    fn keeps_file_order() {
        let records = parse_experience(TWO_ROLES).unwrap();
        let companies: Vec<&str> = records.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Initech"]);
        assert_eq!(records[1].dates, "2018 - 2021");
    }

    #[test]
    fn missing_field_rejected() {
        let json = r#"[{"dates": "2020", "role": "Dev", "company": "X", "description": "d"}]"#;
        assert!(parse_experience(json).is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        let json = r#"[{"dates": "2020", "role": "Dev", "company": "X", "description": "d",
                        "logo": "l", "salary": "lots"}]"#;
        assert!(parse_experience(json).is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let records = load_experience(&tmp.path().join("experience.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("experience.json");
        fs::write(&path, TWO_ROLES).unwrap();
        assert_eq!(load_experience(&path).unwrap().len(), 2);
    }

    #[test]
    fn invalid_json_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("experience.json");
        fs::write(&path, "{ not an array").unwrap();

        let err = load_experience(&path).unwrap_err();
        assert!(matches!(err, ExperienceError::Json { .. }));
        assert!(err.to_string().contains("experience.json"));
    }
}
