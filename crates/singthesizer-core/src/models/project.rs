use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slowest tempo accepted by the project form.
pub const MIN_BPM: u16 = 1;

/// Fastest tempo accepted by the project form.
pub const MAX_BPM: u16 = 300;

/// Tempo used for new projects and when a backend omits it.
pub const DEFAULT_BPM: u16 = 120;

// ============================================================================
// Musical Key
// ============================================================================

/// Musical key of a project, one of the twelve pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MusicalKey {
    #[default]
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl MusicalKey {
    pub const ALL: [MusicalKey; 12] = [
        MusicalKey::C,
        MusicalKey::CSharp,
        MusicalKey::D,
        MusicalKey::DSharp,
        MusicalKey::E,
        MusicalKey::F,
        MusicalKey::FSharp,
        MusicalKey::G,
        MusicalKey::GSharp,
        MusicalKey::A,
        MusicalKey::ASharp,
        MusicalKey::B,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicalKey::C => "C",
            MusicalKey::CSharp => "C#",
            MusicalKey::D => "D",
            MusicalKey::DSharp => "D#",
            MusicalKey::E => "E",
            MusicalKey::F => "F",
            MusicalKey::FSharp => "F#",
            MusicalKey::G => "G",
            MusicalKey::GSharp => "G#",
            MusicalKey::A => "A",
            MusicalKey::ASharp => "A#",
            MusicalKey::B => "B",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Next pitch class up, wrapping B to C
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Next pitch class down, wrapping C to B
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Project
// ============================================================================

fn default_bpm() -> u16 {
    DEFAULT_BPM
}

/// A music project as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// Owner's user id
    pub user: i64,
    #[serde(default = "default_bpm")]
    pub bpm: u16,
    #[serde(default)]
    pub key: MusicalKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST projects/` and `PATCH projects/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<MusicalKey>,
}

impl ProjectPayload {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bpm: None,
            key: None,
        }
    }
}

// ============================================================================
// Form Validation
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    #[error("Project name is required.")]
    MissingName,

    #[error("BPM must be between 1 and 300.")]
    BpmOutOfRange,
}

/// Raw project form fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub bpm: String,
    pub key: MusicalKey,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            bpm: DEFAULT_BPM.to_string(),
            key: MusicalKey::default(),
        }
    }
}

impl ProjectForm {
    /// Form pre-filled from an existing project, for editing.
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            bpm: project.bpm.to_string(),
            key: project.key,
        }
    }

    /// Check the form before any network call and build the request body.
    pub fn validate(&self) -> Result<ProjectPayload, ProjectValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProjectValidationError::MissingName);
        }

        let bpm = self
            .bpm
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|bpm| (MIN_BPM..=MAX_BPM).contains(bpm))
            .ok_or(ProjectValidationError::BpmOutOfRange)?;

        Ok(ProjectPayload {
            name: name.to_string(),
            bpm: Some(bpm),
            key: Some(self.key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, bpm: &str) -> ProjectForm {
        ProjectForm {
            name: name.to_string(),
            bpm: bpm.to_string(),
            key: MusicalKey::FSharp,
        }
    }

    #[test]
    fn test_musical_key_serde_names() {
        assert_eq!(serde_json::to_string(&MusicalKey::CSharp).unwrap(), r#""C#""#);
        assert_eq!(serde_json::to_string(&MusicalKey::B).unwrap(), r#""B""#);
        let key: MusicalKey = serde_json::from_str(r#""A#""#).unwrap();
        assert_eq!(key, MusicalKey::ASharp);
    }

    #[test]
    fn test_musical_key_cycle_wraps() {
        assert_eq!(MusicalKey::B.next(), MusicalKey::C);
        assert_eq!(MusicalKey::C.prev(), MusicalKey::B);
        assert_eq!(MusicalKey::E.next(), MusicalKey::F);
    }

    #[test]
    fn test_project_defaults_for_missing_fields() {
        let project: Project = serde_json::from_str(
            r#"{"id": 7, "name": "Demo", "user": 1,
                "created_at": "2025-01-02T03:04:05Z", "updated_at": "2025-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(project.bpm, DEFAULT_BPM);
        assert_eq!(project.key, MusicalKey::C);
    }

    #[test]
    fn test_payload_omits_absent_fields() {
        let json = serde_json::to_value(ProjectPayload::named("Song")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Song"}));
    }

    #[test]
    fn test_validate_trims_name() {
        let payload = form("  Night Drive  ", "98").validate().unwrap();
        assert_eq!(payload.name, "Night Drive");
        assert_eq!(payload.bpm, Some(98));
        assert_eq!(payload.key, Some(MusicalKey::FSharp));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert_eq!(form("   ", "120").validate(), Err(ProjectValidationError::MissingName));
    }

    #[test]
    fn test_validate_bpm_bounds() {
        assert!(form("x", "1").validate().is_ok());
        assert!(form("x", "300").validate().is_ok());

        let err = form("x", "500").validate().unwrap_err();
        assert_eq!(err.to_string(), "BPM must be between 1 and 300.");
        assert_eq!(form("x", "0").validate(), Err(ProjectValidationError::BpmOutOfRange));
        assert_eq!(form("x", "fast").validate(), Err(ProjectValidationError::BpmOutOfRange));
        assert_eq!(form("x", "").validate(), Err(ProjectValidationError::BpmOutOfRange));
    }
}
