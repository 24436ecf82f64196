//! Organizational roles and the directory of display metadata shown on the role picker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Clo,
    HrAdmin,
    ChiefOfStaff,
    LineManager,
    DivisionDirector,
}

impl Role {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Clo,
            Self::HrAdmin,
            Self::ChiefOfStaff,
            Self::LineManager,
            Self::DivisionDirector,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Clo => "clo",
            Self::HrAdmin => "hr-admin",
            Self::ChiefOfStaff => "chief-of-staff",
            Self::LineManager => "line-manager",
            Self::DivisionDirector => "division-director",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|role| role.id() == normalized)
            .ok_or_else(|| UnknownRole(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

/// Display metadata for a single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub id: Role,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub welcome_message: String,
}

/// Read-only table of role profiles. Every role appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDirectory {
    profiles: Vec<RoleProfile>,
}

impl RoleDirectory {
    pub fn standard() -> Self {
        let profile = |id, title: &str, description: &str, icon: &str, welcome: &str| RoleProfile {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            welcome_message: welcome.to_string(),
        };

        Self {
            profiles: vec![
                profile(
                    Role::Clo,
                    "Chief Learning Officer",
                    "Strategic oversight of learning impact on compliance risk",
                    "🎯",
                    "Hi! I'm here to help you understand how learning impacts compliance risk across the organization — and where strategy can reduce exposure.",
                ),
                profile(
                    Role::HrAdmin,
                    "HR / LMS Admin",
                    "Training completion tracking and audit readiness",
                    "📊",
                    "Hi! I'll help you spot what's overdue, expiring, or missing — and what to fix before it becomes an audit issue.",
                ),
                profile(
                    Role::ChiefOfStaff,
                    "Chief of Staff",
                    "Executive summaries and leadership risk visibility",
                    "📋",
                    "Hi! I'll surface the top compliance risks leadership should know, and help you prepare clear executive summaries.",
                ),
                profile(
                    Role::LineManager,
                    "Line Manager",
                    "Team compliance status and direct actions",
                    "👥",
                    "Hi! I'll show you exactly what your team needs from you to stay compliant — no reports required.",
                ),
                profile(
                    Role::DivisionDirector,
                    "Division Director",
                    "Division-level exposure and risk reduction",
                    "🏢",
                    "Hi! I'll help you understand where your division is exposed, why, and how to reduce risk quickly.",
                ),
            ],
        }
    }

    /// Build a directory from explicit profiles, rejecting gaps and duplicates.
    pub fn from_profiles(profiles: Vec<RoleProfile>) -> Result<Self, DirectoryError> {
        for (index, profile) in profiles.iter().enumerate() {
            if profiles[..index].iter().any(|seen| seen.id == profile.id) {
                return Err(DirectoryError::DuplicateRole(profile.id));
            }
        }

        if let Some(missing) = Role::ordered()
            .into_iter()
            .find(|role| !profiles.iter().any(|profile| profile.id == *role))
        {
            return Err(DirectoryError::MissingRole(missing));
        }

        Ok(Self { profiles })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let profiles: Vec<RoleProfile> = serde_json::from_reader(reader)?;
        Self::from_profiles(profiles)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn profiles(&self) -> &[RoleProfile] {
        &self.profiles
    }

    pub fn profile(&self, role: Role) -> &RoleProfile {
        self.profiles
            .iter()
            .find(|profile| profile.id == role)
            .unwrap_or_else(|| unreachable!("directory validated to contain {role}"))
    }
}

impl Default for RoleDirectory {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("role directory is missing an entry for '{0}'")]
    MissingRole(Role),
    #[error("role directory lists '{0}' more than once")]
    DuplicateRole(Role),
    #[error("role directory is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read role directory: {0}")]
    Io(#[from] std::io::Error),
}
