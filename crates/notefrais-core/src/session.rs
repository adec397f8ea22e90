use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Administrator,
}

/// Identity of the logged-in user, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub version: u32,
    pub user: UserProfile,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not resolve home directory for session path")]
    HomeDirectoryUnavailable,
    #[error("failed to read session at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid session: {message}")]
    Validation { message: String },
}

pub fn resolve_session_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(SessionError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("notefrais")
        .join("session.toml"))
}

pub fn load_session(path: &Path) -> Result<SessionConfig, SessionError> {
    let raw = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: SessionConfig = toml::from_str(&raw).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_session(&parsed)?;
    Ok(parsed)
}

pub fn validate_session(session: &SessionConfig) -> Result<(), SessionError> {
    if session.version != 1 {
        return Err(SessionError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    let email = session.user.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(SessionError::Validation {
            message: "user email must be a non-empty address".to_string(),
        });
    }

    Ok(())
}
