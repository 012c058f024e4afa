use crate::error::{DropletError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, pre-built application artifact known to a droplet runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droplet {
    pub name: String,
    /// Absent for droplets uploaded before creation times were tracked.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Droplet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: None,
        }
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// Droplet names double as store keys and directory names.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DropletError::InvalidName(
            "droplet name cannot be empty".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(DropletError::InvalidName(format!(
            "'{}' is not a valid droplet name",
            name
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(DropletError::InvalidName(format!(
            "'{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}
