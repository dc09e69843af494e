//! Read-only user data behind the public wallpaper tokens.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{LifegridError, LifegridResult};
use crate::model::lenient;
use crate::model::records::{Goal, Habit, Reminder};
use crate::model::settings::Settings;

/// Everything stored for one user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    /// `None` until the user has saved settings; such users have no wallpaper.
    #[serde(deserialize_with = "lenient::or_default")]
    pub settings: Option<Settings>,
    #[serde(deserialize_with = "lenient::list")]
    pub habits: Vec<Habit>,
    #[serde(deserialize_with = "lenient::list")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "lenient::list")]
    pub reminders: Vec<Reminder>,
}

/// Lookup of a user's data by public token.
pub trait UserDataSource: Send + Sync {
    fn lookup(&self, token: &str) -> Option<UserRecord>;
}

/// Users keyed by public token, loaded from a JSON snapshot.
///
/// ```json
/// { "users": { "<token>": { "settings": { ... }, "habits": [ ... ] } } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotStore {
    pub users: BTreeMap<String, UserRecord>,
}

impl SnapshotStore {
    pub fn from_json(json: &str) -> LifegridResult<Self> {
        serde_json::from_str(json).map_err(|e| LifegridError::serde(e.to_string()))
    }

    /// Load a snapshot file. A missing file is an empty store; an unreadable or malformed one is
    /// an error.
    pub async fn load(path: &Path) -> LifegridResult<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => {
                let store = Self::from_json(&json)?;
                tracing::info!(path = %path.display(), users = store.users.len(), "loaded user snapshot");
                Ok(store)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "user snapshot missing; serving no wallpapers");
                Ok(Self::default())
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("read {}", path.display()))
                .into()),
        }
    }

    pub fn insert(&mut self, token: impl Into<String>, record: UserRecord) {
        self.users.insert(token.into(), record);
    }
}

impl UserDataSource for SnapshotStore {
    fn lookup(&self, token: &str) -> Option<UserRecord> {
        self.users.get(token).cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/server/store.rs"]
mod tests;
