use crate::file::{load_or_create, save};
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(rename = "USERS", default)]
    users: Vec<i64>,
}

/// Everyone who ever pressed `/start`, persisted as `{"USERS": [...]}`.
#[derive(Debug)]
pub struct UserRegistry {
    path: PathBuf,
    users: Vec<i64>,
}

impl UserRegistry {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file: UsersFile = load_or_create(&path).await?;
        log::info!("{} known users loaded from {}", file.users.len(), path.display());
        Ok(Self {
            path,
            users: file.users,
        })
    }

    /// Add `user` and persist. Returns `false` if it was already known.
    pub async fn register(&mut self, user: i64) -> Result<bool, StoreError> {
        if self.contains(user) {
            return Ok(false);
        }
        self.users.push(user);
        let file = UsersFile {
            users: self.users.clone(),
        };
        if let Err(e) = save(&self.path, &file).await {
            self.users.pop();
            return Err(e);
        }
        log::info!("registered new user {user}");
        Ok(true)
    }

    pub fn contains(&self, user: i64) -> bool {
        self.users.contains(&user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> &[i64] {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let reg = UserRegistry::load(&path).await.unwrap();
        assert!(reg.is_empty());
        let body: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"USERS": []}));
    }

    #[tokio::test]
    async fn register_persists_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let mut reg = UserRegistry::load(&path).await.unwrap();
        assert!(reg.register(42).await.unwrap());
        assert!(!reg.register(42).await.unwrap());
        assert!(reg.register(7).await.unwrap());

        let reloaded = UserRegistry::load(&path).await.unwrap();
        assert_eq!(reloaded.ids(), &[42, 7]);
        assert!(reloaded.contains(7));
        assert_eq!(reloaded.len(), 2);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "[oops").unwrap();
        assert!(matches!(
            UserRegistry::load(&path).await,
            Err(StoreError::Json { .. })
        ));
    }
}
