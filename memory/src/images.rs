use crate::file::{load_or_create, save};
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ImagesFile {
    #[serde(rename = "IMAGES", default)]
    images: Vec<String>,
}

/// Telegram file ids of collected art, oldest first.
#[derive(Debug)]
pub struct ImageStore {
    path: PathBuf,
    images: Vec<String>,
}

impl ImageStore {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file: ImagesFile = load_or_create(&path).await?;
        Ok(Self {
            path,
            images: file.images,
        })
    }

    pub fn list(&self) -> &[String] {
        &self.images
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Store `file_id` unless already present.
    pub async fn add(&mut self, file_id: &str) -> Result<bool, StoreError> {
        if self.images.iter().any(|i| i == file_id) {
            log::info!("image {file_id} already stored");
            return Ok(false);
        }
        let before = self.images.clone();
        self.images.push(file_id.to_string());
        self.persist_or_restore(before).await?;
        log::info!("stored image {file_id}");
        Ok(true)
    }

    /// Drop every id in `ids`; returns `(removed, not_found)`.
    pub async fn remove_many<I, S>(&mut self, ids: I) -> Result<(Vec<String>, Vec<String>), StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.images.clone();
        let mut removed = Vec::new();
        let mut not_found = Vec::new();
        for id in ids {
            let id = id.as_ref();
            match self.images.iter().position(|i| i == id) {
                Some(idx) => removed.push(self.images.remove(idx)),
                None => not_found.push(id.to_string()),
            }
        }
        self.persist_or_restore(before).await?;
        log::info!(
            "removed {} images, {} not found",
            removed.len(),
            not_found.len()
        );
        Ok((removed, not_found))
    }

    /// One stored id chosen by `pick`, which receives the store size.
    pub fn random(&self, pick: impl FnOnce(usize) -> usize) -> Option<&str> {
        if self.images.is_empty() {
            return None;
        }
        let idx = pick(self.images.len()).min(self.images.len() - 1);
        Some(&self.images[idx])
    }

    /// Up to `n` most recently added ids, newest first.
    pub fn latest(&self, n: usize) -> Vec<&str> {
        self.images.iter().rev().take(n).map(String::as_str).collect()
    }

    /// Write the list out; on failure the in-memory list goes back to `before`.
    async fn persist_or_restore(&mut self, before: Vec<String>) -> Result<(), StoreError> {
        let file = ImagesFile {
            images: self.images.clone(),
        };
        if let Err(e) = save(&self.path, &file).await {
            self.images = before;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::load(dir.path().join("images.json")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn add_dedupes_and_persists() {
        let (dir, mut store) = store().await;
        assert!(store.add("a").await.unwrap());
        assert!(!store.add("a").await.unwrap());
        assert!(store.add("b").await.unwrap());
        let reloaded = ImageStore::load(dir.path().join("images.json")).await.unwrap();
        assert_eq!(reloaded.list(), &["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn remove_many_reports_missing() {
        let (_dir, mut store) = store().await;
        for id in ["a", "b", "c"] {
            store.add(id).await.unwrap();
        }
        let (removed, missing) = store.remove_many(["c", "x", "a"]).await.unwrap();
        assert_eq!(removed, vec!["c", "a"]);
        assert_eq!(missing, vec!["x"]);
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn failed_save_leaves_the_list_unchanged() {
        let (dir, mut store) = store().await;
        let path = dir.path().join("images.json");
        store.add("keep").await.unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert!(store.add("img").await.is_err());
        assert!(store.remove_many(["keep"]).await.is_err());
        assert_eq!(store.list(), &["keep".to_string()]);

        std::fs::remove_dir(&path).unwrap();
        assert!(store.add("img").await.unwrap());
        let reloaded = ImageStore::load(&path).await.unwrap();
        assert_eq!(reloaded.list(), &["keep".to_string(), "img".to_string()]);
    }

    #[tokio::test]
    async fn latest_is_newest_first() {
        let (_dir, mut store) = store().await;
        for id in ["a", "b", "c"] {
            store.add(id).await.unwrap();
        }
        assert_eq!(store.latest(2), vec!["c", "b"]);
        assert_eq!(store.latest(10), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn random_uses_picker_and_handles_empty() {
        let (_dir, mut store) = store().await;
        assert_eq!(store.random(|_| 0), None);
        store.add("a").await.unwrap();
        store.add("b").await.unwrap();
        assert_eq!(store.random(|len| len - 1), Some("b"));
        assert_eq!(store.random(|_| 99), Some("b"));
    }
}
