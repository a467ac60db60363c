use std::path::PathBuf;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Source of administrator chat ids.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn list_admin_ids(&self) -> Result<Vec<i64>>;
}

#[derive(Debug, Deserialize)]
struct AdminsFile {
    admins: Vec<AdminEntry>,
}

#[derive(Debug, Deserialize)]
struct AdminEntry {
    chat_id: i64,
}

/// Admin list kept in a JSON file next to the service:
/// `{"admins": [{"chat_id": 123}]}`. The file is reread on every call so
/// edits apply without a restart.
pub struct FileAdminDirectory {
    path: PathBuf,
}

impl FileAdminDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AdminDirectory for FileAdminDirectory {
    async fn list_admin_ids(&self) -> Result<Vec<i64>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading admins file {}", self.path.display()))?;
        let file: AdminsFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing admins file {}", self.path.display()))?;
        Ok(file.admins.into_iter().map(|a| a.chat_id).collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_admins_file_shape() {
        let raw = r#"{"admins": [{"chat_id": 100}, {"chat_id": 200}]}"#;
        let file: AdminsFile = serde_json::from_str(raw).unwrap();
        let ids: Vec<i64> = file.admins.iter().map(|a| a.chat_id).collect();
        assert_eq!(ids, vec![100, 200]);
    }

    #[tokio::test]
    async fn reads_ids_from_disk() {
        let path = std::env::temp_dir().join("attendance-control-admins-test.json");
        tokio::fs::write(&path, r#"{"admins": [{"chat_id": 7}]}"#)
            .await
            .unwrap();

        let directory = FileAdminDirectory::new(&path);
        assert_eq!(directory.list_admin_ids().await.unwrap(), vec![7]);

        tokio::fs::remove_file(&path).await.ok();
    }
}
