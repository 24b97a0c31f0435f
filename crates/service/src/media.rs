//! External media store client. Uploads return a URL plus the store's
//! public id so images can be removed again when an offering is deleted.

use async_trait::async_trait;
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Deserialize;
use thiserror::Error;

/// Concurrent in-flight uploads per operation.
const UPLOAD_CONCURRENCY: usize = 4;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("delete failed: {0}")]
    Delete(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

/// Abstraction over the hosted image service.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, folder: &str, bytes: Vec<u8>) -> Result<UploadedMedia, MediaError>;
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Upload a batch concurrently (bounded), joined before returning.
/// The first failure aborts the batch; remaining uploads are dropped.
pub async fn upload_all(
    store: &dyn MediaStore,
    folder: &str,
    batches: Vec<Vec<u8>>,
) -> Result<Vec<UploadedMedia>, MediaError> {
    stream::iter(batches)
        .map(|bytes| store.upload(folder, bytes))
        .buffered(UPLOAD_CONCURRENCY)
        .try_collect()
        .await
}

/// Remove a batch of images, failing on the first error.
pub async fn delete_all(store: &dyn MediaStore, public_ids: Vec<String>) -> Result<(), MediaError> {
    stream::iter(public_ids)
        .map(|id| async move { store.delete(&id).await })
        .buffered(UPLOAD_CONCURRENCY)
        .try_collect::<Vec<()>>()
        .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// HTTP-backed media store speaking a cloudinary-style upload API.
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpMediaStore {
    pub fn new(upload_url: String) -> Self {
        Self { client: reqwest::Client::new(), upload_url }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, folder: &str, bytes: Vec<u8>) -> Result<UploadedMedia, MediaError> {
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", reqwest::multipart::Part::bytes(bytes));
        let resp = self
            .client
            .post(format!("{}/upload", self.upload_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(MediaError::Upload(format!("status {}", resp.status())));
        }
        let body: UploadResponse = resp.json().await.map_err(|e| MediaError::Upload(e.to_string()))?;
        Ok(UploadedMedia { url: body.secure_url, public_id: body.public_id })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let resp = self
            .client
            .post(format!("{}/destroy", self.upload_url))
            .json(&serde_json::json!({ "public_id": public_id }))
            .send()
            .await
            .map_err(|e| MediaError::Delete(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(MediaError::Delete(format!("status {}", resp.status())));
        }
        Ok(())
    }
}

/// In-memory mock for tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockMediaStore {
        counter: AtomicUsize,
        pub fail_uploads: bool,
        pub deleted: Mutex<Vec<String>>,
    }

    impl MockMediaStore {
        pub fn failing() -> Self {
            Self { fail_uploads: true, ..Self::default() }
        }
    }

    #[async_trait]
    impl MediaStore for MockMediaStore {
        async fn upload(&self, folder: &str, _bytes: Vec<u8>) -> Result<UploadedMedia, MediaError> {
            if self.fail_uploads {
                return Err(MediaError::Upload("mock failure".into()));
            }
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(UploadedMedia {
                url: format!("https://media.test/{}/{}.jpg", folder, n),
                public_id: format!("{}/{}", folder, n),
            })
        }

        async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
            self.deleted.lock().unwrap().push(public_id.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockMediaStore;
    use super::*;

    #[tokio::test]
    async fn upload_all_joins_every_image() {
        let store = MockMediaStore::default();
        let out = upload_all(&store, "portfolio", vec![vec![1], vec![2], vec![3]]).await.unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|m| m.url.starts_with("https://media.test/portfolio/")));
    }

    #[tokio::test]
    async fn upload_all_fails_whole_batch_on_error() {
        let store = MockMediaStore::failing();
        let err = upload_all(&store, "portfolio", vec![vec![1], vec![2]]).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn delete_all_records_public_ids() {
        let store = MockMediaStore::default();
        delete_all(&store, vec!["a".into(), "b".into()]).await.unwrap();
        assert_eq!(*store.deleted.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
