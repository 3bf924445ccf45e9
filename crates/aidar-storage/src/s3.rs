use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::backend::Backend;
use crate::error::StorageError;

/// Documents stored as JSON objects in one S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl Backend for S3Backend {
    async fn get_json(&self, key: &str) -> Result<serde_json::Value, StorageError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    StorageError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    StorageError::GetObject(err.to_string())
                }
            })?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::GetObject(e.to_string()))?
            .into_bytes();

        Ok(serde_json::from_slice(&body)?)
    }

    async fn put_json(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let body = serde_json::to_vec(value)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

        tracing::debug!(bucket = %self.bucket, key, "object written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = &continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

            keys.extend(resp.contents().iter().filter_map(|o| o.key().map(str::to_string)));

            if resp.is_truncated() == Some(true) {
                continuation_token = resp.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(keys)
    }
}
