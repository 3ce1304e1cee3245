use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::errors::StoreError;

const ACL_HEADER: &str = "x-amz-acl";
const PUBLIC_READ: &str = "public-read";

/// Object storage boundary consumed by the upload coordinator.
///
/// Objects are stored with public-read visibility; `put` returns the public
/// URL the webhook payload will carry.
pub trait ObjectStore: Send + Sync {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError>;

    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// S3-compatible store addressed over plain HTTPS.
pub struct S3HttpStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3HttpStore {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    /// Public URL convention: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

impl ObjectStore for S3HttpStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        let url = self.object_url(key);
        let response = self
            .client
            .put(&url)
            .header(ACL_HEADER, PUBLIC_READ)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()?;
        if response.status().is_success() {
            Ok(url)
        } else {
            Err(StoreError::Rejected {
                key: key.to_string(),
                status: response.status().as_u16(),
            })
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.object_url(key)).send()?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Rejected {
                key: key.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}
