use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use weblift_core::{DeployError, Manifest, ObjectStore, Result};

/// Documents served in website mode.
const INDEX_DOCUMENT: &str = "index.html";
const ERROR_DOCUMENT: &str = "error.html";

/// Region assumed when the service reports no location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-backed bucket manager.
#[derive(Debug, Clone)]
pub struct BucketStore {
    client: Client,
}

/// A remote object as reported by [`BucketStore::list_objects`].
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl BucketStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Names of all buckets owned by the caller.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_buckets(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| DeployError::storage("list buckets", e.into_service_error()))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    /// Every object in `bucket`: key, size, last-modified.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_objects(&self, bucket: &str) -> Result<Vec<RemoteObject>> {
        let mut objects = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page
                .map_err(|e| DeployError::storage("list objects", e.into_service_error()))?;
            for obj in page.contents() {
                objects.push(RemoteObject {
                    key: obj.key().unwrap_or_default().to_string(),
                    size: obj.size().unwrap_or(0),
                    last_modified: obj.last_modified().and_then(|ts| {
                        DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
                    }),
                });
            }
        }

        debug!(objects = objects.len(), bucket, "listed bucket objects");
        Ok(objects)
    }

    /// Create `bucket`, or succeed if the caller already owns it.
    #[instrument(skip(self), level = "debug")]
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        let region = self
            .client
            .config()
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut request = self.client.create_bucket().bucket(bucket);
        // The default region must not be sent as a location constraint.
        if region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => {
                debug!(bucket, "bucket created");
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_bucket_already_owned_by_you() {
                    debug!(bucket, "bucket already owned, reusing");
                    Ok(())
                } else {
                    Err(DeployError::storage("create bucket", service_error))
                }
            }
        }
    }

    /// Attach the fixed public-read policy, parameterized only by bucket
    /// name. Overwrites any existing policy.
    #[instrument(skip(self), level = "debug")]
    pub async fn put_public_read_policy(&self, bucket: &str) -> Result<()> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(public_read_policy(bucket))
            .send()
            .await
            .map_err(|e| DeployError::storage("put bucket policy", e.into_service_error()))?;
        debug!(bucket, "public-read policy attached");
        Ok(())
    }

    /// Enable static-website mode with the fixed index/error documents.
    #[instrument(skip(self), level = "debug")]
    pub async fn put_website_config(&self, bucket: &str) -> Result<()> {
        let index = IndexDocument::builder()
            .suffix(INDEX_DOCUMENT)
            .build()
            .map_err(|e| DeployError::storage("website configuration", e))?;
        let error = ErrorDocument::builder()
            .key(ERROR_DOCUMENT)
            .build()
            .map_err(|e| DeployError::storage("website configuration", e))?;

        self.client
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(
                WebsiteConfiguration::builder()
                    .index_document(index)
                    .error_document(error)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| DeployError::storage("put bucket website", e.into_service_error()))?;
        debug!(bucket, "website hosting enabled");
        Ok(())
    }

    /// Create `bucket` and configure it for website hosting.
    ///
    /// Safe to run repeatedly: creation tolerates an existing owned bucket,
    /// and the policy and website writes are absolute overwrites.
    pub async fn setup_website_bucket(&self, bucket: &str) -> Result<()> {
        self.create_bucket(bucket).await?;
        self.put_public_read_policy(bucket).await?;
        self.put_website_config(bucket).await?;
        Ok(())
    }

    /// Region the bucket lives in. An empty location constraint means the
    /// service default.
    #[instrument(skip(self), level = "debug")]
    pub async fn bucket_region(&self, bucket: &str) -> Result<String> {
        let output = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                DeployError::storage("get bucket location", e.into_service_error())
            })?;

        Ok(match output.location_constraint() {
            Some(constraint) if !constraint.as_str().is_empty() => {
                constraint.as_str().to_string()
            }
            _ => DEFAULT_REGION.to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for BucketStore {
    #[instrument(skip(self), level = "debug")]
    async fn load_manifest(&self, bucket: &str) -> Result<Manifest> {
        let mut manifest = Manifest::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page
                .map_err(|e| DeployError::storage("list objects", e.into_service_error()))?;
            for obj in page.contents() {
                if let (Some(key), Some(etag)) = (obj.key(), obj.e_tag()) {
                    manifest.insert(key, etag);
                }
            }
        }

        debug!(objects = manifest.len(), bucket, "manifest loaded");
        Ok(manifest)
    }

    #[instrument(skip(self), level = "debug")]
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| DeployError::storage("read upload body", e))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| DeployError::storage("put object", e.into_service_error()))?;
        debug!(bucket, key, content_type, "object uploaded");
        Ok(())
    }
}

/// Public website endpoint for a configured bucket.
pub fn website_url(bucket: &str, region: &str) -> String {
    format!("http://{bucket}.s3-website-{region}.amazonaws.com")
}

/// Public-read policy document for `bucket`.
fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicReadGetObject",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket}/*")],
        }]
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_document_targets_the_bucket() {
        let policy: serde_json::Value =
            serde_json::from_str(&public_read_policy("my-site")).unwrap();

        assert_eq!(policy["Version"], "2012-10-17");
        let statement = &policy["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Principal"], "*");
        assert_eq!(statement["Action"][0], "s3:GetObject");
        assert_eq!(statement["Resource"][0], "arn:aws:s3:::my-site/*");
    }

    #[test]
    fn website_url_embeds_bucket_and_region() {
        assert_eq!(
            website_url("my-site", "eu-west-1"),
            "http://my-site.s3-website-eu-west-1.amazonaws.com"
        );
    }
}
