//! S3 backend for weblift.
//!
//! Bucket management (create, policy, website mode, listing, region and
//! website-URL lookup) plus the [`weblift_core::ObjectStore`] implementation
//! that drives incremental sync.

mod bucket;
mod client;

pub use bucket::{website_url, BucketStore, RemoteObject};
pub use client::{client, ProviderConfig};
