use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use tracing::debug;

/// Provider settings resolved once at startup and passed to each operation.
///
/// Everything left `None` falls through to the standard credential and
/// region provider chains (environment, shared config, instance metadata).
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Named credentials profile.
    pub profile: Option<String>,
    /// Region override.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services; implies path-style
    /// addressing.
    pub endpoint_url: Option<String>,
}

/// Build an S3 client from the standard provider chains plus overrides.
pub async fn client(config: &ProviderConfig) -> Client {
    let region_provider = match &config.region {
        Some(region) => RegionProviderChain::first_try(Region::new(region.clone()))
            .or_else("us-east-1"),
        None => RegionProviderChain::default_provider().or_else("us-east-1"),
    };

    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    let shared = loader.load().await;
    debug!(region = ?shared.region(), "resolved provider configuration");

    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &config.endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    Client::from_conf(builder.build())
}
