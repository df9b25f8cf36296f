use std::path::PathBuf;

use clap::{Parser, Subcommand};
use weblift_s3::ProviderConfig;

/// Configuration for the weblift CLI.
#[derive(Parser, Debug)]
#[command(name = "weblift")]
#[command(about = "Deploy static websites to S3-compatible object storage")]
#[command(version)]
pub struct Config {
    /// Named credentials profile
    #[arg(long, global = true, env = "WEBLIFT_PROFILE")]
    pub profile: Option<String>,

    /// Region override
    #[arg(long, global = true, env = "WEBLIFT_REGION")]
    pub region: Option<String>,

    /// Custom endpoint URL for S3-compatible services
    #[arg(long, global = true, env = "WEBLIFT_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all buckets
    ListBuckets,
    /// List objects in a bucket
    ListObjects {
        /// Bucket to list
        bucket: String,
    },
    /// Create a bucket and configure it for website hosting
    SetupBucket {
        /// Bucket to create and configure
        bucket: String,
    },
    /// Sync a local directory into a bucket
    Sync {
        /// Local directory to upload
        path: PathBuf,
        /// Target bucket
        bucket: String,
    },
}

impl Config {
    /// Provider settings for client construction.
    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            profile: self.profile.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn parses_sync_arguments() {
        let config = Config::parse_from(["weblift", "sync", "./site", "my-bucket"]);
        match config.command {
            Command::Sync { path, bucket } => {
                assert_eq!(path, PathBuf::from("./site"));
                assert_eq!(bucket, "my-bucket");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_before_the_subcommand() {
        let config = Config::parse_from([
            "weblift",
            "--region",
            "eu-west-1",
            "list-objects",
            "my-bucket",
        ]);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert!(matches!(config.command, Command::ListObjects { .. }));
    }
}
