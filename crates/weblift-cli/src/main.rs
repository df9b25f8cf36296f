mod config;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weblift_s3::BucketStore;

use config::{Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    let client = weblift_s3::client(&config.provider()).await;
    let store = BucketStore::new(client);

    match config.command {
        Command::ListBuckets => {
            for name in store.list_buckets().await? {
                println!("{name}");
            }
        }
        Command::ListObjects { bucket } => {
            for obj in store.list_objects(&bucket).await? {
                let modified = obj
                    .last_modified
                    .map(|ts| ts.to_rfc3339())
                    .unwrap_or_default();
                println!("{}\t{}\t{}", obj.key, obj.size, modified);
            }
        }
        Command::SetupBucket { bucket } => {
            store.setup_website_bucket(&bucket).await?;
            let region = store.bucket_region(&bucket).await?;
            info!(%bucket, %region, "bucket configured for website hosting");
            println!("{}", weblift_s3::website_url(&bucket, &region));
        }
        Command::Sync { path, bucket } => {
            let report = weblift_core::sync(&store, &path, &bucket)
                .await
                .with_context(|| {
                    format!("syncing {} to bucket {bucket}", path.display())
                })?;
            let region = store.bucket_region(&bucket).await?;
            println!(
                "{} uploaded, {} unchanged -> {}",
                report.uploaded,
                report.skipped,
                weblift_s3::website_url(&bucket, &region)
            );
        }
    }

    Ok(())
}
