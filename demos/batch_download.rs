//! Basic batch download example
//!
//! This example demonstrates the core functionality of score-dl:
//! - Converting a source table into a score manifest
//! - Writing partition manifests for later inspection
//! - Creating a downloader instance
//! - Running a partition-parallel batch download

use score_dl::{Config, DownloadConfig, Manifest, ScoreDownloader, StorageConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration
    let config = Config {
        storage: StorageConfig {
            endpoint: "https://storage.example.org".to_string(),
            access_token: "your-access-token".to_string(),
        },
        download: DownloadConfig {
            download_dir: "downloads".into(),
            manifest_dir: "manifests".into(),
            partitions: 5,
            ..Default::default()
        },
    };

    // Reshape the source table into a score manifest
    let manifest = Manifest::convert_from_source(
        "song_entries.tsv".as_ref(),
        config.download.manifest_delimiter,
    )?;
    println!("Loaded {} records", manifest.len());

    // Write one manifest file per partition
    let paths = score_dl::write_all_partitions(
        &manifest,
        &config.download.manifest_dir,
        config.download.partitions,
        config.download.manifest_delimiter,
    )?;
    for path in &paths {
        println!("Wrote {}", path.display());
    }

    // Create downloader instance and run the batch
    let downloader = ScoreDownloader::new(&config).await?;
    let summary = downloader
        .download_all(&manifest, config.download.partitions)
        .await?;

    println!(
        "✓ {} files fetched across {} completed partitions",
        summary.files_fetched(),
        summary.completed_jobs()
    );
    for (index, error) in summary.failures() {
        println!("✗ Partition {} failed: {}", index, error);
    }

    Ok(())
}
