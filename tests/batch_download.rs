//! End-to-end batch download tests against a mock storage server.
//!
//! Exercises the whole pipeline — manifest, partitioning, resolve, transfer,
//! skip-aware re-runs — over real HTTP using wiremock.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use tempfile::TempDir;
use wiremock::matchers::{bearer_token, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use score_dl::{
    Config, DownloadConfig, Error, Manifest, ManifestRecord, ScoreDownloader, StorageConfig,
};

const TOKEN: &str = "integration-test-token";

fn manifest_of(n: usize) -> Manifest {
    Manifest::from_records(
        (0..n)
            .map(|i| ManifestRecord::new("collab", format!("obj-{i:03}")))
            .collect(),
    )
}

fn config_for(server: &MockServer, download_dir: &Path) -> Config {
    Config {
        storage: StorageConfig {
            endpoint: server.uri(),
            access_token: TOKEN.to_string(),
        },
        download: DownloadConfig {
            download_dir: download_dir.to_path_buf(),
            ..DownloadConfig::default()
        },
    }
}

/// Mount a resolve mock answering every `/download/{id}` with a single part
/// pointing back at this server's `/data/{id}`, plus the matching transfer
/// mock serving each object's payload.
async fn mount_object_store(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path_regex(r"^/download/[^/]+$"))
        .and(bearer_token(TOKEN))
        .respond_with(move |request: &Request| {
            let object_id = request.url.path().rsplit('/').next().unwrap().to_string();
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "parts": [{ "url": format!("{base}/data/{object_id}") }]
            }))
        })
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/data/[^/]+$"))
        .respond_with(|request: &Request| {
            let object_id = request.url.path().rsplit('/').next().unwrap();
            ResponseTemplate::new(200).set_body_bytes(format!("contents of {object_id}"))
        })
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn twenty_three_records_over_five_partitions_all_land_on_disk() {
    let server = MockServer::start().await;
    mount_object_store(&server).await;

    let dir = TempDir::new().unwrap();
    let download_dir = dir.path().join("downloads");
    let config = config_for(&server, &download_dir);
    let downloader = ScoreDownloader::new(&config).await.unwrap();

    let summary = downloader.download_all(&manifest_of(23), 5).await.unwrap();

    assert_eq!(summary.completed_jobs(), 5);
    assert_eq!(summary.failed_jobs(), 0);
    assert_eq!(summary.files_fetched(), 23);

    for i in 0..23 {
        let file = download_dir.join(format!("obj-{i:03}"));
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            format!("contents of obj-{i:03}")
        );
    }
    // one resolve and one transfer per object
    assert_eq!(request_count(&server).await, 46);
}

#[tokio::test]
async fn second_run_is_idempotent_and_touches_the_network_zero_times() {
    let server = MockServer::start().await;
    mount_object_store(&server).await;

    let dir = TempDir::new().unwrap();
    let download_dir = dir.path().join("downloads");
    let config = config_for(&server, &download_dir);
    let downloader = ScoreDownloader::new(&config).await.unwrap();
    let manifest = manifest_of(6);

    let first = downloader.download_all(&manifest, 2).await.unwrap();
    assert_eq!(first.files_fetched(), 6);
    let after_first = request_count(&server).await;

    let second = downloader.download_all(&manifest, 2).await.unwrap();
    assert_eq!(second.completed_jobs(), 2);
    assert_eq!(second.files_fetched(), 0);
    assert_eq!(request_count(&server).await, after_first);
}

#[tokio::test]
async fn partially_present_objects_are_skipped_not_refetched() {
    let server = MockServer::start().await;
    mount_object_store(&server).await;

    let dir = TempDir::new().unwrap();
    let download_dir = dir.path().join("downloads");
    std::fs::create_dir_all(&download_dir).unwrap();
    std::fs::write(download_dir.join("obj-000"), "pre-existing").unwrap();

    let config = config_for(&server, &download_dir);
    let downloader = ScoreDownloader::new(&config).await.unwrap();

    let summary = downloader.download_all(&manifest_of(3), 1).await.unwrap();

    // obj-000 was on disk already: 2 files fetched, its contents untouched
    assert_eq!(summary.files_fetched(), 2);
    assert_eq!(
        std::fs::read_to_string(download_dir.join("obj-000")).unwrap(),
        "pre-existing"
    );
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn a_failing_partition_leaves_its_sibling_untouched() {
    let server = MockServer::start().await;

    // obj-000 and obj-001 form partition 0; their resolves fail at the
    // transport level. Partition 1 (obj-002, obj-003) resolves normally.
    Mock::given(method("GET"))
        .and(path("/download/obj-000"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_object_store(&server).await;

    let dir = TempDir::new().unwrap();
    let download_dir = dir.path().join("downloads");
    let config = config_for(&server, &download_dir);
    let downloader = ScoreDownloader::new(&config).await.unwrap();

    let summary = downloader.download_all(&manifest_of(4), 2).await.unwrap();

    assert_eq!(summary.completed_jobs(), 1);
    assert_eq!(summary.failed_jobs(), 1);
    assert_eq!(summary.files_fetched(), 2);

    let (index, error) = summary.failures().next().unwrap();
    assert_eq!(index, 0);
    assert!(matches!(error, Error::JobFailed { index: 0, .. }));

    // partition 0 aborted before obj-001; partition 1 completed fully
    assert!(!download_dir.join("obj-000").exists());
    assert!(!download_dir.join("obj-001").exists());
    assert!(download_dir.join("obj-002").exists());
    assert!(download_dir.join("obj-003").exists());
}

#[tokio::test]
async fn rejected_credentials_surface_as_a_job_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/download/[^/]+$"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&server, &dir.path().join("downloads"));
    let downloader = ScoreDownloader::new(&config).await.unwrap();

    let summary = downloader.download_all(&manifest_of(2), 1).await.unwrap();

    assert_eq!(summary.completed_jobs(), 0);
    assert_eq!(summary.failed_jobs(), 1);
    let (_, error) = summary.failures().next().unwrap();
    assert!(error.to_string().contains("authentication failed"));
}
