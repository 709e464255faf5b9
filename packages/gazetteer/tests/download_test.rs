//! Download tests against a mock HTTP server.

use postal_gazetteer::download::{create_client, download_source, SourceFile};
use postal_gazetteer::error::GazetteerError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source(server: &MockServer, route: &str) -> SourceFile {
    SourceFile {
        name: "postal code taxonomy",
        url: format!("{}{route}", server.uri()),
        file_name: "zips.xlsx",
    }
}

/// Run a blocking download off the async test runtime.
async fn download(
    source: SourceFile,
    max_size: u64,
) -> (tempfile::TempDir, postal_gazetteer::Result<std::path::PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().to_path_buf();
    let result = tokio::task::spawn_blocking(move || {
        let client = create_client()?;
        download_source(&client, &source, &target, max_size)
    })
    .await
    .unwrap();
    (dir, result)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_saves_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zips.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04workbook".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let (dir, result) = download(source(&server, "/zips.xlsx"), 1024).await;
    let saved = result.unwrap();

    assert_eq!(saved, dir.path().join("zips.xlsx"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04workbook");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.xlsx"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, result) = download(source(&server, "/missing.xlsx"), 1024).await;

    match result {
        Err(GazetteerError::Download { name, url, .. }) => {
            assert_eq!(name, "postal code taxonomy");
            assert!(url.ends_with("/missing.xlsx"));
        }
        other => panic!("expected download error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky.xlsx"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let (_dir, result) = download(source(&server, "/flaky.xlsx"), 1024).await;

    assert!(matches!(
        result,
        Err(GazetteerError::RetriesExhausted { attempts: 3, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_rejects_oversized_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 4096]))
        .mount(&server)
        .await;

    let (dir, result) = download(source(&server, "/big.xlsx"), 1024).await;

    assert!(matches!(
        result,
        Err(GazetteerError::ResponseTooLarge {
            size: 4096,
            limit: 1024
        })
    ));
    assert!(!dir.path().join("zips.xlsx").exists());
}
