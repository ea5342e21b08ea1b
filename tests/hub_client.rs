//! HTTP-level tests of `HubClient` against a mock hub.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qafiyah_publisher::error::PublisherError;
use qafiyah_publisher::hub::lfs::sha256_hex;
use qafiyah_publisher::hub::{DATA_FILE_PATH, DatasetHub, HubClient};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const REPO: &str = "qafiyah/test-poetry";

fn client(server: &MockServer) -> HubClient {
    let token = SecretString::new("hf_test".into());
    HubClient::new(&server.uri(), Some(&token)).unwrap()
}

fn commit_lines(request: &Request) -> Vec<Value> {
    String::from_utf8(request.body.clone())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

async fn requests_to(server: &MockServer, wanted: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == wanted)
        .collect()
}

async fn mount_commit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/api/datasets/{REPO}/commit/main")))
        .and(header("content-type", "application/x-ndjson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commitUrl": "https://hub.test/commit/abc",
            "commitOid": "abc123"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_push_small_dataset_inline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/repos/create"))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "x"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/datasets/{REPO}/tree/main/data")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/datasets/{REPO}/preupload/main")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{"path": DATA_FILE_PATH, "uploadMode": "regular"}]
        })))
        .mount(&server)
        .await;
    mount_commit(&server).await;

    let content = b"PAR1 tiny parquet PAR1".to_vec();
    client(&server).push_dataset(REPO, &content).await.unwrap();

    let create = requests_to(&server, "/api/repos/create").await;
    let body: Value = serde_json::from_slice(&create[0].body).unwrap();
    assert_eq!(body["type"], "dataset");
    assert_eq!(body["organization"], "qafiyah");
    assert_eq!(body["name"], "test-poetry");

    let commits = requests_to(&server, &format!("/api/datasets/{REPO}/commit/main")).await;
    let lines = commit_lines(&commits[0]);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["key"], "header");
    assert_eq!(lines[1]["key"], "file");
    assert_eq!(lines[1]["value"]["path"], DATA_FILE_PATH);
    assert_eq!(lines[1]["value"]["content"], STANDARD.encode(&content));
}

#[tokio::test]
async fn test_push_large_dataset_through_lfs_replaces_nested_old_files() {
    let server = MockServer::start().await;
    let content = vec![42u8; 4096];
    let oid = sha256_hex(&content);

    Mock::given(method("POST"))
        .and(path("/api/repos/create"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "exists"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/datasets/{REPO}/tree/main/data")))
        .and(query_param("recursive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "file", "path": "data/old-00000-of-00002.parquet"},
            {"type": "file", "path": DATA_FILE_PATH},
            {"type": "directory", "path": "data/extra"},
            {"type": "file", "path": "data/extra/x.parquet"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/datasets/{REPO}/preupload/main")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{"path": DATA_FILE_PATH, "uploadMode": "lfs"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/datasets/{REPO}.git/info/lfs/objects/batch")))
        .and(header("accept", "application/vnd.git-lfs+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [{
                "oid": oid,
                "size": content.len(),
                "actions": {
                    "upload": {
                        "href": format!("{}/lfs-storage/{oid}", server.uri()),
                        "header": {"x-upload-token": "signed"}
                    }
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/lfs-storage/{oid}")))
        .and(header("x-upload-token", "signed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_commit(&server).await;

    client(&server).push_dataset(REPO, &content).await.unwrap();

    let uploads = requests_to(&server, &format!("/lfs-storage/{oid}")).await;
    assert_eq!(uploads[0].body, content);

    let commits = requests_to(&server, &format!("/api/datasets/{REPO}/commit/main")).await;
    let lines = commit_lines(&commits[0]);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["key"], "lfsFile");
    assert_eq!(lines[1]["value"]["oid"], oid.as_str());
    assert_eq!(lines[1]["value"]["path"], DATA_FILE_PATH);
    let deleted: Vec<&str> = lines[2..]
        .iter()
        .filter(|l| l["key"] == "deletedFile")
        .map(|l| l["value"]["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        deleted,
        ["data/old-00000-of-00002.parquet", "data/extra/x.parquet"]
    );
}

#[tokio::test]
async fn test_rejected_repo_creation_stops_the_push() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/repos/create"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/datasets/{REPO}/commit/main")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .push_dataset(REPO, b"PAR1")
        .await
        .unwrap_err();

    assert!(matches!(err, PublisherError::Publish(_)));
    assert!(err.to_string().contains("401"));
    assert!(err.to_string().contains("Invalid token"));
}

#[tokio::test]
async fn test_upload_card_sends_exact_bytes_as_readme() {
    let server = MockServer::start().await;
    mount_commit(&server).await;

    let card = "# Classical Arabic Poetry\n\nقافية\n".as_bytes();
    client(&server).upload_card(REPO, card).await.unwrap();

    let commits = requests_to(&server, &format!("/api/datasets/{REPO}/commit/main")).await;
    let lines = commit_lines(&commits[0]);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["value"]["path"], "README.md");
    let sent = STANDARD
        .decode(lines[1]["value"]["content"].as_str().unwrap())
        .unwrap();
    assert_eq!(sent, card);
}

#[tokio::test]
async fn test_failed_commit_is_publish_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/datasets/{REPO}/commit/main")))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_card(REPO, b"# card")
        .await
        .unwrap_err();
    assert!(matches!(err, PublisherError::Publish(_)));
}
