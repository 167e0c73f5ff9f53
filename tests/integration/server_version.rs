//! Cluster version discovery against a mock API server.

use crate::common::TestHome;
use kubectl_switch::cluster::{ClusterArgs, KubeconfigVersionSource, VersionSource};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api_server(git_version: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            serde_json::json!({
                "major": "1",
                "minor": "13",
                "gitVersion": git_version,
                "platform": "linux/amd64"
            })
            .to_string(),
            "application/json",
        ))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_version_from_kubeconfig_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"gitVersion":"v1.13.1"}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let kubeconfig = home.path().join("config");
    std::fs::write(
        &kubeconfig,
        format!(
            "current-context: test\ncontexts:\n- name: test\n  context:\n    cluster: test\n    user: test\nclusters:\n- name: test\n  cluster:\n    server: {}\nusers:\n- name: test\n  user:\n    token: secret-token\n",
            server.uri()
        ),
    )
    .unwrap();

    let source = KubeconfigVersionSource::new(
        ClusterArgs::scan(["--kubeconfig", kubeconfig.to_str().unwrap(), "get", "pods"]),
        home.path(),
    );
    assert_eq!(source.resolve().await.unwrap(), "v1.13.1");
}

#[tokio::test]
async fn test_version_from_server_flag() {
    let server = api_server("v1.10.0+coreos.0").await;
    let home = TempDir::new().unwrap();

    let source = KubeconfigVersionSource::new(
        ClusterArgs::scan([format!("--server={}", server.uri()), "--kubeconfig=/nonexistent".to_string()]),
        home.path(),
    );
    assert_eq!(source.resolve().await.unwrap(), "v1.10.0+coreos.0");
}

#[tokio::test]
async fn test_unauthorized_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(401)).mount(&server).await;
    let home = TempDir::new().unwrap();
    let uri = server.uri();

    let source = KubeconfigVersionSource::new(
        ClusterArgs::scan(["-s", uri.as_str(), "--kubeconfig", "/nonexistent"]),
        home.path(),
    );
    assert!(source.resolve().await.is_err());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_runs_kubectl_matching_server() {
    let server = api_server("v1.10.0+coreos.0").await;
    let home = TestHome::new();
    home.write_config("version_timeout_ms = 5000\n");
    home.install_kubectl("1.10.0", "echo matched 1.10.0");
    home.install_kubectl("1.13.0", "echo fallback 1.13.0");

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        home.command().args(["--server", &uri, "version"]).output().unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "matched 1.10.0");
}
