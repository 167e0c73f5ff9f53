//! GitHub release client against a mock API.

use crate::common::TestHome;
use kubectl_switch::upgrade::{GitHubReleases, ReleaseAsset, ReleaseSource};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_latest_release() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/tjamet/kubectl-switch/releases/latest"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            serde_json::json!({
                "tag_name": "v0.4.0",
                "draft": false,
                "assets": [
                    {"name": "kubectl-switch-linux-amd64", "browser_download_url": "https://dl.test/linux"},
                    {"name": "kubectl-switch-darwin-amd64", "browser_download_url": "https://dl.test/darwin"}
                ]
            })
            .to_string(),
            "application/json",
        ))
        .mount(&server)
        .await;

    let releases = GitHubReleases::new(server.uri()).unwrap();
    let release = releases.latest_release("tjamet", "kubectl-switch").await.unwrap();

    assert_eq!(release.tag_name, "v0.4.0");
    assert_eq!(
        release.assets,
        vec![
            ReleaseAsset::new("kubectl-switch-linux-amd64", "https://dl.test/linux"),
            ReleaseAsset::new("kubectl-switch-darwin-amd64", "https://dl.test/darwin"),
        ]
    );
}

#[tokio::test]
async fn test_latest_release_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

    let releases = GitHubReleases::new(format!("{}/", server.uri())).unwrap();
    let err = releases.latest_release("tjamet", "kubectl-switch").await.unwrap_err();

    assert!(err.to_string().contains("Failed to fetch latest release of tjamet/kubectl-switch"));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_startup_check_runs_once_per_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/tjamet/kubectl-switch/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"tag_name": "v0.0.1", "assets": []}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let home = TestHome::new();
    home.write_config(&format!(
        "version_timeout_ms = 300\n[upgrade]\ncheck_on_startup = true\napi_base = \"{}\"\n",
        server.uri()
    ));
    home.install_kubectl("1.13.0", "echo ok");

    let home = tokio::task::spawn_blocking(move || {
        home.command().arg("version").assert().success();
        home.command().arg("version").assert().success();
        home
    })
    .await
    .unwrap();

    let cache = std::fs::read_to_string(home.path().join(".kubectl-switch-version-check.json")).unwrap();
    assert!(cache.contains("v0.0.1"));
}
