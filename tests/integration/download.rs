//! kubectl downloads through the real HTTP transport.

use kubectl_switch::core::SwitchError;
use kubectl_switch::http::ReqwestTransport;
use kubectl_switch::kubectl::{Kubectl, KubectlConfig};
use kubectl_switch::utils::platform::Platform;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn kubectl(home: &TempDir, server: &MockServer) -> Kubectl<ReqwestTransport> {
    let config = KubectlConfig::builder()
        .home_dir(home.path())
        .url_template(format!("{}/release/v{{version}}/bin/{{os}}/{{arch}}/kubectl", server.uri()))
        .platform(Platform::new("linux", "amd64"))
        .build()
        .unwrap();
    Kubectl::new(config, ReqwestTransport::new().unwrap())
}

#[tokio::test]
async fn test_download_installs_binary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/release/v1.13.1/bin/linux/amd64/kubectl"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"kubectl 1.13.1".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let k = kubectl(&home, &server);
    assert!(!k.installed("v1.13.1"));

    let installed = k.download("v1.13.1").await.unwrap();

    assert_eq!(installed, home.path().join(".kube/bin/kubectl-linux-amd64-1.13.1"));
    assert!(k.installed("1.13.1"));
    assert_eq!(std::fs::read(&installed).unwrap(), b"kubectl 1.13.1");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&installed).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[tokio::test]
async fn test_not_found_installs_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let k = kubectl(&home, &server);

    let err = k.download("0.0.0.1").await.unwrap_err();
    assert!(matches!(err, SwitchError::DownloadFailed { ref reason, .. } if reason.contains("404")));
    assert!(!k.installed("0.0.0.1"));

    // Only the cache directory is left behind
    let leftovers: Vec<_> = std::fs::read_dir(home.path().join(".kube/bin")).unwrap().collect();
    assert!(leftovers.is_empty());
}
