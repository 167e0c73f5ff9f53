use super::kubeconfig::{Endpoint, Kubeconfig, kubeconfig_path};
use super::{ClusterArgs, VersionSource};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Subset of the API server's `/version` response.
#[derive(Debug, Deserialize)]
struct ServerVersion {
    #[serde(rename = "gitVersion")]
    git_version: String,
}

/// Asks the API server selected by the kubectl arguments and kubeconfig for its version.
///
/// `--server` and `--token` take precedence over the kubeconfig context, so a
/// kubeconfig is only required when no server is given on the command line.
#[derive(Debug, Clone)]
pub struct KubeconfigVersionSource {
    args: ClusterArgs,
    home: PathBuf,
}

impl KubeconfigVersionSource {
    /// Source for the given kubectl arguments; `home` locates the default kubeconfig.
    pub fn new(args: ClusterArgs, home: impl Into<PathBuf>) -> Self {
        Self {
            args,
            home: home.into(),
        }
    }

    async fn endpoint(&self) -> Result<Endpoint> {
        let path = kubeconfig_path(&self.args, &self.home);
        let from_file = match Kubeconfig::load(&path).await {
            Ok(config) => config.endpoint(self.args.context.as_deref()),
            Err(e) => Err(e),
        };

        let mut endpoint = match (from_file, &self.args.server) {
            (Ok(endpoint), _) => endpoint,
            (Err(e), Some(server)) => {
                debug!("Ignoring kubeconfig: {e:#}");
                Endpoint {
                    server: server.clone(),
                    ..Default::default()
                }
            }
            (Err(e), None) => return Err(e),
        };

        if let Some(server) = &self.args.server {
            endpoint.server.clone_from(server);
        }
        if let Some(token) = &self.args.token {
            endpoint.token = Some(token.clone());
        }
        endpoint.insecure_skip_tls_verify |= self.args.insecure_skip_tls_verify;
        Ok(endpoint)
    }
}

/// HTTP client trusting the endpoint's CA and presenting its client certificate.
async fn http_client(endpoint: &Endpoint) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(endpoint.insecure_skip_tls_verify);

    if let Some(ca) = &endpoint.certificate_authority {
        let pem = ca.read().await.context("Failed to load certificate authority")?;
        let certs = reqwest::Certificate::from_pem_bundle(&pem).context("Invalid certificate authority")?;
        if certs.is_empty() {
            bail!("No certificate found in certificate authority");
        }
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
    }

    match (&endpoint.client_certificate, &endpoint.client_key) {
        (Some(cert), Some(key)) => {
            let mut pem = cert.read().await.context("Failed to load client certificate")?;
            pem.push(b'\n');
            pem.extend(key.read().await.context("Failed to load client key")?);
            let identity = reqwest::Identity::from_pem(&pem).context("Invalid client certificate or key")?;
            builder = builder.identity(identity);
        }
        (None, None) => {}
        _ => debug!("Ignoring client certificate without a matching key"),
    }

    builder.build().context("Failed to build HTTP client")
}

impl VersionSource for KubeconfigVersionSource {
    async fn resolve(&self) -> Result<String> {
        let endpoint = self.endpoint().await?;
        let url = format!("{}/version", endpoint.server.trim_end_matches('/'));
        debug!("Querying server version at {url}");

        let client = http_client(&endpoint).await?;

        let mut request = client.get(&url);
        if let Some(token) = &endpoint.token {
            request = request.bearer_auth(token);
        }

        let version: ServerVersion = request
            .send()
            .await
            .with_context(|| format!("Failed to query {url}"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("Invalid version response from {url}"))?;

        debug!("Server version is {}", version.git_version);
        Ok(version.git_version)
    }
}
