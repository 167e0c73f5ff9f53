//! Minimal kubeconfig model.
//!
//! Only what is needed to reach the API server of a context is parsed: cluster
//! `server`, TLS trust settings and user credentials (token or client
//! certificate). Every other key in the file is ignored.

use super::ClusterArgs;
use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A kubeconfig file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    /// Named API servers.
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    /// Named credentials.
    #[serde(default)]
    pub users: Vec<NamedUser>,
    /// Cluster and user pairs.
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    /// Context used when `--context` is not given.
    #[serde(default)]
    pub current_context: Option<String>,
    /// Directory relative certificate paths resolve against; set by [`Kubeconfig::load`].
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A `clusters` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    /// Name referenced by contexts.
    pub name: String,
    /// Connection settings.
    pub cluster: ClusterEntry,
}

/// How to reach and trust an API server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    /// API server URL.
    #[serde(default)]
    pub server: Option<String>,
    /// Skip server certificate verification.
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
    /// PEM file of the CA that signed the server certificate.
    #[serde(default)]
    pub certificate_authority: Option<PathBuf>,
    /// Base64 PEM of the CA; wins over `certificate-authority`.
    #[serde(default)]
    pub certificate_authority_data: Option<String>,
}

/// A `users` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    /// Name referenced by contexts.
    pub name: String,
    /// Credentials.
    #[serde(default)]
    pub user: UserEntry,
}

/// Credentials presented to the API server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserEntry {
    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// PEM file of the client certificate.
    #[serde(default)]
    pub client_certificate: Option<PathBuf>,
    /// Base64 PEM of the client certificate; wins over `client-certificate`.
    #[serde(default)]
    pub client_certificate_data: Option<String>,
    /// PEM file of the client private key.
    #[serde(default)]
    pub client_key: Option<PathBuf>,
    /// Base64 PEM of the client private key; wins over `client-key`.
    #[serde(default)]
    pub client_key_data: Option<String>,
}

/// A `contexts` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    /// Name selected by `--context` or `current-context`.
    pub name: String,
    /// Referenced cluster and user.
    pub context: ContextEntry,
}

/// Cluster and user names of a context.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    /// Name of a [`NamedCluster`].
    pub cluster: String,
    /// Name of a [`NamedUser`], if any.
    #[serde(default)]
    pub user: Option<String>,
}

/// PEM material given inline or by file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pem {
    /// Already decoded PEM bytes.
    Inline(Vec<u8>),
    /// File to read the PEM from.
    File(PathBuf),
}

impl Pem {
    /// The PEM bytes, reading the file if needed.
    pub async fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::Inline(bytes) => Ok(bytes.clone()),
            Self::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Where and how to reach an API server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// API server base URL.
    pub server: String,
    /// Bearer token, if any.
    pub token: Option<String>,
    /// Accept any server certificate.
    pub insecure_skip_tls_verify: bool,
    /// Extra trusted root for the server certificate.
    pub certificate_authority: Option<Pem>,
    /// Client certificate for mutual TLS.
    pub client_certificate: Option<Pem>,
    /// Private key matching `client_certificate`.
    pub client_key: Option<Pem>,
}

impl Kubeconfig {
    /// Parse kubeconfig YAML.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse kubeconfig")
    }

    /// Read and parse a kubeconfig file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Resolve the endpoint of `context`, or of the current context when `None`.
    pub fn endpoint(&self, context: Option<&str>) -> Result<Endpoint> {
        let name = context
            .or(self.current_context.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| anyhow!("No current context set in kubeconfig"))?;

        let context = self
            .contexts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| anyhow!("Context '{name}' not found in kubeconfig"))?;

        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == context.context.cluster)
            .ok_or_else(|| anyhow!("Cluster '{}' not found in kubeconfig", context.context.cluster))?;

        let server = cluster
            .cluster
            .server
            .clone()
            .ok_or_else(|| anyhow!("Cluster '{}' has no server", cluster.name))?;

        let user = context
            .context
            .user
            .as_deref()
            .and_then(|user| self.users.iter().find(|u| u.name == user))
            .map(|u| &u.user);

        let certificate_authority = self
            .pem(
                cluster.cluster.certificate_authority_data.as_deref(),
                cluster.cluster.certificate_authority.as_deref(),
            )
            .with_context(|| format!("Invalid certificate-authority-data for cluster '{}'", cluster.name))?;

        let (client_certificate, client_key) = match user {
            Some(user) => (
                self.pem(user.client_certificate_data.as_deref(), user.client_certificate.as_deref())
                    .context("Invalid client-certificate-data")?,
                self.pem(user.client_key_data.as_deref(), user.client_key.as_deref())
                    .context("Invalid client-key-data")?,
            ),
            None => (None, None),
        };

        Ok(Endpoint {
            server,
            token: user.and_then(|u| u.token.clone()),
            insecure_skip_tls_verify: cluster.cluster.insecure_skip_tls_verify,
            certificate_authority,
            client_certificate,
            client_key,
        })
    }

    fn pem(&self, data: Option<&str>, file: Option<&Path>) -> Result<Option<Pem>> {
        if let Some(data) = data.filter(|d| !d.is_empty()) {
            return Ok(Some(Pem::Inline(STANDARD.decode(data.trim())?)));
        }
        Ok(file.filter(|f| !f.as_os_str().is_empty()).map(|file| {
            match &self.base_dir {
                Some(base) if file.is_relative() => Pem::File(base.join(file)),
                _ => Pem::File(file.to_path_buf()),
            }
        }))
    }
}

/// Kubeconfig path: `--kubeconfig`, else the first `$KUBECONFIG` entry, else `{home}/.kube/config`.
#[must_use]
pub fn kubeconfig_path(args: &ClusterArgs, home: &Path) -> PathBuf {
    if let Some(path) = &args.kubeconfig {
        return path.clone();
    }
    if let Some(first) = std::env::var_os("KUBECONFIG")
        .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()))
    {
        return first;
    }
    home.join(".kube").join("config")
}
