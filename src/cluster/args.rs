use std::ffi::OsStr;
use std::path::PathBuf;

/// Connection flags picked out of the arguments forwarded to kubectl.
///
/// Only the flags that change which API server is asked for its version are
/// recognised. Both `--flag value` and `--flag=value` forms are accepted, and
/// scanning stops at a bare `--`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterArgs {
    /// `--server` / `-s`
    pub server: Option<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--kubeconfig`
    pub kubeconfig: Option<PathBuf>,
    /// `--context`
    pub context: Option<String>,
    /// `--insecure-skip-tls-verify`
    pub insecure_skip_tls_verify: bool,
}

impl ClusterArgs {
    /// Scan kubectl arguments without consuming or rewriting them.
    pub fn scan<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<String> =
            args.into_iter().map(|arg| arg.as_ref().to_string_lossy().into_owned()).collect();

        let mut scanned = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--" {
                break;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };

            if flag == "--insecure-skip-tls-verify" {
                scanned.insecure_skip_tls_verify =
                    inline.as_deref().is_none_or(|value| value.eq_ignore_ascii_case("true"));
                continue;
            }

            let slot = match flag {
                "--server" | "-s" => Slot::Server,
                "--token" => Slot::Token,
                "--kubeconfig" => Slot::Kubeconfig,
                "--context" => Slot::Context,
                _ => continue,
            };

            let Some(value) = inline.or_else(|| iter.next().cloned()) else {
                break;
            };
            match slot {
                Slot::Server => scanned.server = Some(value),
                Slot::Token => scanned.token = Some(value),
                Slot::Kubeconfig => scanned.kubeconfig = Some(PathBuf::from(value)),
                Slot::Context => scanned.context = Some(value),
            }
        }
        scanned
    }
}

enum Slot {
    Server,
    Token,
    Kubeconfig,
    Context,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_separate_values() {
        let args = ClusterArgs::scan([
            "get",
            "pods",
            "--server",
            "https://k8s.test:6443",
            "--token",
            "secret",
            "--kubeconfig",
            "/tmp/config",
            "--context",
            "prod",
        ]);
        assert_eq!(
            args,
            ClusterArgs {
                server: Some("https://k8s.test:6443".to_string()),
                token: Some("secret".to_string()),
                kubeconfig: Some(PathBuf::from("/tmp/config")),
                context: Some("prod".to_string()),
                insecure_skip_tls_verify: false,
            }
        );
    }

    #[test]
    fn test_scan_inline_values() {
        let args = ClusterArgs::scan(["-s=https://k8s.test", "--context=dev", "--insecure-skip-tls-verify"]);
        assert_eq!(args.server.as_deref(), Some("https://k8s.test"));
        assert_eq!(args.context.as_deref(), Some("dev"));
        assert!(args.insecure_skip_tls_verify);
    }

    #[test]
    fn test_scan_insecure_explicit_false() {
        assert!(!ClusterArgs::scan(["--insecure-skip-tls-verify=false"]).insecure_skip_tls_verify);
        assert!(ClusterArgs::scan(["--insecure-skip-tls-verify=TRUE"]).insecure_skip_tls_verify);
    }

    #[test]
    fn test_scan_stops_at_double_dash() {
        let args = ClusterArgs::scan(["exec", "pod", "--", "cmd", "--server", "ignored"]);
        assert_eq!(args, ClusterArgs::default());
    }

    #[test]
    fn test_scan_flag_without_value() {
        let args = ClusterArgs::scan(["get", "--context"]);
        assert_eq!(args.context, None);
    }

    #[test]
    fn test_scan_ignores_unrelated_flags() {
        let args = ClusterArgs::scan(["get", "pods", "-n", "kube-system", "--output=json", "--help"]);
        assert_eq!(args, ClusterArgs::default());
    }
}
