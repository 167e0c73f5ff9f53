//! kubectl-switch entry point
//!
//! Installs logging, parses the arguments, runs the matching kubectl and exits
//! with its exit code. Wrapper failures are printed with a suggestion and exit 1.

use kubectl_switch::cli::Cli;
use kubectl_switch::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Quiet by default so kubectl output is all the user sees
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::from_env();

    let code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            1
        }
    };

    std::process::exit(code);
}
