//! Deploys the token wrapper contracts to a Stylus-enabled chain.
//!
//! Each binary of this crate deploys a fixed [`plan::DeployPlan`] and prints
//! one `"<Name> deployed to: <address>"` line per contract. Configuration is
//! read from the environment, see [`config::Config`].
//!
//! The contract crates are deployed from the checkout the binaries were built
//! in. Set `WORKSPACE_ROOT` to run them from anywhere else.
pub mod config;
pub mod plan;
pub mod runner;

pub use config::Config;
pub use plan::{ContractKind, DeployPlan, Step};
pub use runner::{execute, run, Deployed};

/// Installs a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// (`info` by default). Keeps any subscriber that is already installed.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = installed {
        tracing::debug!(%e, "keeping the existing tracing subscriber");
    }
}
