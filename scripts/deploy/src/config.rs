//! Environment configuration of the deployment binaries.
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    primitives::{address, uint, Address, U256},
    transports::http::reqwest::Url,
};
use e2e::{DEPLOYER_ADDRESS_ENV_VAR_NAME, RPC_URL_ENV_VAR_NAME};
use eyre::Context;

/// Variable holding the deploying account's private key.
pub const PRIVATE_KEY_ENV_VAR_NAME: &str = "PRIVATE_KEY";
/// Variable holding the swap router passed to `TokenWrapper`.
pub const ROUTER_ADDRESS_ENV_VAR_NAME: &str = "ROUTER_ADDRESS";
/// Variable holding the initial supply of `MyToken`.
pub const INITIAL_SUPPLY_ENV_VAR_NAME: &str = "INITIAL_SUPPLY";

/// Variable pointing at a checkout of this workspace. Binaries moved out
/// of the checkout they were built in need it to find the contract crates.
pub const WORKSPACE_ROOT_ENV_VAR_NAME: &str = "WORKSPACE_ROOT";

/// Local Nitro dev node.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8547";
/// Uniswap V2 router.
pub const DEFAULT_ROUTER: Address =
    address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
/// Supply minted to the deploying account.
pub const DEFAULT_INITIAL_SUPPLY: U256 = uint!(10_000_U256);

/// The checkout these binaries were built from.
#[must_use]
pub fn default_workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Settings shared by every deployment binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Endpoint of the chain to deploy to.
    pub rpc_url: Url,
    /// Hex-encoded private key of the deploying account.
    pub private_key: String,
    /// Address of the `StylusDeployer`, needed to run constructors.
    pub deployer_address: Option<Address>,
    /// Swap router of `TokenWrapper`.
    pub router: Address,
    /// Amount minted by `MyToken` to the deploying account.
    pub initial_supply: U256,
    /// Checkout holding the contract crates `cargo stylus` deploys.
    pub workspace_root: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment, after loading
    /// a `.env` file if there is one.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> eyre::Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration out of `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// * If `PRIVATE_KEY` is missing.
    /// * If any variable that is set can't be parsed.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> eyre::Result<Self> {
        let rpc_url = lookup(RPC_URL_ENV_VAR_NAME)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let rpc_url = Url::parse(&rpc_url)
            .wrap_err(format!("failed to parse {RPC_URL_ENV_VAR_NAME}"))?;

        let private_key = lookup(PRIVATE_KEY_ENV_VAR_NAME).ok_or_else(|| {
            eyre::eyre!("{PRIVATE_KEY_ENV_VAR_NAME} must be set")
        })?;

        let deployer_address = lookup(DEPLOYER_ADDRESS_ENV_VAR_NAME)
            .map(|value| parse(DEPLOYER_ADDRESS_ENV_VAR_NAME, &value))
            .transpose()?;

        let router = lookup(ROUTER_ADDRESS_ENV_VAR_NAME)
            .map(|value| parse(ROUTER_ADDRESS_ENV_VAR_NAME, &value))
            .transpose()?
            .unwrap_or(DEFAULT_ROUTER);

        let initial_supply = lookup(INITIAL_SUPPLY_ENV_VAR_NAME)
            .map(|value| parse(INITIAL_SUPPLY_ENV_VAR_NAME, &value))
            .transpose()?
            .unwrap_or(DEFAULT_INITIAL_SUPPLY);

        let workspace_root = lookup(WORKSPACE_ROOT_ENV_VAR_NAME)
            .map_or_else(default_workspace_root, PathBuf::from);

        Ok(Self {
            rpc_url,
            private_key,
            deployer_address,
            router,
            initial_supply,
            workspace_root,
        })
    }
}

fn parse<T>(name: &str, value: &str) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().wrap_err(format!("failed to parse {name}: {value}"))
}
