use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::Context;

/// Environment variable holding the RPC endpoint of the node.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Environment variable holding the address of the `StylusDeployer`
/// contract, required to deploy contracts with a constructor.
pub const DEPLOYER_ADDRESS_ENV_VAR_NAME: &str = "DEPLOYER_ADDRESS";

/// Convenience type alias that represents an Ethereum wallet: an `alloy`
/// provider that signs transactions with a local key.
pub type Wallet = DynProvider;

/// Load the `name` environment variable.
pub(crate) fn env(name: &str) -> eyre::Result<String> {
    std::env::var(name).wrap_err(format!("failed to load {name}"))
}

/// Reads and parses the RPC endpoint from [`RPC_URL_ENV_VAR_NAME`].
///
/// # Errors
///
/// May fail if the variable is unset or is not a valid URL.
pub fn rpc_url() -> eyre::Result<Url> {
    let url = env(RPC_URL_ENV_VAR_NAME)?;
    url.parse().wrap_err(format!("failed to parse {url} into a URL"))
}

/// Builds a [`Wallet`] that signs with `signer` and sends requests to
/// `rpc_url`.
#[must_use]
pub fn provider(signer: PrivateKeySigner, rpc_url: Url) -> Wallet {
    ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc_url)
        .erased()
}
