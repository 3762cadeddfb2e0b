use std::{
    path::PathBuf,
    process::{Command, Output},
    str::FromStr,
};

use alloy::{
    consensus::Transaction,
    hex::{self, ToHexExt},
    primitives::{Address, TxHash},
    providers::Provider,
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    sol,
    sol_types::SolError,
    transports::http::reqwest::Url,
};
use eyre::{Context, ContextCompat};
use regex::Regex;

use crate::{
    constructor_macro::Constructor,
    system::{env, provider, Wallet, DEPLOYER_ADDRESS_ENV_VAR_NAME},
};

sol! {
    /// Raised by the `StylusDeployer` when the constructor call reverts.
    error ContractInitializationError(address contract);
    /// Raised by `ArbWasm` when the program is already activated.
    error ProgramUpToDate();
}

/// Revert of the `StylusDeployer` contract while running a constructor.
#[derive(Debug)]
pub struct StylusDeployerError {
    /// Address the contract would have been deployed at.
    pub contract_address: Address,
    /// Hex encoded revert data.
    pub revert_data: String,
}

impl StylusDeployerError {
    /// Downcasts an [`eyre::Report`] into a [`StylusDeployerError`].
    #[must_use]
    pub fn from_report(report: &eyre::Report) -> Option<&Self> {
        report.downcast_ref::<StylusDeployerError>()
    }
}

impl std::fmt::Display for StylusDeployerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.revert_data)
    }
}

impl std::error::Error for StylusDeployerError {}

/// Outcome of a successful deployment.
#[derive(Clone, Debug)]
pub struct Deployment {
    /// Receipt of the deployment transaction.
    pub receipt: TransactionReceipt,
    /// Address of the deployed and activated contract.
    pub contract_address: Address,
}

/// Deploys Stylus contracts by shelling out to `cargo stylus deploy`.
#[derive(Clone, Debug)]
pub struct Deployer {
    rpc_url: String,
    private_key: String,
    constructor: Option<Constructor>,
    manifest_dir: Option<PathBuf>,
    deployer_address: Option<Address>,
}

impl Deployer {
    /// Creates a deployer that signs with `private_key` and talks to
    /// `rpc_url`.
    #[must_use]
    pub fn new(rpc_url: String, private_key: String) -> Self {
        Self {
            rpc_url,
            private_key,
            constructor: None,
            manifest_dir: None,
            deployer_address: None,
        }
    }

    /// Passes `constructor` to the contract on deployment.
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Deploys the crate at `manifest_dir` instead of the current one.
    #[must_use]
    pub fn with_manifest_dir(mut self, manifest_dir: PathBuf) -> Self {
        self.manifest_dir = Some(manifest_dir);
        self
    }

    /// Runs the constructor through the `StylusDeployer` at
    /// `deployer_address` instead of the one in `DEPLOYER_ADDRESS`.
    #[must_use]
    pub fn with_deployer_address(mut self, deployer_address: Address) -> Self {
        self.deployer_address = Some(deployer_address);
        self
    }

    /// Deploys and activates the contract implemented as `#[entrypoint]` in
    /// the configured crate. Consumes the deployer.
    ///
    /// # Errors
    ///
    /// * If a constructor is configured but neither
    ///   [`Deployer::with_deployer_address`] nor `DEPLOYER_ADDRESS` provides
    ///   the `StylusDeployer`.
    /// * If `cargo stylus deploy` can't be spawned or fails.
    /// * [`StylusDeployerError`] - If the constructor reverts.
    /// * If the deployment receipt can't be fetched.
    pub async fn deploy(self) -> eyre::Result<Deployment> {
        let command = self.command()?;
        tracing::debug!(
            manifest_dir = ?self.manifest_dir,
            constructor = ?self.constructor.as_ref().map(|c| &c.signature),
            "running `cargo stylus deploy`"
        );

        let output = run(command)?;
        let deployment = if output.status.success() {
            self.receipt_from_output(&output).await
        } else {
            self.parse_deployment_error(&output).await
        }?;

        tracing::info!(
            contract_address = %deployment.contract_address,
            tx_hash = %deployment.receipt.transaction_hash,
            "contract deployed"
        );
        Ok(deployment)
    }

    /// The `cargo stylus deploy` invocation [`Deployer::deploy`] runs.
    ///
    /// # Errors
    ///
    /// * If a constructor is configured and no deployer address is known.
    pub fn command(&self) -> eyre::Result<Command> {
        let mut command = Command::new("cargo");
        command
            .args(["stylus", "deploy"])
            .args(["-e", &self.rpc_url])
            .args(["--private-key", &self.private_key])
            .arg("--no-verify");

        if let Some(dir) = &self.manifest_dir {
            command.current_dir(dir);
        }

        if let Some(constructor) = &self.constructor {
            let deployer_address = match self.deployer_address {
                Some(address) => address.to_string(),
                None => env(DEPLOYER_ADDRESS_ENV_VAR_NAME)?,
            };
            command
                .args(["--experimental-deployer-address", &deployer_address])
                .arg("--experimental-constructor-args")
                .args(&constructor.args);
        }

        Ok(command)
    }

    fn wallet(&self) -> eyre::Result<Wallet> {
        let signer = PrivateKeySigner::from_str(&self.private_key)
            .wrap_err("failed to parse private key")?;
        let url = Url::from_str(&self.rpc_url)
            .wrap_err(format!("failed to parse {} into a URL", self.rpc_url))?;
        Ok(provider(signer, url))
    }

    async fn fetch_receipt(
        &self,
        tx_hash: TxHash,
    ) -> eyre::Result<TransactionReceipt> {
        self.wallet()?
            .get_transaction_receipt(tx_hash)
            .await
            .wrap_err("failed to fetch deployment receipt")?
            .wrap_err(format!("no receipt found for {tx_hash}"))
    }

    async fn receipt_from_output(
        &self,
        output: &Output,
    ) -> eyre::Result<Deployment> {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let (tx_hash, contract_address) = parse_deploy_output(&stdout)?;
        let receipt = self.fetch_receipt(tx_hash).await?;
        Ok(Deployment { receipt, contract_address })
    }

    /// The dev node reports some successful deployments as failures, so
    /// those get recovered here.
    async fn parse_deployment_error(
        &self,
        output: &Output,
    ) -> eyre::Result<Deployment> {
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Some(data) = revert_data(&stderr)? {
            if data.starts_with(&ContractInitializationError::SELECTOR) {
                let ContractInitializationError { contract } =
                    ContractInitializationError::abi_decode(&data, false)
                        .wrap_err("failed to decode deployer revert")?;
                return Err(eyre::Report::new(StylusDeployerError {
                    contract_address: contract,
                    revert_data: hex::encode(&data),
                }));
            }
            if data.starts_with(&ProgramUpToDate::SELECTOR) {
                // Stdout still holds a regular deployment report.
                return self.receipt_from_output(output).await;
            }
            return Err(eyre::eyre!(hex::encode(&data)));
        }

        if let Some(tx_hash) = reverted_activation(&stderr)? {
            let wallet = self.wallet()?;
            let tx = wallet
                .get_transaction_by_hash(tx_hash)
                .await
                .wrap_err("failed to fetch activation transaction")?
                .wrap_err(format!("no transaction found for {tx_hash}"))?;
            let contract_address = activated_address(&tx.input().encode_hex())?;
            let receipt = self.fetch_receipt(tx_hash).await?;
            return Ok(Deployment { receipt, contract_address });
        }

        Err(eyre::eyre!("deployment failed: {stderr}"))
    }
}

fn run(mut command: Command) -> eyre::Result<Output> {
    command
        .output()
        .wrap_err("failed to execute `cargo stylus deploy` command")
}

/// `cargo stylus` colors its output, so patterns skip ANSI escape codes.
const ANSI: &str = r"(?:\x1B\[[0-9;]*[a-zA-Z])*";

/// Extracts the transaction hash and contract address from the stdout of a
/// successful `cargo stylus deploy`.
fn parse_deploy_output(stdout: &str) -> eyre::Result<(TxHash, Address)> {
    let tx_hash_regex = Regex::new(r"0x[a-fA-F0-9]{64}")
        .wrap_err("failed to create tx hash regex")?;
    let address_regex = Regex::new(&format!(
        r"deployed code at address:\s*{ANSI}(0x[a-fA-F0-9]{{40}})"
    ))
    .wrap_err("failed to create contract address regex")?;

    let tx_hash = tx_hash_regex
        .find(stdout)
        .wrap_err(format!("no transaction hash found in output {stdout}"))?
        .as_str();
    let contract_address = address_regex
        .captures(stdout)
        .and_then(|cap| cap.get(1))
        .wrap_err(format!("no contract address found in output {stdout}"))?
        .as_str();

    let tx_hash =
        TxHash::from_str(tx_hash).wrap_err("failed to parse tx hash")?;
    let contract_address = Address::from_str(contract_address).wrap_err(
        format!("failed to parse contract address {contract_address}"),
    )?;
    Ok((tx_hash, contract_address))
}

/// Revert data reported in stderr, if any.
fn revert_data(stderr: &str) -> eyre::Result<Option<Vec<u8>>> {
    let regex = Regex::new(r#"data: Some\(String\("0x([a-fA-F0-9]+)"\)\)"#)
        .wrap_err("failed to create revert data regex")?;

    regex
        .captures(stderr)
        .and_then(|cap| cap.get(1))
        .map(|data| {
            hex::decode(data.as_str())
                .wrap_err(format!("failed to decode hex: {}", data.as_str()))
        })
        .transpose()
}

/// Hash of a reverted activation transaction reported in stderr, if any.
fn reverted_activation(stderr: &str) -> eyre::Result<Option<TxHash>> {
    let regex =
        Regex::new(&format!(r"activate tx reverted {ANSI}(0x[a-fA-F0-9]+)"))
            .wrap_err("failed to create activation error regex")?;

    regex
        .captures(stderr)
        .and_then(|cap| cap.get(1))
        .map(|hash| {
            TxHash::from_str(hash.as_str()).wrap_err("failed to parse tx hash")
        })
        .transpose()
}

/// The activated program's address is the last word of the activation
/// calldata.
fn activated_address(input: &str) -> eyre::Result<Address> {
    let regex = Regex::new(r"[a-fA-F0-9]{8}0+([a-fA-F0-9]{40})$")
        .wrap_err("failed to create contract address regex")?;
    let address = regex
        .captures(input)
        .and_then(|cap| cap.get(1))
        .wrap_err(format!("no contract address found in input {input}"))?
        .as_str();
    Address::from_str(address)
        .wrap_err(format!("failed to parse contract address {address}"))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256, U256};

    use super::*;

    const DEPLOY_STDOUT: &str = "\
stripped custom section from user wasm to remove any sensitive data
contract size: 9.8 KB
deployed code at address: \x1b[1;92m0x525c2aba45f66987217323e8a05ea400c65d06dc\x1b[0m
deployment tx hash: \x1b[1;92m0x3ea2b4d6a3e5cab1a03d3e10e9c5faf1c3c4bd36e6f0f1fd8c36d1fd3d2b2e55\x1b[0m
contract activated and ready onchain with tx hash: 0x4b2f0ad37ec4bfe2e59c6ffd3e9ad2fd2d2d9c5fb8a5d3d8bd0d2c49bde4a1a2";

    #[test]
    fn parses_successful_deployment() {
        let (tx_hash, contract_address) =
            parse_deploy_output(DEPLOY_STDOUT).expect("should parse output");

        assert_eq!(
            contract_address,
            address!("525c2aba45f66987217323e8a05ea400c65d06dc")
        );
        assert_eq!(
            tx_hash,
            b256!(
                "3ea2b4d6a3e5cab1a03d3e10e9c5faf1c3c4bd36e6f0f1fd8c36d1fd3d2b2e55"
            )
        );
    }

    #[test]
    fn missing_tx_hash_is_an_error() {
        let err = parse_deploy_output("deployment tx hash: 0x00")
            .expect_err("should fail without output");
        assert!(err.to_string().contains("no transaction hash found"));
    }

    #[test]
    fn extracts_revert_data() {
        let stderr = r#"error: (code: 3, message: execution reverted, data: Some(String("0xcc944bf2")))"#;

        let data = revert_data(stderr)
            .expect("should parse stderr")
            .expect("should find revert data");

        assert_eq!(data, ProgramUpToDate::SELECTOR.to_vec());
        assert_eq!(revert_data("no revert here").expect("should parse"), None);
    }

    #[test]
    fn extracts_address_from_activation_input() {
        let input = "58c780c2000000000000000000000000525c2aba45f66987217323e8a05ea400c65d06dc";

        let address =
            activated_address(input).expect("should find the address");

        assert_eq!(address, address!("525c2aba45f66987217323e8a05ea400c65d06dc"));
    }

    #[test]
    fn constructor_requires_deployer_address() {
        std::env::remove_var(DEPLOYER_ADDRESS_ENV_VAR_NAME);
        let deployer = Deployer::new(
            "http://localhost:8547".to_string(),
            "0x01".to_string(),
        )
        .with_constructor(crate::constructor!(U256::from(1)));

        let err = deployer.command().expect_err("should require the env var");
        assert!(err.to_string().contains(DEPLOYER_ADDRESS_ENV_VAR_NAME));
    }

    #[test]
    fn configured_deployer_address_overrides_env() {
        std::env::remove_var(DEPLOYER_ADDRESS_ENV_VAR_NAME);
        let deployer_address =
            address!("6ac4839Bfe169CadBBFbDE3f29bd8459037Bf64e");
        let deployer = Deployer::new(
            "http://localhost:8547".to_string(),
            "0x01".to_string(),
        )
        .with_deployer_address(deployer_address)
        .with_constructor(crate::constructor!(U256::from(1)));

        let command = deployer.command().expect("should not need the env var");

        let args: Vec<_> =
            command.get_args().map(|a| a.to_string_lossy()).collect();
        let position = args
            .iter()
            .position(|a| a == "--experimental-deployer-address")
            .expect("should pass the deployer address");
        assert_eq!(args[position + 1], deployer_address.to_string());
    }
}
