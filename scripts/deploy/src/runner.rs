//! Runs a [`DeployPlan`] against a chain.
use std::{path::Path, process::ExitCode};

use alloy::{network::ReceiptResponse, primitives::Address};
use e2e::{Account, Deployer, DEPLOYER_ADDRESS_ENV_VAR_NAME};
use eyre::{bail, Context};

use crate::{
    config::Config,
    plan::{ContractKind, DeployPlan, Step},
};

/// A contract deployed by [`run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployed {
    /// What got deployed.
    pub contract: ContractKind,
    /// Where it got deployed.
    pub address: Address,
}

/// Deploys every step of `plan` in order and prints
/// `"<Name> deployed to: <address>"` after each one.
///
/// The first failing step stops the run. Contracts deployed before it are
/// left in place.
///
/// # Errors
///
/// * If `PRIVATE_KEY` is not a valid private key.
/// * If [`Config::deployer_address`] is unset.
/// * If any deployment fails or its transaction reverts.
pub async fn run(
    plan: &DeployPlan,
    config: &Config,
) -> eyre::Result<Vec<Deployed>> {
    let account =
        Account::from_private_key(&config.private_key, config.rpc_url.clone())?;
    let Some(deployer_address) = config.deployer_address else {
        bail!("{DEPLOYER_ADDRESS_ENV_VAR_NAME} must be set to run constructors");
    };

    let mut deployed = Vec::with_capacity(plan.steps.len());

    for step in &plan.steps {
        let contract = step.contract();
        let name = contract.name();
        tracing::info!(
            contract = name,
            deployer = %account.address(),
            stylus_deployer = %deployer_address,
            "deploying"
        );

        let deployer = step_deployer(
            &account,
            deployer_address,
            step,
            &config.workspace_root,
        );
        let deployment = deployer
            .deploy()
            .await
            .wrap_err(format!("failed to deploy {name}"))?;

        if !deployment.receipt.status() {
            bail!(
                "{name} deployment transaction {} reverted",
                deployment.receipt.transaction_hash
            );
        }

        println!("{name} deployed to: {}", deployment.contract_address);
        deployed.push(Deployed { contract, address: deployment.contract_address });
    }

    Ok(deployed)
}

/// Deployer of `step` on behalf of `account`, running the constructor
/// through the `StylusDeployer` at `deployer_address`.
fn step_deployer(
    account: &Account,
    deployer_address: Address,
    step: &Step,
    workspace_root: &Path,
) -> Deployer {
    account
        .as_deployer()
        .with_manifest_dir(step.contract().manifest_dir(workspace_root))
        .with_deployer_address(deployer_address)
        .with_constructor(step.constructor(account.address()))
}

/// Entry point of the deployment binaries: loads [`Config`] from the
/// environment, runs the plan `plan` builds from it, and maps the outcome to
/// an exit code.
pub async fn execute(plan: impl FnOnce(&Config) -> DeployPlan) -> ExitCode {
    crate::init_tracing();

    let result = async {
        let config = Config::from_env()?;
        run(&plan(&config), &config).await
    }
    .await;

    match result {
        Ok(deployed) => {
            tracing::info!(count = deployed.len(), "deployment finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
