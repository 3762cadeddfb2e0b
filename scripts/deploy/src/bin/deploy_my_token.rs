//! Deploys `MyToken` with the configured initial supply.

use std::process::ExitCode;

use deploy_scripts::DeployPlan;

#[tokio::main]
async fn main() -> ExitCode {
    deploy_scripts::execute(|config| {
        DeployPlan::my_token(config.initial_supply)
    })
    .await
}
