//! Deploys `MyToken`, then `NFTWrapper`.

use std::process::ExitCode;

use deploy_scripts::DeployPlan;

#[tokio::main]
async fn main() -> ExitCode {
    deploy_scripts::execute(|config| {
        DeployPlan::token_and_nft_wrapper(config.initial_supply)
    })
    .await
}
