//! Deploys `MyNFT`, then `TokenWrapper` with the configured router.

use std::process::ExitCode;

use deploy_scripts::DeployPlan;

#[tokio::main]
async fn main() -> ExitCode {
    deploy_scripts::execute(|config| {
        DeployPlan::nft_and_token_wrapper(config.router)
    })
    .await
}
