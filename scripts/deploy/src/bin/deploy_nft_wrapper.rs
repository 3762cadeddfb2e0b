//! Deploys `NFTWrapper`.

use std::process::ExitCode;

use deploy_scripts::DeployPlan;

#[tokio::main]
async fn main() -> ExitCode {
    deploy_scripts::execute(|_| DeployPlan::nft_wrapper()).await
}
