//! The contracts this crate knows how to deploy, and the fixed sequences
//! they are deployed in.
use std::path::{Path, PathBuf};

use alloy::primitives::{Address, U256};
use e2e::{constructor, Constructor};

/// A deployable contract crate of this workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    /// `apps/my-nft`.
    MyNft,
    /// `apps/token-wrapper`.
    TokenWrapper,
    /// `apps/nft-wrapper`.
    NftWrapper,
    /// `apps/my-token`.
    MyToken,
}

impl ContractKind {
    /// Name printed once the contract is deployed.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ContractKind::MyNft => "MyNFT",
            ContractKind::TokenWrapper => "TokenWrapper",
            ContractKind::NftWrapper => "NFTWrapper",
            ContractKind::MyToken => "MyToken",
        }
    }

    /// Crate directory, relative to the workspace root.
    #[must_use]
    pub fn crate_dir(self) -> &'static str {
        match self {
            ContractKind::MyNft => "apps/my-nft",
            ContractKind::TokenWrapper => "apps/token-wrapper",
            ContractKind::NftWrapper => "apps/nft-wrapper",
            ContractKind::MyToken => "apps/my-token",
        }
    }

    /// Absolute crate directory under `workspace_root`.
    #[must_use]
    pub fn manifest_dir(self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(self.crate_dir())
    }
}

/// One contract to deploy, with the arguments its constructor needs besides
/// the deploying account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// `MyNFT(owner)`.
    MyNft,
    /// `TokenWrapper(router, owner)`.
    TokenWrapper {
        /// Swap router.
        router: Address,
    },
    /// `NFTWrapper(owner)`.
    NftWrapper,
    /// `MyToken(initial_supply, holder)`.
    MyToken {
        /// Amount minted to the holder.
        initial_supply: U256,
    },
}

impl Step {
    /// The contract this step deploys.
    #[must_use]
    pub fn contract(&self) -> ContractKind {
        match self {
            Step::MyNft => ContractKind::MyNft,
            Step::TokenWrapper { .. } => ContractKind::TokenWrapper,
            Step::NftWrapper => ContractKind::NftWrapper,
            Step::MyToken { .. } => ContractKind::MyToken,
        }
    }

    /// Constructor arguments, with `deployer` as the owner or holder.
    #[must_use]
    pub fn constructor(&self, deployer: Address) -> Constructor {
        match *self {
            Step::MyNft | Step::NftWrapper => constructor!(deployer),
            Step::TokenWrapper { router } => constructor!(router, deployer),
            Step::MyToken { initial_supply } => {
                constructor!(initial_supply, deployer)
            }
        }
    }
}

/// An ordered list of contracts to deploy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployPlan {
    /// Steps, deployed in order.
    pub steps: Vec<Step>,
}

impl DeployPlan {
    /// `MyNFT`, then `TokenWrapper(router)`.
    #[must_use]
    pub fn nft_and_token_wrapper(router: Address) -> Self {
        Self { steps: vec![Step::MyNft, Step::TokenWrapper { router }] }
    }

    /// `NFTWrapper`.
    #[must_use]
    pub fn nft_wrapper() -> Self {
        Self { steps: vec![Step::NftWrapper] }
    }

    /// `MyToken(initial_supply)`.
    #[must_use]
    pub fn my_token(initial_supply: U256) -> Self {
        Self { steps: vec![Step::MyToken { initial_supply }] }
    }

    /// `MyToken(initial_supply)`, then `NFTWrapper`.
    #[must_use]
    pub fn token_and_nft_wrapper(initial_supply: U256) -> Self {
        Self {
            steps: vec![Step::MyToken { initial_supply }, Step::NftWrapper],
        }
    }
}
