//! End-to-end testing and deployment helpers for Stylus contracts.
//!
//! Tests run against a Nitro dev node reachable at `RPC_URL`. Each test
//! account is a fresh key funded from the dev node's pre-funded account, and
//! contracts are deployed through `cargo stylus deploy`.
//!
//! ```rust,ignore
//! #[e2e::test]
//! async fn wraps(alice: Account) -> eyre::Result<()> {
//!     let address = alice
//!         .as_deployer()
//!         .with_constructor(constructor!(alice.address()))
//!         .deploy()
//!         .await?
//!         .contract_address;
//!     let contract = NftWrapper::new(address, &alice.wallet);
//!     let receipt = receipt!(contract.addToken(token))?;
//!     assert!(receipt.emits(NftWrapper::TokenAllowed { token }));
//!     Ok(())
//! }
//! ```
mod account;
mod constructor_macro;
mod deploy;
mod error;
mod event;
mod macros;
mod system;

pub use account::Account;
pub use constructor_macro::{AbiArg, Constructor};
pub use deploy::{Deployer, Deployment, StylusDeployerError};
pub use e2e_proc::test;
pub use error::Revert;
pub use event::{decode, EventExt};
pub use system::{
    provider, rpc_url, Wallet, DEPLOYER_ADDRESS_ENV_VAR_NAME,
    RPC_URL_ENV_VAR_NAME,
};
