//! Swap router configuration of the `TokenWrapper` contract.
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
pub use sol::*;
use stylus_sdk::{call::MethodError, evm, prelude::*, storage::StorageAddress};

use crate::{
    access::ownable::{self, Ownable},
    utils::reason,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the router changes from `previous_router` to
        /// `new_router`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event RouterUpdated(address indexed previous_router, address indexed new_router);
    }
}

/// A [`TokenWrapper`] error.
#[derive(Debug)]
pub enum Error {
    /// The router can't be the zero address.
    InvalidRouter,
    /// Error of the owner check.
    Ownable(ownable::Error),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::InvalidRouter => reason::encode("Invalid router address"),
            Error::Ownable(e) => e.into(),
        }
    }
}

impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        Error::Ownable(value)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of a [`TokenWrapper`].
#[storage]
pub struct TokenWrapper {
    /// Address of the swap router.
    pub(crate) router: StorageAddress,
}

/// Interface of a contract configured with a swap router.
pub trait ITokenWrapper {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the swap router.
    #[must_use]
    fn router(&self) -> Address;

    /// Replaces the swap router. Only callable by the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the owner.
    /// * [`Error::InvalidRouter`] - If `new_router` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`RouterUpdated`].
    fn set_router(&mut self, new_router: Address) -> Result<(), Self::Error>;
}

impl TokenWrapper {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `router` - The swap router.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidRouter`] - If `router` is [`Address::ZERO`].
    pub fn constructor(&mut self, router: Address) -> Result<(), Error> {
        if router.is_zero() {
            return Err(Error::InvalidRouter);
        }
        self.router.set(router);
        Ok(())
    }

    /// Check [`ITokenWrapper::router()`] for more information.
    #[must_use]
    pub fn router(&self) -> Address {
        self.router.get()
    }

    /// Check [`ITokenWrapper::set_router()`] for more information.
    #[allow(clippy::missing_errors_doc)]
    pub fn set_router(
        &mut self,
        new_router: Address,
        ownable: &Ownable,
    ) -> Result<(), Error> {
        ownable.only_owner()?;

        if new_router.is_zero() {
            return Err(Error::InvalidRouter);
        }

        let previous_router = self.router.get();
        self.router.set(new_router);
        evm::log(RouterUpdated { previous_router, new_router });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use motsu::prelude::*;

    use super::*;

    const ROUTER: Address =
        address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");

    #[storage]
    struct TokenWrapperTestExample {
        ownable: Ownable,
        wrapper: TokenWrapper,
    }

    unsafe impl TopLevelStorage for TokenWrapperTestExample {}

    #[public]
    #[implements(ITokenWrapper<Error = Error>)]
    impl TokenWrapperTestExample {
        #[constructor]
        fn constructor(
            &mut self,
            router: Address,
            initial_owner: Address,
        ) -> Result<(), Error> {
            self.wrapper.constructor(router)?;
            Ok(self.ownable.constructor(initial_owner)?)
        }
    }

    #[public]
    impl ITokenWrapper for TokenWrapperTestExample {
        type Error = Error;

        fn router(&self) -> Address {
            self.wrapper.router()
        }

        fn set_router(&mut self, new_router: Address) -> Result<(), Error> {
            self.wrapper.set_router(new_router, &self.ownable)
        }
    }

    #[test]
    fn invalid_router_encodes_as_revert_reason() {
        let encoded: Vec<u8> = Error::InvalidRouter.into();
        assert_eq!(encoded, reason::encode("Invalid router address"));
    }

    #[motsu::test]
    fn constructs(contract: Contract<TokenWrapperTestExample>, alice: Address) {
        contract.sender(alice).constructor(ROUTER, alice).motsu_unwrap();

        assert_eq!(contract.sender(alice).router(), ROUTER);
        assert_eq!(contract.sender(alice).ownable.owner.get(), alice);
    }

    #[motsu::test]
    fn constructor_reverts_for_zero_router(
        contract: Contract<TokenWrapperTestExample>,
        alice: Address,
    ) {
        let err = contract
            .sender(alice)
            .constructor(Address::ZERO, alice)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::InvalidRouter));
    }

    #[motsu::test]
    fn sets_router(
        contract: Contract<TokenWrapperTestExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(ROUTER, alice).motsu_unwrap();

        contract
            .sender(alice)
            .set_router(bob)
            .motsu_expect("owner should update the router");

        assert_eq!(contract.sender(alice).router(), bob);
        contract.assert_emitted(&RouterUpdated {
            previous_router: ROUTER,
            new_router: bob,
        });
    }

    #[motsu::test]
    fn set_router_reverts_for_zero_router(
        contract: Contract<TokenWrapperTestExample>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(ROUTER, alice).motsu_unwrap();

        let err = contract
            .sender(alice)
            .set_router(Address::ZERO)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::InvalidRouter));
        assert_eq!(contract.sender(alice).router(), ROUTER);
    }

    #[motsu::test]
    fn set_router_reverts_for_non_owner(
        contract: Contract<TokenWrapperTestExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(ROUTER, alice).motsu_unwrap();

        let err = contract.sender(bob).set_router(bob).motsu_unwrap_err();

        assert!(matches!(
            err,
            Error::Ownable(ownable::Error::UnauthorizedAccount(_))
        ));
    }
}
