//! Single-owner access control.
//!
//! The wrappers use [`Ownable`] to restrict administrative operations, such as
//! editing the token allow-list or the swap router, to one account. Stylus
//! constructors run behind the deployer contract, so the initial owner is
//! always passed explicitly instead of being taken from [`msg::sender`].
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, fixed_bytes, Address};
pub use sol::*;
use stylus_sdk::{
    call::MethodError, evm, msg, prelude::*, storage::StorageAddress,
};

use crate::utils::introspection::erc165::{self, IErc165};

/// Interface id of [`IOwnable`].
pub const INTERFACE_ID: B32 = fixed_bytes!("0e083076");

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An [`Ownable`] error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// `account` is not the owner.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The zero address can't be handed ownership.
    InvalidOwner(OwnableInvalidOwner),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Ownable`] contract.
#[storage]
pub struct Ownable {
    pub(crate) owner: StorageAddress,
}

/// Owner queries and hand-over.
pub trait IOwnable {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the current owner, [`Address::ZERO`] once renounced.
    #[must_use]
    fn owner(&self) -> Address;

    /// Hands ownership to `new_owner`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If the caller is not the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is [`Address::ZERO`].
    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error>;

    /// Leaves the contract without an owner, locking every operation guarded
    /// by [`Ownable::only_owner`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If the caller is not the owner.
    fn renounce_ownership(&mut self) -> Result<(), Self::Error>;
}

#[public]
#[implements(IOwnable<Error = Error>, IErc165)]
impl Ownable {
    /// Makes `initial_owner` the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `initial_owner` is [`Address::ZERO`].
    #[constructor]
    pub fn constructor(&mut self, initial_owner: Address) -> Result<(), Error> {
        self.hand_over(non_zero(initial_owner)?);
        Ok(())
    }
}

#[public]
impl IOwnable for Ownable {
    type Error = Error;

    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), Error> {
        self.only_owner()?;
        self.hand_over(non_zero(new_owner)?);
        Ok(())
    }

    fn renounce_ownership(&mut self) -> Result<(), Error> {
        self.only_owner()?;
        self.hand_over(Address::ZERO);
        Ok(())
    }
}

#[public]
impl IErc165 for Ownable {
    fn supports_interface(&self, interface_id: B32) -> bool {
        [INTERFACE_ID, erc165::INTERFACE_ID].contains(&interface_id)
    }
}

impl Ownable {
    /// Fails unless [`msg::sender`] is the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If the caller is anyone else.
    pub fn only_owner(&self) -> Result<(), Error> {
        let account = msg::sender();
        if account == self.owner.get() {
            Ok(())
        } else {
            Err(OwnableUnauthorizedAccount { account }.into())
        }
    }

    fn hand_over(&mut self, new_owner: Address) {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        evm::log(OwnershipTransferred { previous_owner, new_owner });
    }
}

fn non_zero(owner: Address) -> Result<Address, Error> {
    if owner.is_zero() {
        Err(OwnableInvalidOwner { owner }.into())
    } else {
        Ok(owner)
    }
}
