//! ERC-20 balances, used as the `MyToken` contract and as the underlying
//! token the wrappers take custody of.
//!
//! Failing operations revert with ERC-6093 errors, so the `bool` results of
//! `transfer`, `approve` and `transfer_from` are always `true`. They stay in
//! the ABI because callers such as [`crate::wrapper::nft_wrapper`] check them.
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, fixed_bytes, Address, U256};
pub use sol::*;
use stylus_sdk::{
    call::MethodError,
    evm, msg,
    prelude::*,
    storage::{StorageMap, StorageU256},
};

use crate::utils::introspection::erc165::{self, IErc165};

pub mod abi;

/// Interface id of [`IErc20`].
pub const INTERFACE_ID: B32 = fixed_bytes!("36372b07");

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Transfer(address indexed from, address indexed to, uint256 value);
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidSender(address sender);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidReceiver(address receiver);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidSpender(address spender);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidApprover(address approver);
    }
}

/// An [`Erc20`] error, encoded as the matching [ERC-6093] custom error.
///
/// [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
#[derive(SolidityError, Debug)]
pub enum Error {
    /// `sender` holds less than the amount being moved.
    InsufficientBalance(ERC20InsufficientBalance),
    /// Tokens can't be moved out of the zero address.
    InvalidSender(ERC20InvalidSender),
    /// Tokens can't be moved to the zero address.
    InvalidReceiver(ERC20InvalidReceiver),
    /// `spender` is allowed less than the amount being moved.
    InsufficientAllowance(ERC20InsufficientAllowance),
    /// The zero address can't be approved as a spender.
    InvalidSpender(ERC20InvalidSpender),
    /// The zero address can't grant an allowance.
    InvalidApprover(ERC20InvalidApprover),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Erc20`] token.
#[storage]
pub struct Erc20 {
    pub(crate) balances: StorageMap<Address, StorageU256>,
    /// `owner => spender => allowance`.
    pub(crate) allowances: StorageMap<Address, StorageMap<Address, StorageU256>>,
    pub(crate) total_supply: StorageU256,
}

/// NOTE: Lets [`Erc20`] be deployed on its own, e.g. as the underlying token
/// of a wrapper in unit tests.
unsafe impl TopLevelStorage for Erc20 {}

/// The EIP-20 surface.
pub trait IErc20 {
    /// The error type associated to this ERC-20 trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the number of tokens in existence.
    #[must_use]
    fn total_supply(&self) -> U256;

    /// Returns the number of tokens owned by `account`.
    #[must_use]
    fn balance_of(&self, account: Address) -> U256;

    /// Moves `value` tokens from the caller to `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If the caller holds less than
    ///   `value`.
    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error>;

    /// Returns how many of `owner`'s tokens `spender` may still move.
    #[must_use]
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Lets `spender` move up to `value` of the caller's tokens.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSpender`] - If `spender` is [`Address::ZERO`].
    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error>;

    /// Moves `value` tokens from `from` to `to` out of the caller's
    /// allowance.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientAllowance`] - If the caller is allowed less
    ///   than `value`.
    /// * [`Error::InvalidSender`] - If `from` is [`Address::ZERO`].
    /// * [`Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    /// * [`Error::InsufficientBalance`] - If `from` holds less than `value`.
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error>;
}

#[public]
#[implements(IErc20<Error = Error>, IErc165)]
impl Erc20 {}

#[public]
impl IErc20 for Erc20 {
    type Error = Error;

    fn total_supply(&self) -> U256 {
        self.total_supply.get()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(account)
    }

    fn transfer(&mut self, to: Address, value: U256) -> Result<bool, Error> {
        self.move_tokens(msg::sender(), to, value)?;
        Ok(true)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(owner).get(spender)
    }

    fn approve(&mut self, spender: Address, value: U256) -> Result<bool, Error> {
        self._approve(msg::sender(), spender, value)?;
        Ok(true)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Error> {
        self._spend_allowance(from, msg::sender(), value)?;
        self.move_tokens(from, to, value)?;
        Ok(true)
    }
}

#[public]
impl IErc165 for Erc20 {
    fn supports_interface(&self, interface_id: B32) -> bool {
        [INTERFACE_ID, erc165::INTERFACE_ID].contains(&interface_id)
    }
}

impl Erc20 {
    /// Creates `value` tokens for `account`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `account` is [`Address::ZERO`].
    ///
    /// # Panics
    ///
    /// If the total supply overflows [`U256::MAX`].
    pub fn _mint(&mut self, account: Address, value: U256) -> Result<(), Error> {
        if account.is_zero() {
            return Err(ERC20InvalidReceiver { receiver: account }.into());
        }
        self._update(Address::ZERO, account, value)
    }

    /// Moves `value` from `from` to `to`. The zero address on either side
    /// mints or burns, adjusting the total supply.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If `from` holds less than `value`.
    ///
    /// # Panics
    ///
    /// If minting overflows the total supply.
    pub fn _update(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            let minted = self
                .total_supply
                .get()
                .checked_add(value)
                .expect("total supply should fit in `U256`");
            self.total_supply.set(minted);
        } else {
            let balance = self.balances.get(from);
            let Some(remaining) = balance.checked_sub(value) else {
                return Err(ERC20InsufficientBalance {
                    sender: from,
                    balance,
                    needed: value,
                }
                .into());
            };
            self.balances.setter(from).set(remaining);
        }

        if to.is_zero() {
            // `value` was just taken from a balance counted in the supply.
            let supply = self.total_supply.get();
            self.total_supply.set(supply - value);
        } else {
            // Any single balance is bounded by the total supply.
            let balance = self.balances.get(to);
            self.balances.setter(to).set(balance + value);
        }

        evm::log(Transfer { from, to, value });
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner`'s tokens to `value`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidApprover`] - If `owner` is [`Address::ZERO`].
    /// * [`Error::InvalidSpender`] - If `spender` is [`Address::ZERO`].
    pub fn _approve(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Error> {
        if owner.is_zero() {
            return Err(ERC20InvalidApprover { approver: owner }.into());
        }
        if spender.is_zero() {
            return Err(ERC20InvalidSpender { spender }.into());
        }

        self.allowances.setter(owner).setter(spender).set(value);
        evm::log(Approval { owner, spender, value });
        Ok(())
    }

    /// Deducts `value` from the allowance of `spender` over `owner`'s tokens.
    /// A [`U256::MAX`] allowance never decreases. No [`Approval`] is emitted.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientAllowance`] - If `spender` is allowed less than
    ///   `value`.
    pub fn _spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Error> {
        let allowance = self.allowances.get(owner).get(spender);
        if allowance == U256::MAX {
            return Ok(());
        }

        let Some(remaining) = allowance.checked_sub(value) else {
            return Err(ERC20InsufficientAllowance {
                spender,
                allowance,
                needed: value,
            }
            .into());
        };
        self.allowances.setter(owner).setter(spender).set(remaining);
        Ok(())
    }

    /// Account-to-account move: neither side may be the zero address.
    fn move_tokens(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            return Err(ERC20InvalidSender { sender: from }.into());
        }
        if to.is_zero() {
            return Err(ERC20InvalidReceiver { receiver: to }.into());
        }
        self._update(from, to, value)
    }
}
