//! ERC-721 ownership records, shared by `MyNFT` and the wrapped positions of
//! `NFTWrapper`.
//!
//! Metadata (name, symbol) is exposed by the deployable contracts themselves.
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, fixed_bytes, Address, U256};
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{Call, MethodError},
    evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageBool, StorageMap, StorageU256},
};

use crate::utils::introspection::erc165::{self, IErc165};

mod receiver;
pub use receiver::{Erc721ReceiverInterface, RECEIVER_FN_SELECTOR};

/// Interface id of [`IErc721`].
pub const INTERFACE_ID: B32 = fixed_bytes!("80ac58cd");

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Transfer(address indexed from, address indexed to, uint256 indexed token_id);
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Approval(address indexed owner, address indexed approved, uint256 indexed token_id);
        #[derive(Debug)]
        #[allow(missing_docs)]
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    }

    sol! {
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidOwner(address owner);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721NonexistentToken(uint256 token_id);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721IncorrectOwner(address sender, uint256 token_id, address owner);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidSender(address sender);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidReceiver(address receiver);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InsufficientApproval(address operator, uint256 token_id);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidApprover(address approver);
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidOperator(address operator);
    }
}

/// An [`Erc721`] error, encoded as the matching [ERC-6093] custom error.
///
/// [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The zero address was queried as an owner.
    InvalidOwner(ERC721InvalidOwner),
    /// The token was never minted or has been burned.
    NonexistentToken(ERC721NonexistentToken),
    /// `sender` is not the owner of the token being moved.
    IncorrectOwner(ERC721IncorrectOwner),
    /// The token being minted already exists.
    InvalidSender(ERC721InvalidSender),
    /// The receiver is the zero address or rejected the token.
    InvalidReceiver(ERC721InvalidReceiver),
    /// `operator` may not move the token.
    InsufficientApproval(ERC721InsufficientApproval),
    /// `approver` may not approve the token.
    InvalidApprover(ERC721InvalidApprover),
    /// The zero address can't be an operator.
    InvalidOperator(ERC721InvalidOperator),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`Erc721`] token.
#[storage]
pub struct Erc721 {
    pub(crate) owners: StorageMap<U256, StorageAddress>,
    pub(crate) balances: StorageMap<Address, StorageU256>,
    pub(crate) token_approvals: StorageMap<U256, StorageAddress>,
    /// `owner => operator => approved`.
    pub(crate) operator_approvals:
        StorageMap<Address, StorageMap<Address, StorageBool>>,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for Erc721 {}

/// The EIP-721 surface, without the metadata extension.
///
/// Entrypoints exposing `safe_transfer_from_with_data` have to rename it to
/// `safeTransferFrom` with `#[selector]` on their `#[public]` impl.
pub trait IErc721 {
    /// The error type associated to this ERC-721 trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns how many tokens `owner` holds.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `owner` is [`Address::ZERO`].
    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error>;

    /// Returns the owner of `token_id`.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// [`IErc721::transfer_from`] followed by the `onERC721Received` check on
    /// contract recipients.
    ///
    /// # Errors
    ///
    /// Same as [`IErc721::transfer_from`], plus [`Error::InvalidReceiver`] if
    /// a contract recipient doesn't accept the token.
    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// [`IErc721::safe_transfer_from`] forwarding `data` to the recipient.
    ///
    /// # Errors
    ///
    /// Same as [`IErc721::safe_transfer_from`].
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Self::Error>;

    /// Moves `token_id` from `from` to `to`. The caller must own the token or
    /// be approved for it.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    /// * [`Error::InsufficientApproval`] - If the caller may not move it.
    /// * [`Error::IncorrectOwner`] - If `from` doesn't own it.
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Lets `to` move `token_id`. Approving [`Address::ZERO`] clears it.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    /// * [`Error::InvalidApprover`] - If the caller is neither the owner nor
    ///   one of its operators.
    fn approve(&mut self, to: Address, token_id: U256)
        -> Result<(), Self::Error>;

    /// Lets `operator` move every token of the caller, or revokes it.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOperator`] - If `operator` is [`Address::ZERO`].
    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error>;

    /// Returns the account approved for `token_id`.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Returns whether `operator` may move every token of `owner`.
    #[must_use]
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;
}

#[public]
#[implements(IErc721<Error = Error>, IErc165)]
impl Erc721 {}

#[public]
impl IErc721 for Erc721 {
    type Error = Error;

    fn balance_of(&self, owner: Address) -> Result<U256, Error> {
        if owner.is_zero() {
            return Err(ERC721InvalidOwner { owner }.into());
        }
        Ok(self.balances.get(owner))
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)
    }

    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        self.safe_transfer_from_with_data(from, to, token_id, Bytes(Vec::new()))
    }

    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Error> {
        self.transfer_from(from, to, token_id)?;
        self._check_on_erc721_received(msg::sender(), from, to, token_id, &data)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        if to.is_zero() {
            return Err(ERC721InvalidReceiver { receiver: to }.into());
        }

        let owner = self._update(to, token_id, msg::sender())?;
        if owner != from {
            return Err(ERC721IncorrectOwner { sender: from, token_id, owner }
                .into());
        }
        Ok(())
    }

    fn approve(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        self._approve(to, token_id, msg::sender())
    }

    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        if operator.is_zero() {
            return Err(ERC721InvalidOperator { operator }.into());
        }

        let owner = msg::sender();
        self.operator_approvals.setter(owner).setter(operator).set(approved);
        evm::log(ApprovalForAll { owner, operator, approved });
        Ok(())
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)?;
        Ok(self.token_approvals.get(token_id))
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.get(owner).get(operator)
    }
}

#[public]
impl IErc165 for Erc721 {
    fn supports_interface(&self, interface_id: B32) -> bool {
        [INTERFACE_ID, erc165::INTERFACE_ID].contains(&interface_id)
    }
}

impl Erc721 {
    /// Returns the owner of `token_id`, [`Address::ZERO`] if it doesn't
    /// exist.
    #[must_use]
    pub fn _owner_of(&self, token_id: U256) -> Address {
        self.owners.get(token_id)
    }

    /// Returns the owner of `token_id`.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    pub fn _require_owned(&self, token_id: U256) -> Result<Address, Error> {
        match self._owner_of(token_id) {
            owner if owner.is_zero() => {
                Err(ERC721NonexistentToken { token_id }.into())
            }
            owner => Ok(owner),
        }
    }

    /// Gives `token_id` to `to` and returns its previous owner. A zero
    /// previous owner mints, a zero `to` burns. Any single-token approval is
    /// cleared.
    ///
    /// A non-zero `auth` must be the owner, an operator of the owner or the
    /// account approved for `token_id`.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `auth` is set and `token_id`
    ///   doesn't exist.
    /// * [`Error::InsufficientApproval`] - If `auth` may not move the token.
    pub fn _update(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
    ) -> Result<Address, Error> {
        let from = self._owner_of(token_id);

        if !auth.is_zero() && !self.may_move(from, auth, token_id) {
            return Err(if from.is_zero() {
                ERC721NonexistentToken { token_id }.into()
            } else {
                ERC721InsufficientApproval { operator: auth, token_id }.into()
            });
        }

        if !from.is_zero() {
            self.token_approvals.setter(token_id).set(Address::ZERO);
            let balance = self.balances.get(from);
            self.balances.setter(from).set(balance - U256::ONE);
        }
        if !to.is_zero() {
            let balance = self.balances.get(to);
            self.balances.setter(to).set(balance + U256::ONE);
        }

        self.owners.setter(token_id).set(to);
        evm::log(Transfer { from, to, token_id });
        Ok(from)
    }

    /// Creates `token_id` for `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `to` is [`Address::ZERO`].
    /// * [`Error::InvalidSender`] - If `token_id` already exists.
    pub fn _mint(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        if to.is_zero() {
            return Err(ERC721InvalidReceiver { receiver: to }.into());
        }
        if !self._update(to, token_id, Address::ZERO)?.is_zero() {
            return Err(ERC721InvalidSender { sender: Address::ZERO }.into());
        }
        Ok(())
    }

    /// [`Erc721::_mint`] followed by the `onERC721Received` check on
    /// contract recipients.
    ///
    /// # Errors
    ///
    /// Same as [`Erc721::_mint`], plus [`Error::InvalidReceiver`] if a
    /// contract recipient doesn't accept the token.
    pub fn _safe_mint(
        &mut self,
        to: Address,
        token_id: U256,
        data: &Bytes,
    ) -> Result<(), Error> {
        self._mint(to, token_id)?;
        self._check_on_erc721_received(
            msg::sender(),
            Address::ZERO,
            to,
            token_id,
            data,
        )
    }

    /// Destroys `token_id` regardless of the caller.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    pub fn _burn(&mut self, token_id: U256) -> Result<(), Error> {
        if self._update(Address::ZERO, token_id, Address::ZERO)?.is_zero() {
            return Err(ERC721NonexistentToken { token_id }.into());
        }
        Ok(())
    }

    /// Approves `to` for `token_id` on behalf of `auth`, which must be the
    /// owner or one of its operators.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `token_id` doesn't exist.
    /// * [`Error::InvalidApprover`] - If `auth` may not approve.
    pub fn _approve(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
    ) -> Result<(), Error> {
        let owner = self._require_owned(token_id)?;
        if owner != auth && !self.is_approved_for_all(owner, auth) {
            return Err(ERC721InvalidApprover { approver: auth }.into());
        }

        self.token_approvals.setter(token_id).set(to);
        evm::log(Approval { owner, approved: to, token_id });
        Ok(())
    }

    /// Asks a contract `to` whether it accepts `token_id`. Accounts without
    /// code always accept.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `to` reverted or didn't answer with
    ///   [`RECEIVER_FN_SELECTOR`].
    pub fn _check_on_erc721_received(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: U256,
        data: &Bytes,
    ) -> Result<(), Error> {
        if !to.has_code() {
            return Ok(());
        }

        let accepted = Erc721ReceiverInterface::new(to)
            .on_erc_721_received(
                Call::new_in(self),
                operator,
                from,
                token_id,
                data.to_vec().into(),
            )
            .is_ok_and(|answer| answer == RECEIVER_FN_SELECTOR);

        if accepted {
            Ok(())
        } else {
            Err(ERC721InvalidReceiver { receiver: to }.into())
        }
    }

    /// Whether `spender` may move `token_id` held by `owner`.
    fn may_move(&self, owner: Address, spender: Address, token_id: U256) -> bool {
        !owner.is_zero()
            && (owner == spender
                || self.is_approved_for_all(owner, spender)
                || self.token_approvals.get(token_id) == spender)
    }
}
