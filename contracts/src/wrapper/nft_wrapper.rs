//! Custody of ERC-20 balances represented as ERC-721 positions.
//!
//! Wrapping pulls an amount of an allow-listed ERC-20 token from the caller
//! and mints a fresh [`Erc721`] token that records the token address and the
//! locked amount. Unwrapping burns the position and releases the amount to
//! its owner.
//!
//! Failures that belong to the wrapper itself are reported as Solidity
//! `Error(string)` revert reasons. Errors of the underlying token are
//! forwarded unchanged.
use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
pub use sol::*;
use stylus_sdk::{
    call::{self, Call, MethodError},
    contract, evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageBool, StorageMap, StorageU256},
};

use crate::{
    access::ownable::{self, Ownable},
    token::{
        erc20::abi::Erc20Interface,
        erc721::{self, Erc721},
    },
    utils::reason,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `token` is added to the allow-list.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokenAllowed(address indexed token);

        /// Emitted when `token` is removed from the allow-list.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokenDisallowed(address indexed token);

        /// Emitted when `sender` locks `amount` of `token_address` and
        /// receives the position `token_id`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokensWrapped(
            address indexed token_address,
            address indexed sender,
            uint256 amount,
            uint256 indexed token_id
        );

        /// Emitted when `sender` burns the position `token_id` and receives
        /// back `amount` of `token_address`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event TokensUnwrapped(
            address indexed token_address,
            address indexed sender,
            uint256 amount,
            uint256 indexed token_id
        );
    }
}

/// An [`NftWrapper`] error.
#[derive(Debug)]
pub enum Error {
    /// The token is not on the allow-list.
    TokenNotAllowed,
    /// The zero address can't be allow-listed.
    InvalidTokenAddress,
    /// Wrapping requires a non-zero amount.
    ZeroAmount,
    /// The caller doesn't own the position (or it doesn't exist).
    NotTokenOwner,
    /// The position was created with a different token.
    TokenMismatch,
    /// The underlying token returned `false` or an undecodable result.
    TransferFailed,
    /// Raw revert data of the underlying token.
    Underlying(Vec<u8>),
    /// Error of the position token.
    Erc721(erc721::Error),
    /// Error of the owner check.
    Ownable(ownable::Error),
}

impl Error {
    /// Returns the `Error(string)` reason of errors raised by the wrapper
    /// itself, or `None` for forwarded errors.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Error::TokenNotAllowed => Some("Token not allowed"),
            Error::InvalidTokenAddress => Some("Invalid token address"),
            Error::ZeroAmount => Some("Amount must be greater than zero"),
            Error::NotTokenOwner => Some("Sender does not own this NFT"),
            Error::TokenMismatch => Some("Token does not match wrapped token"),
            Error::TransferFailed => Some("Token transfer failed"),
            Error::Underlying(_) | Error::Erc721(_) | Error::Ownable(_) => {
                None
            }
        }
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        match value {
            Error::Underlying(data) => data,
            Error::Erc721(e) => e.into(),
            Error::Ownable(e) => e.into(),
            other => other.reason().map(reason::encode).unwrap_or_default(),
        }
    }
}

impl From<erc721::Error> for Error {
    fn from(value: erc721::Error) -> Self {
        Error::Erc721(value)
    }
}

impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        Error::Ownable(value)
    }
}

impl From<call::Error> for Error {
    fn from(value: call::Error) -> Self {
        match value {
            // Propagate underlying token errors directly.
            call::Error::Revert(data) => Error::Underlying(data),
            call::Error::AbiDecodingFailed(_) => Error::TransferFailed,
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of an [`NftWrapper`].
#[storage]
pub struct NftWrapper {
    /// Tokens that can be wrapped.
    pub(crate) allowed_tokens: StorageMap<Address, StorageBool>,
    /// Maps positions to the wrapped token.
    pub(crate) wrapped_tokens: StorageMap<U256, StorageAddress>,
    /// Maps positions to the locked amount.
    pub(crate) wrapped_amounts: StorageMap<U256, StorageU256>,
    /// Id of the next position.
    pub(crate) next_token_id: StorageU256,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`. Should be fixed in the future by the Stylus team.
unsafe impl TopLevelStorage for NftWrapper {}

/// Interface of a contract that wraps ERC-20 balances into ERC-721
/// positions.
pub trait INftWrapper {
    /// The error type associated to the trait implementation.
    type Error: Into<Vec<u8>>;

    /// Adds `token` to the allow-list. Only callable by the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the owner.
    /// * [`Error::InvalidTokenAddress`] - If `token` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`TokenAllowed`].
    fn add_token(&mut self, token: Address) -> Result<(), Self::Error>;

    /// Removes `token` from the allow-list. Only callable by the owner.
    ///
    /// Existing positions of `token` stay wrapped, but can't be unwrapped
    /// until `token` is allowed again.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the owner.
    ///
    /// # Events
    ///
    /// * [`TokenDisallowed`].
    fn remove_token(&mut self, token: Address) -> Result<(), Self::Error>;

    /// Returns whether `token` can be wrapped.
    #[must_use]
    fn is_token_allowed(&self, token: Address) -> bool;

    /// Locks `amount` of `token_address` held by the caller and mints a new
    /// position to the caller. Returns the id of the position.
    ///
    /// The caller must have approved this contract to spend `amount`.
    ///
    /// # Errors
    ///
    /// * [`Error::TokenNotAllowed`] - If `token_address` is not allowed.
    /// * [`Error::ZeroAmount`] - If `amount` is zero.
    /// * [`Error::Underlying`] - If the token transfer reverted.
    /// * [`Error::TransferFailed`] - If the token transfer returned `false`.
    /// * [`Error::Erc721`] - If the caller can't receive the position.
    ///
    /// # Events
    ///
    /// * [`TokensWrapped`].
    fn wrap_tokens(
        &mut self,
        token_address: Address,
        amount: U256,
    ) -> Result<U256, Self::Error>;

    /// Burns the position `token_id` and releases the locked amount of
    /// `token_address` to the caller.
    ///
    /// # Errors
    ///
    /// * [`Error::TokenNotAllowed`] - If `token_address` is not allowed.
    /// * [`Error::NotTokenOwner`] - If the caller doesn't own `token_id`.
    /// * [`Error::TokenMismatch`] - If `token_id` wraps another token.
    /// * [`Error::Underlying`] - If the token transfer reverted.
    /// * [`Error::TransferFailed`] - If the token transfer returned `false`.
    ///
    /// # Events
    ///
    /// * [`TokensUnwrapped`].
    fn unwrap_tokens(
        &mut self,
        token_address: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Returns the amount locked by `token_id`, zero for unknown positions.
    #[must_use]
    fn get_wrapped_token_amount(&self, token_id: U256) -> U256;

    /// Returns the token wrapped by `token_id`, [`Address::ZERO`] for unknown
    /// positions.
    #[must_use]
    fn get_wrapped_token_address(&self, token_id: U256) -> Address;
}

impl NftWrapper {
    /// Check [`INftWrapper::add_token()`] for more information.
    #[allow(clippy::missing_errors_doc)]
    pub fn add_token(
        &mut self,
        token: Address,
        ownable: &Ownable,
    ) -> Result<(), Error> {
        ownable.only_owner()?;

        if token.is_zero() {
            return Err(Error::InvalidTokenAddress);
        }

        self.allowed_tokens.setter(token).set(true);
        evm::log(TokenAllowed { token });
        Ok(())
    }

    /// Check [`INftWrapper::remove_token()`] for more information.
    #[allow(clippy::missing_errors_doc)]
    pub fn remove_token(
        &mut self,
        token: Address,
        ownable: &Ownable,
    ) -> Result<(), Error> {
        ownable.only_owner()?;

        self.allowed_tokens.setter(token).set(false);
        evm::log(TokenDisallowed { token });
        Ok(())
    }

    /// Check [`INftWrapper::is_token_allowed()`] for more information.
    #[must_use]
    pub fn is_token_allowed(&self, token: Address) -> bool {
        self.allowed_tokens.get(token)
    }

    /// Check [`INftWrapper::wrap_tokens()`] for more information.
    #[allow(clippy::missing_errors_doc)]
    pub fn wrap_tokens(
        &mut self,
        token_address: Address,
        amount: U256,
        erc721: &mut Erc721,
    ) -> Result<U256, Error> {
        if !self.is_token_allowed(token_address) {
            return Err(Error::TokenNotAllowed);
        }
        if amount.is_zero() {
            return Err(Error::ZeroAmount);
        }

        let sender = msg::sender();
        let token = Erc20Interface::new(token_address);
        let transferred = token.transfer_from(
            Call::new_in(self),
            sender,
            contract::address(),
            amount,
        )?;
        if !transferred {
            return Err(Error::TransferFailed);
        }

        let token_id = self.next_token_id.get();
        self.next_token_id.set(token_id + U256::ONE);
        self.wrapped_tokens.setter(token_id).set(token_address);
        self.wrapped_amounts.setter(token_id).set(amount);

        erc721._safe_mint(sender, token_id, &vec![].into())?;

        evm::log(TokensWrapped { token_address, sender, amount, token_id });
        Ok(token_id)
    }

    /// Check [`INftWrapper::unwrap_tokens()`] for more information.
    #[allow(clippy::missing_errors_doc)]
    pub fn unwrap_tokens(
        &mut self,
        token_address: Address,
        token_id: U256,
        erc721: &mut Erc721,
    ) -> Result<(), Error> {
        if !self.is_token_allowed(token_address) {
            return Err(Error::TokenNotAllowed);
        }

        let sender = msg::sender();
        // Nonexistent positions are owned by the zero address.
        if erc721._owner_of(token_id) != sender {
            return Err(Error::NotTokenOwner);
        }
        if self.wrapped_tokens.get(token_id) != token_address {
            return Err(Error::TokenMismatch);
        }

        let amount = self.wrapped_amounts.get(token_id);

        // Position is cleared before the token is called.
        erc721._burn(token_id)?;
        self.wrapped_tokens.setter(token_id).set(Address::ZERO);
        self.wrapped_amounts.setter(token_id).set(U256::ZERO);

        let token = Erc20Interface::new(token_address);
        let transferred =
            token.transfer(Call::new_in(self), sender, amount)?;
        if !transferred {
            return Err(Error::TransferFailed);
        }

        evm::log(TokensUnwrapped { token_address, sender, amount, token_id });
        Ok(())
    }

    /// Check [`INftWrapper::get_wrapped_token_amount()`] for more
    /// information.
    #[must_use]
    pub fn get_wrapped_token_amount(&self, token_id: U256) -> U256 {
        self.wrapped_amounts.get(token_id)
    }

    /// Check [`INftWrapper::get_wrapped_token_address()`] for more
    /// information.
    #[must_use]
    pub fn get_wrapped_token_address(&self, token_id: U256) -> Address {
        self.wrapped_tokens.get(token_id)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::uint;
    use motsu::prelude::*;

    use super::*;
    use crate::token::{
        erc20::{self, Erc20, IErc20},
        erc721::IErc721,
    };

    const INITIAL_SUPPLY: U256 = uint!(10_000_U256);
    const WRAP_AMOUNT: U256 = uint!(50_U256);
    const FIRST_TOKEN_ID: U256 = U256::ZERO;

    #[storage]
    struct NftWrapperTestExample {
        erc721: Erc721,
        ownable: Ownable,
        wrapper: NftWrapper,
    }

    unsafe impl TopLevelStorage for NftWrapperTestExample {}

    #[public]
    #[implements(INftWrapper<Error = Error>)]
    impl NftWrapperTestExample {
        #[constructor]
        fn constructor(&mut self, initial_owner: Address) -> Result<(), Error> {
            Ok(self.ownable.constructor(initial_owner)?)
        }
    }

    #[public]
    impl INftWrapper for NftWrapperTestExample {
        type Error = Error;

        fn add_token(&mut self, token: Address) -> Result<(), Error> {
            self.wrapper.add_token(token, &self.ownable)
        }

        fn remove_token(&mut self, token: Address) -> Result<(), Error> {
            self.wrapper.remove_token(token, &self.ownable)
        }

        fn is_token_allowed(&self, token: Address) -> bool {
            self.wrapper.is_token_allowed(token)
        }

        fn wrap_tokens(
            &mut self,
            token_address: Address,
            amount: U256,
        ) -> Result<U256, Error> {
            self.wrapper.wrap_tokens(token_address, amount, &mut self.erc721)
        }

        fn unwrap_tokens(
            &mut self,
            token_address: Address,
            token_id: U256,
        ) -> Result<(), Error> {
            self.wrapper.unwrap_tokens(
                token_address,
                token_id,
                &mut self.erc721,
            )
        }

        fn get_wrapped_token_amount(&self, token_id: U256) -> U256 {
            self.wrapper.get_wrapped_token_amount(token_id)
        }

        fn get_wrapped_token_address(&self, token_id: U256) -> Address {
            self.wrapper.get_wrapped_token_address(token_id)
        }
    }

    /// ERC-20 stand-in that reports failure through its `bool` result
    /// instead of reverting.
    #[storage]
    struct FalseReturningToken {
        refuse_transfer_from: StorageBool,
        refuse_transfer: StorageBool,
    }

    unsafe impl TopLevelStorage for FalseReturningToken {}

    #[public]
    impl FalseReturningToken {
        fn refuse(&mut self, transfer_from: bool, transfer: bool) {
            self.refuse_transfer_from.set(transfer_from);
            self.refuse_transfer.set(transfer);
        }

        fn transfer_from(
            &mut self,
            _from: Address,
            _to: Address,
            _value: U256,
        ) -> bool {
            !self.refuse_transfer_from.get()
        }

        fn transfer(&mut self, _to: Address, _value: U256) -> bool {
            !self.refuse_transfer.get()
        }
    }

    /// Deploys the wrapper owned by `owner`, mints the initial supply of
    /// `token` to `owner` and allow-lists `token`.
    fn setup(
        contract: &Contract<NftWrapperTestExample>,
        token: &Contract<Erc20>,
        owner: Address,
    ) {
        contract.sender(owner).constructor(owner).motsu_unwrap();
        token
            .sender(owner)
            ._mint(owner, INITIAL_SUPPLY)
            .motsu_expect("should mint the initial supply");
        contract
            .sender(owner)
            .add_token(token.address())
            .motsu_expect("owner should allow the token");
    }

    /// Approves and wraps [`WRAP_AMOUNT`] of `token` as `owner`.
    fn wrap(
        contract: &Contract<NftWrapperTestExample>,
        token: &Contract<Erc20>,
        owner: Address,
    ) -> U256 {
        token
            .sender(owner)
            .approve(contract.address(), WRAP_AMOUNT)
            .motsu_expect("should approve the wrapper");
        contract
            .sender(owner)
            .wrap_tokens(token.address(), WRAP_AMOUNT)
            .motsu_expect("should wrap tokens")
    }

    #[test]
    fn errors_encode_as_revert_reasons() {
        let cases = [
            (Error::TokenNotAllowed, "Token not allowed"),
            (Error::InvalidTokenAddress, "Invalid token address"),
            (Error::ZeroAmount, "Amount must be greater than zero"),
            (Error::NotTokenOwner, "Sender does not own this NFT"),
            (Error::TokenMismatch, "Token does not match wrapped token"),
            (Error::TransferFailed, "Token transfer failed"),
        ];

        for (error, expected) in cases {
            let encoded: Vec<u8> = error.into();
            assert_eq!(encoded, reason::encode(expected));
        }
    }

    #[test]
    fn underlying_revert_data_is_forwarded() {
        let data = vec![0xde, 0xad, 0xbe, 0xef];
        let encoded: Vec<u8> = Error::Underlying(data.clone()).into();
        assert_eq!(encoded, data);
    }

    #[motsu::test]
    fn adds_token(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        contract
            .sender(alice)
            .add_token(token.address())
            .motsu_expect("owner should allow the token");

        assert!(contract.sender(alice).is_token_allowed(token.address()));
        contract.assert_emitted(&TokenAllowed { token: token.address() });
    }

    #[motsu::test]
    fn add_token_reverts_for_zero_address(
        contract: Contract<NftWrapperTestExample>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        let err = contract
            .sender(alice)
            .add_token(Address::ZERO)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::InvalidTokenAddress));
    }

    #[motsu::test]
    fn add_token_reverts_for_non_owner(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        let err = contract
            .sender(bob)
            .add_token(token.address())
            .motsu_unwrap_err();

        assert!(matches!(
            err,
            Error::Ownable(ownable::Error::UnauthorizedAccount(
                ownable::OwnableUnauthorizedAccount { account }
            )) if account == bob
        ));
        assert!(!contract.sender(alice).is_token_allowed(token.address()));
    }

    #[motsu::test]
    fn removes_token(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        contract
            .sender(alice)
            .remove_token(token.address())
            .motsu_expect("owner should disallow the token");

        assert!(!contract.sender(alice).is_token_allowed(token.address()));
        contract.assert_emitted(&TokenDisallowed { token: token.address() });
    }

    #[motsu::test]
    fn wraps_tokens(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);
        let initial_balance = token.sender(alice).balance_of(alice);

        let token_id = wrap(&contract, &token, alice);

        assert_eq!(token_id, FIRST_TOKEN_ID);
        assert_eq!(
            contract.sender(alice).get_wrapped_token_amount(token_id),
            WRAP_AMOUNT
        );
        assert_eq!(
            contract.sender(alice).get_wrapped_token_address(token_id),
            token.address()
        );
        assert_eq!(
            token.sender(alice).balance_of(contract.address()),
            WRAP_AMOUNT
        );
        assert_eq!(
            token.sender(alice).balance_of(alice),
            initial_balance - WRAP_AMOUNT
        );
        let owner = contract
            .sender(alice)
            .erc721
            .owner_of(token_id)
            .motsu_unwrap();
        assert_eq!(owner, alice);

        contract.assert_emitted(&TokensWrapped {
            token_address: token.address(),
            sender: alice,
            amount: WRAP_AMOUNT,
            token_id,
        });
        token.assert_emitted(&erc20::Transfer {
            from: alice,
            to: contract.address(),
            value: WRAP_AMOUNT,
        });
    }

    #[motsu::test]
    fn wrap_assigns_sequential_ids(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        let first = wrap(&contract, &token, alice);
        let second = wrap(&contract, &token, alice);

        assert_eq!(first, FIRST_TOKEN_ID);
        assert_eq!(second, FIRST_TOKEN_ID + U256::ONE);
    }

    #[motsu::test]
    fn wrap_reverts_for_zero_amount(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .wrap_tokens(token.address(), U256::ZERO)
            .motsu_unwrap_err();

        assert_eq!(err.reason(), Some("Amount must be greater than zero"));
    }

    #[motsu::test]
    fn wrap_reverts_for_token_not_allowed(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .wrap_tokens(Address::ZERO, WRAP_AMOUNT)
            .motsu_unwrap_err();

        assert_eq!(err.reason(), Some("Token not allowed"));
    }

    #[motsu::test]
    fn wrap_checks_allow_list_before_amount(
        contract: Contract<NftWrapperTestExample>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        let err = contract
            .sender(alice)
            .wrap_tokens(Address::ZERO, U256::ZERO)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::TokenNotAllowed));
    }

    #[motsu::test]
    fn wrap_forwards_underlying_revert(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .wrap_tokens(token.address(), WRAP_AMOUNT)
            .motsu_unwrap_err();

        let expected: Vec<u8> = erc20::Error::InsufficientAllowance(
            erc20::ERC20InsufficientAllowance {
                spender: contract.address(),
                allowance: U256::ZERO,
                needed: WRAP_AMOUNT,
            },
        )
        .into();
        assert!(matches!(err, Error::Underlying(data) if data == expected));
        assert_eq!(
            contract.sender(alice).get_wrapped_token_amount(FIRST_TOKEN_ID),
            U256::ZERO
        );
    }

    #[motsu::test]
    fn unwraps_tokens(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);
        let token_id = wrap(&contract, &token, alice);

        contract
            .sender(alice)
            .unwrap_tokens(token.address(), token_id)
            .motsu_expect("owner of the position should unwrap");

        contract.assert_emitted(&TokensUnwrapped {
            token_address: token.address(),
            sender: alice,
            amount: WRAP_AMOUNT,
            token_id: FIRST_TOKEN_ID,
        });
        assert_eq!(token.sender(alice).balance_of(alice), INITIAL_SUPPLY);
        assert_eq!(token.sender(alice).balance_of(contract.address()), U256::ZERO);
        assert_eq!(
            contract.sender(alice).get_wrapped_token_amount(token_id),
            U256::ZERO
        );
        assert_eq!(
            contract.sender(alice).get_wrapped_token_address(token_id),
            Address::ZERO
        );
        assert!(contract.sender(alice).erc721.owner_of(token_id).is_err());
    }

    #[motsu::test]
    fn unwrap_reverts_for_token_not_allowed(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);
        let token_id = wrap(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .unwrap_tokens(Address::ZERO, token_id)
            .motsu_unwrap_err();

        assert_eq!(err.reason(), Some("Token not allowed"));
    }

    #[motsu::test]
    fn unwrap_reverts_after_token_is_removed(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);
        let token_id = wrap(&contract, &token, alice);
        contract.sender(alice).remove_token(token.address()).motsu_unwrap();

        let err = contract
            .sender(alice)
            .unwrap_tokens(token.address(), token_id)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::TokenNotAllowed));
        assert_eq!(
            contract.sender(alice).get_wrapped_token_amount(token_id),
            WRAP_AMOUNT
        );
    }

    #[motsu::test]
    fn unwrap_reverts_for_non_owner(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
        bob: Address,
    ) {
        setup(&contract, &token, alice);
        let token_id = wrap(&contract, &token, alice);

        let err = contract
            .sender(bob)
            .unwrap_tokens(token.address(), token_id)
            .motsu_unwrap_err();

        assert_eq!(err.reason(), Some("Sender does not own this NFT"));
    }

    #[motsu::test]
    fn unwrap_reverts_for_nonexistent_position(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .unwrap_tokens(token.address(), FIRST_TOKEN_ID)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::NotTokenOwner));
    }

    #[motsu::test]
    fn unwrap_reverts_for_token_mismatch(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        other_token: Contract<Erc20>,
        alice: Address,
    ) {
        setup(&contract, &token, alice);
        contract
            .sender(alice)
            .add_token(other_token.address())
            .motsu_unwrap();
        let token_id = wrap(&contract, &token, alice);

        let err = contract
            .sender(alice)
            .unwrap_tokens(other_token.address(), token_id)
            .motsu_unwrap_err();

        assert_eq!(err.reason(), Some("Token does not match wrapped token"));
    }

    #[motsu::test]
    fn unwraps_transferred_position(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<Erc20>,
        alice: Address,
        bob: Address,
    ) {
        setup(&contract, &token, alice);
        let token_id = wrap(&contract, &token, alice);
        contract
            .sender(alice)
            .erc721
            .transfer_from(alice, bob, token_id)
            .motsu_expect("should transfer the position to Bob");

        contract
            .sender(bob)
            .unwrap_tokens(token.address(), token_id)
            .motsu_expect("new owner should unwrap");

        assert_eq!(token.sender(bob).balance_of(bob), WRAP_AMOUNT);
    }

    #[motsu::test]
    fn wrap_reverts_when_token_returns_false(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<FalseReturningToken>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();
        contract.sender(alice).add_token(token.address()).motsu_unwrap();
        token.sender(alice).refuse(true, false);

        let err = contract
            .sender(alice)
            .wrap_tokens(token.address(), WRAP_AMOUNT)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::TransferFailed));
        assert_eq!(err.reason(), Some("Token transfer failed"));
        assert_eq!(
            contract.sender(alice).get_wrapped_token_amount(FIRST_TOKEN_ID),
            U256::ZERO
        );
        assert_eq!(
            contract.sender(alice).get_wrapped_token_address(FIRST_TOKEN_ID),
            Address::ZERO
        );
        assert!(contract.sender(alice).erc721.owner_of(FIRST_TOKEN_ID).is_err());

        token.sender(alice).refuse(false, false);
        let token_id = contract
            .sender(alice)
            .wrap_tokens(token.address(), WRAP_AMOUNT)
            .motsu_expect("should wrap once the token accepts");
        assert_eq!(token_id, FIRST_TOKEN_ID);
    }

    #[motsu::test]
    fn unwrap_reverts_when_token_returns_false(
        contract: Contract<NftWrapperTestExample>,
        token: Contract<FalseReturningToken>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();
        contract.sender(alice).add_token(token.address()).motsu_unwrap();
        let token_id = contract
            .sender(alice)
            .wrap_tokens(token.address(), WRAP_AMOUNT)
            .motsu_expect("should wrap tokens");
        token.sender(alice).refuse(false, true);

        let err = contract
            .sender(alice)
            .unwrap_tokens(token.address(), token_id)
            .motsu_unwrap_err();

        assert!(matches!(err, Error::TransferFailed));
        assert_eq!(err.reason(), Some("Token transfer failed"));
        let encoded: Vec<u8> = err.into();
        assert_eq!(encoded, reason::encode("Token transfer failed"));
    }
}
