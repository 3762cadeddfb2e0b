#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{aliases::B32, Address, U256};
use stylus_sdk::{abi::Bytes, prelude::*, storage::StorageU256};
use token_wrappers::{
    access::ownable::{self, IOwnable, Ownable},
    token::erc721::{self, Erc721, IErc721},
    utils::introspection::erc165::IErc165,
};

const NAME: &str = "MyNFT";
const SYMBOL: &str = "MNFT";

#[entrypoint]
#[storage]
struct MyNft {
    erc721: Erc721,
    ownable: Ownable,
    next_token_id: StorageU256,
}

#[public]
#[implements(IErc721<Error = erc721::Error>, IOwnable<Error = ownable::Error>, IErc165)]
impl MyNft {
    #[constructor]
    fn constructor(&mut self, initial_owner: Address) -> Result<(), ownable::Error> {
        self.ownable.constructor(initial_owner)
    }

    fn name(&self) -> String {
        NAME.into()
    }

    fn symbol(&self) -> String {
        SYMBOL.into()
    }

    /// Mints the next token to `to`. Ids start at zero.
    fn mint(&mut self, to: Address) -> Result<U256, Vec<u8>> {
        self.ownable.only_owner()?;

        let token_id = self.next_token_id.get();
        self.next_token_id.set(token_id + U256::ONE);
        self.erc721._safe_mint(to, token_id, &Bytes(Vec::new()))?;
        Ok(token_id)
    }
}

#[public]
impl IErc721 for MyNft {
    type Error = erc721::Error;

    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error> {
        self.erc721.balance_of(owner)
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.owner_of(token_id)
    }

    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from(from, to, token_id)
    }

    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from_with_data(from, to, token_id, data)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.transfer_from(from, to, token_id)
    }

    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.approve(to, token_id)
    }

    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error> {
        self.erc721.set_approval_for_all(operator, approved)
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.get_approved(token_id)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.erc721.is_approved_for_all(owner, operator)
    }
}

#[public]
impl IOwnable for MyNft {
    type Error = ownable::Error;

    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Self::Error> {
        self.ownable.renounce_ownership()
    }
}

#[public]
impl IErc165 for MyNft {
    fn supports_interface(&self, interface_id: B32) -> bool {
        self.erc721.supports_interface(interface_id)
            || self.ownable.supports_interface(interface_id)
    }
}
