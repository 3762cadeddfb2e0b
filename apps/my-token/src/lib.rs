#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{aliases::B32, Address, U256};
use stylus_sdk::prelude::*;
use token_wrappers::{
    token::erc20::{self, Erc20, IErc20},
    utils::introspection::erc165::IErc165,
};

const NAME: &str = "MyToken";
const SYMBOL: &str = "MTK";
const DECIMALS: u8 = 18;

#[entrypoint]
#[storage]
struct MyToken {
    erc20: Erc20,
}

#[public]
#[implements(IErc20<Error = erc20::Error>, IErc165)]
impl MyToken {
    /// Mints `initial_supply` to `holder`.
    #[constructor]
    fn constructor(
        &mut self,
        initial_supply: U256,
        holder: Address,
    ) -> Result<(), erc20::Error> {
        self.erc20._mint(holder, initial_supply)
    }

    fn name(&self) -> String {
        NAME.into()
    }

    fn symbol(&self) -> String {
        SYMBOL.into()
    }

    fn decimals(&self) -> u8 {
        DECIMALS
    }
}

#[public]
impl IErc20 for MyToken {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.erc20.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.erc20.balance_of(account)
    }

    fn transfer(
        &mut self,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer(to, value)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.erc20.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.approve(spender, value)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        self.erc20.transfer_from(from, to, value)
    }
}

#[public]
impl IErc165 for MyToken {
    fn supports_interface(&self, interface_id: B32) -> bool {
        self.erc20.supports_interface(interface_id)
    }
}
