#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{aliases::B32, Address};
use stylus_sdk::prelude::*;
use token_wrappers::{
    access::ownable::{self, IOwnable, Ownable},
    utils::introspection::erc165::IErc165,
    wrapper::token_wrapper::{self, ITokenWrapper, TokenWrapper},
};

#[entrypoint]
#[storage]
struct TokenWrapperContract {
    ownable: Ownable,
    wrapper: TokenWrapper,
}

#[public]
#[implements(ITokenWrapper<Error = token_wrapper::Error>, IOwnable<Error = ownable::Error>, IErc165)]
impl TokenWrapperContract {
    #[constructor]
    fn constructor(
        &mut self,
        router: Address,
        initial_owner: Address,
    ) -> Result<(), token_wrapper::Error> {
        self.wrapper.constructor(router)?;
        Ok(self.ownable.constructor(initial_owner)?)
    }
}

#[public]
impl ITokenWrapper for TokenWrapperContract {
    type Error = token_wrapper::Error;

    fn router(&self) -> Address {
        self.wrapper.router()
    }

    fn set_router(&mut self, new_router: Address) -> Result<(), Self::Error> {
        self.wrapper.set_router(new_router, &self.ownable)
    }
}

#[public]
impl IOwnable for TokenWrapperContract {
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
impl IErc165 for TokenWrapperContract {
    fn supports_interface(&self, interface_id: B32) -> bool {
        self.ownable.supports_interface(interface_id)
    }
}
