/*!
# Token Wrappers for Stylus

Contract components for locking ERC-20 balances inside a custody contract and
representing each locked position as an ERC-721 token, written for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction).

The crate is a set of storage components meant to be composed into a single
`#[entrypoint]` contract:

- [`token::erc20::Erc20`] and [`token::erc721::Erc721`] are the token
  standards the wrappers build on.
- [`access::ownable::Ownable`] guards administrative operations.
- [`wrapper::nft_wrapper::NftWrapper`] keeps the token allow-list and the
  wrapped positions.
- [`wrapper::token_wrapper::TokenWrapper`] keeps the swap router
  configuration.

## Usage

```ignore
use token_wrappers::{
    access::ownable::Ownable,
    token::erc721::Erc721,
    wrapper::nft_wrapper::NftWrapper,
};

#[entrypoint]
#[storage]
struct NftWrapperContract {
    erc721: Erc721,
    ownable: Ownable,
    wrapper: NftWrapper,
}

#[public]
impl NftWrapperContract {
    fn wrap_tokens(
        &mut self,
        token_address: Address,
        amount: U256,
    ) -> Result<U256, nft_wrapper::Error> {
        self.wrapper.wrap_tokens(token_address, amount, &mut self.erc721)
    }
}
```
*/

#![allow(
    clippy::module_name_repetitions,
    clippy::used_underscore_items,
    clippy::unused_self
)]
#![cfg_attr(not(test), no_std, no_main)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod token;
pub mod utils;
pub mod wrapper;
