//! Interface a contract implements to accept ERC-721 safe transfers.
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]
use alloc::vec;

use alloy_primitives::{aliases::B32, Address, U256};
use stylus_sdk::{abi::Bytes, function_selector, prelude::sol_interface};

/// The value a receiver returns from `onERC721Received` to accept a token.
pub const RECEIVER_FN_SELECTOR: B32 = B32::new(function_selector!(
    "onERC721Received",
    Address,
    Address,
    U256,
    Bytes,
));

sol_interface! {
    /// ERC-721 token receiver Solidity interface.
    interface Erc721ReceiverInterface {
        function onERC721Received(
            address operator,
            address from,
            uint256 token_id,
            bytes calldata data
        ) external returns (bytes4);
    }
}
