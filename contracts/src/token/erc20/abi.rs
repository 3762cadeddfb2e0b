//! Callable ERC-20 interface.
//!
//! Defined with [`stylus_sdk::prelude::sol_interface`], which enables invoking
//! functions of deployed ERC-20 contracts from another contract.

#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]

use alloc::vec;

use stylus_sdk::prelude::sol_interface;

sol_interface! {
    /// ERC-20 standard interface.
    interface Erc20Interface {
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }
}
