//! Solidity `Error(string)` revert reasons.
//!
//! Wrapper contracts report their own failures the way a Solidity
//! `require(condition, "reason")` does, so callers can match on the literal
//! reason string.
use alloc::{string::ToString, vec::Vec};

use alloy_sol_types::{Revert, SolError};

/// Selector of `Error(string)`.
pub const SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// ABI-encodes `reason` as an `Error(string)` revert payload.
#[must_use]
pub fn encode(reason: &str) -> Vec<u8> {
    Revert { reason: reason.to_string() }.abi_encode()
}
