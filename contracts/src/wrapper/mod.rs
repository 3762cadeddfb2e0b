//! Custody contracts that lock tokens and hand out a representation of them.
pub mod nft_wrapper;
pub mod token_wrapper;
