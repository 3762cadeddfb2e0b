//! Stylus contract's introspection helpers library.
pub mod erc165;
