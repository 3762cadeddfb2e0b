use alloy::{rpc::types::eth::TransactionReceipt, sol_types::SolEvent};

use crate::deploy::Deployment;

/// Extension trait for asserting an event gets emitted.
pub trait EventExt<E> {
    /// Asserts the contract emitted the `expected` event.
    fn emits(&self, expected: E) -> bool;
}

/// Every log of `receipt` that decodes as `E`, in emission order.
pub fn decode<E: SolEvent>(receipt: &TransactionReceipt) -> Vec<E> {
    receipt
        .inner
        .logs()
        .iter()
        .filter_map(|log| log.log_decode::<E>().ok())
        .map(|log| log.inner.data)
        .collect()
}

impl<E> EventExt<E> for TransactionReceipt
where
    E: SolEvent + PartialEq,
{
    fn emits(&self, expected: E) -> bool {
        decode::<E>(self).into_iter().any(|event| event == expected)
    }
}

impl<E> EventExt<E> for Deployment
where
    E: SolEvent + PartialEq,
{
    fn emits(&self, expected: E) -> bool {
        self.receipt.emits(expected)
    }
}
