/// Sends a transaction built by a contract call and returns the pending
/// transaction.
///
/// ```rust,ignore
/// let pending = send!(contract.wrapTokens(token, amount))?;
/// ```
#[macro_export]
macro_rules! send {
    ($e:expr) => {
        $e.send().await
    };
}

/// Sends a transaction and waits for it to be included, returning its hash.
#[macro_export]
macro_rules! watch {
    ($e:expr) => {
        match $crate::send!($e) {
            Ok(pending) => pending.watch().await.map_err(Into::into),
            Err(e) => Err(e),
        }
    };
}

/// Sends a transaction and returns its receipt once it's included.
#[macro_export]
macro_rules! receipt {
    ($e:expr) => {
        match $crate::send!($e) {
            Ok(pending) => pending.get_receipt().await.map_err(Into::into),
            Err(e) => Err(e),
        }
    };
}
