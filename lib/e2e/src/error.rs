use alloy::sol_types::{Revert as RevertReason, SolError};

/// Assertions over the revert data of a failed call.
pub trait Revert {
    /// Checks that `self` reverted with the typed abi-encoded error
    /// `expected`.
    fn reverted_with<E: SolError>(&self, expected: E) -> bool;

    /// Checks that `self` reverted with `Error(string)` carrying `reason`.
    fn reverted_with_reason(&self, reason: &str) -> bool {
        self.reverted_with(RevertReason::from(reason))
    }
}

impl Revert for alloy::contract::Error {
    fn reverted_with<E: SolError>(&self, expected: E) -> bool {
        let data = match self {
            Self::TransportError(e) => {
                e.as_error_resp().and_then(|e| e.as_revert_data())
            }
            _ => None,
        };
        data.is_some_and(|data| data.as_ref() == expected.abi_encode())
    }
}

impl Revert for eyre::Report {
    fn reverted_with<E: SolError>(&self, expected: E) -> bool {
        if let Some(e) = self.downcast_ref::<alloy::contract::Error>() {
            return e.reverted_with(expected);
        }
        // Errors wrapped by other layers only expose the revert data through
        // their debug representation.
        let expected = alloy::hex::encode(expected.abi_encode());
        format!("{self:#?}").contains(&expected)
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, Address},
        sol,
    };

    use super::*;

    sol! {
        error OwnableUnauthorizedAccount(address account);
    }

    const ALICE: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    #[test]
    fn report_matches_revert_reason_in_message() {
        let data = RevertReason::from("Token not allowed").abi_encode();
        let report = eyre::eyre!(
            "execution reverted, data: 0x{}",
            alloy::hex::encode(&data)
        );

        assert!(report.reverted_with_reason("Token not allowed"));
        assert!(!report.reverted_with_reason("Token transfer failed"));
    }

    #[test]
    fn report_matches_custom_error() {
        let data =
            OwnableUnauthorizedAccount { account: ALICE }.abi_encode();
        let report = eyre::eyre!("reverted: {}", alloy::hex::encode(&data));

        assert!(report.reverted_with(OwnableUnauthorizedAccount {
            account: ALICE
        }));
        assert!(!report.reverted_with(OwnableUnauthorizedAccount {
            account: Address::ZERO
        }));
    }
}
