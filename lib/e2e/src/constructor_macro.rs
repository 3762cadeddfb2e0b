use alloy::primitives::{Address, Bytes, U256};

/// Constructor data passed to `cargo stylus deploy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    /// Constructor signature, e.g. `constructor(address,uint256)`.
    pub signature: String,
    /// Stringified constructor arguments.
    pub args: Vec<String>,
}

/// A value that can be passed as a constructor argument on the command line.
pub trait AbiArg {
    /// Solidity type name of the argument.
    fn abi_type(&self) -> &'static str;

    /// Command-line representation of the argument.
    fn to_arg(&self) -> String;
}

macro_rules! impl_abi_arg {
    ($($ty:ty => $abi:literal),* $(,)?) => {$(
        impl AbiArg for $ty {
            fn abi_type(&self) -> &'static str {
                $abi
            }

            fn to_arg(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

impl_abi_arg!(
    Address => "address",
    U256 => "uint256",
    u64 => "uint64",
    u8 => "uint8",
    bool => "bool",
    String => "string",
);

impl AbiArg for &str {
    fn abi_type(&self) -> &'static str {
        "string"
    }

    fn to_arg(&self) -> String {
        (*self).to_string()
    }
}

impl AbiArg for Bytes {
    fn abi_type(&self) -> &'static str {
        "bytes"
    }

    fn to_arg(&self) -> String {
        format!("0x{}", alloy::hex::encode(self))
    }
}

/// Builds a [`Constructor`] out of its arguments.
///
/// ```rust,ignore
/// let ctor = constructor!(alice.address(), U256::from(1));
/// assert_eq!(ctor.signature, "constructor(address,uint256)");
/// ```
#[macro_export]
macro_rules! constructor {
    () => {{
        $crate::Constructor {
            signature: "constructor()".to_string(),
            args: vec![],
        }
    }};

    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let params = [
            $crate::AbiArg::abi_type(&$first)
            $(, $crate::AbiArg::abi_type(&$rest))*
        ];
        let args = vec![
            $crate::AbiArg::to_arg(&$first)
            $(, $crate::AbiArg::to_arg(&$rest))*
        ];

        $crate::Constructor {
            signature: format!("constructor({})", params.join(",")),
            args,
        }
    }};
}
