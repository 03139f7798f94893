//! Contract ABI support.
//!
//! Resolves human readable function interfaces to ABI functions and computes the
//! four byte selector that prefixes call data invoking them.

mod json;
mod signature;

use std::fmt;

pub use json::JsonAbi;
use keccak_hash::keccak;
use serde::Deserialize;
use serde::Serialize;
pub use signature::canonical_signature;
pub use signature::interface_to_function_name;

const SELECTOR_LEN: usize = 4;
const HEX_PREFIX: &str = "0x";

/// A contract ABI able to resolve functions from their interface text.
pub trait ContractAbi: Send + Sync + fmt::Debug {
    /// Find the function described by a human readable interface, such as
    /// `function transfer(address,uint256) returns (bool)`.
    ///
    /// A missing, empty or unknown interface resolves to `None`.
    fn resolve_function(&self, interface: Option<&str>) -> Option<Function>;

    /// The selector call data starts with when invoking `function`.
    fn function_selector(&self, function: &Function) -> Selector {
        Selector::from_signature(&function.signature())
    }
}

/// A function entry of a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Parameters.
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Return values.
    #[serde(default)]
    pub outputs: Vec<Param>,
    /// Declared mutability, absent in legacy ABIs.
    #[serde(default)]
    pub state_mutability: Option<StateMutability>,
}

impl Function {
    /// The canonical signature, `name(type,...)`, selectors are derived from.
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(Param::canonical_type).collect();
        format!("{}({})", self.name, inputs.join(","))
    }
}

/// A function parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter name, empty when unnamed.
    #[serde(default)]
    pub name: String,
    /// Solidity type, such as `uint256`, `address[]` or `tuple`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Members of a `tuple` type.
    #[serde(default)]
    pub components: Vec<Param>,
}

impl Param {
    /// The type as written in a canonical signature, with tuples expanded.
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let components: Vec<String> =
                    self.components.iter().map(Param::canonical_type).collect();
                format!("({}){suffix}", components.join(","))
            }
            None => self.ty.clone(),
        }
    }
}

/// Whether a function reads or modifies state and accepts ether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

/// The first four bytes of the keccak-256 hash of a canonical function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; SELECTOR_LEN]);

impl Selector {
    pub fn from_signature(signature: &str) -> Self {
        let hash = keccak(signature.as_bytes());
        let mut selector = [0; SELECTOR_LEN];
        selector.copy_from_slice(&hash.as_bytes()[..SELECTOR_LEN]);
        Self(selector)
    }

    pub fn as_bytes(&self) -> &[u8; SELECTOR_LEN] {
        &self.0
    }

    /// Whether hex encoded call data starts with this selector.
    ///
    /// The selector is written in lowercase hex and compared exactly, so uppercase
    /// call data never matches.
    pub fn is_prefix_of(&self, call_data: &str) -> bool {
        call_data.starts_with(&self.to_string())
    }
}

impl From<[u8; SELECTOR_LEN]> for Selector {
    fn from(bytes: [u8; SELECTOR_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEX_PREFIX}{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const TRANSFER_CALL_DATA: &str = "0xa9059cbb\
        000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b\
        0000000000000000000000000000000000000000000000000de0b6b3a7640000";

    #[test]
    fn selectors_of_well_known_functions() {
        assert_eq!(
            Selector::from_signature("transfer(address,uint256)").to_string(),
            "0xa9059cbb"
        );
        assert_eq!(
            Selector::from_signature("approve(address,uint256)").to_string(),
            "0x095ea7b3"
        );
        assert_eq!(
            Selector::from_signature("balanceOf(address)").as_bytes(),
            &[0x70, 0xa0, 0x82, 0x31]
        );
    }

    #[test]
    fn canonical_signature_expands_tuples() {
        let function: Function = serde_json::from_str(
            r#"{
                "name": "fulfillAdvancedOrder",
                "inputs": [
                    {"name": "order", "type": "tuple", "components": [
                        {"name": "numerator", "type": "uint120"},
                        {"name": "items", "type": "tuple[]", "components": [
                            {"name": "token", "type": "address"},
                            {"name": "amount", "type": "uint256"}
                        ]}
                    ]},
                    {"name": "fulfillerConduitKey", "type": "bytes32"}
                ],
                "outputs": [{"name": "fulfilled", "type": "bool"}],
                "stateMutability": "payable"
            }"#,
        )
        .unwrap();
        assert_eq!(
            function.signature(),
            "fulfillAdvancedOrder((uint120,(address,uint256)[]),bytes32)"
        );
        assert_eq!(function.state_mutability, Some(StateMutability::Payable));
    }

    #[test]
    fn selector_prefix() {
        let selector = Selector::from([0xa9, 0x05, 0x9c, 0xbb]);
        assert!(selector.is_prefix_of(TRANSFER_CALL_DATA));
        assert!(!selector.is_prefix_of("0xA9059CBB"));
        assert!(!selector.is_prefix_of("0XA9059cbb"));
        assert!(!selector.is_prefix_of("0xa9059c"));
        assert!(!selector.is_prefix_of("a9059cbb"));
        assert!(!selector.is_prefix_of(""));
    }

    // Changing any of the first four bytes of call data breaks the match, changing
    // anything after them never does.
    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, false)]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    #[case(35, true)]
    #[case(67, true)]
    fn selector_prefix_with_mutated_byte(#[case] byte: usize, #[case] matches: bool) {
        let selector = Selector::from_signature("transfer(address,uint256)");
        let mut bytes = hex::decode(&TRANSFER_CALL_DATA[2..]).unwrap();
        bytes[byte] ^= 0xff;
        let call_data = format!("0x{}", hex::encode(bytes));
        assert_eq!(selector.is_prefix_of(&call_data), matches);
    }
}
