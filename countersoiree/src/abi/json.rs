use serde::Deserialize;

use super::ContractAbi;
use super::Function;
use super::canonical_signature;
use super::interface_to_function_name;
use crate::error::AbiError;

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum AbiEntry {
    Function(Function),
    // events, errors, constructor, fallback and receive
    #[serde(other)]
    Other,
}

/// A contract ABI loaded from its standard JSON description.
#[derive(Debug, Clone, Default)]
pub struct JsonAbi {
    functions: Vec<Function>,
}

impl JsonAbi {
    /// Load the function entries of a JSON ABI array.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let entries: Vec<AbiEntry> = serde_json::from_str(json).map_err(AbiError::Deserialize)?;
        let functions = entries
            .into_iter()
            .filter_map(|entry| match entry {
                AbiEntry::Function(function) => Some(function),
                AbiEntry::Other => None,
            })
            .collect();
        Ok(Self { functions })
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

impl From<Vec<Function>> for JsonAbi {
    fn from(functions: Vec<Function>) -> Self {
        Self { functions }
    }
}

impl ContractAbi for JsonAbi {
    fn resolve_function(&self, interface: Option<&str>) -> Option<Function> {
        let interface = interface.filter(|interface| !interface.trim().is_empty())?;
        let name = interface_to_function_name(interface)?;
        let mut candidates = self
            .functions
            .iter()
            .filter(|function| function.name == name);

        let function = match canonical_signature(interface) {
            Some(signature) => candidates.find(|function| function.signature() == signature),
            // a bare name only identifies a function that is not overloaded
            None => candidates
                .next()
                .filter(|_| candidates.next().is_none()),
        };

        if function.is_none() {
            tracing::debug!(interface, "interface does not match any function of the abi");
        }
        function.cloned()
    }
}
