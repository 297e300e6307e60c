//! Constant naming for embedded resources.

use std::collections::HashMap;

use crate::error::{EmitError, Result};

/// Name of the array of filename constants.
pub const FILENAMES: &str = "filenames";
/// Name of the array of byte-array constants.
pub const SYMBOLS: &str = "symbols";
/// Name of the entry count constant.
pub const NUMBER_OF_SYMBOLS: &str = "number_of_symbols";

/// Suffix of the per-file filename constant.
pub const FILENAME_SUFFIX: &str = "_filename";

/// Derive a constant name from an identifier by replacing `/` and `.` with `_`.
pub fn sanitize(identifier: &str) -> String {
    identifier.replace(['/', '.'], "_")
}

/// The pair of constant names generated for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// Byte-array constant holding the file contents.
    pub data: String,
    /// String constant holding the identifier itself.
    pub filename: String,
}

impl ResourceNames {
    pub fn for_identifier(identifier: &str) -> Self {
        let data = sanitize(identifier);
        let filename = format!("{data}{FILENAME_SUFFIX}");
        Self { data, filename }
    }
}

/// Tracks every generated name and the identifier that claimed it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    owners: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim both constant names for `identifier`.
    ///
    /// Fails if either name is one of the index names or was already claimed.
    pub fn claim(&mut self, identifier: &str) -> Result<ResourceNames> {
        let names = ResourceNames::for_identifier(identifier);
        self.claim_name(&names.data, identifier)?;
        self.claim_name(&names.filename, identifier)?;
        Ok(names)
    }

    fn claim_name(&mut self, symbol: &str, identifier: &str) -> Result<()> {
        if [FILENAMES, SYMBOLS, NUMBER_OF_SYMBOLS].contains(&symbol) {
            return Err(EmitError::ReservedSymbol {
                symbol: symbol.to_string(),
                identifier: identifier.to_string(),
            });
        }
        if let Some(first) = self.owners.get(symbol) {
            return Err(EmitError::DuplicateSymbol {
                symbol: symbol.to_string(),
                first: first.clone(),
                second: identifier.to_string(),
            });
        }
        self.owners
            .insert(symbol.to_string(), identifier.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
