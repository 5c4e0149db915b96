//! Connector metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Describes a connector to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_creation_schema: Option<AccountCreationSchema>,
}

/// Fields the host must collect to create an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreationSchema {
    pub fields: BTreeMap<String, AccountCreationField>,
}

impl AccountCreationSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field keyed by its profile name.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: AccountCreationField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Names of the required fields in display order.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&str> {
        let mut required: Vec<_> = self
            .fields
            .iter()
            .filter(|(_, f)| f.required)
            .collect();
        required.sort_by_key(|(_, f)| f.order);
        required.into_iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// A single string field of the account creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreationField {
    pub display_name: String,
    pub description: String,
    pub required: bool,
    pub placeholder: String,
    pub order: u32,
}
