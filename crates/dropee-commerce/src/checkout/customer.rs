//! Customer contact details collected at checkout.

use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Who the order is for and where it goes. No account is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Special instructions for the shop or rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl CustomerDetails {
    /// Create details without instructions.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            instructions: None,
        }
    }

    /// Attach delivery instructions. Blank text is treated as none.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    /// Check the required fields are filled in.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CommerceError::CheckoutIncomplete(field.to_string()));
            }
        }
        Ok(())
    }
}
