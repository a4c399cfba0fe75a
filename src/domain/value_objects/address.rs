//! # Addresses and Contacts
//!
//! Shipping parties. An [`Address`] is used both on the wire and as the
//! input for pickup time-zone resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    /// Street lines, in order.
    pub street_lines: Vec<String>,
    /// City.
    pub city: String,
    /// State or province code, e.g. `CA` or `ON`.
    pub state_or_province_code: String,
    /// Postal code.
    pub postal_code: String,
    /// ISO country code.
    pub country_code: String,
    /// Residential delivery flag.
    pub residential: bool,
}

impl Address {
    /// Creates an address from its required parts.
    #[must_use]
    pub fn new(
        street_lines: Vec<String>,
        city: impl Into<String>,
        state_or_province_code: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            street_lines,
            city: city.into(),
            state_or_province_code: state_or_province_code.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
            residential: false,
        }
    }

    /// Marks the address as residential.
    #[must_use]
    pub fn residential(mut self) -> Self {
        self.residential = true;
        self
    }

    /// Returns true if both addresses are in the same country.
    #[must_use]
    pub fn same_country(&self, other: &Address) -> bool {
        self.country_code.trim().eq_ignore_ascii_case(other.country_code.trim())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {} {}",
            self.city, self.state_or_province_code, self.postal_code, self.country_code
        )
    }
}

/// A person or company reachable at an address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Contact {
    /// Person name.
    pub person_name: String,
    /// Company name.
    pub company_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Email address.
    #[serde(rename = "EMailAddress")]
    pub email_address: String,
}

/// Origin and destination of a movement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FromAndTo {
    /// Origin address.
    pub from_address: Address,
    /// Origin contact.
    pub from_contact: Contact,
    /// Destination address.
    pub to_address: Address,
    /// Destination contact.
    pub to_contact: Contact,
}

impl FromAndTo {
    /// Returns true if origin and destination are in different countries.
    #[must_use]
    pub fn is_international(&self) -> bool {
        !self.from_address.same_country(&self.to_address)
    }
}
