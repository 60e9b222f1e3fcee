//! Shipping addresses

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static LETTERS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]*$").expect("letters pattern is valid"));

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}(?:-[0-9]{4})?$").expect("postal code pattern is valid")
});

/// Field of a [`ShippingAddress`], used to report which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    /// Recipient name
    FullName,

    /// Street address
    Address,

    /// City
    City,

    /// Postal code
    PostalCode,

    /// Country
    Country,
}

impl AddressField {
    /// Human-readable field name.
    pub const fn label(self) -> &'static str {
        match self {
            AddressField::FullName => "full name",
            AddressField::Address => "address",
            AddressField::City => "city",
            AddressField::PostalCode => "postal code",
            AddressField::Country => "country",
        }
    }
}

/// Shipping address validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShippingAddressError {
    /// A required field is blank.
    #[error("{} is required", .0.label())]
    Required(AddressField),

    /// The full name is shorter than 3 or longer than 50 characters.
    #[error("full name must be between 3 and 50 characters")]
    FullNameLength,

    /// The street address is shorter than 5 characters.
    #[error("address must be at least 5 characters")]
    AddressTooShort,

    /// City or country contains something other than letters and spaces.
    #[error("{} must contain only letters", .0.label())]
    LettersOnly(AddressField),

    /// Postal code is not `12345` or `12345-6789`.
    #[error("postal code must be 5 digits, optionally followed by a 4 digit extension")]
    PostalCode,
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub postal_code: String,

    /// Country
    pub country: String,
}

impl ShippingAddress {
    /// Check every field, reporting the first that fails.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingAddressError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ShippingAddressError> {
        let full_name = required(&self.full_name, AddressField::FullName)?;
        let name_len = full_name.chars().count();

        if !(3..=50).contains(&name_len) {
            return Err(ShippingAddressError::FullNameLength);
        }

        if required(&self.address, AddressField::Address)?.chars().count() < 5 {
            return Err(ShippingAddressError::AddressTooShort);
        }

        letters_only(&self.city, AddressField::City)?;

        if !POSTAL_CODE.is_match(required(&self.postal_code, AddressField::PostalCode)?) {
            return Err(ShippingAddressError::PostalCode);
        }

        letters_only(&self.country, AddressField::Country)?;

        Ok(())
    }
}

fn required(value: &str, field: AddressField) -> Result<&str, ShippingAddressError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ShippingAddressError::Required(field));
    }

    Ok(value)
}

fn letters_only(value: &str, field: AddressField) -> Result<(), ShippingAddressError> {
    if !LETTERS_ONLY.is_match(required(value, field)?) {
        return Err(ShippingAddressError::LettersOnly(field));
    }

    Ok(())
}
