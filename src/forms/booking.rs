//! Passenger details posted from the booking page.

use serde::Deserialize;

use crate::domain::passenger::{PassengerFieldUpdate, PassengerFormRow, update_field};
use crate::forms::FormError;

/// Repeated `name`, `age` and `passport` fields, one of each per row in
/// display order.
#[derive(Debug, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub age: Vec<String>,
    #[serde(default)]
    pub passport: Vec<String>,
}

/// Unparseable ages count as missing.
fn parse_age(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

impl BookingForm {
    /// Decodes an `application/x-www-form-urlencoded` body with repeated keys.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }

    /// Field assignments in row order.
    pub fn updates(&self) -> Vec<(usize, PassengerFieldUpdate)> {
        let names = self
            .name
            .iter()
            .enumerate()
            .map(|(i, name)| (i, PassengerFieldUpdate::Name(name.clone())));
        let ages = self
            .age
            .iter()
            .enumerate()
            .map(|(i, age)| (i, PassengerFieldUpdate::Age(parse_age(age))));
        let passports = self
            .passport
            .iter()
            .enumerate()
            .map(|(i, passport)| (i, PassengerFieldUpdate::PassportNumber(passport.clone())));

        names.chain(ages).chain(passports).collect()
    }

    /// Applies every posted field onto `rows`.
    ///
    /// Fails when the form carries more rows than the party has.
    pub fn apply_to(&self, rows: &[PassengerFormRow]) -> Result<Vec<PassengerFormRow>, FormError> {
        let mut rows = rows.to_vec();
        for (index, update) in self.updates() {
            rows = update_field(&rows, index, update)?;
        }
        Ok(rows)
    }
}
