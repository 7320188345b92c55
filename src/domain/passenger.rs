//! Passenger detail rows derived from the trip party.
//!
//! Rows are generated in a fixed order (all adults, then all children) and the
//! row index is used both for the displayed numbering and for targeting
//! updates, so rows are never reordered after derivation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{PassengerName, PassportNumber};

/// Age category of a passenger row.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PassengerKind {
    Adult,
    Child,
}

impl PassengerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerKind::Adult => "adult",
            PassengerKind::Child => "child",
        }
    }

    /// Adults must present a passport; for children it is optional.
    pub fn requires_passport(&self) -> bool {
        matches!(self, PassengerKind::Adult)
    }
}

/// Editable passenger details as entered on the booking form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerFormRow {
    pub kind: PassengerKind,
    pub name: String,
    pub age: u32,
    pub passport_number: String,
}

impl PassengerFormRow {
    /// An empty row of the given kind.
    pub fn empty(kind: PassengerKind) -> Self {
        Self {
            kind,
            name: String::new(),
            age: 0,
            passport_number: String::new(),
        }
    }

    /// Whether the row carries everything a booking needs.
    ///
    /// The name must still be non-empty once markup is stripped, matching what
    /// [`crate::domain::booking::Passenger`] accepts.
    pub fn is_complete(&self) -> bool {
        PassengerName::new(self.name.as_str()).is_ok()
            && self.age > 0
            && (!self.kind.requires_passport()
                || PassportNumber::new(self.passport_number.as_str()).is_ok())
    }
}

/// A single field assignment applied to one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassengerFieldUpdate {
    Name(String),
    Age(u32),
    PassportNumber(String),
}

/// Raised when an update targets a row that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("passenger index {index} out of bounds for {len} rows")]
pub struct PassengerIndexError {
    pub index: usize,
    pub len: usize,
}

/// Raised when at least one row is incomplete at submission time.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Please fill out all required fields correctly.")]
pub struct BookingValidationError;

/// Builds `adults` empty adult rows followed by `children` empty child rows.
///
/// A `0, 0` party yields an empty sequence, which callers treat as "not yet
/// ready" rather than as an error.
pub fn derive_rows(adults: usize, children: usize) -> Vec<PassengerFormRow> {
    std::iter::repeat_n(PassengerKind::Adult, adults)
        .chain(std::iter::repeat_n(PassengerKind::Child, children))
        .map(PassengerFormRow::empty)
        .collect()
}

/// Returns a copy of `rows` with exactly one field of row `index` replaced.
pub fn update_field(
    rows: &[PassengerFormRow],
    index: usize,
    update: PassengerFieldUpdate,
) -> Result<Vec<PassengerFormRow>, PassengerIndexError> {
    if index >= rows.len() {
        return Err(PassengerIndexError {
            index,
            len: rows.len(),
        });
    }

    let mut updated = rows.to_vec();
    let row = &mut updated[index];
    match update {
        PassengerFieldUpdate::Name(name) => row.name = name,
        PassengerFieldUpdate::Age(age) => row.age = age,
        PassengerFieldUpdate::PassportNumber(passport) => row.passport_number = passport,
    }
    Ok(updated)
}

/// Display label for a row, numbering adults and children separately.
pub fn row_label(rows: &[PassengerFormRow], index: usize) -> Option<String> {
    let row = rows.get(index)?;
    let position = rows[..=index]
        .iter()
        .filter(|other| other.kind == row.kind)
        .count();
    let prefix = match row.kind {
        PassengerKind::Adult => "Adult",
        PassengerKind::Child => "Child",
    };
    Some(format!("{prefix} {position}"))
}

/// Succeeds only when every row is complete.
///
/// The error does not say which row failed.
pub fn validate_rows(rows: &[PassengerFormRow]) -> Result<(), BookingValidationError> {
    if rows.iter().all(PassengerFormRow::is_complete) {
        Ok(())
    } else {
        Err(BookingValidationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(kind: PassengerKind, name: &str, age: u32, passport: &str) -> PassengerFormRow {
        PassengerFormRow {
            kind,
            name: name.to_string(),
            age,
            passport_number: passport.to_string(),
        }
    }

    #[test]
    fn derives_adults_then_children() {
        let rows = derive_rows(2, 1);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], PassengerFormRow::empty(PassengerKind::Adult));
        assert_eq!(rows[1], PassengerFormRow::empty(PassengerKind::Adult));
        assert_eq!(rows[2], PassengerFormRow::empty(PassengerKind::Child));
        assert!(rows.iter().all(|r| r.name.is_empty() && r.age == 0));
    }

    #[test]
    fn empty_party_derives_nothing() {
        assert!(derive_rows(0, 0).is_empty());
    }

    #[test]
    fn update_field_touches_only_the_target() {
        let rows = vec![
            filled(PassengerKind::Adult, "Ann", 40, "P1"),
            filled(PassengerKind::Adult, "Bob", 0, "P2"),
            filled(PassengerKind::Child, "Cid", 7, ""),
        ];

        let updated = update_field(&rows, 1, PassengerFieldUpdate::Age(34)).unwrap();

        assert_eq!(updated[1], filled(PassengerKind::Adult, "Bob", 34, "P2"));
        assert_eq!(updated[0], rows[0]);
        assert_eq!(updated[2], rows[2]);
        // The input is left untouched.
        assert_eq!(rows[1].age, 0);
    }

    #[test]
    fn update_field_rejects_out_of_bounds_index() {
        let rows = derive_rows(1, 0);

        let result = update_field(&rows, 1, PassengerFieldUpdate::Name("X".into()));

        assert_eq!(result, Err(PassengerIndexError { index: 1, len: 1 }));
    }

    #[test]
    fn labels_number_each_kind_from_one() {
        let rows = derive_rows(2, 2);
        let labels: Vec<_> = (0..rows.len())
            .map(|i| row_label(&rows, i).unwrap())
            .collect();

        assert_eq!(labels, vec!["Adult 1", "Adult 2", "Child 1", "Child 2"]);
        assert_eq!(row_label(&rows, 4), None);
    }

    #[test]
    fn validation_requires_passport_for_adults_only() {
        let rows = vec![
            filled(PassengerKind::Adult, "Ann", 40, "P1"),
            filled(PassengerKind::Child, "Cid", 7, ""),
        ];
        assert_eq!(validate_rows(&rows), Ok(()));

        let missing_passport = vec![filled(PassengerKind::Adult, "Ann", 40, "  ")];
        assert_eq!(validate_rows(&missing_passport), Err(BookingValidationError));
    }

    #[test]
    fn validation_rejects_blank_names_and_zero_ages() {
        assert!(validate_rows(&[filled(PassengerKind::Child, " ", 7, "")]).is_err());
        assert!(validate_rows(&[filled(PassengerKind::Child, "Cid", 0, "")]).is_err());
        assert!(validate_rows(&derive_rows(1, 0)).is_err());
    }

    #[test]
    fn names_made_only_of_markup_are_incomplete() {
        let row = filled(PassengerKind::Child, "<script>alert(1)</script>", 7, "");

        assert!(!row.is_complete());
        assert_eq!(validate_rows(&[row]), Err(BookingValidationError));
    }
}
