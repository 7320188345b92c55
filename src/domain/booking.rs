//! Submitted bookings.

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::passenger::{
    BookingValidationError, PassengerFormRow, PassengerKind, validate_rows,
};
use crate::domain::types::{BookingReference, OfferId, PassengerName, PassportNumber};

/// Passenger details that passed submission checks.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Passenger {
    pub kind: PassengerKind,
    pub name: PassengerName,
    pub age: u32,
    pub passport_number: Option<PassportNumber>,
}

impl TryFrom<&PassengerFormRow> for Passenger {
    type Error = BookingValidationError;

    fn try_from(row: &PassengerFormRow) -> Result<Self, Self::Error> {
        let name = PassengerName::new(row.name.as_str()).map_err(|_| BookingValidationError)?;
        let passport_number = match PassportNumber::new(row.passport_number.as_str()) {
            Ok(passport) => Some(passport),
            Err(_) if !row.kind.requires_passport() => None,
            Err(_) => return Err(BookingValidationError),
        };
        if row.age == 0 {
            return Err(BookingValidationError);
        }

        Ok(Self {
            kind: row.kind,
            name,
            age: row.age,
            passport_number,
        })
    }
}

/// A booking handed off to confirmation.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Booking {
    pub reference: BookingReference,
    pub offer_id: OfferId,
    pub passengers: Vec<Passenger>,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Validates every row and assigns a fresh reference.
    pub fn try_new(
        offer_id: OfferId,
        rows: &[PassengerFormRow],
    ) -> Result<Self, BookingValidationError> {
        validate_rows(rows)?;
        let passengers = rows
            .iter()
            .map(Passenger::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            reference: BookingReference::new(),
            offer_id,
            passengers,
            created_at: Utc::now().naive_utc(),
        })
    }
}
