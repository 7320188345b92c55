//! DTOs used by the booking and confirmation pages.

use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::passenger::{PassengerFormRow, row_label};
use crate::dto::search::OfferView;

/// One editable passenger row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PassengerRowView {
    pub index: usize,
    pub label: String,
    pub kind: &'static str,
    pub name: String,
    /// Blank until an age has been entered.
    pub age: Option<u32>,
    pub passport_number: String,
    pub passport_required: bool,
}

impl PassengerRowView {
    pub fn from_rows(rows: &[PassengerFormRow]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| Self {
                index,
                label: row_label(rows, index).unwrap_or_default(),
                kind: row.kind.as_str(),
                name: row.name.clone(),
                age: (row.age > 0).then_some(row.age),
                passport_number: row.passport_number.clone(),
                passport_required: row.kind.requires_passport(),
            })
            .collect()
    }
}

/// Aggregated data required to render the booking page.
#[derive(Debug, Serialize)]
pub struct BookingPageData {
    pub offer: OfferView,
    pub passengers: Vec<PassengerRowView>,
    /// False while the party has no passengers to fill in.
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingSummary {
    pub reference: String,
    pub offer_id: String,
    pub passengers: usize,
}

impl From<&Booking> for BookingSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            reference: booking.reference.to_string(),
            offer_id: booking.offer_id.to_string(),
            passengers: booking.passengers.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmationPageData {
    pub booking: Option<BookingSummary>,
}
