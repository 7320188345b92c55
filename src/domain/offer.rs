//! Flight offers as returned by the search API, after decoding.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::OfferId;

/// One flown segment of an offer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Leg {
    pub flight_name: String,
    pub equipment: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub origin_code: String,
    pub destination_code: String,
    pub duration_minutes: u32,
    pub baggage: String,
}

/// One priced itinerary. Immutable once received.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlightOffer {
    pub id: OfferId,
    pub airline_name: String,
    pub is_refundable: bool,
    pub price_total: f64,
    pub currency: String,
    pub logo_url: String,
    /// Number of stops on the outbound itinerary.
    pub layover: u32,
    pub legs: Vec<Leg>,
}

impl FlightOffer {
    /// First flown segment, used for the result summary.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    /// "Non-stop" or "N stop(s)".
    pub fn stops_label(&self) -> String {
        match self.layover {
            0 => "Non-stop".to_string(),
            n => format!("{n} stop(s)"),
        }
    }

    /// Price with currency and thousands separators, e.g. `BDT 12,345`.
    pub fn price_label(&self) -> String {
        format!("{} {}", self.currency, format_amount(self.price_total))
    }
}

/// Looks up an offer by id within an in-memory result set.
pub fn find_offer<'a>(offers: &'a [FlightOffer], id: &str) -> Option<&'a FlightOffer> {
    offers.iter().find(|offer| offer.id.as_str() == id)
}

/// Formats a duration in minutes as `Xh Ym`.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Groups the integer part by thousands and keeps up to two decimals.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let whole = rounded.trunc() as i64;
    let cents = ((rounded - whole as f64).abs() * 100.0).round() as i64;

    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        grouped.insert(0, '-');
    }

    if cents == 0 {
        grouped
    } else if cents % 10 == 0 {
        format!("{grouped}.{}", cents / 10)
    } else {
        format!("{grouped}.{cents:02}")
    }
}
