//! Services for the passenger details form and booking confirmation.

use crate::domain::booking::Booking;
use crate::domain::offer::{FlightOffer, find_offer};
use crate::domain::passenger::{BookingValidationError, PassengerFormRow};
use crate::domain::types::VisitorId;
use crate::domain::visitor::VisitorState;
use crate::dto::booking::{
    BookingPageData, BookingSummary, ConfirmationPageData, PassengerRowView,
};
use crate::dto::search::OfferView;
use crate::forms::FormError;
use crate::forms::booking::BookingForm;
use crate::repository::{VisitorReader, VisitorWriter};
use crate::services::auth::{AuthProvider, ensure_authenticated};
use crate::services::{ServiceError, ServiceResult};

/// Loads the visitor state together with the selected offer.
fn load_selection<R>(
    repo: &R,
    visitor: VisitorId,
    offer_id: &str,
) -> ServiceResult<(VisitorState, FlightOffer)>
where
    R: VisitorReader + ?Sized,
{
    let state = repo
        .get_visitor_state(visitor)?
        .ok_or(ServiceError::NotFound)?;

    let offer = find_offer(state.outcome.offers(), offer_id)
        .cloned()
        .ok_or(ServiceError::NotFound)?;

    Ok((state, offer))
}

/// Rows shown on the form: stored drafts when present, otherwise one empty
/// row per adult and child.
fn current_rows(state: &VisitorState) -> Vec<PassengerFormRow> {
    if !state.passengers.is_empty() {
        return state.passengers.clone();
    }
    state
        .search
        .as_ref()
        .map(|params| params.party.passenger_rows())
        .unwrap_or_default()
}

/// Loads the booking page for one of the visitor's offers.
pub fn load_booking_page<R, A>(
    repo: &R,
    auth: &A,
    visitor: VisitorId,
    offer_id: &str,
) -> ServiceResult<BookingPageData>
where
    R: VisitorReader + ?Sized,
    A: AuthProvider + ?Sized,
{
    ensure_authenticated(auth)?;

    let (state, offer) = load_selection(repo, visitor, offer_id)?;
    let rows = current_rows(&state);

    Ok(BookingPageData {
        offer: OfferView::from(&offer),
        ready: !rows.is_empty(),
        passengers: PassengerRowView::from_rows(&rows),
    })
}

/// Applies the posted passenger fields and books the offer when every row is
/// complete.
///
/// The entered values are kept as drafts until the booking succeeds.
pub fn submit_booking<R, A>(
    repo: &R,
    auth: &A,
    visitor: VisitorId,
    offer_id: &str,
    form: BookingForm,
) -> ServiceResult<Booking>
where
    R: VisitorReader + VisitorWriter + ?Sized,
    A: AuthProvider + ?Sized,
{
    ensure_authenticated(auth)?;

    let (state, offer) = load_selection(repo, visitor, offer_id)?;
    let derived = state
        .search
        .as_ref()
        .map(|params| params.party.passenger_rows())
        .unwrap_or_default();

    let rows = form.apply_to(&derived).map_err(|err| match err {
        FormError::PassengerIndex(err) => {
            log::warn!("Booking form does not match the party: {err}");
            ServiceError::Form(BookingValidationError.to_string())
        }
        other => ServiceError::from(other),
    })?;

    repo.replace_passengers(visitor, &rows)?;

    let booking = Booking::try_new(offer.id.clone(), &rows)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    log::info!(
        "Booked offer {} for {} passengers as {}",
        booking.offer_id,
        booking.passengers.len(),
        booking.reference
    );

    repo.record_booking(visitor, &booking)?;

    Ok(booking)
}

/// Loads the confirmation page for the visitor's last booking.
pub fn load_confirmation<R>(repo: &R, visitor: VisitorId) -> ServiceResult<ConfirmationPageData>
where
    R: VisitorReader + ?Sized,
{
    let booking = repo
        .get_visitor_state(visitor)?
        .and_then(|state| state.last_booking)
        .map(|booking| BookingSummary::from(&booking));

    Ok(ConfirmationPageData { booking })
}
