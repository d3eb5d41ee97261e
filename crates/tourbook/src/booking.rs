//! Booking confirmation lookups.
//!
//! Payment provider callbacks and confirmation e-mails link back with either
//! `bookingId` or `bookingCode`; both name the same booking.

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

/// Opaque, non-empty booking identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query parameters that may carry a booking reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingParams {
    pub booking_id: Option<String>,
    pub booking_code: Option<String>,
}

impl BookingParams {
    /// Parse a raw query string. The first occurrence of a repeated key wins.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "bookingId" => &mut params.booking_id,
                "bookingCode" => &mut params.booking_code,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// `bookingId` wins over `bookingCode`; empty values count as absent.
pub fn resolve_booking_reference(params: &BookingParams) -> Option<BookingReference> {
    [&params.booking_id, &params.booking_code]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(|value| BookingReference(value.clone()))
}
