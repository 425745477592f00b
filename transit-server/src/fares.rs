//! Fare quoting.
//!
//! A quote is an indicative price for a party on a trip, valid until a
//! soft hold expires. No inventory is reserved: the hold expiry only
//! tells the caller how long the quoted price is honoured.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{FareBand, Trip};

/// Configuration for fare quoting.
#[derive(Debug, Clone)]
pub struct FareConfig {
    /// Minutes a quoted price is held for.
    pub hold_minutes: i64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self { hold_minutes: 15 }
    }
}

/// A priced quote for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct FareQuote {
    pub trip_id: String,
    pub class_code: String,
    pub passengers: u32,
    /// Per-passenger price, from the matched band's minimum.
    pub unit_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub hold_expires_at: DateTime<Utc>,
}

/// Produces fare quotes from a trip's fare bands.
pub struct FareQuoter {
    config: FareConfig,
}

impl FareQuoter {
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    /// Quote a fare for `passengers` travellers on `trip`.
    ///
    /// With a class the matching band is used; without one the cheapest
    /// band wins. Returns `None` when the trip has no bands or the
    /// requested class has none. An explicit `currency` overrides the
    /// band's currency label without converting the amount.
    pub fn quote(
        &self,
        trip: &Trip,
        class: Option<&str>,
        passengers: u32,
        currency: Option<&str>,
    ) -> Option<FareQuote> {
        self.quote_at(trip, class, passengers, currency, Utc::now())
    }

    fn quote_at(
        &self,
        trip: &Trip,
        class: Option<&str>,
        passengers: u32,
        currency: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<FareQuote> {
        let band: &FareBand = match class {
            Some(code) => trip.fare_bands.iter().find(|b| b.class_code == code)?,
            None => trip.cheapest_band()?,
        };

        let passengers = passengers.max(1);
        let unit_amount = band.min;
        let total_amount = unit_amount * f64::from(passengers);

        Some(FareQuote {
            trip_id: trip.id.as_str().to_string(),
            class_code: band.class_code.clone(),
            passengers,
            unit_amount,
            total_amount,
            currency: currency.unwrap_or(&band.currency).to_string(),
            hold_expires_at: now + Duration::minutes(self.config.hold_minutes),
        })
    }
}
