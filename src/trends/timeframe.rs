//! Request-time timeframe resolution
//!
//! Maps the optional `timeframe` and `date` request parameters onto one of
//! the four canonical [`Timeframe`] buckets. Bad input never fails the
//! request: an unknown token falls back to the default bucket and an
//! unparsable date is ignored.

use chrono::NaiveDate;

use crate::models::Timeframe;

/// Expected format of the `date` parameter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve the timeframe for a request, relative to `today`
///
/// A parsable `date` overrides any explicit `timeframe`. Empty strings count
/// as absent.
pub fn resolve_timeframe(timeframe: Option<&str>, date: Option<&str>, today: NaiveDate) -> Timeframe {
    let explicit = timeframe
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<Timeframe>().unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Invalid timeframe, using default");
                Timeframe::default()
            })
        })
        .unwrap_or_default();

    match date.filter(|d| !d.is_empty()) {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(target) => Timeframe::from_days_ago((today - target).num_days()),
            Err(e) => {
                tracing::debug!(date = %raw, error = %e, "Ignoring unparsable date");
                explicit
            }
        },
        None => explicit,
    }
}
