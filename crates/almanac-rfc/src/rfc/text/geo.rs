//! GEO values: RFC 5545 `lat;lon` and RFC 6350 `geo:lat,lon` URIs.

use serde::{Deserialize, Serialize};

use crate::error::{RfcError, RfcResult};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// ## Errors
    /// Returns an error if either coordinate is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> RfcResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(RfcError::ValidationError(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(RfcError::ValidationError(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// iCalendar `GEO` value.
    #[must_use]
    pub fn to_ical(&self) -> String {
        format!("{};{}", self.latitude, self.longitude)
    }

    /// vCard `GEO` value.
    #[must_use]
    pub fn to_uri(&self) -> String {
        format!("geo:{},{}", self.latitude, self.longitude)
    }
}

/// Parses a GEO value in either notation.
///
/// Accepts `geo:lat,lon[;params]`, `lat;lon` and `lat,lon`.
///
/// ## Errors
/// Returns an error if the value has no two numeric coordinates in range.
pub fn parse_geo(raw: &str) -> RfcResult<GeoPoint> {
    let invalid = || RfcError::ParseError(format!("invalid GEO value '{raw}'"));
    let trimmed = raw.trim();

    let pair = match trimmed
        .get(..4)
        .filter(|scheme| scheme.eq_ignore_ascii_case("geo:"))
    {
        Some(_) => {
            let uri = &trimmed[4..];
            let coords = uri.split_once(';').map_or(uri, |(coords, _)| coords);
            coords.split_once(',')
        }
        None => trimmed
            .split_once(';')
            .or_else(|| trimmed.split_once(',')),
    };

    let (lat, lon) = pair.ok_or_else(invalid)?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|e| RfcError::ParseError(format!("invalid GEO latitude '{lat}': {e}")))?;
    // geo URIs may carry an altitude as a third coordinate
    let lon = lon.split_once(',').map_or(lon, |(lon, _)| lon);
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|e| RfcError::ParseError(format!("invalid GEO longitude '{lon}': {e}")))?;

    GeoPoint::new(latitude, longitude)
}
