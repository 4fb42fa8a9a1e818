//! Encoded polyline codec and decoded geometry container.
//!
//! Directions providers ship route geometry as compact polyline strings
//! (delta-encoded varints, 5 significant bits per character, 1e-5 degree
//! resolution). Decoding happens here at the boundary; everything
//! downstream works with [`Polyline`] as explicit coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// Degrees are stored as integers scaled by this factor.
const PRECISION: f64 = 1e5;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Decoding failure on an encoded geometry string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    /// The string ended while a varint still had its continuation bit
    /// set. `offset` is the start of the truncated sequence.
    UnterminatedSequence { offset: usize },
    /// A character below the encoding's base offset of 63.
    InvalidCharacter { offset: usize, byte: u8 },
    /// A delta's continuation run exceeded the accumulator width.
    ValueOverflow { offset: usize },
}

impl fmt::Display for PolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolylineError::UnterminatedSequence { offset } => {
                write!(f, "unterminated coordinate sequence at offset {}", offset)
            }
            PolylineError::InvalidCharacter { offset, byte } => {
                write!(f, "invalid character 0x{:02x} at offset {}", byte, offset)
            }
            PolylineError::ValueOverflow { offset } => {
                write!(f, "coordinate delta overflow at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for PolylineError {}

/// Decodes an encoded polyline string.
///
/// An empty string decodes to an empty polyline. Pure function, no
/// shared state; the scan is bounded by the input length, so malformed
/// input fails instead of looping.
pub fn decode(encoded: &str) -> Result<Polyline, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (lat_delta, next) = decode_varint(bytes, index)?;
        let (lng_delta, next) = decode_varint(bytes, next)?;
        index = next;
        lat += lat_delta;
        lng += lng_delta;
        points.push(Coordinate::new(
            lat as f64 / PRECISION,
            lng as f64 / PRECISION,
        ));
    }

    Ok(Polyline::new(points))
}

/// Encodes coordinates into the compact polyline format.
pub fn encode(points: &[Coordinate]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        encode_varint(lat - prev_lat, &mut encoded);
        encode_varint(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

/// Reads one signed varint starting at `index`: 5 significant bits per
/// character, continuation bit 0x20, sign carried on the low bit.
fn decode_varint(bytes: &[u8], mut index: usize) -> Result<(i64, usize), PolylineError> {
    let start = index;
    let mut value: u64 = 0;
    let mut shift = 0;

    loop {
        if index >= bytes.len() {
            return Err(PolylineError::UnterminatedSequence { offset: start });
        }
        let byte = bytes[index];
        if byte < 63 {
            return Err(PolylineError::InvalidCharacter {
                offset: index,
                byte,
            });
        }
        if shift >= 64 {
            return Err(PolylineError::ValueOverflow { offset: start });
        }
        let chunk = (byte - 63) as u64;
        value |= (chunk & 0x1f) << shift;
        index += 1;
        if chunk & 0x20 == 0 {
            break;
        }
        shift += 5;
    }

    let signed = if value & 1 == 1 {
        !(value >> 1) as i64
    } else {
        (value >> 1) as i64
    };

    Ok((signed, index))
}

fn encode_varint(value: i64, out: &mut String) {
    // Zigzag so the sign lands on the low bit.
    let mut remaining = ((value << 1) ^ (value >> 63)) as u64;
    while remaining >= 0x20 {
        out.push((((remaining & 0x1f) | 0x20) as u8 + 63) as char);
        remaining >>= 5;
    }
    out.push((remaining as u8 + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_decode_known_geometry() {
        // Reference string from the encoding's documentation.
        let polyline = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(polyline.len(), expected.len());
        for (point, (lat, lng)) in polyline.points().iter().zip(expected) {
            assert!(close(point.latitude, lat), "lat {} != {}", point.latitude, lat);
            assert!(close(point.longitude, lng), "lng {} != {}", point.longitude, lng);
        }
    }

    #[test]
    fn test_decode_empty_string() {
        let polyline = decode("").unwrap();
        assert!(polyline.is_empty());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let encoded = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
        let first = decode(encoded).unwrap();
        let second = decode(encoded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_truncated_varint() {
        // '_' has the continuation bit set, so the string ends mid-varint.
        let err = decode("_p~iF~ps|U_").unwrap_err();
        assert!(matches!(err, PolylineError::UnterminatedSequence { offset: 10 }));
    }

    #[test]
    fn test_decode_rejects_low_characters() {
        let err = decode("_p~iF\n~ps|U").unwrap_err();
        assert!(matches!(
            err,
            PolylineError::InvalidCharacter { byte: b'\n', .. }
        ));
    }

    #[test]
    fn test_decode_rejects_overlong_delta() {
        // '~' keeps the continuation bit set forever.
        let err = decode(&"~".repeat(20)).unwrap_err();
        assert!(matches!(err, PolylineError::ValueOverflow { offset: 0 }));
    }

    #[test]
    fn test_round_trip_within_resolution() {
        let points = vec![
            Coordinate::new(36.1147, -115.1728),
            Coordinate::new(36.1727, -115.158),
            Coordinate::new(36.1215, -115.1739),
            Coordinate::new(-33.8675, 151.207),
        ];

        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), points.len());
        for (decoded, original) in decoded.points().iter().zip(&points) {
            assert!(close(decoded.latitude, original.latitude));
            assert!(close(decoded.longitude, original.longitude));
        }
    }

    #[test]
    fn test_encode_single_point() {
        let encoded = encode(&[Coordinate::new(38.5, -120.2)]);
        assert_eq!(encoded, "_p~iF~ps|U");
    }

    #[test]
    fn test_into_points() {
        let points = vec![Coordinate::new(38.5, -120.2), Coordinate::new(40.7, -120.95)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.into_points(), points);
    }
}
