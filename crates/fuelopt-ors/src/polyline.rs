//! Decoder for the encoded polyline format (precision 1e-5) that
//! OpenRouteService uses for route geometry.

use anyhow::{bail, Result};
use fuelopt_core::RoutePoint;

/// Decode an encoded polyline into route points in travel order.
///
/// Truncated or corrupt input is an error rather than a partial path.
pub fn decode(encoded: &str) -> Result<Vec<RoutePoint>> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0usize;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat += next_value(bytes, &mut index)?;
        lon += next_value(bytes, &mut index)?;
        points.push(RoutePoint {
            lat: lat as f64 / 1e5,
            lon: lon as f64 / 1e5,
        });
    }
    Ok(points)
}

/// One zigzag-encoded varint: 5-bit chunks, offset by 63, high bit flags
/// continuation.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut shift = 0u32;
    let mut accumulator: i64 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            bail!("polyline truncated at byte {}", *index);
        };
        *index += 1;

        let chunk = i64::from(byte) - 63;
        if !(0..=0x3f).contains(&chunk) {
            bail!("invalid polyline byte {byte:#04x} at offset {}", *index - 1);
        }
        accumulator |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
        if shift > 60 {
            bail!("polyline chunk overflow at offset {}", *index - 1);
        }
    }

    Ok(if accumulator & 1 != 0 {
        !(accumulator >> 1)
    } else {
        accumulator >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_polyline() {
        // Reference vector from the polyline format documentation.
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_eq!(points.len(), 3);
        assert!((points[0].lat - 38.5).abs() < 1e-9);
        assert!((points[0].lon - -120.2).abs() < 1e-9);
        assert!((points[1].lat - 40.7).abs() < 1e-9);
        assert!((points[1].lon - -120.95).abs() < 1e-9);
        assert!((points[2].lat - 43.252).abs() < 1e-9);
        assert!((points[2].lon - -126.453).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_an_empty_path() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn truncated_input_is_an_error() {
        // Drop the final byte so the last longitude varint never terminates.
        let full = "_p~iF~ps|U";
        assert!(decode(&full[..full.len() - 1]).is_err());
    }

    #[test]
    fn rejects_bytes_outside_the_alphabet() {
        assert!(decode("\u{1F}").is_err());
    }
}
