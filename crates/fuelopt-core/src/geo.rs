//! Geodesic math shared by the index, projector, and planner.

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles.
const KM_TO_MILES: f64 = 0.621371;

/// Great-circle distance between two points in miles (haversine formula).
///
/// Inputs are decimal degrees. Returns 0 for coincident points and stays
/// finite for any finite coordinates, including antipodal pairs.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * KM_TO_MILES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude() {
        // ~69.1 miles between these points (1 degree latitude)
        let dist = distance_miles(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 69.09).abs() < 0.1, "got {dist}");
    }

    #[test]
    fn same_point_is_zero() {
        let dist = distance_miles(39.7392, -104.9903, 39.7392, -104.9903);
        assert!(dist < 1e-9);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let dist = distance_miles(0.0, 0.0, 0.0, 180.0);
        let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI * 0.621371;
        assert!(dist.is_finite());
        assert!((dist - half_circumference).abs() < 1.0, "got {dist}");
    }

    #[test]
    fn symmetric() {
        let there = distance_miles(39.74, -104.99, 41.88, -87.63);
        let back = distance_miles(41.88, -87.63, 39.74, -104.99);
        assert!((there - back).abs() < 1e-9);
    }
}
