/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points (degrees in, meters out).
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(haversine(55.7558, 37.6173, 55.7558, 37.6173), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine(55.7558, 37.6173, 59.9343, 30.3351);
        let backward = haversine(59.9343, 30.3351, 55.7558, 37.6173);
        assert_eq!(forward, backward);
    }

    #[test]
    fn one_degree_of_latitude() {
        let dist = haversine(55.0, 37.0, 56.0, 37.0);
        assert!((dist - 111_195.0).abs() < 50.0, "got {dist}");
    }

    #[test]
    fn short_distances_stay_in_meter_range() {
        // ~100 m north of the reference point
        let dist = haversine(55.7558, 37.6173, 55.7567, 37.6173);
        assert!((90.0..110.0).contains(&dist), "got {dist}");
    }
}
