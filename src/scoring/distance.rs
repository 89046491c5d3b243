/// Length of one degree of latitude, and of longitude at the equator
pub const KM_PER_DEGREE: f64 = 111.0;

/// Approximate distance in km between two lat/lon points.
///
/// Treats the patch of earth between the points as flat: latitude degrees are
/// a fixed 111 km and longitude degrees shrink with the cosine of the mean
/// latitude. Good to within a few percent up to roughly 1000 km. Not meant for
/// pairs that straddle a pole or the antimeridian.
pub fn planar_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let mean_lat = (lat1 + lat2) / 2.0;
    let dy = (lat2 - lat1) * KM_PER_DEGREE;
    let dx = (lon2 - lon1) * KM_PER_DEGREE * mean_lat.to_radians().cos();
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(planar_distance(45.5, -122.7, 45.5, -122.7), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = planar_distance(40.0, -100.0, 41.0, -100.0);
        assert!((d - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let at_equator = planar_distance(0.0, 0.0, 0.0, 1.0);
        let at_sixty = planar_distance(60.0, 0.0, 60.0, 1.0);
        assert!((at_equator - 111.0).abs() < 1e-9);
        assert!((at_sixty - 55.5).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = planar_distance(45.523, -122.676, 47.606, -122.332);
        let b = planar_distance(47.606, -122.332, 45.523, -122.676);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_portland_to_seattle() {
        // Great-circle distance is ~233 km
        let d = planar_distance(45.523, -122.676, 47.606, -122.332);
        assert!(d > 225.0 && d < 240.0, "got {}", d);
    }
}
