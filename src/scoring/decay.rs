/// Stepped proximity credit: (upper distance bound in km, multiplier).
/// A distance below a bound takes that bound's multiplier; first match wins.
pub const PROXIMITY_STEPS: [(f64, f64); 4] = [(50.0, 1.0), (100.0, 0.7), (200.0, 0.4), (300.0, 0.2)];

/// Beyond this distance an asset adds nothing to clean generation
pub const PROXIMITY_CUTOFF_KM: f64 = 300.0;

const LOCAL_RANGE_KM: f64 = 50.0;
const REGIONAL_RANGE_KM: f64 = 150.0;
const BULK_RANGE_KM: f64 = 300.0;
const LONG_HAUL_RANGE_KM: f64 = 500.0;

/// Plants at or above this size may justify a long-haul HVDC tie
const LONG_HAUL_MIN_MW: f64 = 1000.0;

/// Proximity multiplier for clean generation, in [0, 1].
pub fn proximity_decay(distance_km: f64) -> f64 {
    for (bound, multiplier) in PROXIMITY_STEPS {
        if distance_km < bound {
            return multiplier;
        }
    }
    0.0
}

/// Transmission voltage class implied by a plant's nameplate capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VoltageClass {
    /// < 100 MW, 115-230 kV, economic to ~50 km
    Local,
    /// 100-500 MW, 230-345 kV, economic to ~150 km
    Regional,
    /// >= 500 MW, 345-765 kV, economic to ~300 km
    Bulk,
}

impl VoltageClass {
    pub fn from_capacity(capacity_mw: f64) -> Self {
        if capacity_mw >= 500.0 {
            VoltageClass::Bulk
        } else if capacity_mw >= 100.0 {
            VoltageClass::Regional
        } else {
            VoltageClass::Local
        }
    }
}

/// Transmission multiplier for an asset of `capacity_mw` at `distance_km`, in [0, 1].
///
/// Every class gets full credit inside 50 km. Past that, regional plants fall
/// linearly to 0.6 at 150 km and bulk plants to 0.8 at 150 km and 0.5 at
/// 300 km. Beyond its economic range a class contributes nothing, except
/// plants of 1 GW or more which keep a small tail (0.1 tapering to 0 at
/// 500 km).
///
/// Non-increasing in distance, and non-decreasing in capacity at any fixed
/// distance.
pub fn transmission_decay(distance_km: f64, capacity_mw: f64) -> f64 {
    let d = distance_km;
    let factor = match VoltageClass::from_capacity(capacity_mw) {
        VoltageClass::Local => {
            if d <= LOCAL_RANGE_KM {
                1.0
            } else {
                0.0
            }
        }
        VoltageClass::Regional => {
            if d <= LOCAL_RANGE_KM {
                1.0
            } else if d <= REGIONAL_RANGE_KM {
                lerp(d, LOCAL_RANGE_KM, REGIONAL_RANGE_KM, 1.0, 0.6)
            } else {
                0.0
            }
        }
        VoltageClass::Bulk => {
            if d <= LOCAL_RANGE_KM {
                1.0
            } else if d < REGIONAL_RANGE_KM {
                lerp(d, LOCAL_RANGE_KM, REGIONAL_RANGE_KM, 1.0, 0.8)
            } else if d <= BULK_RANGE_KM {
                lerp(d, REGIONAL_RANGE_KM, BULK_RANGE_KM, 0.8, 0.5)
            } else {
                long_haul_tail(d, capacity_mw)
            }
        }
    };
    factor.clamp(0.0, 1.0)
}

fn long_haul_tail(distance_km: f64, capacity_mw: f64) -> f64 {
    if capacity_mw >= LONG_HAUL_MIN_MW && distance_km < LONG_HAUL_RANGE_KM {
        lerp(distance_km, BULK_RANGE_KM, LONG_HAUL_RANGE_KM, 0.1, 0.0)
    } else {
        0.0
    }
}

fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_proximity_steps() {
        assert_eq!(proximity_decay(0.0), 1.0);
        assert_eq!(proximity_decay(49.9), 1.0);
        assert_eq!(proximity_decay(50.0), 0.7);
        assert_eq!(proximity_decay(99.9), 0.7);
        assert_eq!(proximity_decay(100.0), 0.4);
        assert_eq!(proximity_decay(200.0), 0.2);
        assert_eq!(proximity_decay(299.9), 0.2);
        assert_eq!(proximity_decay(300.0), 0.0);
        assert_eq!(proximity_decay(5000.0), 0.0);
    }

    #[test]
    fn test_voltage_class_boundaries() {
        assert_eq!(VoltageClass::from_capacity(0.0), VoltageClass::Local);
        assert_eq!(VoltageClass::from_capacity(99.9), VoltageClass::Local);
        assert_eq!(VoltageClass::from_capacity(100.0), VoltageClass::Regional);
        assert_eq!(VoltageClass::from_capacity(499.0), VoltageClass::Regional);
        assert_eq!(VoltageClass::from_capacity(500.0), VoltageClass::Bulk);
    }

    #[test]
    fn test_full_credit_close_in() {
        for capacity in [10.0, 250.0, 800.0, 2000.0] {
            assert_eq!(transmission_decay(10.0, capacity), 1.0);
            assert_eq!(transmission_decay(50.0, capacity), 1.0);
        }
    }

    #[test]
    fn test_small_plant_is_steep() {
        assert_eq!(transmission_decay(51.0, 50.0), 0.0);
    }

    #[test]
    fn test_regional_plant_is_moderate() {
        assert!((transmission_decay(100.0, 250.0) - 0.8).abs() < 1e-9);
        assert!((transmission_decay(150.0, 250.0) - 0.6).abs() < 1e-9);
        assert_eq!(transmission_decay(151.0, 250.0), 0.0);
    }

    #[test]
    fn test_bulk_plant_is_gentle() {
        assert!((transmission_decay(100.0, 800.0) - 0.9).abs() < 1e-9);
        assert!((transmission_decay(150.0, 800.0) - 0.8).abs() < 1e-9);
        assert!((transmission_decay(300.0, 800.0) - 0.5).abs() < 1e-9);
        assert_eq!(transmission_decay(301.0, 800.0), 0.0);
    }

    #[test]
    fn test_gigawatt_plant_long_haul_tail() {
        let d = transmission_decay(400.0, 1500.0);
        assert!((d - 0.05).abs() < 1e-9);
        assert_eq!(transmission_decay(500.0, 1500.0), 0.0);
    }

    #[test]
    fn test_large_beats_small_at_299km() {
        assert!(transmission_decay(299.0, 1000.0) >= transmission_decay(299.0, 50.0));
        assert!(transmission_decay(299.0, 1000.0) > 0.0);
    }

    proptest! {
        #[test]
        fn proximity_non_increasing(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(proximity_decay(near) >= proximity_decay(far));
        }

        #[test]
        fn transmission_non_increasing_in_distance(
            a in 0.0f64..800.0,
            b in 0.0f64..800.0,
            capacity in 0.0f64..3000.0,
        ) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(transmission_decay(near, capacity) >= transmission_decay(far, capacity));
        }

        #[test]
        fn transmission_non_decreasing_in_capacity(
            distance in 0.0f64..800.0,
            a in 0.0f64..3000.0,
            b in 0.0f64..3000.0,
        ) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(transmission_decay(distance, large) >= transmission_decay(distance, small));
        }

        #[test]
        fn transmission_in_unit_interval(distance in 0.0f64..2000.0, capacity in 0.0f64..5000.0) {
            let d = transmission_decay(distance, capacity);
            prop_assert!((0.0..=1.0).contains(&d));
        }
    }
}
