//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AnchorIntId, EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
        assert!(AnchorIntId(0) < AnchorIntId(1));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(AnchorIntId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod seconds {
    use crate::Seconds;

    #[test]
    fn sentinel_is_65535() {
        assert_eq!(Seconds::UNREACHABLE.0, 65_535);
        assert!(Seconds::UNREACHABLE.is_unreachable());
        assert!(!Seconds(65_534).is_unreachable());
    }

    #[test]
    fn saturating_add_clamps_below_sentinel() {
        let a = Seconds(60_000);
        let b = Seconds(60_000);
        let sum = a.saturating_add(b);
        assert_eq!(sum, Seconds::MAX_REAL);
        assert!(!sum.is_unreachable());
    }

    #[test]
    fn saturating_add_normal_case() {
        assert_eq!(Seconds(60).saturating_add(Seconds(120)), Seconds(180));
    }

    #[test]
    fn unreachable_is_absorbing() {
        let s = Seconds(10).saturating_add(Seconds::UNREACHABLE);
        assert!(s.is_unreachable());
    }

    #[test]
    fn from_distance_rounds_up() {
        // 100 m at 10 m/s = 10.0s exactly.
        assert_eq!(Seconds::from_distance(100.0, 10.0), Seconds(10));
        // 101 m at 10 m/s = 10.1s -> ceil to 11.
        assert_eq!(Seconds::from_distance(101.0, 10.0), Seconds(11));
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(30.694, -88.043);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn approx_distance_one_degree_lat() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn bbox_check() {
        let center = GeoPoint::new(30.694, -88.043);
        let nearby = GeoPoint::new(30.700, -88.040);
        let far = GeoPoint::new(31.5, -88.043);
        assert!(nearby.within_bbox(center, 0.1));
        assert!(!far.within_bbox(center, 0.1));
    }

    #[test]
    fn planar_xy_matches_distance_near_origin() {
        let origin = GeoPoint::new(30.0, -88.0);
        let p = GeoPoint::new(30.001, -88.001);
        let [x, y] = p.planar_xy_m(origin);
        let planar_dist = (x * x + y * y).sqrt();
        assert!((planar_dist - origin.distance_m(p)).abs() < 1.0);
    }
}

#[cfg(test)]
mod mode {
    use crate::TravelMode;

    #[test]
    fn parse_roundtrip() {
        assert_eq!(TravelMode::parse("drive"), Some(TravelMode::Drive));
        assert_eq!(TravelMode::parse("walk"), Some(TravelMode::Walk));
        assert_eq!(TravelMode::parse("bogus"), None);
    }

    #[test]
    fn display() {
        assert_eq!(TravelMode::Drive.to_string(), "drive");
        assert_eq!(TravelMode::Walk.to_string(), "walk");
    }
}
