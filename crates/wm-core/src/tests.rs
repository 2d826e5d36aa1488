//! Unit tests for wm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, WayId};

    #[test]
    fn raw_roundtrip() {
        let id = WayId(4_242_424_242);
        assert_eq!(id.raw(), 4_242_424_242);
        assert_eq!(WayId::from(4_242_424_242), id);
    }

    #[test]
    fn ordering() {
        assert!(WayId(0) < WayId(1));
        assert!(NodeId(-1) < NodeId(0));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(" 17 ".parse::<NodeId>().unwrap(), NodeId(17));
        assert!("abc".parse::<NodeId>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(WayId(7).to_string(), "WayId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(52.52, 13.405);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(48.0, 9.0);
        let b = GeoPoint::new(49.0, 9.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn non_finite_detected() {
        assert!(GeoPoint::new(1.0, 2.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!GeoPoint::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn bbox_is_tight_envelope() {
        let pts = [
            GeoPoint::new(1.0, 5.0),
            GeoPoint::new(-2.0, 7.0),
            GeoPoint::new(0.5, 4.0),
        ];
        let b = GeoBox::from_points(&pts).unwrap();
        assert_eq!(b.min, GeoPoint::new(-2.0, 4.0));
        assert_eq!(b.max, GeoPoint::new(1.0, 7.0));
        assert_eq!(b.center(), GeoPoint::new(-0.5, 5.5));
        assert!(GeoBox::from_points(&[]).is_none());
    }

    #[test]
    fn single_point_bbox_is_degenerate() {
        let p = GeoPoint::new(3.0, 4.0);
        let b = GeoBox::from_points(&[p]).unwrap();
        assert_eq!(b.min, p);
        assert_eq!(b.max, p);
        assert!(b.contains(p));
    }

    #[test]
    fn touching_boxes_intersect_but_do_not_overlap_strictly() {
        let a = GeoBox::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0));
        let b = GeoBox::new(GeoPoint::new(1.0, 0.0), GeoPoint::new(2.0, 1.0));
        assert!(a.intersects(&b));
        assert!(!a.overlaps_strict(&b));

        let c = GeoBox::new(GeoPoint::new(0.5, 0.5), GeoPoint::new(2.0, 2.0));
        assert!(a.overlaps_strict(&c));

        let far = GeoBox::around(GeoPoint::new(10.0, 10.0), 0.1, 0.1);
        assert!(!a.intersects(&far));
    }
}

#[cfg(test)]
mod local_map {
    use crate::local_map::METERS_PER_DEGREE_LAT;
    use crate::{GeoPoint, LocalMap};

    #[test]
    fn origin_maps_to_zero() {
        let origin = GeoPoint::new(48.78, 9.18);
        let map = LocalMap::new(origin);
        assert_eq!(map.transfer_to(origin), [0.0, 0.0]);
        assert_eq!(map.origin(), origin);
    }

    #[test]
    fn axes_point_east_and_north() {
        let map = LocalMap::new(GeoPoint::new(0.0, 0.0));
        let [x, y] = map.transfer_to(GeoPoint::new(0.0, 0.0001));
        assert!((x - 11.131_949).abs() < 1e-3, "got {x}");
        assert!(y.abs() < 1e-12);

        let [x, y] = map.transfer_to(GeoPoint::new(0.001, 0.0));
        assert!(x.abs() < 1e-12);
        assert!((y - 111.319_49).abs() < 1e-3, "got {y}");
    }

    #[test]
    fn roundtrip() {
        let map = LocalMap::new(GeoPoint::new(48.78, 9.18));
        let p = GeoPoint::new(48.781_234, 9.176_543);
        let q = map.transfer_from(map.transfer_to(p));
        assert!((p.lat - q.lat).abs() < 1e-12);
        assert!((p.lon - q.lon).abs() < 1e-12);
    }

    #[test]
    fn longitude_scale_shrinks_with_latitude() {
        let (m_lat, m_lon_eq) = LocalMap::meters_per_degree(GeoPoint::new(0.0, 0.0));
        let (_, m_lon_60) = LocalMap::meters_per_degree(GeoPoint::new(60.0, 0.0));
        assert_eq!(m_lat, METERS_PER_DEGREE_LAT);
        assert!((m_lon_eq - METERS_PER_DEGREE_LAT).abs() < 1e-9);
        assert!((m_lon_60 - 0.5 * METERS_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn degrees_per_meter_is_reciprocal() {
        let p = GeoPoint::new(45.0, 7.0);
        let (m_lat, m_lon) = LocalMap::meters_per_degree(p);
        let (d_lat, d_lon) = LocalMap::degrees_per_meter(p);
        assert!((m_lat * d_lat - 1.0).abs() < 1e-12);
        assert!((m_lon * d_lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn local_plane_agrees_with_haversine_over_short_range() {
        let origin = GeoPoint::new(48.78, 9.18);
        let map = LocalMap::new(origin);
        let p = GeoPoint::new(48.782, 9.183);
        let [x, y] = map.transfer_to(p);
        let planar = (x * x + y * y).sqrt();
        let great_circle = origin.distance_m(p);
        // Different earth radii: 6 378 137 vs 6 371 000 m (~0.11 %).
        assert!((planar - great_circle).abs() / great_circle < 0.005);
    }
}

#[cfg(test)]
mod angle {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::angle::{bearing_distance, normalize, reverse};
    use crate::periodic_distance;

    #[test]
    fn equal_modulo_period_is_zero() {
        assert!(periodic_distance(0.0, TAU, TAU).abs() < 1e-12);
        assert!(periodic_distance(1.0, 1.0 + 3.0 * TAU, TAU).abs() < 1e-9);
        assert!(periodic_distance(-FRAC_PI_2, 3.0 * FRAC_PI_2, TAU).abs() < 1e-12);
    }

    #[test]
    fn wraps_across_zero() {
        let d = periodic_distance(0.1, TAU - 0.1, TAU);
        assert!((d - 0.2).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn opposite_bearings_are_pi_apart() {
        assert!((bearing_distance(PI, 0.0) - PI).abs() < 1e-12);
        assert!((bearing_distance(FRAC_PI_2, -FRAC_PI_2) - PI).abs() < 1e-12);
    }

    #[test]
    fn symmetric_and_bounded() {
        let samples = [-7.5, -PI, -1.0, 0.0, 0.3, FRAC_PI_2, PI, 4.0, TAU, 12.9];
        for &a in &samples {
            for &b in &samples {
                let ab = bearing_distance(a, b);
                let ba = bearing_distance(b, a);
                assert!((ab - ba).abs() < 1e-9, "asymmetric for ({a}, {b})");
                assert!((0.0..=PI + 1e-12).contains(&ab), "out of range for ({a}, {b}): {ab}");
            }
        }
    }

    #[test]
    fn other_periods() {
        // Undirected lines: period π.
        assert!((periodic_distance(0.1, PI - 0.1, PI) - 0.2).abs() < 1e-12);
        assert!((periodic_distance(350.0, 10.0, 360.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_into_one_turn() {
        assert!((normalize(-0.1) - (TAU - 0.1)).abs() < 1e-12);
        assert_eq!(normalize(TAU), 0.0);
        assert_eq!(normalize(-1e-20), 0.0);
        assert!((reverse(FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((reverse(3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-12);
    }
}

#[cfg(test)]
mod config {
    use crate::{MatchConfig, WmError};

    #[test]
    fn default_is_valid() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.search_radius_m, 20.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_radius() {
        let cfg = MatchConfig { search_radius_m: -1.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WmError::Config(_))));
        let cfg = MatchConfig { search_radius_m: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_deviation_and_threads() {
        let cfg = MatchConfig { max_direction_deviation: Some(4.0), ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = MatchConfig { max_direction_deviation: Some(0.5), ..Default::default() };
        assert!(cfg.validate().is_ok());
        let cfg = MatchConfig { num_threads: Some(0), ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
