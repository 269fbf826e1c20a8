//! Unit tests for lg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PackageId, PointId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = PointId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PointId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display_uses_labels() {
        assert_eq!(PackageId(7).to_string(), "Package_7");
        assert_eq!(VehicleId(0).to_string(), "Vehicle_0");
        assert_eq!(PointId(3).to_string(), "DPoint_3");
    }

    #[test]
    fn next_on_ring_wraps() {
        assert_eq!(PointId(0).next_on_ring(3), PointId(1));
        assert_eq!(PointId(2).next_on_ring(3), PointId(0));
        assert_eq!(PointId(1).next_on_ring(2), PointId(0));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<usize> = (0..32).map(|_| a.index(100)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.index(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let xs: Vec<u64> = (0..8).map(|_| c0.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| c1.gen_range(0..u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn index_other_than_never_collides_on_two_point_ring() {
        let mut rng = SimRng::new(99);
        for _ in 0..1_000 {
            let origin = rng.index(2);
            let dest = rng.index_other_than(2, origin);
            assert_ne!(origin, dest);
        }
    }

    #[test]
    #[should_panic]
    fn index_other_than_rejects_single_candidate() {
        SimRng::new(0).index_other_than(1, 0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Stamp};

    #[test]
    fn clock_is_monotonic() {
        let clock = SimClock::start();
        let mut prev = clock.now();
        for _ in 0..1_000 {
            let next = clock.now();
            assert!(next >= prev);
            prev = next;
        }
        assert!(clock.start_stamp() <= prev);
    }

    #[test]
    fn stamp_display() {
        assert_eq!(Stamp(1_700_000_000_000_042).to_string(), "1700000000.000042");
        assert_eq!(Stamp(5_000_000).unix_secs(), 5);
    }

    #[test]
    fn micros_since_saturates() {
        assert_eq!(Stamp(10).micros_since(Stamp(4)), 6);
        assert_eq!(Stamp(4).micros_since(Stamp(10)), 0);
    }
}

#[cfg(test)]
mod config {
    use crate::{LgError, NetworkConfig};

    #[test]
    fn valid_config_passes() {
        assert!(NetworkConfig::new(3, 2, 10, 2).validate().is_ok());
    }

    #[test]
    fn zero_packages_needs_no_vehicle() {
        assert!(NetworkConfig::new(2, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn rejects_fewer_than_two_points() {
        for points in [0, 1] {
            let err = NetworkConfig::new(points, 1, 1, 1).validate().unwrap_err();
            assert!(matches!(err, LgError::Config(_)));
        }
    }

    #[test]
    fn rejects_undeliverable_runs() {
        assert!(NetworkConfig::new(3, 0, 1, 1).validate().is_err());
        assert!(NetworkConfig::new(3, 1, 1, 0).validate().is_err());
    }

    #[test]
    fn rejects_inverted_travel_range() {
        let cfg = NetworkConfig { travel_min_ms: 10, travel_max_ms: 5, ..NetworkConfig::new(3, 1, 1, 1) };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod signal {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::Shutdown;

    #[test]
    fn trigger_fires_once() {
        let s = Shutdown::new();
        assert!(!s.is_triggered());
        assert!(s.trigger());
        assert!(!s.trigger());
        assert!(s.is_triggered());
    }

    #[test]
    fn sleep_completes_without_trigger() {
        let s = Shutdown::new();
        assert!(s.sleep(Duration::from_millis(5)));
    }

    #[test]
    fn trigger_interrupts_sleep() {
        let s = Arc::new(Shutdown::new());
        let sleeper = {
            let s = Arc::clone(&s);
            thread::spawn(move || {
                let t0 = Instant::now();
                let completed = s.sleep(Duration::from_secs(30));
                (completed, t0.elapsed())
            })
        };
        thread::sleep(Duration::from_millis(20));
        s.trigger();
        let (completed, elapsed) = sleeper.join().unwrap();
        assert!(!completed);
        assert!(elapsed < Duration::from_secs(10));
    }

    #[test]
    fn progress_wakes_waiter() {
        let s = Arc::new(Shutdown::new());
        let seen = s.generation();
        let waiter = {
            let s = Arc::clone(&s);
            thread::spawn(move || s.wait_progress(seen, Duration::from_secs(30)))
        };
        thread::sleep(Duration::from_millis(20));
        s.notify_progress();
        assert_eq!(waiter.join().unwrap(), seen + 1);
    }

    #[test]
    fn wait_progress_times_out() {
        let s = Shutdown::new();
        let seen = s.generation();
        assert_eq!(s.wait_progress(seen, Duration::from_millis(5)), seen);
    }
}
