use super::*;
use crate::enclose::all_enclosed;
use crate::geom::{segments_intersect, signed_area};
use crate::observe::Recorder;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn v(coords: &[(f64, f64)]) -> Vec<Vector2<f64>> {
    coords.iter().map(|&(x, y)| vector![x, y]).collect()
}

fn ring_of(points: &[Vector2<f64>], indices: &[usize]) -> Vec<Vector2<f64>> {
    indices.iter().map(|&i| points[i]).collect()
}

fn square_with_centre() -> Vec<Vector2<f64>> {
    v(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)])
}

/// U-shaped outline sampled at unit spacing plus a few interior points.
fn u_shape() -> Vec<Vector2<f64>> {
    let outline = v(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (8.0, 10.0),
        (8.0, 3.0),
        (2.0, 3.0),
        (2.0, 10.0),
        (0.0, 10.0),
    ]);
    let mut pts = Vec::new();
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()) as usize;
        for t in 0..steps {
            pts.push(a + d * (t as f64 / steps as f64));
        }
    }
    pts.extend(v(&[
        (1.0, 1.0),
        (5.0, 1.0),
        (9.0, 2.0),
        (1.0, 8.0),
        (9.0, 8.0),
        (5.0, 2.0),
    ]));
    pts
}

fn independent_contains(ring: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let ab = b - a;
        let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
        if (a + ab * t - p).norm() <= 1e-9 {
            return true;
        }
    }
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn assert_simple(ring: &[Vector2<f64>]) {
    let cfg = HullCfg::default();
    let r = ring.len();
    for i in 0..r {
        for j in (i + 2)..r {
            if i == 0 && j == r - 1 {
                continue;
            }
            assert!(
                !segments_intersect(ring[i], ring[(i + 1) % r], ring[j], ring[(j + 1) % r], &cfg),
                "edges {i} and {j} intersect"
            );
        }
    }
}

#[test]
fn square_with_interior_point_returns_corners() {
    let pts = square_with_centre();
    let idx = concave_hull(&pts, 3).unwrap();
    assert_eq!(idx, vec![1, 2, 3, 0]);
    let ring = ring_of(&pts, &idx);
    assert!(all_enclosed(&ring, &[pts[4]], &HullCfg::default()));
}

#[test]
fn notch_is_kept_at_k_one() {
    let pts = v(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (5.0, 5.0), (0.0, 10.0)]);
    let idx = concave_hull(&pts, 1).unwrap();
    assert_eq!(idx, vec![1, 3, 2, 4, 0]);
    assert_simple(&ring_of(&pts, &idx));
    // larger k walks the convex outline and encloses the notch vertex instead
    assert_eq!(concave_hull(&pts, 3).unwrap(), vec![1, 2, 4, 0]);
}

#[test]
fn degenerate_sizes_come_back_unchanged() {
    let all = v(&[(4.0, 4.0), (0.0, 1.0), (2.0, -3.0)]);
    for n in 0..=3 {
        assert_eq!(
            concave_hull(&all[..n], 3).unwrap(),
            (0..n).collect::<Vec<_>>()
        );
    }
    // collinear triple too
    let line = v(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_eq!(concave_hull(&line, 3).unwrap(), vec![0, 1, 2]);
}

#[test]
fn invalid_input_is_rejected() {
    let pts = square_with_centre();
    let params = HullParams {
        k: 0,
        ..HullParams::default()
    };
    assert_eq!(
        concave_hull_with(&pts, &params, &mut NoopObserver),
        Err(HullError::InvalidNeighborCount { k: 0 })
    );
    let mut bad = pts.clone();
    bad[2].y = f64::NAN;
    assert_eq!(
        concave_hull(&bad, 3),
        Err(HullError::NonFinitePoint { index: 2 })
    );
}

#[test]
fn coincident_points_collapse_to_first_index() {
    let pts = v(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (5.0, 5.0),
        (10.0, 0.0),
        (0.0, 0.0),
    ]);
    assert_eq!(concave_hull(&pts, 3).unwrap(), vec![1, 2, 3, 0]);
    let unique = unique_points(&pts, 1e-12);
    let ids: Vec<usize> = unique.iter().map(|hp| hp.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn too_few_distinct_points_is_an_error() {
    let same = v(&[(1.0, 1.0); 4]);
    assert_eq!(
        concave_hull(&same, 3),
        Err(HullError::TooFewDistinctPoints {
            points: 4,
            unique: 1
        })
    );
    let pairs = v(&[(0.0, 0.0), (0.0, 0.0), (5.0, 0.0), (5.0, 0.0)]);
    let err = concave_hull(&pairs, 3).unwrap_err();
    assert_eq!(
        err,
        HullError::TooFewDistinctPoints {
            points: 4,
            unique: 2
        }
    );
    assert!(err.to_string().contains("4 points"));
    // three distinct locations are still a (degenerate) hull
    let triple = v(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0), (4.0, 0.0)]);
    assert_eq!(concave_hull(&triple, 3).unwrap(), vec![0, 1, 2]);
}

#[test]
fn near_coincident_points_collapse_across_the_sort_order() {
    // (2e-13, 0) is within eps_dup of (0, 0), but (1e-13, 5) lies between them in x
    let pts = v(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (1e-13, 5.0),
        (2e-13, 0.0),
    ]);
    let ids: Vec<usize> = unique_points(&pts, 1e-12)
        .iter()
        .map(|hp| hp.id.0)
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert_eq!(concave_hull(&pts, 3).unwrap(), vec![1, 2, 3, 4, 0]);

    // same answer as with an exact duplicate
    let mut exact = pts.clone();
    exact[5] = vector![0.0, 0.0];
    assert_eq!(concave_hull(&exact, 3).unwrap(), vec![1, 2, 3, 4, 0]);
}

#[test]
fn near_duplicate_keeps_lowest_index() {
    let pts = v(&[(3.0, 3.0), (0.0, 0.0), (-5e-13, 4e-13), (1.0, 2.0)]);
    let ids: Vec<usize> = unique_points(&pts, 1e-12)
        .iter()
        .map(|hp| hp.id.0)
        .collect();
    assert_eq!(ids, vec![0, 1, 3]);
}

#[test]
fn escalates_until_everything_is_enclosed() {
    let pts = v(&[(0.0, 5.0), (1.0, 4.0), (4.0, 5.0), (1.0, 1.0), (1.0, 5.0), (3.0, 6.0)]);
    let mut rec = Recorder::default();
    let hull = concave_hull_with(&pts, &HullParams::default(), &mut rec).unwrap();
    assert_eq!(hull.indices, vec![3, 2, 5, 0]);
    assert_eq!(hull.k, 4);
    assert_eq!(hull.attempts, 2);
    assert_eq!(rec.attempts, vec![(3, false), (4, true)]);
}

#[test]
fn single_attempt_without_iteration() {
    let pts = v(&[(0.0, 5.0), (1.0, 4.0), (4.0, 5.0), (1.0, 1.0), (1.0, 5.0), (3.0, 6.0)]);
    let params = HullParams {
        iterate: false,
        ..HullParams::default()
    };
    let err = concave_hull_with(&pts, &params, &mut NoopObserver).unwrap_err();
    assert_eq!(
        err,
        HullError::Exhausted {
            k_initial: 3,
            k_last: 3,
            points: 6
        }
    );
}

#[test]
fn collinear_input_exhausts() {
    let pts: Vec<Vector2<f64>> = (0..5).map(|i| vector![i as f64, 0.0]).collect();
    let mut rec = Recorder::default();
    let err = concave_hull_with(&pts, &HullParams::default(), &mut rec).unwrap_err();
    assert_eq!(
        err,
        HullError::Exhausted {
            k_initial: 3,
            k_last: 4,
            points: 5
        }
    );
    assert_eq!(rec.attempts.len(), 2);
    assert!(err.to_string().contains("5 points"));
}

#[test]
fn cancellation_is_checked_between_attempts() {
    let pts = v(&[(0.0, 5.0), (1.0, 4.0), (4.0, 5.0), (1.0, 1.0), (1.0, 5.0), (3.0, 6.0)]);
    let mut rec = Recorder {
        cancel_after: Some(1),
        ..Recorder::default()
    };
    let err = concave_hull_with(&pts, &HullParams::default(), &mut rec).unwrap_err();
    assert_eq!(err, HullError::Cancelled { k: 4 });
    assert_eq!(rec.attempts, vec![(3, false)]);
}

#[test]
fn oversized_k_is_clamped() {
    let pts = square_with_centre();
    let params = HullParams {
        k: 100,
        ..HullParams::default()
    };
    let hull = concave_hull_with(&pts, &params, &mut NoopObserver).unwrap();
    assert_eq!(hull.indices, vec![1, 2, 3, 0]);
    assert_eq!(hull.k, 4);
}

#[test]
fn regular_polygon_is_its_own_hull() {
    for n in [5usize, 8, 13] {
        let pts: Vec<Vector2<f64>> = (0..n)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / n as f64;
                vector![t.cos(), t.sin()]
            })
            .collect();
        let hull = concave_hull_with(&pts, &HullParams::default(), &mut NoopObserver).unwrap();
        assert_eq!(hull.k, 3);
        let mut sorted = hull.indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        assert!(signed_area(&ring_of(&pts, &hull.indices)) > 0.0);
    }
}

#[test]
fn u_shape_keeps_its_notch() {
    let pts = u_shape();
    let idx = concave_hull(&pts, 3).unwrap();
    let ring = ring_of(&pts, &idx);
    assert_simple(&ring);
    // bottom of the notch is on the hull
    assert!(ring.contains(&vector![5.0, 3.0]));
    assert!(!independent_contains(&ring, vector![5.0, 6.0]));
    let area = signed_area(&ring);
    assert!(area > 0.0 && area < 70.0, "area {area}");
    for p in &pts {
        assert!(independent_contains(&ring, *p));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn successful_hulls_are_simple_and_enclosing(
        coords in prop::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 4..48)
    ) {
        let pts: Vec<Vector2<f64>> = coords.iter().map(|&(x, y)| vector![x, y]).collect();
        let mut rec = Recorder::default();
        match concave_hull_with(&pts, &HullParams::default(), &mut rec) {
            Ok(hull) => {
                prop_assert!(hull.attempts <= pts.len());
                let ring = ring_of(&pts, &hull.indices);
                if ring.len() >= 3 {
                    assert_simple(&ring);
                    for (i, p) in pts.iter().enumerate() {
                        if !hull.indices.contains(&i) {
                            prop_assert!(independent_contains(&ring, *p), "point {} outside", i);
                        }
                    }
                }
            }
            Err(HullError::Exhausted { k_last, .. }) => {
                prop_assert!(k_last < pts.len());
                prop_assert!(rec.attempts.len() <= pts.len());
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}

/// Points on a 0.1 lattice (so distinct points are far apart) plus copies of some
/// of them moved by less than `eps_dup`.
fn lattice_with_jittered_copies() -> impl Strategy<Value = (Vec<Vector2<f64>>, Vec<Vector2<f64>>)> {
    (
        prop::collection::vec((-50i32..50, -50i32..50), 4..24),
        prop::collection::vec((any::<prop::sample::Index>(), -3i32..=3, -3i32..=3), 1..8),
    )
        .prop_map(|(grid, copies)| {
            let base: Vec<Vector2<f64>> = grid
                .iter()
                .map(|&(x, y)| vector![f64::from(x) * 0.1, f64::from(y) * 0.1])
                .collect();
            let mut with_copies = base.clone();
            for (pick, dx, dy) in copies {
                let p = base[pick.index(base.len())];
                with_copies.push(p + vector![f64::from(dx), f64::from(dy)] * 1e-13);
            }
            (base, with_copies)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn jittered_duplicates_do_not_change_the_hull(
        (base, with_copies) in lattice_with_jittered_copies()
    ) {
        let params = HullParams::default();
        let expected = concave_hull_with(&base, &params, &mut NoopObserver);
        let got = concave_hull_with(&with_copies, &params, &mut NoopObserver);
        match (expected, got) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(&a.indices, &b.indices);
                prop_assert_eq!(a.k, b.k);
                let ring = ring_of(&with_copies, &b.indices);
                if ring.len() > 3 {
                    assert_simple(&ring);
                }
                for p in &with_copies {
                    prop_assert!(independent_contains(&ring, *p));
                }
            }
            (
                Err(HullError::Exhausted { k_initial: a0, k_last: a1, .. }),
                Err(HullError::Exhausted { k_initial: b0, k_last: b1, .. }),
            ) => {
                prop_assert_eq!((a0, a1), (b0, b1));
            }
            (
                Err(HullError::TooFewDistinctPoints { unique: a, .. }),
                Err(HullError::TooFewDistinctPoints { unique: b, .. }),
            ) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "base {:?} vs copies {:?}", a, b),
        }
    }
}
