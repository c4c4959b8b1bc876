//! Spatial helpers for sprites: bounds padding, placement sampling, and
//! distance-based collision scans.
//!
//! Placement sampling is rejection-based with a bounded attempt count;
//! exhaustion is an ordinary `None` and callers skip the spawn for that
//! frame.

use rand::Rng;

use super::base::{distance, random_between, Bounds, Point};

/// Default attempt budget for the rejection-sampling pickers.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 10;

/// Expand `bounds` by `dx` horizontally and `dy` vertically on each side.
///
/// Entities clamped into padded bounds can sit partly off-screen, so they
/// are only culled once fully outside the visible area.
pub fn pad_bounds(bounds: Bounds, dx: f32, dy: f32) -> Bounds {
    Bounds {
        top: bounds.top - dy,
        right: bounds.right + dx,
        bottom: bounds.bottom + dy,
        left: bounds.left - dx,
    }
}

/// Uniform random point inside `bounds`.
pub fn pick_location<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Point {
    Point {
        x: random_between(rng, bounds.left, bounds.right),
        y: random_between(rng, bounds.top, bounds.bottom),
    }
}

/// Rejection-sample a point in `bounds` at least `min_distance` away from
/// `point`, giving up after `max_attempts` tries.
pub fn pick_location_away_from<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    point: Point,
    min_distance: f32,
    max_attempts: u32,
) -> Option<Point> {
    for _ in 0..max_attempts {
        let location = pick_location(rng, bounds);
        if distance(location, point) >= min_distance {
            return Some(location);
        }
    }
    None
}

/// As [`pick_location_away_from`], but the point must clear `min_distance`
/// from every entry in `points`. An empty list accepts any location.
pub fn pick_location_away_from_list<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    points: &[Point],
    min_distance: f32,
    max_attempts: u32,
) -> Option<Point> {
    if points.is_empty() {
        return Some(pick_location(rng, bounds));
    }
    for _ in 0..max_attempts {
        let location = pick_location(rng, bounds);
        if points.iter().all(|p| distance(location, *p) >= min_distance) {
            return Some(location);
        }
    }
    None
}

/// Anything with a circular collision footprint.
pub trait Collides {
    fn center(&self) -> Point;
    fn radius(&self) -> f32;
}

/// Circle-approximate collision: true when the centers are closer than the
/// combined radii.
pub fn collide_distance<A: Collides + ?Sized, B: Collides + ?Sized>(a: &A, b: &B) -> bool {
    distance(a.center(), b.center()) < a.radius() + b.radius()
}

/// Scan `entities` with `pred`, stopping at the first hit.
pub fn collisions_with<T>(entities: &[T], mut pred: impl FnMut(&T) -> bool) -> bool {
    entities.iter().any(|ent| pred(ent))
}

/// Mutable scan; the predicate owns any side effects of a hit, e.g.
/// marking a token collected.
pub fn collisions_with_mut<T>(entities: &mut [T], mut pred: impl FnMut(&mut T) -> bool) -> bool {
    entities.iter_mut().any(|ent| pred(ent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Disc {
        center: Point,
        radius: f32,
    }

    impl Collides for Disc {
        fn center(&self) -> Point {
            self.center
        }
        fn radius(&self) -> f32 {
            self.radius
        }
    }

    fn disc(x: f32, y: f32, radius: f32) -> Disc {
        Disc { center: Point::new(x, y), radius }
    }

    #[test]
    fn test_pad_bounds_expands_all_edges() {
        let padded = pad_bounds(Bounds::new(0.0, 100.0, 50.0, 0.0), 10.0, 5.0);
        assert_eq!(padded.top, -5.0);
        assert_eq!(padded.right, 110.0);
        assert_eq!(padded.bottom, 55.0);
        assert_eq!(padded.left, -10.0);
    }

    #[test]
    fn test_pick_location_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = Bounds::new(10.0, 90.0, 60.0, 20.0);
        for _ in 0..100 {
            let p = pick_location(&mut rng, bounds);
            assert!(p.x >= bounds.left && p.x <= bounds.right);
            assert!(p.y >= bounds.top && p.y <= bounds.bottom);
        }
    }

    #[test]
    fn test_pick_location_away_from_respects_distance() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(0.0, 100.0, 100.0, 0.0);
        let avoid = Point::new(50.0, 50.0);
        if let Some(p) = pick_location_away_from(&mut rng, bounds, avoid, 20.0, 50) {
            assert!(distance(p, avoid) >= 20.0);
        }
    }

    #[test]
    fn test_pick_location_away_from_gives_up() {
        let mut rng = StdRng::seed_from_u64(4);
        // nothing in a 2x2 box is ever 100 away from its center
        let bounds = Bounds::new(0.0, 2.0, 2.0, 0.0);
        let avoid = Point::new(1.0, 1.0);
        assert!(pick_location_away_from(&mut rng, bounds, avoid, 100.0, 10).is_none());
    }

    #[test]
    fn test_pick_location_away_from_list_empty_accepts_any() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(0.0, 10.0, 10.0, 0.0);
        assert!(pick_location_away_from_list(&mut rng, bounds, &[], 1000.0, 10).is_some());
    }

    #[test]
    fn test_pick_location_away_from_list_clears_every_point() {
        let mut rng = StdRng::seed_from_u64(6);
        let bounds = Bounds::new(0.0, 200.0, 200.0, 0.0);
        let points = [Point::new(10.0, 10.0), Point::new(190.0, 190.0)];
        if let Some(p) = pick_location_away_from_list(&mut rng, bounds, &points, 15.0, 50) {
            assert!(points.iter().all(|q| distance(p, *q) >= 15.0));
        }
    }

    #[test]
    fn test_collide_distance_symmetry() {
        let a = disc(0.0, 0.0, 5.0);
        let b = disc(7.0, 0.0, 3.0);
        assert_eq!(collide_distance(&a, &b), collide_distance(&b, &a));
        assert!(collide_distance(&a, &b));

        let far = disc(100.0, 0.0, 1.0);
        assert_eq!(collide_distance(&a, &far), collide_distance(&far, &a));
        assert!(!collide_distance(&a, &far));
    }

    #[test]
    fn test_collide_distance_touching_is_not_collision() {
        // exactly touching circles are not "closer than" combined radii
        let a = disc(0.0, 0.0, 5.0);
        let b = disc(8.0, 0.0, 3.0);
        assert!(!collide_distance(&a, &b));
    }

    #[test]
    fn test_collisions_with_short_circuits() {
        let entities = [1, 2, 3, 4];
        let mut calls = 0;
        let hit = collisions_with(&entities, |n| {
            calls += 1;
            *n == 2
        });
        assert!(hit);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_collisions_with_mut_applies_side_effect_once() {
        let mut entities = [0, 0, 0];
        let hit = collisions_with_mut(&mut entities, |n| {
            *n += 1;
            *n == 1
        });
        assert!(hit);
        // short-circuit: only the first entry was visited
        assert_eq!(entities, [1, 0, 0]);
    }
}
