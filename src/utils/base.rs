//! Core math utilities: random ranges, clamping, distances, and the
//! drain pair for bounded resource flows.
//!
//! The drains adjust a stock toward a limit without ever crossing it,
//! which is how force decay and gravity build-up stay overshoot-free.

use rand::Rng;

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle described by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Bounds {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }
}

/// Uniform random float in `[min, max]`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform random integer in `[min, max]`, rounded from the float draw.
pub fn random_int_between<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    random_between(rng, min as f32, max as f32).round() as i32
}

/// Clamp `n` into `[min, max]`.
pub fn bounded(n: f32, min: f32, max: f32) -> f32 {
    if n < min {
        min
    } else if n > max {
        max
    } else {
        n
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    let vx = a.x - b.x;
    let vy = a.y - b.y;
    (vx * vx + vy * vy).sqrt()
}

/// Pick a random element from a slice. Empty slices yield `None`.
pub fn pick_from_list<'a, T, R: Rng + ?Sized>(rng: &mut R, list: &'a [T]) -> Option<&'a T> {
    if list.is_empty() {
        return None;
    }
    let index = random_int_between(rng, 0, list.len() as i32 - 1) as usize;
    list.get(index)
}

/// Outcome of a drain: the adjusted stock and the flow actually applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drain {
    pub stock: f32,
    pub flow: f32,
}

/// Take up to `flow` from `stock` without dropping below `floor`.
///
/// A stock already at or below the floor yields zero flow; otherwise the
/// applied flow is the smaller of the request and the remaining headroom.
pub fn drain_from(flow: f32, stock: f32, floor: f32) -> Drain {
    if stock <= floor {
        return Drain { stock, flow: 0.0 };
    }
    let headroom = stock - floor;
    if flow < headroom {
        Drain { stock: stock - flow, flow }
    } else {
        Drain { stock: floor, flow: headroom }
    }
}

/// Add up to `flow` to `stock` without passing `ceiling`.
pub fn drain_to(flow: f32, stock: f32, ceiling: f32) -> Drain {
    if stock >= ceiling {
        return Drain { stock, flow: 0.0 };
    }
    let headroom = ceiling - stock;
    if flow < headroom {
        Drain { stock: stock + flow, flow }
    } else {
        Drain { stock: ceiling, flow: headroom }
    }
}
