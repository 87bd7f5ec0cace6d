use core::ops::RangeInclusive;
use std::cmp::{max, min};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::iter;

use crate::error::CuboidError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point(pub i32, pub i32, pub i32);

impl Point {
    pub fn new(x: i32, y: i32, z: i32) -> Point {
        Point(x, y, z)
    }
}

/// A cut position along one axis.  Cutting at `position` separates
/// the lattice points below `position` from those at or above it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Plane {
    pub axis: Axis,
    pub position: i32,
}

/// An axis-aligned box of lattice points.  Every range is inclusive at
/// both ends and is never inverted; `Cuboid::new` rejects inverted
/// ranges and the slicing operations only ever produce valid ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cuboid {
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
    z: RangeInclusive<i32>,
}

fn check_range(axis: Axis, r: &RangeInclusive<i32>) -> Result<(), CuboidError> {
    if r.start() <= r.end() {
        Ok(())
    } else {
        Err(CuboidError::InvalidRange {
            axis,
            start: *r.start(),
            end: *r.end(),
        })
    }
}

impl Cuboid {
    pub fn new(
        x: RangeInclusive<i32>,
        y: RangeInclusive<i32>,
        z: RangeInclusive<i32>,
    ) -> Result<Cuboid, CuboidError> {
        check_range(Axis::X, &x)?;
        check_range(Axis::Y, &y)?;
        check_range(Axis::Z, &z)?;
        Ok(Cuboid { x, y, z })
    }

    /// The region the reactor's initialization procedure is confined
    /// to: -50..=50 on every axis.
    pub fn initialization_region() -> Cuboid {
        Cuboid {
            x: -50..=50,
            y: -50..=50,
            z: -50..=50,
        }
    }

    pub fn x(&self) -> &RangeInclusive<i32> {
        &self.x
    }

    pub fn y(&self) -> &RangeInclusive<i32> {
        &self.y
    }

    pub fn z(&self) -> &RangeInclusive<i32> {
        &self.z
    }

    pub fn range(&self, axis: Axis) -> &RangeInclusive<i32> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    fn with_range(&self, axis: Axis, r: RangeInclusive<i32>) -> Cuboid {
        let mut result = self.clone();
        match axis {
            Axis::X => result.x = r,
            Axis::Y => result.y = r,
            Axis::Z => result.z = r,
        }
        result
    }

    /// Number of lattice points along `axis`.
    fn width(&self, axis: Axis) -> u64 {
        let r = self.range(axis);
        (i64::from(*r.end()) - i64::from(*r.start()) + 1).unsigned_abs()
    }

    pub fn volume(&self) -> Result<u64, CuboidError> {
        Axis::ALL.iter().try_fold(1_u64, |acc, axis| {
            acc.checked_mul(self.width(*axis))
                .ok_or(CuboidError::VolumeOverflow)
        })
    }

    /// Adjacent ranges such as 0..=5 and 6..=10 share no lattice point
    /// and so do not intersect.
    pub fn intersects(&self, other: &Cuboid) -> bool {
        Axis::ALL.iter().all(|axis| {
            let (a, b) = (self.range(*axis), other.range(*axis));
            a.end() >= b.start() && b.end() >= a.start()
        })
    }

    pub fn intersection(&self, other: &Cuboid) -> Option<Cuboid> {
        if self.intersects(other) {
            Some(Cuboid {
                x: max(*self.x.start(), *other.x.start())..=min(*self.x.end(), *other.x.end()),
                y: max(*self.y.start(), *other.y.start())..=min(*self.y.end(), *other.y.end()),
                z: max(*self.z.start(), *other.z.start())..=min(*self.z.end(), *other.z.end()),
            })
        } else {
            None
        }
    }

    pub fn contains(&self, other: &Cuboid) -> bool {
        Axis::ALL.iter().all(|axis| {
            let (outer, inner) = (self.range(*axis), other.range(*axis));
            outer.start() <= inner.start() && inner.end() <= outer.end()
        })
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.x.contains(&p.0) && self.y.contains(&p.1) && self.z.contains(&p.2)
    }

    /// True when the plane falls strictly inside this cuboid, so that
    /// cutting there leaves a non-empty piece on each side.  A plane
    /// at the cuboid's own start does not bisect it.
    pub fn bisected_by(&self, plane: &Plane) -> bool {
        let r = self.range(plane.axis);
        *r.start() < plane.position && plane.position <= *r.end()
    }

    /// Cut the cuboid with `plane`.  If the plane bisects it, the
    /// result is (points below position, Some(points at or above
    /// position)).  Otherwise the cuboid comes back whole as (self, None).
    pub fn cut(self, plane: Plane) -> (Cuboid, Option<Cuboid>) {
        if self.bisected_by(&plane) {
            let r = self.range(plane.axis);
            let lower = self.with_range(plane.axis, *r.start()..=(plane.position - 1));
            let upper = self.with_range(plane.axis, plane.position..=*r.end());
            (lower, Some(upper))
        } else {
            (self, None)
        }
    }

    /// Decompose this cuboid into disjoint pieces which together cover
    /// exactly the same points, each of which lies either entirely
    /// inside `slicer` or entirely outside it.
    pub fn slice(&self, slicer: &Cuboid) -> HashSet<Cuboid> {
        let planes: Vec<Plane> = Axis::ALL
            .iter()
            .flat_map(|axis| {
                let axis = *axis;
                let r = slicer.range(axis);
                // There is nothing beyond i32::MAX to cut away.
                [Some(*r.start()), r.end().checked_add(1)]
                    .into_iter()
                    .flatten()
                    .map(move |position| Plane { axis, position })
            })
            .filter(|plane| self.bisected_by(plane))
            .collect();

        let mut pieces: Vec<Cuboid> = vec![self.clone()];
        for plane in planes {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| {
                    let (lower, upper) = piece.cut(plane);
                    iter::once(lower).chain(upper)
                })
                .collect();
        }
        pieces.into_iter().collect()
    }
}

impl Display for Cuboid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}..{},y={}..{},z={}..{}",
            self.x.start(),
            self.x.end(),
            self.y.start(),
            self.y.end(),
            self.z.start(),
            self.z.end()
        )
    }
}

#[cfg(test)]
fn cuboid(x: RangeInclusive<i32>, y: RangeInclusive<i32>, z: RangeInclusive<i32>) -> Cuboid {
    Cuboid::new(x, y, z).expect("test cuboids should be valid")
}

#[test]
fn test_new_rejects_inverted_range() {
    assert_eq!(
        Cuboid::new(0..=1, 5..=4, 0..=1),
        Err(CuboidError::InvalidRange {
            axis: Axis::Y,
            start: 5,
            end: 4
        })
    );
    assert!(Cuboid::new(3..=3, 3..=3, 3..=3).is_ok());
}

#[test]
fn test_volume() {
    assert_eq!(cuboid(10..=12, 10..=12, 10..=12).volume(), Ok(27));
    assert_eq!(cuboid(0..=0, 0..=0, 0..=0).volume(), Ok(1));
    assert_eq!(
        cuboid(-100000..=100000, -100000..=100000, -100000..=100000).volume(),
        Ok(200001_u64 * 200001 * 200001)
    );
    assert_eq!(
        cuboid(i32::MIN..=i32::MAX, i32::MIN..=i32::MAX, 0..=0).volume(),
        Err(CuboidError::VolumeOverflow)
    );
    assert_eq!(
        cuboid(i32::MIN..=i32::MAX, 0..=0, 0..=1).volume(),
        Ok(1_u64 << 33)
    );
}

#[test]
fn test_intersects() {
    let a = cuboid(0..=5, 0..=5, 0..=5);
    assert!(a.intersects(&cuboid(5..=10, 5..=10, 5..=10)));
    assert!(a.intersects(&cuboid(-10..=10, 2..=2, 3..=4)));
    // Touching faces do not share lattice points.
    assert!(!a.intersects(&cuboid(6..=10, 0..=5, 0..=5)));
    assert!(!a.intersects(&cuboid(0..=5, -3..=-1, 0..=5)));
    assert!(!a.intersects(&cuboid(0..=5, 0..=5, 100..=200)));
}

#[test]
fn test_intersection() {
    let a = cuboid(0..=5, 0..=5, 0..=5);
    assert_eq!(
        a.intersection(&cuboid(3..=10, -4..=1, 5..=5)),
        Some(cuboid(3..=5, 0..=1, 5..=5))
    );
    assert_eq!(a.intersection(&cuboid(6..=10, 0..=5, 0..=5)), None);
}

#[test]
fn test_bisected_by() {
    let c = cuboid(5..=10, 20..=30, 50..=90);
    assert!(!c.bisected_by(&Plane { axis: Axis::X, position: 5 }));
    assert!(c.bisected_by(&Plane { axis: Axis::X, position: 6 }));
    assert!(c.bisected_by(&Plane { axis: Axis::X, position: 10 }));
    assert!(!c.bisected_by(&Plane { axis: Axis::X, position: 11 }));
    assert!(c.bisected_by(&Plane { axis: Axis::Z, position: 51 }));
    assert!(!c.bisected_by(&Plane { axis: Axis::Y, position: -1000000 }));
}

#[test]
fn test_cut_x() {
    let c = cuboid(5..=10, 20..=30, 50..=90);
    assert_eq!(
        c.clone().cut(Plane { axis: Axis::X, position: 1000000 }),
        (c.clone(), None)
    );
    assert_eq!(
        c.clone().cut(Plane { axis: Axis::X, position: 5 }),
        (c.clone(), None)
    );
    assert_eq!(
        c.cut(Plane { axis: Axis::X, position: 9 }),
        (
            cuboid(5..=8, 20..=30, 50..=90),
            Some(cuboid(9..=10, 20..=30, 50..=90))
        )
    );
}

#[test]
fn test_cut_y_and_z() {
    let c = cuboid(20..=30, 5..=10, 50..=90);
    assert_eq!(
        c.clone().cut(Plane { axis: Axis::Y, position: 10 }),
        (
            cuboid(20..=30, 5..=9, 50..=90),
            Some(cuboid(20..=30, 10..=10, 50..=90))
        )
    );
    assert_eq!(
        c.cut(Plane { axis: Axis::Z, position: 60 }),
        (
            cuboid(20..=30, 5..=10, 50..=59),
            Some(cuboid(20..=30, 5..=10, 60..=90))
        )
    );
}

#[cfg(test)]
fn assert_is_decomposition(whole: &Cuboid, slicer: &Cuboid, pieces: &HashSet<Cuboid>) {
    let total: u64 = pieces.iter().map(|p| p.volume().unwrap()).sum();
    assert_eq!(total, whole.volume().unwrap());
    for p in pieces {
        assert!(whole.contains(p), "{} escapes {}", p, whole);
        assert!(
            slicer.contains(p) || !slicer.intersects(p),
            "{} straddles {}",
            p,
            slicer
        );
        for q in pieces {
            if p != q {
                assert!(!p.intersects(q), "{} overlaps {}", p, q);
            }
        }
    }
}

#[test]
fn test_slice_disjoint_slicer_leaves_cuboid_whole() {
    let c = cuboid(0..=5, 0..=5, 0..=5);
    let slicer = cuboid(6..=10, 0..=5, 0..=5);
    let pieces = c.slice(&slicer);
    assert_eq!(pieces.len(), 1);
    assert!(pieces.contains(&c));
}

#[test]
fn test_slice_enclosing_slicer_leaves_cuboid_whole() {
    let c = cuboid(0..=5, 0..=5, 0..=5);
    let pieces = c.slice(&cuboid(-1..=5, 0..=9, -5..=5));
    assert_eq!(pieces.len(), 1);
    assert!(pieces.contains(&c));
}

#[test]
fn test_slice_around_centre_point() {
    let c = cuboid(10..=12, 10..=12, 10..=12);
    let slicer = cuboid(11..=11, 11..=11, 11..=11);
    let pieces = c.slice(&slicer);
    assert_eq!(pieces.len(), 27);
    assert!(pieces.contains(&slicer));
    assert_is_decomposition(&c, &slicer, &pieces);
}

#[test]
fn test_slice_overlapping_corner() {
    let c = cuboid(10..=12, 10..=12, 10..=12);
    let slicer = cuboid(11..=13, 11..=13, 11..=13);
    let pieces = c.slice(&slicer);
    assert_eq!(pieces.len(), 8);
    assert!(pieces.contains(&cuboid(11..=12, 11..=12, 11..=12)));
    assert_is_decomposition(&c, &slicer, &pieces);
}

#[test]
fn test_slice_at_i32_limits() {
    let c = cuboid(i32::MAX - 3..=i32::MAX, 0..=1, 0..=1);
    let slicer = cuboid(i32::MAX - 1..=i32::MAX, 0..=0, 0..=1);
    let pieces = c.slice(&slicer);
    assert_eq!(pieces.len(), 4);
    assert_is_decomposition(&c, &slicer, &pieces);
}

#[test]
fn test_display() {
    assert_eq!(
        cuboid(-20..=26, -36..=17, -47..=7).to_string(),
        "x=-20..26,y=-36..17,z=-47..7"
    );
}
