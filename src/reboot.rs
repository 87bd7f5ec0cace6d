use std::fmt::{self, Display, Formatter};

use tracing::{event, span, Level};

use crate::cuboid::{Cuboid, Point};
use crate::set::DisjointCuboidSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebootStep {
    On(Cuboid),
    Off(Cuboid),
}

impl RebootStep {
    pub fn turns_on(&self) -> bool {
        match self {
            RebootStep::On(_) => true,
            RebootStep::Off(_) => false,
        }
    }

    pub fn cuboid(&self) -> &Cuboid {
        match self {
            RebootStep::On(c) | RebootStep::Off(c) => c,
        }
    }

    /// The part of this step which falls inside `bounds`, if any.
    pub fn clipped_to(&self, bounds: &Cuboid) -> Option<RebootStep> {
        match self {
            RebootStep::On(c) => c.intersection(bounds).map(RebootStep::On),
            RebootStep::Off(c) => c.intersection(bounds).map(RebootStep::Off),
        }
    }
}

impl Display for RebootStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = if self.turns_on() { "on" } else { "off" };
        write!(f, "{} {}", state, self.cuboid())
    }
}

/// Receives the state of the reactor after each step is applied.
pub trait StepObserver {
    fn observe(&mut self, index: usize, step: &RebootStep, set: &DisjointCuboidSet);
}

impl<F> StepObserver for F
where
    F: FnMut(usize, &RebootStep, &DisjointCuboidSet),
{
    fn observe(&mut self, index: usize, step: &RebootStep, set: &DisjointCuboidSet) {
        self(index, step, set)
    }
}

/// Apply the steps in order, starting with every point off.
pub fn run_steps(steps: &[RebootStep]) -> DisjointCuboidSet {
    run_steps_observed(steps, &mut |_: usize, _: &RebootStep, _: &DisjointCuboidSet| ())
}

pub fn run_steps_observed<O: StepObserver>(
    steps: &[RebootStep],
    observer: &mut O,
) -> DisjointCuboidSet {
    let span = span!(Level::DEBUG, "reboot", steps = steps.len());
    let _enter = span.enter();
    let mut set = DisjointCuboidSet::new();
    for (index, step) in steps.iter().enumerate() {
        set = set.apply(step);
        event!(
            Level::DEBUG,
            "after step {}: {} disjoint cuboids",
            index,
            set.len()
        );
        observer.observe(index, step, &set);
    }
    set
}

/// Count the points within `bounds` (inclusive on every axis) which
/// are left on, by visiting each point and replaying every step
/// against it.  This is far too slow for the full puzzle input but is
/// simple enough to trust.
pub fn naive_volume(steps: &[RebootStep], bounds: &Cuboid) -> u64 {
    let mut count: u64 = 0;
    for x in bounds.x().clone() {
        event!(Level::TRACE, "naive_volume: x={}, {} on so far", x, count);
        for y in bounds.y().clone() {
            for z in bounds.z().clone() {
                let p = Point::new(x, y, z);
                let on = steps.iter().fold(false, |state, step| {
                    if step.cuboid().contains_point(&p) {
                        step.turns_on()
                    } else {
                        state
                    }
                });
                if on {
                    count += 1;
                }
            }
        }
    }
    count
}
