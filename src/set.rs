use std::collections::HashSet;

use tracing::{event, Level};

use crate::cuboid::Cuboid;
use crate::error::CuboidError;
use crate::reboot::RebootStep;

/// Remove every point of `subtrahend` from a collection of disjoint
/// pieces.  Pieces which miss the subtrahend pass through; each piece
/// which overlaps it is sliced, and the overlapping part (which shows
/// up identically when the subtrahend is sliced against the piece) is
/// dropped.
fn subtract_from(pieces: HashSet<Cuboid>, subtrahend: &Cuboid) -> HashSet<Cuboid> {
    let (touched, mut kept): (HashSet<Cuboid>, HashSet<Cuboid>) = pieces
        .into_iter()
        .partition(|piece| piece.intersects(subtrahend));
    for piece in touched {
        let sliced_piece = piece.slice(subtrahend);
        let sliced_subtrahend = subtrahend.slice(&piece);
        kept.extend(sliced_piece.difference(&sliced_subtrahend).cloned());
    }
    kept
}

/// The lattice points which are currently on, held as a collection of
/// cuboids no two of which share a point.
///
/// `add`, `subtract` and `apply` consume the set and hand back its
/// successor.  Keep a `clone()` if an earlier state is still needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisjointCuboidSet {
    members: HashSet<Cuboid>,
}

impl DisjointCuboidSet {
    pub fn new() -> DisjointCuboidSet {
        DisjointCuboidSet {
            members: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cuboid> {
        self.members.iter()
    }

    pub fn contains(&self, cuboid: &Cuboid) -> bool {
        self.members.contains(cuboid)
    }

    /// Turn on every point of `cuboid`.  Only the parts of `cuboid`
    /// which are not already on get inserted.
    pub fn add(mut self, cuboid: &Cuboid) -> DisjointCuboidSet {
        let mut remaining: HashSet<Cuboid> = HashSet::from([cuboid.clone()]);
        for member in self.members.iter().filter(|m| m.intersects(cuboid)) {
            remaining = subtract_from(remaining, member);
            if remaining.is_empty() {
                break;
            }
        }
        event!(
            Level::TRACE,
            "add {}: inserting {} new pieces into {} members",
            cuboid,
            remaining.len(),
            self.members.len(),
        );
        self.members.extend(remaining);
        self
    }

    /// Turn off every point of `cuboid`.
    pub fn subtract(self, cuboid: &Cuboid) -> DisjointCuboidSet {
        let before = self.members.len();
        let members = subtract_from(self.members, cuboid);
        event!(
            Level::TRACE,
            "subtract {}: {} members became {}",
            cuboid,
            before,
            members.len(),
        );
        DisjointCuboidSet { members }
    }

    pub fn apply(self, step: &RebootStep) -> DisjointCuboidSet {
        match step {
            RebootStep::On(cuboid) => {
                event!(Level::DEBUG, "adding cuboid: {}", cuboid);
                self.add(cuboid)
            }
            RebootStep::Off(cuboid) => {
                event!(Level::DEBUG, "subtracting cuboid: {}", cuboid);
                self.subtract(cuboid)
            }
        }
    }

    /// The number of points which are on.  This is only a sum of
    /// member volumes because members never overlap.
    pub fn total_volume(&self) -> Result<u64, CuboidError> {
        self.members.iter().try_fold(0_u64, |acc, c| {
            acc.checked_add(c.volume()?)
                .ok_or(CuboidError::VolumeOverflow)
        })
    }

    /// The number of points within `bounds` which are on.
    pub fn volume_within(&self, bounds: &Cuboid) -> Result<u64, CuboidError> {
        self.members
            .iter()
            .filter_map(|c| c.intersection(bounds))
            .try_fold(0_u64, |acc, c| {
                acc.checked_add(c.volume()?)
                    .ok_or(CuboidError::VolumeOverflow)
            })
    }

    pub fn is_pairwise_disjoint(&self) -> bool {
        let members: Vec<&Cuboid> = self.members.iter().collect();
        members.iter().enumerate().all(|(i, a)| {
            members[i + 1..].iter().all(|b| !a.intersects(b))
        })
    }
}

impl FromIterator<RebootStep> for DisjointCuboidSet {
    fn from_iter<I: IntoIterator<Item = RebootStep>>(steps: I) -> DisjointCuboidSet {
        steps
            .into_iter()
            .fold(DisjointCuboidSet::new(), |set, step| set.apply(&step))
    }
}
