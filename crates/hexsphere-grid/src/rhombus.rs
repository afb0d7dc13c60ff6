//! The ten rhombi formed by pairing adjacent icosahedron faces, and the
//! lattice arithmetic that moves between them.
//!
//! Every rhombus has corners `top`, `left`, `bottom` and `right`. A lattice
//! point `(a, b)` sits at `top + a·(left − top)/N + b·(right − top)/N`; the
//! `left`–`right` diagonal (`a + b = N`) splits the rhombus into its two
//! faces. When the rhombi are unfolded into the usual icosahedron net, all ten
//! share the same orientation, so crossing a seam that is contiguous in the
//! net is a translation and crossing a seam that meets at a pole is a 60°
//! rotation about that pole.
//!
//! A rhombus owns the points with `a ∈ 1..=N` and `b ∈ 0..N`: its
//! `top`–`left` and `left`–`bottom` edges including the `left` corner, but
//! neither pole nor the two edges leading to `right`.

use crate::icosahedron;

/// Which pole a rhombus touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Hemisphere {
    North,
    South,
}

/// One of the ten rhombi of the unfolded icosahedron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Rhombus {
    pub hemisphere: Hemisphere,
    /// Column in `0..5`, increasing eastward.
    pub column: u8,
}

/// Number of rhombi covering the sphere.
pub(crate) const RHOMBUS_COUNT: usize = 10;

/// A point of the rhombus lattice resolved to the cell that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Location {
    NorthPole,
    SouthPole,
    /// An owned point: `a ∈ 1..=N`, `b ∈ 0..N`.
    Lattice { rhombus: Rhombus, a: u32, b: u32 },
}

impl Rhombus {
    pub const ALL: [Rhombus; RHOMBUS_COUNT] = [
        Rhombus::north(0),
        Rhombus::north(1),
        Rhombus::north(2),
        Rhombus::north(3),
        Rhombus::north(4),
        Rhombus::south(0),
        Rhombus::south(1),
        Rhombus::south(2),
        Rhombus::south(3),
        Rhombus::south(4),
    ];

    pub const fn north(column: u8) -> Self {
        Self {
            hemisphere: Hemisphere::North,
            column: column % 5,
        }
    }

    pub const fn south(column: u8) -> Self {
        Self {
            hemisphere: Hemisphere::South,
            column: column % 5,
        }
    }

    /// Position in [`Rhombus::ALL`].
    pub fn id(self) -> usize {
        match self.hemisphere {
            Hemisphere::North => self.column as usize,
            Hemisphere::South => 5 + self.column as usize,
        }
    }

    pub fn from_id(id: usize) -> Self {
        debug_assert!(id < RHOMBUS_COUNT, "rhombus {id} out of range");
        Self::ALL[id % RHOMBUS_COUNT]
    }

    fn east(self) -> u8 {
        (self.column + 1) % 5
    }

    fn west(self) -> u8 {
        (self.column + 4) % 5
    }

    /// Icosahedron vertex ids of `[top, left, bottom, right]`.
    pub fn corners(self) -> [usize; 4] {
        let c = self.column as usize;
        match self.hemisphere {
            Hemisphere::North => [
                icosahedron::NORTH_POLE,
                icosahedron::upper(c),
                icosahedron::lower(c),
                icosahedron::upper(c + 1),
            ],
            Hemisphere::South => [
                icosahedron::upper(c + 1),
                icosahedron::lower(c),
                icosahedron::SOUTH_POLE,
                icosahedron::lower(c + 1),
            ],
        }
    }

    /// Face ids `[upper, lower]` in [`icosahedron::FACES`].
    pub fn faces(self) -> [usize; 2] {
        [2 * self.id(), 2 * self.id() + 1]
    }
}

/// Resolve a lattice point of `rhombus` to the cell that owns it.
///
/// The point may lie anywhere on the closed rhombus or up to one lattice step
/// outside it. Points on a seam are handed to the rhombus owning that seam;
/// points past a seam are re-expressed in the neighbouring rhombus first.
pub(crate) fn resolve(rhombus: Rhombus, a: i64, b: i64, n: i64) -> Location {
    let (mut rhombus, mut a, mut b) = (rhombus, a, b);
    loop {
        let Rhombus { hemisphere, column } = rhombus;
        match hemisphere {
            Hemisphere::North => {
                if b < 0 {
                    // Rotate about the north pole into the western neighbour.
                    (rhombus, a, b) = (Rhombus::north(rhombus.west()), -b, a + b);
                } else if a < 0 {
                    (rhombus, a, b) = (Rhombus::north(rhombus.east()), a + b, -a);
                } else if b > n {
                    (rhombus, a, b) = (Rhombus::south(column), a, b - n);
                } else if a > n {
                    (rhombus, a, b) = (Rhombus::south(rhombus.west()), a - n, b);
                } else if a == 0 && b == 0 {
                    return Location::NorthPole;
                } else if a == 0 {
                    (rhombus, a, b) = (Rhombus::north(rhombus.east()), b, 0);
                } else if b == n {
                    (rhombus, a, b) = (Rhombus::south(column), a, 0);
                } else {
                    return owned(rhombus, a, b);
                }
            }
            Hemisphere::South => {
                if b < 0 {
                    (rhombus, a, b) = (Rhombus::north(column), a, b + n);
                } else if a < 0 {
                    (rhombus, a, b) = (Rhombus::north(rhombus.east()), a + n, b);
                } else if b > n {
                    // Rotate about the south pole into the eastern neighbour.
                    (rhombus, a, b) = (Rhombus::south(rhombus.east()), 2 * n - b, a + b - n);
                } else if a > n {
                    (rhombus, a, b) = (Rhombus::south(rhombus.west()), a + b - n, 2 * n - a);
                } else if a == n && b == n {
                    return Location::SouthPole;
                } else if a == 0 {
                    (rhombus, a, b) = (Rhombus::north(rhombus.east()), n, b);
                } else if b == n {
                    (rhombus, a, b) = (Rhombus::south(rhombus.east()), n, a);
                } else {
                    return owned(rhombus, a, b);
                }
            }
        }
    }
}

fn owned(rhombus: Rhombus, a: i64, b: i64) -> Location {
    Location::Lattice {
        rhombus,
        a: a as u32,
        b: b as u32,
    }
}
