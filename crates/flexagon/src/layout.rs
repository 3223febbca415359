//! The fixed placement table for a hexa-tri-hexaflexagon template.
//!
//! The strip is two rows of alternating up/down triangles. Which wedge
//! goes in which slot, and how far it is turned, decides whether the
//! folded paper shows three coherent faces. The table is data, not
//! something to recompute: change an entry and the flexagon folds into
//! scrambled faces without any error.

/// Identifies one wedge: face 1..=3, wedge 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WedgeId {
    pub face: u8,
    pub wedge: u8,
}

impl WedgeId {
    #[inline]
    pub const fn new(face: u8, wedge: u8) -> Self {
        Self { face, wedge }
    }
}

impl std::fmt::Display for WedgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "face {} wedge {}", self.face, self.wedge)
    }
}

/// One slot of the strip: which wedge, turned how far (degrees, anticlockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: WedgeId,
    pub rotation: f64,
}

impl Placement {
    const fn new(face: u8, wedge: u8, rotation: f64) -> Self {
        Self {
            id: WedgeId::new(face, wedge),
            rotation,
        }
    }
}

/// Number of source faces.
pub const FACES: u8 = 3;

/// Top row, left to right.
pub const ROW_1: [Placement; 10] = [
    Placement::new(1, 2, 240.0),
    Placement::new(1, 3, 240.0),
    Placement::new(2, 5, 60.0),
    Placement::new(2, 6, 60.0),
    Placement::new(3, 5, 60.0),
    Placement::new(3, 6, 60.0),
    Placement::new(1, 6, 120.0),
    Placement::new(1, 1, 120.0),
    Placement::new(2, 3, 300.0),
    Placement::new(2, 4, 300.0),
];

/// Bottom row, left to right (starts a quarter face in).
pub const ROW_2: [Placement; 8] = [
    Placement::new(3, 3, 300.0),
    Placement::new(3, 4, 300.0),
    Placement::new(1, 4, 0.0),
    Placement::new(1, 5, 0.0),
    Placement::new(2, 1, 180.0),
    Placement::new(2, 2, 180.0),
    Placement::new(3, 1, 180.0),
    Placement::new(3, 2, 180.0),
];

/// Both rows in paste order.
pub fn rows() -> [&'static [Placement]; 2] {
    [&ROW_1, &ROW_2]
}
