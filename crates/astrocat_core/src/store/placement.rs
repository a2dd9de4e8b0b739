//! Starmap placement for astros without coordinates.

use crate::config::CanvasBounds;
use crate::model::astro::Coordinates;
use uuid::Uuid;

/// Chooses coordinates for an astro that has none.
pub trait Placement {
    fn place(&mut self, bounds: CanvasBounds) -> Coordinates;
}

/// Uniform placement inside the canvas, backed by v4 UUID entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlacement;

impl Placement for RandomPlacement {
    fn place(&mut self, bounds: CanvasBounds) -> Coordinates {
        Coordinates::new(pixel_below(bounds.width), pixel_below(bounds.height))
    }
}

/// Always returns the same point. Useful for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedPlacement(pub Coordinates);

impl Placement for FixedPlacement {
    fn place(&mut self, _bounds: CanvasBounds) -> Coordinates {
        self.0
    }
}

/// Random value in `[0, bound)`; `0` for an empty range.
pub fn random_below(bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    (Uuid::new_v4().as_u128() % bound as u128) as usize
}

fn pixel_below(bound: u32) -> i32 {
    let value = random_below(bound as usize);
    i32::try_from(value).unwrap_or(i32::MAX)
}
