use rand::Rng;

use crate::grid::{Grid, Position};

/// Upper bound on rejection-sampling rounds before giving up on a free cell.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 500;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub position: Position,
    /// False when the attempt cap was hit and `position` may be occupied.
    pub free: bool,
}

/// Picks a uniformly random cell that `occupied` rejects, sampling at most
/// `MAX_PLACEMENT_ATTEMPTS` times.
pub fn place_food<R, F>(rng: &mut R, grid: &Grid, occupied: F) -> Placement
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let mut pos = random_cell(rng, grid);

    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if !occupied(pos) {
            return Placement { position: pos, free: true };
        }
        pos = random_cell(rng, grid);
    }

    Placement {
        position: pos,
        free: !occupied(pos),
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Position {
    Position::new(rng.gen_range(0..grid.size()), rng.gen_range(0..grid.size()))
}
