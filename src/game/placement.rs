//! Random free-cell selection
//!
//! Placement first tries a bounded number of uniform draws over the whole
//! grid. When the board is crowded enough that every draw lands on an
//! occupied cell, it enumerates the free cells and picks one of them
//! uniformly, so a placement either succeeds or reports that no cell is left.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// Pick a uniformly random cell of a `tile_count` square grid for which `is_free` holds
pub fn pick_free_cell<R, F>(
    rng: &mut R,
    tile_count: usize,
    attempts: usize,
    is_free: F,
) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    // Grids whose side does not fit an i32 have no addressable cells
    let side = match i32::try_from(tile_count) {
        Ok(side) if side > 0 => side,
        _ => return None,
    };

    for _ in 0..attempts {
        let x = rng.gen_range(0..side);
        let y = rng.gen_range(0..side);
        let pos = Position::new(x, y);

        if is_free(pos) {
            return Some(pos);
        }
    }

    let choices: Vec<Position> = (0..side)
        .flat_map(|y| (0..side).map(move |x| Position::new(x, y)))
        .filter(|&pos| is_free(pos))
        .collect();

    choices.choose(rng).copied()
}
