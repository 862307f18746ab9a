use rand::Rng;

use crate::config::{FOOD_REWARD, GridSize};
use crate::snake::{Position, Snake};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Score granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        FOOD_REWARD
    }

    /// Places food on a uniformly random cell not covered by the snake.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Self {
        Self::new(spawn_position(rng, grid, snake))
    }
}

/// Samples grid cells uniformly until one is free of the snake.
///
/// A snake covering the whole grid leaves no free cell and this never
/// returns, in every build profile. That state is not reachable in normal
/// play and is left unhandled.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Position {
    let side = i32::from(grid.tile_count);
    loop {
        let candidate = Position {
            x: rng.gen_range(0..side),
            y: rng.gen_range(0..side),
        };
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}
