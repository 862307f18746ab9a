use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{
    BASE_TICK_INTERVAL_MS, GridSize, INITIAL_SNAKE_LENGTH, MIN_TICK_INTERVAL_MS,
    TICK_INTERVAL_STEP_MS,
};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Run phase of one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Side effects a step asks its caller to carry out.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten { score: u32 },
    /// The score passed the stored high score and should be persisted.
    HighScore(u32),
    /// The tick interval shrank; the clock must be rescheduled.
    SpeedUp { interval_ms: u64 },
    GameOver(DeathReason),
}

/// Immutable view of the state handed to presenters.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub tick_interval_ms: u64,
    pub death_reason: Option<DeathReason>,
    /// True once this run's score passed the record it started against.
    pub new_record: bool,
}

/// Complete mutable game state for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u64,
    pub tick_count: u64,
    pub phase: Phase,
    pub death_reason: Option<DeathReason>,
    grid: GridSize,
    record_at_start: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle state with entropy-seeded food placement.
    #[must_use]
    pub fn new(grid: GridSize, high_score: u32) -> Self {
        Self::with_rng(grid, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic idle state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, high_score: u32, seed: u64) -> Self {
        Self::with_rng(grid, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSize, high_score: u32, mut rng: StdRng) -> Self {
        let center = i32::from(grid.tile_count / 2);
        let snake = Snake::straight(
            Position {
                x: center,
                y: center,
            },
            INITIAL_SNAKE_LENGTH,
            Direction::Right,
        );
        let food = Food::spawn(&mut rng, grid, &snake);

        Self {
            snake,
            food,
            score: 0,
            high_score,
            tick_interval_ms: BASE_TICK_INTERVAL_MS,
            tick_count: 0,
            phase: Phase::Idle,
            death_reason: None,
            grid,
            record_at_start: high_score,
            rng,
        }
    }

    /// Replaces this state with a fresh running game. Only the high score
    /// and the random stream carry over.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(self.grid, self.high_score, rng);
        self.phase = Phase::Running;
        info!(
            tile_count = self.grid.tile_count,
            high_score = self.high_score,
            "run started"
        );
    }

    /// Buffers the next heading; silently drops it when it would reverse
    /// the snake. Accepted in every phase, so a turn made while paused is
    /// applied on the first step after resume.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !self.snake.set_pending_direction(direction) {
            debug!(?direction, "reversal ignored");
        }
    }

    /// Moves food to a random cell not covered by the snake.
    pub fn place_food(&mut self) {
        self.food = Food::spawn(&mut self.rng, self.grid, &self.snake);
        debug!(x = self.food.position.x, y = self.food.position.y, "food placed");
    }

    /// Advances the simulation by one grid step.
    ///
    /// Returns the events the caller must act on; empty unless running.
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::Running {
            return Vec::new();
        }

        self.tick_count += 1;
        self.snake.commit_direction();
        let head = self.snake.next_head();

        if !head.is_within_bounds(self.grid) {
            return vec![self.finish(DeathReason::WallCollision)];
        }

        // Checked before the tail moves, so chasing the tail is fatal too.
        if self.snake.occupies(head) {
            return vec![self.finish(DeathReason::SelfCollision)];
        }

        self.snake.push_head(head);

        if head != self.food.position {
            self.snake.drop_tail();
            return Vec::new();
        }

        let mut events = Vec::with_capacity(3);
        self.score += self.food.points();
        events.push(GameEvent::FoodEaten { score: self.score });

        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::HighScore(self.high_score));
        }

        self.place_food();

        if self.tick_interval_ms > MIN_TICK_INTERVAL_MS {
            self.tick_interval_ms = self
                .tick_interval_ms
                .saturating_sub(TICK_INTERVAL_STEP_MS)
                .max(MIN_TICK_INTERVAL_MS);
            debug!(interval_ms = self.tick_interval_ms, "speed increased");
            events.push(GameEvent::SpeedUp {
                interval_ms: self.tick_interval_ms,
            });
        }

        events
    }

    /// Freezes a running game. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    /// Unfreezes a paused game. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Flips between running and paused; no-op in other phases.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::Over => false,
        }
    }

    /// Captures an owned view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self.snake.segments().copied().collect(),
            food: self.food.position,
            direction: self.snake.direction(),
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            tick_interval_ms: self.tick_interval_ms,
            death_reason: self.death_reason,
            new_record: self.score > self.record_at_start,
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    fn finish(&mut self, reason: DeathReason) -> GameEvent {
        self.phase = Phase::Over;
        self.death_reason = Some(reason);
        info!(
            score = self.score,
            length = self.snake.len(),
            ?reason,
            "game over"
        );
        GameEvent::GameOver(reason)
    }
}
