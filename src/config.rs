use ratatui::style::Color;

/// Square play-field dimensions, measured in tiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub tile_count: u16,
}

impl GridSize {
    /// Creates a square grid with `tile_count` tiles per side.
    #[must_use]
    pub fn square(tile_count: u16) -> Self {
        debug_assert!(tile_count >= MIN_TILE_COUNT);
        Self { tile_count }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.tile_count) * usize::from(self.tile_count)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_TILE_COUNT)
    }
}

/// Colors used by the terminal presenter.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    /// Body color at full brightness; segments fade toward `snake_tail`.
    pub snake_body: Color,
    pub snake_tail: Color,
    pub snake_eyes: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

/// Green snake on a dark navy board.
pub const THEME: Theme = Theme {
    snake_head: Color::Rgb(74, 222, 128),
    snake_body: Color::Rgb(34, 197, 94),
    snake_tail: Color::Rgb(20, 83, 45),
    snake_eyes: Color::White,
    food: Color::Rgb(255, 107, 107),
    play_bg: Color::Rgb(26, 26, 46),
    border_fg: Color::Rgb(37, 37, 64),
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Rgb(74, 222, 128),
};

/// Default number of tiles per grid side.
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Smallest grid that fits the starting snake with room to turn.
pub const MIN_TILE_COUNT: u16 = 5;

/// Largest grid accepted from the command line.
pub const MAX_TILE_COUNT: u16 = 60;

/// Segments in a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Tick interval at the start of every run, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 100;

/// Speed floor: the interval never drops below this.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval reduction applied after each food eaten.
pub const TICK_INTERVAL_STEP_MS: u64 = 2;

/// Score granted per food.
pub const FOOD_REWARD: u32 = 10;

/// Upper bound on how long the event loop waits for input between frames.
pub const FRAME_BUDGET_MS: u64 = 16;

/// Minimum mouse drag, in terminal cells, recognized as a swipe.
pub const MIN_SWIPE_CELLS: i32 = 3;
