use std::io;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::config::{GridSize, THEME, Theme};
use crate::game::{Phase, Snapshot};
use crate::input::Direction;
use crate::session::Presenter;
use crate::snake::Position;
use crate::terminal_runtime::TerminalSession;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "  ";
const GLYPH_FOOD: &str = "◖◗";

/// Per-segment brightness loss along the body.
const BODY_FADE_PER_SEGMENT: f32 = 0.03;
const BODY_MIN_BRIGHTNESS: f32 = 0.35;

/// Presenter that draws every snapshot to the terminal.
pub struct TerminalPresenter {
    session: TerminalSession,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(session: TerminalSession) -> Self {
        Self { session }
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.session
            .terminal_mut()
            .draw(|frame| render(frame, snapshot, &THEME))?;
        Ok(())
    }
}

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let Some((hud_area, board_area)) = board_layout(area, snapshot.grid) else {
        frame.render_widget(
            Paragraph::new("Terminal too small").alignment(Alignment::Center),
            area,
        );
        return;
    };

    render_hud(frame, hud_area, snapshot, theme);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.phase {
        Phase::Idle => render_start_menu(frame, board_area, snapshot.high_score, theme),
        Phase::Paused => render_pause_menu(frame, board_area),
        Phase::Over => render_game_over_menu(frame, board_area, snapshot),
        Phase::Running => {}
    }
}

/// Splits `area` into a HUD row and a centered bordered board, or `None`
/// when the terminal cannot fit the grid.
fn board_layout(area: Rect, grid: GridSize) -> Option<(Rect, Rect)> {
    let board_width = grid.tile_count.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let board_height = grid.tile_count.checked_add(2)?;
    if area.width < board_width || area.height < board_height + 1 {
        return None;
    }

    let [_, hud, board_row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(board_height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, board, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(board_width),
        Constraint::Fill(1),
    ])
    .areas(board_row);

    Some((hud, board))
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, snapshot.food) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).bg(theme.play_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Drawn tail first so the head wins if cells ever coincide.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.direction),
                Style::new()
                    .fg(theme.snake_eyes)
                    .bg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        let color = faded(theme.snake_body, theme.snake_tail, body_brightness(index));
        buffer.set_string(x, y, GLYPH_CELL, Style::new().bg(color));
    }
}

/// Eyes sit on the side of the head facing the direction of travel.
fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "˙˙",
        Direction::Down => "..",
        Direction::Left => ": ",
        Direction::Right => " :",
    }
}

fn body_brightness(index: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let fade = index as f32 * BODY_FADE_PER_SEGMENT;
    (1.0 - fade).max(BODY_MIN_BRIGHTNESS)
}

/// Blends `bright` toward `dim`; non-RGB colors are returned unchanged.
fn faded(bright: Color, dim: Color, brightness: f32) -> Color {
    let (Color::Rgb(br, bg, bb), Color::Rgb(dr, dg, db)) = (bright, dim) else {
        return bright;
    };

    let mix = |high: u8, low: u8| -> u8 {
        let value = f32::from(low) + (f32::from(high) - f32::from(low)) * brightness;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = value.round().clamp(0.0, 255.0) as u8;
        channel
    };

    Color::Rgb(mix(br, dr), mix(bg, dg), mix(bb, db))
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::{GridSize, THEME};
    use crate::game::{DeathReason, GameState, Phase, Snapshot};
    use crate::snake::Position;

    use super::{body_brightness, faded, logical_to_terminal, render};

    fn draw(snapshot: &Snapshot, width: u16, height: u16) -> Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend never fails");
        terminal
            .draw(|frame| render(frame, snapshot, &THEME))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn running_snapshot() -> Snapshot {
        let mut state = GameState::new_with_seed(GridSize::square(20), 30, 1);
        state.reset();
        state.snapshot()
    }

    #[test]
    fn cells_map_to_double_width_columns() {
        let inner = Rect::new(1, 2, 20, 10);
        let grid = GridSize::square(10);

        assert_eq!(
            logical_to_terminal(inner, grid, Position { x: 3, y: 4 }),
            Some((7, 6))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position { x: 10, y: 0 }), None);
    }

    #[test]
    fn running_frame_shows_hud_and_food() {
        let snapshot = running_snapshot();
        let text = buffer_text(&draw(&snapshot, 60, 30));

        assert!(text.contains("Score 0"));
        assert!(text.contains("Hi 30"));
        assert!(text.contains("◖◗"));
    }

    #[test]
    fn game_over_frame_shows_cause() {
        let mut snapshot = running_snapshot();
        snapshot.phase = Phase::Over;
        snapshot.death_reason = Some(DeathReason::WallCollision);

        let text = buffer_text(&draw(&snapshot, 60, 30));

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("hit wall"));
    }

    #[test]
    fn small_terminal_gets_a_notice() {
        let text = buffer_text(&draw(&running_snapshot(), 30, 5));

        assert!(text.contains("small"));
    }

    #[test]
    fn body_fades_toward_tail_color() {
        let bright = Color::Rgb(200, 200, 200);
        let dim = Color::Rgb(0, 0, 0);

        assert_eq!(faded(bright, dim, 1.0), bright);
        assert_eq!(faded(bright, dim, 0.5), Color::Rgb(100, 100, 100));
        assert!(body_brightness(1) > body_brightness(10));
        assert!((body_brightness(1000) - 0.35).abs() < f32::EPSILON);
    }
}
