use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{BASE_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, TICK_INTERVAL_STEP_MS, Theme};
use crate::game::Snapshot;

/// Renders the single status row above the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let value = Style::default()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme.hud_muted);

    let line = Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled("  Hi ", label),
        Span::styled(snapshot.high_score.to_string(), value),
        Span::styled("  Speed ", label),
        Span::styled(
            speed_level(snapshot.tick_interval_ms).to_string(),
            value,
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Maps the tick interval to a 1-based level: one level per food eaten
/// until the interval floor.
#[must_use]
pub fn speed_level(tick_interval_ms: u64) -> u64 {
    let clamped = tick_interval_ms.clamp(MIN_TICK_INTERVAL_MS, BASE_TICK_INTERVAL_MS);
    1 + (BASE_TICK_INTERVAL_MS - clamped) / TICK_INTERVAL_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::speed_level;

    #[test]
    fn speed_level_counts_interval_steps() {
        assert_eq!(speed_level(100), 1);
        assert_eq!(speed_level(98), 2);
        assert_eq!(speed_level(50), 26);
        assert_eq!(speed_level(10), 26);
    }
}
