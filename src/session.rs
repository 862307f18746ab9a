use std::io;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::clock::SimulationClock;
use crate::config::GridSize;
use crate::game::{GameEvent, GameState, Phase, Snapshot};
use crate::input::Direction;
use crate::score::HighScoreStore;

/// Consumer of state snapshots, typically a renderer.
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// One player's game: state, clock and the two collaborators around them.
pub struct Session<S, P> {
    state: GameState,
    clock: SimulationClock,
    store: S,
    presenter: P,
}

impl<S: HighScoreStore, P: Presenter> Session<S, P> {
    /// Loads the stored high score and presents the idle board.
    ///
    /// A store that cannot be read is treated as empty.
    pub fn new(grid: GridSize, store: S, presenter: P, seed: Option<u64>) -> io::Result<Self> {
        let high_score = store.load().unwrap_or_else(|error| {
            warn!(%error, "could not read high score, starting from 0");
            0
        });

        let state = match seed {
            Some(seed) => GameState::new_with_seed(grid, high_score, seed),
            None => GameState::new(grid, high_score),
        };

        let mut session = Self {
            state,
            clock: SimulationClock::new(),
            store,
            presenter,
        };
        session.present()?;
        Ok(session)
    }

    /// Starts a new run, replacing whatever was in progress.
    pub fn start(&mut self, now: Instant) -> io::Result<()> {
        self.state.reset();
        self.clock.reschedule(self.interval(), now);
        self.present()
    }

    /// Buffers a heading for the next tick. Never blocks.
    pub fn request_direction(&mut self, direction: Direction) {
        self.state.set_pending_direction(direction);
    }

    /// Pauses a running game or resumes a paused one.
    pub fn request_pause_toggle(&mut self, now: Instant) -> io::Result<()> {
        if !self.state.toggle_pause() {
            return Ok(());
        }

        match self.state.phase {
            Phase::Paused => self.clock.suspend(now),
            _ => self.clock.resume(now),
        }
        self.present()
    }

    /// Runs one simulation step if the clock says one is due.
    ///
    /// Returns whether a step ran.
    pub fn tick(&mut self, now: Instant) -> io::Result<bool> {
        if !self.clock.poll(now) {
            return Ok(false);
        }

        for event in self.state.step() {
            self.handle_event(event, now);
        }

        self.present()?;
        Ok(true)
    }

    /// How long the event loop may wait before the next tick is due.
    #[must_use]
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.clock.time_until_next(now)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted scenarios such as replays and tests.
    /// Bypasses the state machine; not part of the supported API.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Re-sends the current snapshot, e.g. after a terminal resize.
    pub fn present(&mut self) -> io::Result<()> {
        let snapshot = self.state.snapshot();
        self.presenter.present(&snapshot)
    }

    fn handle_event(&mut self, event: GameEvent, now: Instant) {
        match event {
            GameEvent::FoodEaten { .. } => {}
            GameEvent::HighScore(score) => {
                // Persisting is best-effort; the run continues either way.
                if let Err(error) = self.store.save(score) {
                    warn!(%error, score, "failed to save high score");
                }
            }
            GameEvent::SpeedUp { .. } => {
                self.clock.reschedule(self.interval(), now);
            }
            GameEvent::GameOver(reason) => {
                self.clock.stop();
                info!(?reason, score = self.state.score, "clock stopped");
            }
        }
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.state.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::{Duration, Instant};

    use crate::config::GridSize;
    use crate::food::Food;
    use crate::game::{Phase, Snapshot};
    use crate::input::Direction;
    use crate::score::{HighScoreStore, ScoreError};
    use crate::snake::Position;

    use super::{Presenter, Session};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Snapshot>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
            self.frames.push(snapshot.clone());
            Ok(())
        }
    }

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u32, ScoreError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn save(&mut self, _score: u32) -> Result<(), ScoreError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    fn session() -> Session<BrokenStore, Recorder> {
        Session::new(GridSize::square(20), BrokenStore, Recorder::default(), Some(5))
            .expect("recorder never fails")
    }

    #[test]
    fn unreadable_store_starts_from_zero_and_presents_idle_board() {
        let session = session();

        assert_eq!(session.state().high_score, 0);
        assert_eq!(session.presenter().frames.len(), 1);
        assert_eq!(session.presenter().frames[0].phase, Phase::Idle);
    }

    #[test]
    fn failed_save_does_not_interrupt_the_run() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0).expect("start");
        session.state.food = Food::new(Position { x: 11, y: 10 });

        assert!(session.tick(t0 + Duration::from_millis(100)).expect("tick"));

        assert_eq!(session.state().phase, Phase::Running);
        assert_eq!(session.state().score, 10);
    }

    #[test]
    fn speed_up_reschedules_clock() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0).expect("start");
        session.state.food = Food::new(Position { x: 11, y: 10 });

        let eaten_at = t0 + Duration::from_millis(100);
        session.tick(eaten_at).expect("tick");

        assert_eq!(session.clock().period(), Duration::from_millis(98));
        assert_eq!(
            session.next_wakeup(eaten_at),
            Some(Duration::from_millis(98))
        );
    }

    #[test]
    fn pause_suspends_clock_and_presents() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0).expect("start");
        let frames_before = session.presenter().frames.len();

        session
            .request_pause_toggle(t0 + Duration::from_millis(30))
            .expect("pause");

        assert!(session.clock().is_suspended());
        assert_eq!(session.presenter().frames.len(), frames_before + 1);
        assert!(!session.tick(t0 + Duration::from_secs(1)).expect("tick"));

        session
            .request_pause_toggle(t0 + Duration::from_secs(2))
            .expect("resume");
        assert_eq!(session.state().phase, Phase::Running);
        assert_eq!(
            session.next_wakeup(t0 + Duration::from_secs(2)),
            Some(Duration::from_millis(70))
        );
    }

    #[test]
    fn turn_requested_while_paused_steers_first_tick_after_resume() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0).expect("start");
        session.state.food = Food::new(Position { x: 0, y: 0 });

        session
            .request_pause_toggle(t0 + Duration::from_millis(40))
            .expect("pause");
        session.request_direction(Direction::Up);
        session
            .request_pause_toggle(t0 + Duration::from_millis(500))
            .expect("resume");

        assert!(session.tick(t0 + Duration::from_millis(560)).expect("tick"));
        assert_eq!(session.state().snake.head(), Position { x: 10, y: 9 });
    }

    #[test]
    fn pause_toggle_before_start_is_ignored() {
        let mut session = session();

        session
            .request_pause_toggle(Instant::now())
            .expect("toggle");

        assert_eq!(session.state().phase, Phase::Idle);
        assert_eq!(session.presenter().frames.len(), 1);
    }

    #[test]
    fn game_over_stops_clock() {
        let mut session = session();
        let t0 = Instant::now();
        session.start(t0).expect("start");
        session.state.food = Food::new(Position { x: 0, y: 0 });
        session.request_direction(Direction::Up);

        let mut now = t0;
        for _ in 0..20 {
            now += Duration::from_millis(100);
            session.tick(now).expect("tick");
        }

        assert_eq!(session.state().phase, Phase::Over);
        assert!(!session.clock().is_running());
        assert_eq!(session.next_wakeup(now), None);
    }
}
