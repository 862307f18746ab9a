use grid_snake::config::{GridSize, MIN_TICK_INTERVAL_MS};
use grid_snake::food::Food;
use grid_snake::game::{DeathReason, GameEvent, GameState, Phase};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};

fn running(tile_count: u16, seed: u64) -> GameState {
    let mut state = GameState::new_with_seed(GridSize::square(tile_count), 0, seed);
    state.reset();
    state
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = running(6, 42);
    state.snake = Snake::straight(Position { x: 2, y: 1 }, 3, Direction::Right);
    state.food = Food::new(Position { x: 3, y: 1 });

    state.step();
    assert_eq!(state.phase, Phase::Running);
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.snake.head(), Position { x: 3, y: 1 });
    assert!(!state.snake.occupies(state.food.position));

    state.food = Food::new(Position { x: 5, y: 5 });
    state.set_pending_direction(Direction::Up);
    state.step();
    assert_eq!(state.phase, Phase::Running);
    assert_eq!(state.snake.head(), Position { x: 3, y: 0 });

    let events = state.step();
    assert_eq!(state.phase, Phase::Over);
    assert_eq!(events, vec![GameEvent::GameOver(DeathReason::WallCollision)]);
}

#[test]
fn head_on_last_column_moving_right_ends_the_run() {
    let mut state = running(20, 1);
    state.snake = Snake::straight(Position { x: 19, y: 7 }, 3, Direction::Right);
    state.food = Food::new(Position { x: 0, y: 0 });

    state.step();

    assert_eq!(state.phase, Phase::Over);
    assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
}

#[test]
fn length_never_shrinks_and_grows_by_at_most_one() {
    let mut state = running(20, 7);
    let turns = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    for tick in 0..400 {
        if state.phase != Phase::Running {
            state.reset();
        }
        if tick % 5 == 0 {
            state.set_pending_direction(turns[(tick / 5) % turns.len()]);
        }

        let before = state.snake.len();
        state.step();
        let after = state.snake.len();

        assert!(after == before || after == before + 1);
        assert!(!state.snake.occupies(state.food.position));
    }
}

#[test]
fn eating_repeatedly_walks_interval_down_to_floor() {
    let mut state = running(60, 3);
    state.snake = Snake::straight(Position { x: 2, y: 30 }, 3, Direction::Right);

    let mut intervals = Vec::new();
    for _ in 0..30 {
        let next = state.snake.next_head();
        state.food = Food::new(next);
        state.step();
        intervals.push(state.tick_interval_ms);
    }

    assert_eq!(intervals[0], 98);
    assert_eq!(intervals[24], MIN_TICK_INTERVAL_MS);
    assert!(intervals[25..].iter().all(|&ms| ms == MIN_TICK_INTERVAL_MS));
    assert_eq!(state.score, 300);
    assert_eq!(state.snake.len(), 33);
}

#[test]
fn over_and_idle_ignore_step() {
    let mut idle = GameState::new_with_seed(GridSize::square(10), 0, 9);
    assert!(idle.step().is_empty());
    assert_eq!(idle.tick_count, 0);

    let mut over = running(10, 9);
    over.snake = Snake::straight(Position { x: 9, y: 2 }, 3, Direction::Right);
    over.step();
    let head = over.snake.head();

    assert!(over.step().is_empty());
    assert_eq!(over.snake.head(), head);
    assert_eq!(over.phase, Phase::Over);
}
