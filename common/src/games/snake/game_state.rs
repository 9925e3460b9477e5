use std::time::Duration;

use crate::log;
use crate::games::SessionRng;
use super::settings::SnakeSettings;
use super::entity::Snake;
use super::types::{Direction, EndReason, FieldSize, GamePhase, Point, TickOutcome, WallCollisionMode};

const RANDOM_FOOD_ATTEMPTS: usize = 100;

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Option<Point>,
    pub field_size: FieldSize,
    pub score: u32,
    pub phase: GamePhase,
    pub tick: u64,
    settings: SnakeSettings,
    tick_interval: Duration,
}

impl SnakeGameState {
    /// A fresh state in the `Idle` phase. Call `start` to begin playing.
    pub fn new(settings: SnakeSettings, rng: &mut SessionRng) -> Self {
        let field_size = settings.field_size();
        let snake = Self::starting_snake(&settings);
        let food = spawn_food(&field_size, &snake, rng);
        let tick_interval = settings.speed.initial_interval();

        Self {
            snake,
            food,
            field_size,
            score: 0,
            phase: GamePhase::Idle,
            tick: 0,
            settings,
            tick_interval,
        }
    }

    fn starting_snake(settings: &SnakeSettings) -> Snake {
        let head = Point::new(settings.field_width / 2, settings.field_height / 2);
        Snake::new(head, Direction::Right, settings.initial_length)
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.snake = Self::starting_snake(&self.settings);
        self.food = spawn_food(&self.field_size, &self.snake, rng);
        self.score = 0;
        self.tick = 0;
        self.tick_interval = self.settings.speed.initial_interval();
        self.phase = GamePhase::Idle;
    }

    /// Resets the board and enters `Running`. Used both for the first start and for restarts.
    pub fn start(&mut self, rng: &mut SessionRng) {
        self.reset(rng);
        self.phase = GamePhase::Running;
        log!(
            "Game started on {}x{} field, food at {:?}",
            self.field_size.width,
            self.field_size.height,
            self.food
        );
    }

    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Idle;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_running() {
            self.snake.request_direction(direction);
        }
    }

    pub fn update(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        self.tick += 1;
        self.snake.apply_pending_direction();

        let next_head = match self.calculate_next_head_position() {
            Ok(point) => point,
            Err(reason) => return self.end(reason),
        };

        if self.snake.occupies(&next_head) {
            return self.end(EndReason::SelfCollision);
        }

        self.snake.push_head(next_head);

        if self.food != Some(next_head) {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.score = self.score.saturating_add(self.settings.food_reward);
        self.tick_interval = self.settings.speed.after_food(self.tick_interval);
        log!(
            "Ate food at ({}, {}). Score: {}, tick interval: {}ms",
            next_head.x,
            next_head.y,
            self.score,
            self.tick_interval.as_millis()
        );

        self.food = spawn_food(&self.field_size, &self.snake, rng);
        if self.food.is_none() {
            return self.end(EndReason::BoardFilled);
        }

        TickOutcome::AteFood
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.phase = GamePhase::Ended(reason);
        log!("Game over after {} ticks: snake {}. Final score: {}", self.tick, reason.describe(), self.score);
        TickOutcome::Ended(reason)
    }

    fn calculate_next_head_position(&self) -> Result<Point, EndReason> {
        let head = self.snake.head();
        let (dx, dy) = self.snake.direction.delta();
        let x = head.x as i64 + dx;
        let y = head.y as i64 + dy;

        match self.settings.wall_collision_mode {
            WallCollisionMode::Death => {
                if !self.field_size.contains(x, y) {
                    return Err(EndReason::WallCollision);
                }
                Ok(Point::new(x as usize, y as usize))
            }
            WallCollisionMode::WrapAround => {
                let width = self.field_size.width as i64;
                let height = self.field_size.height as i64;
                Ok(Point::new(
                    x.rem_euclid(width) as usize,
                    y.rem_euclid(height) as usize,
                ))
            }
        }
    }
}

/// Picks a cell not covered by the snake, uniformly at random over the free cells.
pub(crate) fn spawn_food(field_size: &FieldSize, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
    if snake.len() >= field_size.cell_count() {
        return None;
    }

    let drawn = first_free_draw(
        || Point::new(
            rng.random_range(0..field_size.width),
            rng.random_range(0..field_size.height),
        ),
        snake,
        RANDOM_FOOD_ATTEMPTS,
    );
    if drawn.is_some() {
        return drawn;
    }

    // Nearly full board: rejection sampling keeps missing, pick among free cells directly.
    let free: Vec<Point> = (0..field_size.height)
        .flat_map(|y| (0..field_size.width).map(move |x| Point::new(x, y)))
        .filter(|p| !snake.occupies(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

fn first_free_draw(mut draw: impl FnMut() -> Point, snake: &Snake, attempts: usize) -> Option<Point> {
    (0..attempts).map(|_| draw()).find(|p| !snake.occupies(p))
}
