use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Local};
use ggez::{GameError, GameResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::Config;
use crate::food::{place_food, MAX_PLACEMENT_ATTEMPTS};
use crate::grid::{Direction, Grid, Position};
use crate::snake::Snake;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Steer(Direction),
    TogglePause,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    SelfCollision,
    Wall,
}

/// Set while a finished game waits for its reset.
#[derive(Clone, Debug, Serialize)]
pub struct GameOver {
    pub final_score: u32,
    pub length: usize,
    pub cause: Cause,
    pub at: DateTime<Local>,
    #[serde(skip)]
    pub reset_at: Duration,
}

#[derive(Clone, Debug)]
pub enum TickOutcome {
    Idle,
    Moved,
    Fed { score: u32 },
    GameOver(GameOver),
}

/// Everything the renderer needs for one frame.
pub struct Snapshot<'a> {
    pub grid_size: i16,
    pub body: &'a VecDeque<Position>,
    pub food: Position,
    pub score: u32,
    pub best_score: u32,
    pub paused: bool,
    pub game_over: Option<&'a GameOver>,
}

pub struct Game {
    config: Config,
    grid: Grid,
    snake: Snake,
    food: Position,
    score: u32,
    best_score: u32,
    paused: bool,
    game_over: Option<GameOver>,
    last_tick: Duration,
    resume_at: Duration,
    rng: StdRng,
}

impl Game {
    pub fn new(config: Config) -> GameResult<Self> {
        config.validate().map_err(GameError::ConfigError)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.grid();
        let snake = Snake::new(grid.center(), config.initial_length);

        let mut game = Game {
            config,
            grid,
            snake,
            food: Position::new(0, 0),
            score: 0,
            best_score: 0,
            paused: false,
            game_over: None,
            last_tick: Duration::ZERO,
            resume_at: Duration::ZERO,
            rng,
        };
        game.respawn_food();
        Ok(game)
    }

    /// Frame driver: runs a pending reset, or one tick once the interval
    /// has elapsed. `now` is monotonic time since start.
    ///
    /// Ticks stay on a fixed schedule regardless of frame timing. After a
    /// stall longer than one interval the schedule restarts from `now`
    /// instead of replaying the missed ticks.
    pub fn update(&mut self, now: Duration) -> Option<TickOutcome> {
        if let Some(over) = &self.game_over {
            if now >= over.reset_at {
                self.reset(now);
            }
            return None;
        }

        let interval = self.config.tick_interval();
        if now < self.resume_at || now < self.last_tick + interval {
            return None;
        }

        self.last_tick += interval;
        if now - self.last_tick >= interval {
            self.last_tick = now;
        }
        Some(self.tick(now))
    }

    /// Advances the snake one cell.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if self.paused || self.game_over.is_some() {
            return TickOutcome::Idle;
        }

        let direction = match self.snake.take_pending() {
            Some(dir) => dir,
            None => return TickOutcome::Idle,
        };

        let next = match self.grid.step(self.snake.head(), direction) {
            Some(pos) => pos,
            None => return self.finish(Cause::Wall, now),
        };

        let growing = next == self.food;
        if self.snake.collides(next, growing) {
            return self.finish(Cause::SelfCollision, now);
        }

        self.snake.advance(next, growing);

        if !growing {
            return TickOutcome::Moved;
        }

        self.score = (self.snake.max_length() - self.config.initial_length) as u32;
        self.respawn_food();
        debug!(
            "fed at ({}, {}), score {}, next food ({}, {})",
            next.x, next.y, self.score, self.food.x, self.food.y
        );
        TickOutcome::Fed { score: self.score }
    }

    /// Closes the gate and schedules the reset. No-op while already closed.
    pub fn trigger_game_over(&mut self, cause: Cause, now: Duration) -> Option<GameOver> {
        if self.game_over.is_some() {
            return None;
        }

        let record = GameOver {
            final_score: self.score,
            length: self.snake.len(),
            cause,
            at: Local::now(),
            reset_at: now + self.config.reset_delay(),
        };
        self.best_score = self.best_score.max(record.final_score);

        match serde_json::to_string(&record) {
            Ok(json) => info!("game over {}", json),
            Err(_) => info!("game over, score {}", record.final_score),
        }

        self.game_over = Some(record.clone());
        Some(record)
    }

    pub fn reset(&mut self, now: Duration) {
        self.snake = Snake::new(self.grid.center(), self.config.initial_length);
        self.score = 0;
        self.respawn_food();
        self.last_tick = now;
        self.resume_at = now + self.config.reset_debounce();
        self.game_over = None;
        info!("reset, best score {}", self.best_score);
    }

    /// Applies one input. Returns whether it changed anything.
    pub fn handle(&mut self, command: Command) -> bool {
        if self.game_over.is_some() {
            return false;
        }

        match command {
            Command::Steer(dir) => self.snake.steer(dir),
            Command::TogglePause => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "paused" } else { "resumed" });
                true
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid_size: self.grid.size(),
            body: self.snake.body(),
            food: self.food,
            score: self.score,
            best_score: self.best_score,
            paused: self.paused,
            game_over: self.game_over.as_ref(),
        }
    }

    fn finish(&mut self, cause: Cause, now: Duration) -> TickOutcome {
        match self.trigger_game_over(cause, now) {
            Some(record) => TickOutcome::GameOver(record),
            None => TickOutcome::Idle,
        }
    }

    fn respawn_food(&mut self) {
        let snake = &self.snake;
        let placement = place_food(&mut self.rng, &self.grid, |pos| snake.occupies(pos));
        if !placement.free {
            warn!(
                "no free cell after {} attempts, food placed on the snake at ({}, {})",
                MAX_PLACEMENT_ATTEMPTS, placement.position.x, placement.position.y
            );
        }
        self.food = placement.position;
    }
}

#[cfg(test)]
impl Game {
    fn snake(&self) -> &Snake {
        &self.snake
    }

    fn food(&self) -> Position {
        self.food
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    fn set_food(&mut self, pos: Position) {
        self.food = pos;
    }
}
