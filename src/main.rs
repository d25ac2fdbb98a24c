use std::env;
use std::fs::File;

use ggez::event::{self, EventHandler};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

mod config;
mod food;
mod game;
mod grid;
mod render;
mod snake;

use config::{Config, DEFAULT_CONFIG_PATH};
use game::{Command, Game, TickOutcome};
use grid::Direction;

const LOG_FILE: &str = "grid_snake.log";
const TITLE: &str = "Snake";

struct SnakeApp {
    game: Game,
    cell_size: i16,
}

impl SnakeApp {
    fn new(config: Config) -> GameResult<Self> {
        Ok(SnakeApp {
            cell_size: config.cell_size,
            game: Game::new(config)?,
        })
    }
}

impl EventHandler for SnakeApp {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let was_over = self.game.snapshot().game_over.is_some();

        match self.game.update(ctx.time.time_since_start()) {
            Some(TickOutcome::Fed { score }) => {
                ctx.gfx.set_window_title(&format!("{} | score {}", TITLE, score))
            }
            Some(TickOutcome::GameOver(over)) => ctx
                .gfx
                .set_window_title(&format!("{} | game over, score {}", TITLE, over.final_score)),
            None if was_over && self.game.snapshot().game_over.is_none() => {
                ctx.gfx.set_window_title(TITLE)
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        render::draw_frame(ctx, &self.game.snapshot(), self.cell_size)
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, repeat: bool) -> GameResult {
        if repeat {
            return Ok(());
        }

        match input.keycode {
            Some(KeyCode::Q) => ctx.request_quit(),
            Some(keycode) => {
                if let Some(command) = command_for(keycode) {
                    self.game.handle(command);
                }
            }
            None => {}
        }
        Ok(())
    }
}

fn command_for(keycode: KeyCode) -> Option<Command> {
    match keycode {
        KeyCode::Up | KeyCode::W => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::S => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::A => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::D => Some(Command::Steer(Direction::Right)),
        KeyCode::P | KeyCode::Space | KeyCode::Escape => Some(Command::TogglePause),
        _ => None,
    }
}

fn main() -> GameResult {
    WriteLogger::init(LevelFilter::Info, LogConfig::default(), File::create(LOG_FILE)?)
        .map_err(|e| GameError::CustomError(format!("failed to start logger: {}", e)))?;

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;
    info!(
        "starting on a {}x{} grid, {:?} boundary, {} ms ticks",
        config.grid_size, config.grid_size, config.boundary, config.tick_ms
    );

    let window_setup = ggez::conf::WindowSetup::default()
        .title(TITLE)
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(config.screen_size(), config.screen_size() + render::HUD_HEIGHT)
        .resizable(false);

    let (ctx, event_loop) = ggez::ContextBuilder::new("grid_snake", "grid_snake")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = SnakeApp::new(config)?;
    event::run(ctx, event_loop, app)
}
