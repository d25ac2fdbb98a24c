use ggez::mint::Point2;
use ggez::{graphics, Context, GameResult};

use crate::game::Snapshot;
use crate::grid::Position;

/// Height of the score strip above the board, in pixels.
pub const HUD_HEIGHT: f32 = 28.0;

const BACKGROUND_COLOR: graphics::Color = graphics::Color::new(0.91, 0.97, 0.91, 1.0);
const CHECKER_COLOR: graphics::Color = graphics::Color::new(0.86, 0.94, 0.86, 1.0);
const GRID_LINE_COLOR: graphics::Color = graphics::Color::new(0.0, 0.47, 0.0, 0.25);
const HUD_COLOR: graphics::Color = graphics::Color::new(0.1, 0.1, 0.15, 1.0);
const FOOD_COLOR: graphics::Color = graphics::Color::new(0.82, 0.3, 0.42, 1.0);
const SNAKE_COLOR: graphics::Color = graphics::Color::new(0.07, 0.07, 0.07, 1.0);
const HEAD_COLOR: graphics::Color = graphics::Color::new(0.0, 0.45, 0.0, 1.0);
const OVERLAY_COLOR: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 0.65);

/// Draws one frame. Reads the snapshot only.
pub fn draw_frame(ctx: &mut Context, snapshot: &Snapshot, cell_size: i16) -> GameResult {
    let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND_COLOR);
    let cell = cell_size as f32;
    let board = snapshot.grid_size as f32 * cell;

    // Checkerboard
    for x in 0..snapshot.grid_size {
        for y in 0..snapshot.grid_size {
            if (x + y) % 2 == 0 {
                fill_cell(ctx, &mut canvas, Position::new(x, y), cell, 0.0, CHECKER_COLOR)?;
            }
        }
    }

    draw_grid_lines(ctx, &mut canvas, snapshot.grid_size, cell)?;

    fill_cell(ctx, &mut canvas, snapshot.food, cell, 1.0, FOOD_COLOR)?;

    for (i, pos) in snapshot.body.iter().enumerate() {
        let color = if i == 0 { HEAD_COLOR } else { SNAKE_COLOR };
        fill_cell(ctx, &mut canvas, *pos, cell, 1.0, color)?;
    }

    draw_hud(ctx, &mut canvas, snapshot, board)?;

    if let Some(over) = snapshot.game_over {
        draw_overlay(ctx, &mut canvas, &format!("Game Over! Score: {}", over.final_score), board)?;
    } else if snapshot.paused {
        draw_overlay(ctx, &mut canvas, "Paused", board)?;
    }

    canvas.finish(ctx)
}

fn fill_cell(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    pos: Position,
    cell: f32,
    inset: f32,
    color: graphics::Color,
) -> GameResult {
    let rect = graphics::Rect::new(
        pos.x as f32 * cell + inset,
        HUD_HEIGHT + pos.y as f32 * cell + inset,
        cell - 2.0 * inset,
        cell - 2.0 * inset,
    );
    canvas.draw(
        &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), rect, color)?,
        graphics::DrawParam::default(),
    );
    Ok(())
}

fn draw_grid_lines(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    grid_size: i16,
    cell: f32,
) -> GameResult {
    let mut builder = graphics::MeshBuilder::new();
    for segment in grid_line_segments(grid_size, cell) {
        builder.line(&segment, 1.0, GRID_LINE_COLOR)?;
    }

    canvas.draw(
        &graphics::Mesh::from_data(ctx, builder.build()),
        graphics::DrawParam::default(),
    );
    Ok(())
}

/// One segment per cell boundary on both axes, offset below the HUD strip.
fn grid_line_segments(grid_size: i16, cell: f32) -> Vec<[Point2<f32>; 2]> {
    let board = grid_size as f32 * cell;

    (0..=grid_size)
        .flat_map(|i| {
            let offset = i as f32 * cell;
            [
                [
                    Point2 { x: offset, y: HUD_HEIGHT },
                    Point2 { x: offset, y: HUD_HEIGHT + board },
                ],
                [
                    Point2 { x: 0.0, y: HUD_HEIGHT + offset },
                    Point2 { x: board, y: HUD_HEIGHT + offset },
                ],
            ]
        })
        .collect()
}

fn draw_hud(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    snapshot: &Snapshot,
    board: f32,
) -> GameResult {
    let strip = graphics::Rect::new(0.0, 0.0, board, HUD_HEIGHT);
    canvas.draw(
        &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), strip, HUD_COLOR)?,
        graphics::DrawParam::default(),
    );

    let mut text = graphics::Text::new(format!(
        "Score: {} | Best: {}",
        snapshot.score, snapshot.best_score
    ));
    text.set_scale(18.0);
    canvas.draw(
        &text,
        graphics::DrawParam::default()
            .dest(Point2 { x: 8.0, y: 5.0 })
            .color(graphics::Color::WHITE),
    );
    Ok(())
}

fn draw_overlay(
    ctx: &mut Context,
    canvas: &mut graphics::Canvas,
    message: &str,
    board: f32,
) -> GameResult {
    let center = Point2 {
        x: board / 2.0,
        y: HUD_HEIGHT + board / 2.0,
    };

    let panel = graphics::Rect::new(center.x - 120.0, center.y - 26.0, 240.0, 52.0);
    canvas.draw(
        &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), panel, OVERLAY_COLOR)?,
        graphics::DrawParam::default(),
    );

    let mut text = graphics::Text::new(message);
    text.set_scale(22.0).set_layout(graphics::TextLayout::center());
    canvas.draw(
        &text,
        graphics::DrawParam::default()
            .dest(center)
            .color(graphics::Color::WHITE),
    );
    Ok(())
}
