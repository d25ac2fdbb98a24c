use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What happens when the head leaves the board.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Re-enter on the opposite edge.
    #[default]
    Wrap,
    /// Leaving the board ends the game.
    Wall,
}

/// Square board of `size` x `size` cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    size: i16,
    boundary: BoundaryPolicy,
}

impl Grid {
    pub fn new(size: i16, boundary: BoundaryPolicy) -> Self {
        Grid { size, boundary }
    }

    pub fn size(&self) -> i16 {
        self.size
    }

    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Moves one cell from `pos`. Returns `None` when the step leaves a
    /// walled board.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let next = Position::new(pos.x + dx, pos.y + dy);

        match self.boundary {
            BoundaryPolicy::Wrap => Some(Position::new(
                next.x.rem_euclid(self.size),
                next.y.rem_euclid(self.size),
            )),
            BoundaryPolicy::Wall if self.contains(next) => Some(next),
            BoundaryPolicy::Wall => None,
        }
    }
}
