use std::collections::VecDeque;

use crate::grid::{Direction, Position};

pub struct Snake {
    body: VecDeque<Position>,
    velocity: Option<Direction>,
    pending: Option<Direction>,
    max_length: usize,
}

impl Snake {
    /// Lays `length` cells out leftwards from `head`, standing still.
    pub fn new(head: Position, length: usize) -> Self {
        let body = (0..length as i16)
            .map(|i| Position::new(head.x - i, head.y))
            .collect();

        Snake {
            body,
            velocity: None,
            pending: None,
            max_length: length,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Option<Direction> {
        self.velocity
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queues a direction for the next tick. Returns false when the turn
    /// would send the head back into the body.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let reverses = match self.velocity {
            Some(current) => direction == current.opposite(),
            // Standing still: only the neck cell is off-limits.
            None => self.body.get(1).map_or(false, |neck| {
                let (dx, dy) = direction.delta();
                let head = self.head();
                *neck == Position::new(head.x + dx, head.y + dy)
            }),
        };

        if reverses {
            return false;
        }

        self.pending = Some(direction);
        true
    }

    /// Applies the queued direction. Returns the velocity for this tick.
    pub fn take_pending(&mut self) -> Option<Direction> {
        if let Some(dir) = self.pending.take() {
            self.velocity = Some(dir);
        }
        self.velocity
    }

    /// Would a head at `next` hit the body, given whether this tick grows?
    pub fn collides(&self, next: Position, growing: bool) -> bool {
        let drops_tail = !growing && self.body.len() >= self.max_length;
        let checked = if drops_tail {
            self.body.len() - 1
        } else {
            self.body.len()
        };

        self.body.iter().take(checked).any(|cell| *cell == next)
    }

    pub fn advance(&mut self, next: Position, grow: bool) {
        if grow {
            self.max_length += 1;
        }

        self.body.push_front(next);
        while self.body.len() > self.max_length {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lays_body_out_to_the_left() {
        let snake = Snake::new(Position::new(10, 10), 4);

        let cells: Vec<_> = snake.body().iter().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
                Position::new(7, 10),
            ]
        );
        assert_eq!(snake.velocity(), None);
        assert_eq!(snake.max_length(), 4);
    }

    #[test]
    fn steer_rejects_reversal_while_moving() {
        let mut snake = Snake::new(Position::new(10, 10), 1);
        assert!(snake.steer(Direction::Right));
        assert_eq!(snake.take_pending(), Some(Direction::Right));

        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.pending(), None);
        assert_eq!(snake.velocity(), Some(Direction::Right));

        assert!(snake.steer(Direction::Up));
        assert!(snake.steer(Direction::Down));
        assert_eq!(snake.pending(), Some(Direction::Down));
    }

    #[test]
    fn steer_rejects_neck_while_idle() {
        let mut snake = Snake::new(Position::new(10, 10), 4);

        assert!(!snake.steer(Direction::Left));
        assert!(snake.steer(Direction::Up));
        assert!(snake.steer(Direction::Right));
    }

    #[test]
    fn single_cell_can_go_anywhere_while_idle() {
        let mut snake = Snake::new(Position::new(3, 3), 1);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(snake.steer(dir));
        }
    }

    #[test]
    fn advance_trims_to_max_length() {
        let mut snake = Snake::new(Position::new(10, 10), 2);
        snake.advance(Position::new(11, 10), false);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(11, 10));
        assert!(!snake.occupies(Position::new(9, 10)));

        snake.advance(Position::new(12, 10), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.max_length(), 3);
    }

    #[test]
    fn tail_about_to_drop_is_not_a_collision() {
        // 2x2 loop: head (1,0), then (0,0), (0,1), tail (1,1).
        let mut snake = Snake::new(Position::new(1, 1), 1);
        snake.max_length = 4;
        snake.advance(Position::new(0, 1), false);
        snake.advance(Position::new(0, 0), false);
        snake.advance(Position::new(1, 0), false);

        assert!(!snake.collides(Position::new(1, 1), false));
        assert!(snake.collides(Position::new(1, 1), true));
        assert!(snake.collides(Position::new(0, 1), false));
    }

    #[test]
    fn short_body_keeps_its_tail() {
        // Still growing into max_length, so the tail stays put.
        let mut snake = Snake::new(Position::new(1, 1), 1);
        snake.max_length = 5;
        snake.advance(Position::new(0, 1), false);
        snake.advance(Position::new(0, 0), false);
        snake.advance(Position::new(1, 0), false);

        assert!(snake.collides(Position::new(1, 1), false));
    }
}
