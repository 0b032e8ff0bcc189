//! Turn cursor shared by voting (circular rotation) and the snake draft
//! (bidirectional sweep).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    /// Index into the draft order; always `< len` while a turn is active.
    pub pointer: usize,
    pub direction: Direction,
    /// 1-based; bumped only when a forward sweep begins.
    pub round: u32,
}

impl TurnCursor {
    pub const fn start() -> Self {
        Self {
            pointer: 0,
            direction: Direction::Forward,
            round: 1,
        }
    }

    /// Voting: move to the next player, wrapping around.
    pub fn rotate(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.pointer = (self.pointer + 1) % len;
    }

    /// Snake draft: step in the current direction, bouncing at either end.
    /// The boundary player acts twice in a row.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        match self.direction {
            Direction::Forward if self.pointer + 1 < len => self.pointer += 1,
            Direction::Forward => {
                self.direction = Direction::Backward;
                self.pointer = len - 1;
            }
            Direction::Backward if self.pointer > 0 => self.pointer -= 1,
            Direction::Backward => {
                self.direction = Direction::Forward;
                self.round += 1;
                self.pointer = 0;
            }
        }
    }
}

impl Default for TurnCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Pointers of the next `count` snake-draft turns, starting with the
/// current one.
pub fn pick_schedule(cursor: TurnCursor, len: usize, count: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut cursor = cursor;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(cursor.pointer);
        cursor.advance(len);
    }
    out
}
