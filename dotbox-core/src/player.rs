//! Player identity

use serde::{Deserialize, Serialize};

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red = 0,
    Blue = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Stable index for per-player bookkeeping arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Red.opponent(), Player::Blue);
        assert_eq!(Player::Blue.opponent(), Player::Red);
    }
}
