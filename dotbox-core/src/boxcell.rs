//! Per-box edge state and fill ownership

use crate::board::{Side, SIDE_PRIORITY};
use crate::player::Player;
use thiserror::Error;

/// Attempt to draw a side that is already drawn. Recoverable: the caller
/// treats it as "ignore this input", nothing was mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("side already drawn")]
pub struct AlreadyDrawn;

/// What a successful [`BoxCell::draw_side`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideOutcome {
    /// Drawn-side count after this draw (1..=4)
    pub drawn_count: u8,
    /// True exactly when this draw was the 4th side
    pub completed: bool,
}

/// One of the 64 unit cells: four edge flags plus the owner mark, set the
/// instant the 4th side is drawn and immutable thereafter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxCell {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
    drawn: u8,
    owner: Option<Player>,
}

impl BoxCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cell from persisted flags, recomputing the drawn count.
    pub fn from_flags(sides: [bool; 4], owner: Option<Player>) -> Self {
        let [top, bottom, left, right] = sides;
        let drawn = sides.iter().filter(|&&s| s).count() as u8;
        Self {
            top,
            bottom,
            left,
            right,
            drawn,
            owner,
        }
    }

    pub fn has_side(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Flags in [Top, Bottom, Left, Right] order, for persistence.
    pub fn side_flags(&self) -> [bool; 4] {
        [self.top, self.bottom, self.left, self.right]
    }

    /// Mark `side` drawn. On the 4th side the box is filled and `player`
    /// becomes its owner.
    pub fn draw_side(&mut self, side: Side, player: Player) -> Result<SideOutcome, AlreadyDrawn> {
        let flag = match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        if *flag {
            return Err(AlreadyDrawn);
        }
        *flag = true;
        self.drawn += 1;

        let completed = self.drawn == 4;
        if completed {
            self.owner = Some(player);
        }
        Ok(SideOutcome {
            drawn_count: self.drawn,
            completed,
        })
    }

    pub fn drawn_count(&self) -> u8 {
        self.drawn
    }

    pub fn is_filled(&self) -> bool {
        self.drawn == 4
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    /// First undrawn side in Top, Bottom, Left, Right order. Used by the AI
    /// to finish a 3-sided box, never by the rules themselves.
    pub fn available_side(&self) -> Option<Side> {
        SIDE_PRIORITY.into_iter().find(|&side| !self.has_side(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_side_counts_up() {
        let mut cell = BoxCell::new();
        assert_eq!(cell.drawn_count(), 0);

        let outcome = cell.draw_side(Side::Top, Player::Red).unwrap();
        assert_eq!(outcome.drawn_count, 1);
        assert!(!outcome.completed);
        assert!(cell.has_side(Side::Top));
        assert!(!cell.is_filled());
        assert_eq!(cell.owner(), None);
    }

    #[test]
    fn test_double_draw_is_rejected() {
        let mut cell = BoxCell::new();
        cell.draw_side(Side::Left, Player::Red).unwrap();

        let before = cell;
        assert_eq!(cell.draw_side(Side::Left, Player::Blue), Err(AlreadyDrawn));
        assert_eq!(cell, before);
    }

    #[test]
    fn test_fourth_side_sets_owner() {
        let mut cell = BoxCell::new();
        cell.draw_side(Side::Top, Player::Red).unwrap();
        cell.draw_side(Side::Bottom, Player::Red).unwrap();
        cell.draw_side(Side::Left, Player::Red).unwrap();
        assert_eq!(cell.owner(), None);

        let outcome = cell.draw_side(Side::Right, Player::Blue).unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.drawn_count, 4);
        assert!(cell.is_filled());
        // Owner is whoever drew the 4th side
        assert_eq!(cell.owner(), Some(Player::Blue));
    }

    #[test]
    fn test_available_side_priority() {
        let mut cell = BoxCell::new();
        assert_eq!(cell.available_side(), Some(Side::Top));

        cell.draw_side(Side::Top, Player::Red).unwrap();
        assert_eq!(cell.available_side(), Some(Side::Bottom));

        cell.draw_side(Side::Bottom, Player::Red).unwrap();
        cell.draw_side(Side::Left, Player::Red).unwrap();
        assert_eq!(cell.available_side(), Some(Side::Right));

        cell.draw_side(Side::Right, Player::Red).unwrap();
        assert_eq!(cell.available_side(), None);
    }

    #[test]
    fn test_from_flags_recomputes_count() {
        let cell = BoxCell::from_flags([true, false, true, false], None);
        assert_eq!(cell.drawn_count(), 2);
        assert!(cell.has_side(Side::Top));
        assert!(cell.has_side(Side::Left));
        assert!(!cell.is_filled());

        let filled = BoxCell::from_flags([true; 4], Some(Player::Red));
        assert!(filled.is_filled());
        assert_eq!(filled.owner(), Some(Player::Red));
    }
}
