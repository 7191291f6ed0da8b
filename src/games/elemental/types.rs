//! Core domain types for the elemental tile puzzle.

use crate::GameError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the three cyclic elemental kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Element {
    /// Grass feeds water.
    Grass,
    /// Water feeds fire.
    Water,
    /// Fire feeds grass.
    Fire,
}

impl Element {
    /// All elements in deck order.
    pub const ALL: [Element; 3] = [Element::Grass, Element::Water, Element::Fire];

    /// Returns the next element in the cycle `Grass -> Water -> Fire -> Grass`.
    pub fn successor(self) -> Self {
        match self {
            Element::Grass => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Grass,
        }
    }

    /// Returns true if the two elements are adjacent in the cycle, in either order.
    #[instrument]
    pub fn pairs_with(self, other: Element) -> bool {
        self.successor() == other || other.successor() == self
    }
}

/// What a tile is: a power-of-two number or an element.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    /// Numeric tile, doubles on merge.
    Number,
    /// Grass element.
    Grass,
    /// Water element.
    Water,
    /// Fire element.
    Fire,
}

impl Kind {
    /// Returns the element for elemental kinds, `None` for numbers.
    pub fn element(self) -> Option<Element> {
        match self {
            Kind::Number => None,
            Kind::Grass => Some(Element::Grass),
            Kind::Water => Some(Element::Water),
            Kind::Fire => Some(Element::Fire),
        }
    }

    /// Returns true for [`Kind::Number`].
    pub fn is_number(self) -> bool {
        matches!(self, Kind::Number)
    }
}

impl From<Element> for Kind {
    fn from(element: Element) -> Self {
        match element {
            Element::Grass => Kind::Grass,
            Element::Water => Kind::Water,
            Element::Fire => Kind::Fire,
        }
    }
}

/// Direction of a move.
///
/// The discriminants match the input signal encoding (0=up, 1=right, 2=down, 3=left).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Towards row 0.
    Up = 0,
    /// Towards the last column.
    Right = 1,
    /// Towards the last row.
    Down = 2,
    /// Towards column 0.
    Left = 3,
}

impl Direction {
    /// All four directions in signal order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit delta for one step in this direction.
    pub fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Right => Vector { x: 1, y: 0 },
            Direction::Down => Vector { x: 0, y: 1 },
            Direction::Left => Vector { x: -1, y: 0 },
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            other => Err(GameError::InvalidDirection(other)),
        }
    }
}

/// A cell coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Steps once along `vector`. Returns `None` if a coordinate would go negative;
    /// the upper bound is the grid's business.
    pub fn offset(self, vector: Vector) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(vector.x as isize)?,
            y: self.y.checked_add_signed(vector.y as isize)?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit step between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    /// Column delta.
    pub x: i32,
    /// Row delta.
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_cycle() {
        assert_eq!(Element::Grass.successor(), Element::Water);
        assert_eq!(Element::Water.successor(), Element::Fire);
        assert_eq!(Element::Fire.successor(), Element::Grass);
    }

    #[test]
    fn test_pairs_with_is_symmetric() {
        for a in Element::ALL {
            for b in Element::ALL {
                assert_eq!(a.pairs_with(b), b.pairs_with(a));
                assert_eq!(a.pairs_with(b), a != b);
            }
        }
    }

    #[test]
    fn test_direction_from_signal() {
        assert_eq!(Direction::try_from(0).unwrap(), Direction::Up);
        assert_eq!(Direction::try_from(3).unwrap(), Direction::Left);
        assert!(matches!(
            Direction::try_from(4),
            Err(GameError::InvalidDirection(4))
        ));
    }

    #[test]
    fn test_direction_parses_from_label() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_offset_stops_at_zero() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(Direction::Up.vector()), None);
        assert_eq!(origin.offset(Direction::Left.vector()), None);
        assert_eq!(
            origin.offset(Direction::Right.vector()),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&Kind::Water).unwrap();
        assert_eq!(json, "\"water\"");
        assert_eq!(Kind::from(Element::Fire), Kind::Fire);
        assert_eq!(Kind::Number.element(), None);
    }
}
