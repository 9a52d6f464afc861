use std::fmt;

/// A grid coordinate. `x` is the column and `y` the row, (0, 0) is the top left corner.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// The neighbouring position `steps` cells away in the given direction.
    /// Returns None if the Position is not representable.
    #[inline]
    pub fn offset(self, dir: CompassPrimary, steps: u32) -> Option<Position> {
        let Position { x, y } = self;
        match dir {
            CompassPrimary::North => y.checked_sub(steps).map(|y| Position { x, y }),
            CompassPrimary::South => y.checked_add(steps).map(|y| Position { x, y }),
            CompassPrimary::West => x.checked_sub(steps).map(|x| Position { x, y }),
            CompassPrimary::East => x.checked_add(steps).map(|x| Position { x, y }),
        }
    }

    /// The position exactly halfway between two positions on the same row or column.
    #[inline]
    pub fn midpoint(self, other: Position) -> Position {
        Position {
            x: (self.x + other.x) / 2,
            y: (self.y + other.y) / 2,
        }
    }
}

impl From<(u32, u32)> for Position {
    fn from(x_y_pair: (u32, u32)) -> Position {
        Position::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    West,
    East,
}

impl CompassPrimary {
    /// Up, down, left, right. Search visits neighbours in this order so it decides which of several
    /// equally short paths is returned.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];
}

/// One square of a maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub position: Position,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Cell {
    pub fn wall(position: Position) -> Cell {
        Cell {
            position,
            is_wall: true,
            is_start: false,
            is_end: false,
        }
    }

    pub fn passage(position: Position) -> Cell {
        Cell {
            is_wall: false,
            ..Cell::wall(position)
        }
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        !self.is_wall
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_single_step() {
        let p = Position::new(3, 3);
        assert_eq!(p.offset(CompassPrimary::North, 1), Some(Position::new(3, 2)));
        assert_eq!(p.offset(CompassPrimary::South, 1), Some(Position::new(3, 4)));
        assert_eq!(p.offset(CompassPrimary::West, 1), Some(Position::new(2, 3)));
        assert_eq!(p.offset(CompassPrimary::East, 1), Some(Position::new(4, 3)));
    }

    #[test]
    fn offset_past_origin_is_unrepresentable() {
        let gc = |x, y| Position::new(x, y);
        assert_eq!(gc(0, 0).offset(CompassPrimary::North, 1), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::West, 1), None);
        assert_eq!(gc(1, 1).offset(CompassPrimary::North, 2), None);
        assert_eq!(gc(1, 1).offset(CompassPrimary::West, 2), None);
        assert_eq!(gc(2, 2).offset(CompassPrimary::West, 2), Some(gc(0, 2)));
        assert_eq!(gc(u32::MAX, 0).offset(CompassPrimary::East, 1), None);
    }

    #[test]
    fn midpoint_of_two_step_offset() {
        let a = Position::new(1, 1);
        for &dir in CompassPrimary::ALL.iter() {
            if let Some(b) = a.offset(dir, 2) {
                assert_eq!(a.midpoint(b), a.offset(dir, 1).unwrap());
                assert_eq!(b.midpoint(a), a.offset(dir, 1).unwrap());
            }
        }
    }

    #[test]
    fn passage_is_walkable() {
        let p = Position::new(0, 0);
        assert!(!Cell::wall(p).is_walkable());
        assert!(Cell::passage(p).is_walkable());
        assert!(!Cell::passage(p).is_start);
        assert!(!Cell::passage(p).is_end);
    }
}
