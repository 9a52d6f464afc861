use std::error::Error;
use std::fmt;
use std::str::FromStr;

use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, CompassPrimary, Position};
use crate::units::{Height, Width};
use crate::utils;

pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// Rectangular rows of cells, indexed `[y][x]`.
///
/// A grid with no rows, or whose first row has no cells, is empty. Every query on an empty grid
/// answers "nothing there" rather than panicking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum ParseGridError {
    UnknownCharacter { line: usize, column: usize, character: char },
    RaggedRow { line: usize, expected: usize, found: usize },
}

impl Grid {
    /// Wrap existing rows. No shape checks are made, so this also builds the empty grids `[]` and
    /// `[[]]`.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Grid {
        Grid { rows }
    }

    /// A `width` * `height` grid made only of walls.
    pub fn walls(width: Width, height: Height) -> Grid {
        let (Width(w), Height(h)) = (width, height);
        let rows = (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| Cell::wall(Position::new(x as u32, y as u32)))
                    .collect()
            })
            .collect();
        Grid { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Length of the first row, all rows share it.
    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width() * self.height()
    }

    /// Is the position within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, pos: Position) -> bool {
        (pos.x as usize) < self.width() && (pos.y as usize) < self.height()
    }

    /// Convert a position to a one dimensional index in the range 0...grid.size().
    /// Returns None if the position is invalid.
    #[inline]
    pub fn position_to_index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_coordinate(pos) {
            Some(pos.y as usize * self.width() + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.rows.get(pos.y as usize).and_then(|row| row.get(pos.x as usize))
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.rows.get_mut(pos.y as usize).and_then(|row| row.get_mut(pos.x as usize))
    }

    /// Positions outside the grid count as not walkable.
    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).map_or(false, Cell::is_walkable)
    }

    /// The cell flagged as the entrance.
    pub fn start(&self) -> Option<Position> {
        self.iter().find(|cell| cell.is_start).map(|cell| cell.position)
    }

    /// The cell flagged as the exit.
    pub fn end(&self) -> Option<Position> {
        self.iter().find(|cell| cell.is_end).map(|cell| cell.position)
    }

    /// Cells in row major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    pub fn passage_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_walkable()).count()
    }

    /// Walkable cells one step to the North, South, West or East of a position.
    pub fn walkable_neighbours(&self, pos: Position) -> PositionSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| pos.offset(dir, 1))
            .filter(|&neighbour| self.is_walkable(neighbour))
            .collect()
    }

    /// The passages as an undirected graph. Nodes are walkable positions and each edge joins two
    /// walkable cells that share a side.
    pub fn passage_graph(&self) -> UnGraph<Position, ()> {
        let passages = self.iter().filter(|cell| cell.is_walkable()).count();
        let mut graph = UnGraph::with_capacity(passages, passages * 2);
        let mut node_indices = utils::fnv_hashmap::<Position, NodeIndex>(passages);

        for cell in self.iter().filter(|cell| cell.is_walkable()) {
            let index = graph.add_node(cell.position);
            node_indices.insert(cell.position, index);
        }

        // Only look East and South so each side is considered once
        for cell in self.iter().filter(|cell| cell.is_walkable()) {
            let src = node_indices[&cell.position];
            for &dir in &[CompassPrimary::East, CompassPrimary::South] {
                let dst = cell.position
                    .offset(dir, 1)
                    .and_then(|neighbour| node_indices.get(&neighbour));
                if let Some(&dst) = dst {
                    graph.add_edge(src, dst, ());
                }
            }
        }
        graph
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parse a text picture of a grid, one line per row.
    ///
    /// `W` or `#` is a wall, `S` the start, `E` the end and `P` or `.` an open passage. Whitespace is
    /// ignored so cells may be space separated. Blank lines are skipped.
    fn from_str(s: &str) -> Result<Grid, ParseGridError> {
        let mut rows: Vec<Vec<Cell>> = vec![];

        for (line_index, line) in s.lines().enumerate() {
            let y = rows.len() as u32;
            let mut row = vec![];

            for (column, character) in line.chars().enumerate() {
                if character.is_whitespace() {
                    continue;
                }
                let position = Position::new(row.len() as u32, y);
                let cell = match character {
                    'W' | '#' => Cell::wall(position),
                    'P' | '.' => Cell::passage(position),
                    'S' => Cell { is_start: true, ..Cell::passage(position) },
                    'E' => Cell { is_end: true, ..Cell::passage(position) },
                    _ => {
                        return Err(ParseGridError::UnknownCharacter {
                            line: line_index + 1,
                            column: column + 1,
                            character,
                        })
                    }
                };
                row.push(cell);
            }

            if row.is_empty() {
                continue;
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(ParseGridError::RaggedRow {
                        line: line_index + 1,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Ok(Grid { rows })
    }
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseGridError::UnknownCharacter { line, column, character } => {
                write!(f, "unknown grid character {:?} at line {}, column {}", character, line, column)
            }
            ParseGridError::RaggedRow { line, expected, found } => {
                write!(f, "row at line {} has {} cells, expected {}", line, found, expected)
            }
        }
    }
}

impl Error for ParseGridError {}
