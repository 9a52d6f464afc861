use std::fmt;

use crate::cells::{Cell, Position};
use crate::grid::Grid;
use crate::utils::{self, FnvHashSet};

/// How a cell should be drawn. The variants are in precedence order, a start cell on the path is
/// still drawn as the start.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellAppearance {
    Start,
    End,
    OnPath,
    Wall,
    Open,
}

#[derive(Debug, Default)]
pub struct PathDisplay {
    on_path_positions: FnvHashSet<Position>,
}

impl PathDisplay {
    pub fn new(path: &[Position]) -> Self {
        let mut on_path_positions = utils::fnv_hashset(path.len());
        on_path_positions.extend(path.iter().cloned());
        PathDisplay { on_path_positions }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.on_path_positions.contains(&pos)
    }

    pub fn appearance(&self, cell: &Cell) -> CellAppearance {
        if cell.is_start {
            CellAppearance::Start
        } else if cell.is_end {
            CellAppearance::End
        } else if self.contains(cell.position) {
            CellAppearance::OnPath
        } else if cell.is_wall {
            CellAppearance::Wall
        } else {
            CellAppearance::Open
        }
    }
}

/// Text picture of a grid with an optional path drawn over it.
///
/// One character per cell: `#` wall, `S` start, `E` end, `.` path and a space for any other
/// passage.
#[derive(Debug)]
pub struct GridRender<'a> {
    grid: &'a Grid,
    path: PathDisplay,
}

impl<'a> GridRender<'a> {
    pub fn new(grid: &'a Grid, path: Option<&[Position]>) -> GridRender<'a> {
        GridRender {
            grid,
            path: path.map(PathDisplay::new).unwrap_or_default(),
        }
    }
}

impl<'a> fmt::Display for GridRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.grid.rows() {
            let line = row.iter()
                .map(|cell| match self.path.appearance(cell) {
                    CellAppearance::Start => 'S',
                    CellAppearance::End => 'E',
                    CellAppearance::OnPath => '.',
                    CellAppearance::Wall => '#',
                    CellAppearance::Open => ' ',
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", GridRender::new(self, None))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing::find_shortest_path;

    #[test]
    fn plain_render() {
        let g: Grid = "WSW\nPPW\nWEW".parse().unwrap();
        assert_eq!(g.to_string(), "#S#\n  #\n#E#\n");
    }

    #[test]
    fn path_overlay_keeps_start_and_end() {
        let g: Grid = "SPW\nWPW\nWPE\n".parse().unwrap();
        let path = find_shortest_path(&g, g.start().unwrap(), g.end().unwrap()).unwrap();
        let text = GridRender::new(&g, Some(path.as_slice())).to_string();
        assert_eq!(text, "S.#\n#.#\n#.E\n");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert_eq!(Grid::from_rows(vec![vec![]]).to_string(), "\n");
        assert_eq!(Grid::default().to_string(), "");
    }

    #[test]
    fn appearance_precedence() {
        let display = PathDisplay::new(&[Position::new(0, 0), Position::new(1, 0)]);
        let start = Cell { is_start: true, ..Cell::passage(Position::new(0, 0)) };
        let on_path = Cell::passage(Position::new(1, 0));
        let wall = Cell::wall(Position::new(2, 0));
        let open = Cell::passage(Position::new(3, 0));
        assert_eq!(display.appearance(&start), CellAppearance::Start);
        assert_eq!(display.appearance(&on_path), CellAppearance::OnPath);
        assert_eq!(display.appearance(&wall), CellAppearance::Wall);
        assert_eq!(display.appearance(&open), CellAppearance::Open);
    }
}
