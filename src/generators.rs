use bit_set::BitSet;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CompassPrimary, Position};
use crate::grid::{Grid, PositionSmallVec};
use crate::units::{Height, Width};

pub const MAZE_WIDTH: Width = Width(20);
pub const MAZE_HEIGHT: Height = Height(20);

/// Carving always begins here, one cell in from the top left corner. Carving steps are two cells
/// long so every carved room lands on odd coordinates.
const CARVE_ORIGIN: Position = Position { x: 1, y: 1 };

const TOO_SMALL: &str = "Maze dimensions too small for an entrance and exit.";

/// Generate a new perfect maze seeded from the thread rng.
pub fn generate(width: Width, height: Height) -> Grid {
    generate_seeded(width, height, rand::random())
}

/// Generate a perfect maze. The same seed and dimensions always give the same maze.
pub fn generate_seeded(width: Width, height: Height, seed: u64) -> Grid {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    recursive_backtracker(width, height, &mut rng)
}

/// Apply the recursive backtracker maze generation algorithm to a grid of walls.
///
/// A depth first random walk starts at (1, 1) and keeps a stack of the rooms it has carved. From
/// the room on top of the stack it picks, uniformly at random, an unvisited wall two cells away
/// and knocks out the wall cell in between. When there is nowhere new to go it backtracks by
/// popping the stack. The cell left between two rooms is what stops passages from ever joining up
/// into a loop, so the result is a perfect maze.
///
/// The entrance is then opened at (1, 0) on the top border and the exit at
/// (width - 2, height - 1) on the bottom border, each connected to the cell just inside it.
///
/// Odd dimensions give a maze with an unbroken outer wall. With an even dimension carving may also
/// run along the far border, the entrance and exit are still connected.
///
/// # Panics
///
/// If `width` or `height` is below 3 there is no room for an entrance and exit.
pub fn recursive_backtracker<R>(width: Width, height: Height, rng: &mut R) -> Grid
    where R: Rng + ?Sized
{
    let mut grid = Grid::walls(width, height);

    let carving_steps = carve_passages(&mut grid, rng);
    debug!("Carved {}x{} maze in {} steps", width.0, height.0, carving_steps);

    designate_entrance_and_exit(&mut grid);
    grid
}

/// Returns the number of carving steps taken.
///
/// The visited set is owned here and thrown away afterwards, it never becomes part of the grid.
fn carve_passages<R>(grid: &mut Grid, rng: &mut R) -> usize
    where R: Rng + ?Sized
{
    let mut visited = BitSet::with_capacity(grid.size());
    if !open(grid, &mut visited, CARVE_ORIGIN) {
        return 0;
    }

    let mut steps = 0;
    let mut stack = vec![CARVE_ORIGIN];

    while let Some(&current) = stack.last() {
        let candidates = carve_candidates(grid, &visited, current);
        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let next = candidates[rng.gen_range(0..candidates.len())];
        open(grid, &mut visited, current.midpoint(next));
        open(grid, &mut visited, next);
        stack.push(next);
        steps += 1;
    }

    steps
}

/// Unvisited walls two cells away from `current`.
fn carve_candidates(grid: &Grid, visited: &BitSet, current: Position) -> PositionSmallVec {
    CompassPrimary::ALL
        .iter()
        .filter_map(|&dir| current.offset(dir, 2))
        .filter(|&pos| {
            match (grid.cell(pos), grid.position_to_index(pos)) {
                (Some(cell), Some(index)) => cell.is_wall && !visited.contains(index),
                _ => false,
            }
        })
        .collect()
}

/// Make `pos` a passage and record it as visited. False if `pos` is not on the grid.
fn open(grid: &mut Grid, visited: &mut BitSet, pos: Position) -> bool {
    let index = match grid.position_to_index(pos) {
        Some(index) => index,
        None => return false,
    };
    match grid.cell_mut(pos) {
        Some(cell) => {
            cell.is_wall = false;
            visited.insert(index);
            true
        }
        None => false,
    }
}

fn designate_entrance_and_exit(grid: &mut Grid) {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    assert!(width >= 3 && height >= 3, "{}", TOO_SMALL);

    let entrance = Position::new(1, 0);
    let exit = Position::new(width - 2, height - 1);

    for &(border, inner, is_entrance) in &[(entrance, Position::new(1, 1), true),
                                           (exit, Position::new(width - 2, height - 2), false)] {
        let cell = grid.cell_mut(border).expect(TOO_SMALL);
        cell.is_wall = false;
        if is_entrance {
            cell.is_start = true;
        } else {
            cell.is_end = true;
        }

        // Usually already carved, only ever a wall when the exit sits off the odd carving lattice
        grid.cell_mut(inner).expect(TOO_SMALL).is_wall = false;
    }
}


#[cfg(test)]
mod tests {

    use petgraph::algo::connected_components;
    use quickcheck::quickcheck;

    use super::*;
    use crate::pathing::find_shortest_path;

    fn small_dimension(n: u8) -> usize {
        3 + (n as usize % 38)
    }

    fn odd_dimension(n: u8) -> usize {
        3 + 2 * (n as usize % 19)
    }

    #[test]
    fn dimensions_are_kept() {
        let g = generate(Width(21), Height(15));
        assert_eq!(g.width(), 21);
        assert_eq!(g.height(), 15);
    }

    #[test]
    fn one_entrance_and_one_exit() {
        let g = generate_seeded(Width(21), Height(21), 7);
        let starts = g.iter().filter(|cell| cell.is_start).collect::<Vec<_>>();
        let ends = g.iter().filter(|cell| cell.is_end).collect::<Vec<_>>();

        assert_eq!(starts.len(), 1);
        assert_eq!(ends.len(), 1);
        assert_eq!(starts[0].position, Position::new(1, 0));
        assert_eq!(ends[0].position, Position::new(19, 20));
        assert!(starts[0].is_walkable());
        assert!(ends[0].is_walkable());
        assert!(g.is_walkable(Position::new(1, 1)));
        assert!(g.is_walkable(Position::new(19, 19)));
    }

    #[test]
    fn smallest_maze() {
        let g = generate_seeded(Width(3), Height(3), 0);
        let expected: Grid = "WSW\n\
                              WPW\n\
                              WEW".parse().unwrap();
        assert_eq!(g, expected);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_seeded(Width(31), Height(25), 1234);
        let b = generate_seeded(Width(31), Height(25), 1234);
        assert_eq!(a, b);
    }

    #[test]
    fn seeds_vary_the_maze() {
        let first = generate_seeded(Width(21), Height(21), 0);
        let any_different = (1..10).any(|seed| generate_seeded(Width(21), Height(21), seed) != first);
        assert!(any_different);
    }

    #[test]
    fn odd_dimension_border_is_closed() {
        let (w, h) = (15u32, 11u32);
        let g = generate_seeded(Width(w as usize), Height(h as usize), 99);
        for cell in g.iter() {
            let Position { x, y } = cell.position;
            let on_border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            if on_border && !cell.is_start && !cell.is_end {
                assert!(cell.is_wall, "border cell {} was carved", cell.position);
            }
        }
    }

    #[test]
    fn every_odd_room_is_carved() {
        let g = generate_seeded(Width(17), Height(13), 3);
        for cell in g.iter() {
            if cell.position.x % 2 == 1 && cell.position.y % 2 == 1 {
                assert!(cell.is_walkable());
            }
            if cell.position.x % 2 == 0 && cell.position.y % 2 == 0 {
                assert!(cell.is_wall, "corner post {} was carved", cell.position);
            }
        }
    }

    #[test]
    fn each_carving_step_opens_two_cells() {
        let mut rng = XorShiftRng::seed_from_u64(5);
        let mut g = Grid::walls(Width(21), Height(17));
        let steps = carve_passages(&mut g, &mut rng);
        assert_eq!(g.passage_count(), 1 + 2 * steps);
        // one step per room other than the origin
        assert_eq!(steps, 10 * 8 - 1);
    }

    #[test]
    fn carving_does_nothing_without_an_origin() {
        let mut rng = XorShiftRng::seed_from_u64(5);
        let mut g = Grid::walls(Width(1), Height(1));
        assert_eq!(carve_passages(&mut g, &mut rng), 0);
        assert_eq!(g.passage_count(), 0);
    }

    #[test]
    #[should_panic]
    fn too_small_for_an_exit() {
        generate_seeded(Width(2), Height(2), 0);
    }

    #[test]
    fn entrance_reaches_exit() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let g = generate_seeded(Width(small_dimension(w)), Height(small_dimension(h)), seed);
            match (g.start(), g.end()) {
                (Some(start), Some(end)) => find_shortest_path(&g, start, end).is_some(),
                _ => false,
            }
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn odd_dimension_mazes_are_trees() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let g = generate_seeded(Width(odd_dimension(w)), Height(odd_dimension(h)), seed);
            let graph = g.passage_graph();
            connected_components(&graph) == 1 && graph.edge_count() + 1 == graph.node_count()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn even_dimension_mazes_are_connected() {
        for &(w, h) in &[(4, 4), (20, 20), (20, 21), (21, 20), (6, 3), (3, 6)] {
            for seed in 0..20 {
                let g = generate_seeded(Width(w), Height(h), seed);
                assert_eq!(connected_components(&g.passage_graph()), 1,
                           "{}x{} seed {} has unreachable passages", w, h, seed);
            }
        }
    }
}
