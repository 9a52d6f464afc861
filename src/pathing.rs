use std::collections::VecDeque;

use bit_set::BitSet;
use log::{debug, trace};

use crate::cells::Position;
use crate::grid::Grid;

/// A position reached by the search, linked to the node it was discovered from.
///
/// Nodes live in one arena `Vec` and `parent` is an index into it, `None` only for the start.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct PathNode {
    position: Position,
    parent: Option<usize>,
}

/// Find the shortest walkable route from `start` to `end`, moving only North, South, West or East.
///
/// The route includes both end points, so a walkable `start == end` gives `[start]`.
///
/// Returns None if there is no route, which covers an empty grid, a point outside the grid, a point
/// on a wall and two points that are simply not connected. The grid is only read, the visited set
/// belongs to this call.
pub fn find_shortest_path(grid: &Grid, start: Position, end: Position) -> Option<Vec<Position>> {

    if grid.is_empty() {
        debug!("No path on an empty grid");
        return None;
    }
    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(end) {
        debug!("Start {} or end {} is outside the {}x{} grid",
               start, end, grid.width(), grid.height());
        return None;
    }
    if !grid.is_walkable(start) {
        debug!("Start {} is a wall", start);
        return None;
    }
    if !grid.is_walkable(end) {
        debug!("End {} is a wall", end);
        return None;
    }

    // Breadth first, the first time the end comes off the queue is along a shortest route as
    // every step costs the same.
    let mut nodes = vec![PathNode { position: start, parent: None }];
    let mut frontier = VecDeque::new();
    frontier.push_back(0);
    let mut visited = BitSet::with_capacity(grid.size());
    visit(grid, &mut visited, start);

    while let Some(node_index) = frontier.pop_front() {
        let current = nodes[node_index];
        if current.position == end {
            trace!("Path found from {} to {} after visiting {} cells", start, end, nodes.len());
            return Some(reconstruct_path(&nodes, node_index));
        }

        for neighbour in grid.walkable_neighbours(current.position) {
            if visit(grid, &mut visited, neighbour) {
                nodes.push(PathNode { position: neighbour, parent: Some(node_index) });
                frontier.push_back(nodes.len() - 1);
            }
        }
    }

    debug!("No path from {} to {} after visiting {} cells", start, end, nodes.len());
    None
}

/// Mark a position visited. False if it already was.
#[inline]
fn visit(grid: &Grid, visited: &mut BitSet, pos: Position) -> bool {
    grid.position_to_index(pos).map_or(false, |index| visited.insert(index))
}

/// Follow parent links back to the start then flip the order to read start to end.
fn reconstruct_path(nodes: &[PathNode], end_index: usize) -> Vec<Position> {
    let mut path = vec![];
    let mut current = Some(end_index);
    while let Some(index) = current {
        let node = nodes[index];
        path.push(node.position);
        current = node.parent;
    }
    path.reverse();
    path
}
