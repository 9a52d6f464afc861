/// Number of cells in one grid row.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);

/// Number of rows in a grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
