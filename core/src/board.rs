// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board geometry: dots, edges and cells
//!
//! A board of size `N` has `N x N` dots, `(N-1) x (N-1)` cells and
//! `2 * N * (N-1)` edges. Edges are indexed densely, horizontal edges first
//! (row-major), then vertical edges (row-major).

use crate::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest grid: one cell
pub const MIN_GRID_SIZE: u8 = 2;
/// Largest grid accepted by [`Board::new`]
pub const MAX_GRID_SIZE: u8 = 16;

/// Direction of an edge between two adjacent dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Connects (row, col) to (row, col + 1)
    Horizontal,
    /// Connects (row, col) to (row + 1, col)
    Vertical,
}

impl Orientation {
    fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A segment between two adjacent dots, the atomic move unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    /// Horizontal or vertical
    pub orientation: Orientation,
    /// Row of the top/left dot
    pub row: u8,
    /// Column of the top/left dot
    pub col: u8,
}

impl Edge {
    /// Create a horizontal edge starting at dot (row, col)
    pub fn horizontal(row: u8, col: u8) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row,
            col,
        }
    }

    /// Create a vertical edge starting at dot (row, col)
    pub fn vertical(row: u8, col: u8) -> Self {
        Self {
            orientation: Orientation::Vertical,
            row,
            col,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.orientation.as_str(), self.row, self.col)
    }
}

/// Edge id that could not be parsed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid edge id `{0}`")]
pub struct ParseEdgeError(pub String);

impl FromStr for Edge {
    type Err = ParseEdgeError;

    /// Parses `horizontal-R-C` / `vertical-R-C`; `h` and `v` are accepted as
    /// short prefixes and whitespace works as a separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEdgeError(s.to_string());
        let mut parts = s
            .trim()
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let orientation = match parts.next().ok_or_else(err)?.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Orientation::Horizontal,
            "vertical" | "v" => Orientation::Vertical,
            _ => return Err(err()),
        };
        let row = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let col = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self {
            orientation,
            row,
            col,
        })
    }
}

/// A unit square bounded by four edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid geometry for a given number of dots per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: u8,
}

impl Board {
    /// Create a board with `size x size` dots
    pub fn new(size: u8) -> Result<Self, GameError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(GameError::InvalidConfig(format!(
                "grid size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, size
            )));
        }
        Ok(Self { size })
    }

    /// Dots per side
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cells per side
    pub fn cells_per_side(&self) -> u8 {
        self.size - 1
    }

    pub fn total_cells(&self) -> usize {
        let n = self.cells_per_side() as usize;
        n * n
    }

    pub fn total_edges(&self) -> usize {
        2 * self.size as usize * self.cells_per_side() as usize
    }

    /// Check if an edge lies on this board
    pub fn contains_edge(&self, edge: Edge) -> bool {
        match edge.orientation {
            Orientation::Horizontal => edge.row < self.size && edge.col < self.size - 1,
            Orientation::Vertical => edge.row < self.size - 1 && edge.col < self.size,
        }
    }

    /// Check if a cell lies on this board
    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.row < self.size - 1 && cell.col < self.size - 1
    }

    /// Dense index of an edge; the edge must be on the board
    pub fn edge_index(&self, edge: Edge) -> usize {
        debug_assert!(self.contains_edge(edge), "edge {edge} is off the board");
        let n = self.size as usize;
        let (row, col) = (edge.row as usize, edge.col as usize);
        match edge.orientation {
            Orientation::Horizontal => row * (n - 1) + col,
            Orientation::Vertical => n * (n - 1) + row * n + col,
        }
    }

    /// Inverse of [`Board::edge_index`]
    pub fn edge_at(&self, index: usize) -> Option<Edge> {
        let n = self.size as usize;
        let horizontal = n * (n - 1);
        if index < horizontal {
            Some(Edge::horizontal((index / (n - 1)) as u8, (index % (n - 1)) as u8))
        } else if index < self.total_edges() {
            let index = index - horizontal;
            Some(Edge::vertical((index / n) as u8, (index % n) as u8))
        } else {
            None
        }
    }

    /// Dense row-major index of a cell; the cell must be on the board
    pub fn cell_index(&self, cell: Cell) -> usize {
        debug_assert!(self.contains_cell(cell), "cell {cell} is off the board");
        cell.row as usize * self.cells_per_side() as usize + cell.col as usize
    }

    /// Inverse of [`Board::cell_index`]
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.total_cells() {
            return None;
        }
        let n = self.cells_per_side() as usize;
        Some(Cell::new((index / n) as u8, (index % n) as u8))
    }

    /// The four edges bounding a cell: top, bottom, left, right
    pub fn edges_of_cell(&self, cell: Cell) -> [Edge; 4] {
        let Cell { row, col } = cell;
        [
            Edge::horizontal(row, col),
            Edge::horizontal(row + 1, col),
            Edge::vertical(row, col),
            Edge::vertical(row, col + 1),
        ]
    }

    /// Cells on either side of an edge (one on the border, two inside)
    pub fn cells_adjacent_to_edge(&self, edge: Edge) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(2);
        let Edge { row, col, .. } = edge;

        match edge.orientation {
            Orientation::Horizontal => {
                // Above
                if row > 0 {
                    cells.push(Cell::new(row - 1, col));
                }
                // Below
                if row < self.size - 1 {
                    cells.push(Cell::new(row, col));
                }
            }
            Orientation::Vertical => {
                // Left
                if col > 0 {
                    cells.push(Cell::new(row, col - 1));
                }
                // Right
                if col < self.size - 1 {
                    cells.push(Cell::new(row, col));
                }
            }
        }

        cells
    }

    /// Cells sharing an edge with `cell` (up, down, left, right)
    pub fn neighbor_cells(&self, cell: Cell) -> Vec<Cell> {
        let mut result = Vec::with_capacity(4);
        let last = self.cells_per_side() - 1;
        let Cell { row, col } = cell;

        if row > 0 {
            result.push(Cell::new(row - 1, col));
        }
        if row < last {
            result.push(Cell::new(row + 1, col));
        }
        if col > 0 {
            result.push(Cell::new(row, col - 1));
        }
        if col < last {
            result.push(Cell::new(row, col + 1));
        }

        result
    }

    /// The edge between two neighbouring cells
    pub fn shared_edge(&self, a: Cell, b: Cell) -> Option<Edge> {
        if a.row == b.row && a.col.abs_diff(b.col) == 1 {
            Some(Edge::vertical(a.row, a.col.max(b.col)))
        } else if a.col == b.col && a.row.abs_diff(b.row) == 1 {
            Some(Edge::horizontal(a.row.max(b.row), a.col))
        } else {
            None
        }
    }

    /// Every edge in index order
    pub fn all_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.total_edges()).filter_map(move |i| self.edge_at(i))
    }

    /// Every cell in index order
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.total_cells()).filter_map(move |i| self.cell_at(i))
    }
}
