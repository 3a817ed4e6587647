use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use itertools::Itertools;
use thiserror::Error;

use super::VertexIndex;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("adjacency matrix must be square: row {row} has {found} entries, expected {expected}")]
pub struct MatrixShapeError {
    pub row: usize,
    pub found: usize,
    pub expected: usize,
}

/// Dense square matrix indexed by vertex position, stored row-major.
///
/// `matrix[(i, j)]` describes the directed connection from vertex `i` to vertex `j`:
/// an edge multiplicity for [`Graph::adjacency_matrix`](super::Graph::adjacency_matrix),
/// an optional weight for [`Graph::weight_matrix`](super::Graph::weight_matrix).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyMatrix<T> {
    order: usize,
    entries: Vec<T>,
}

impl<T: Clone + Default> AdjacencyMatrix<T> {
    pub fn new(order: usize) -> Self {
        AdjacencyMatrix {
            order,
            entries: vec![T::default(); order * order],
        }
    }
}

impl<T> AdjacencyMatrix<T> {
    /// Number of rows (= number of columns = number of vertices).
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order == 0
    }

    pub fn row(&self, i: VertexIndex) -> &[T] {
        &self.entries[i.0 * self.order..(i.0 + 1) * self.order]
    }

    pub fn row_mut(&mut self, i: VertexIndex) -> &mut [T] {
        &mut self.entries[i.0 * self.order..(i.0 + 1) * self.order]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` panics on a zero chunk size
        self.entries.chunks(self.order.max(1))
    }

    pub fn indices(&self) -> impl Iterator<Item = VertexIndex> {
        (0..self.order).map(VertexIndex)
    }

    pub fn get(&self, i: VertexIndex, j: VertexIndex) -> Option<&T> {
        if i.0 < self.order && j.0 < self.order {
            Some(&self.entries[i.0 * self.order + j.0])
        } else {
            None
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> AdjacencyMatrix<U> {
        AdjacencyMatrix {
            order: self.order,
            entries: self.entries.iter().map(f).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ((VertexIndex, VertexIndex), &T)> + '_ {
        let order = self.order;
        self.entries
            .iter()
            .enumerate()
            .map(move |(k, t)| ((VertexIndex(k / order), VertexIndex(k % order)), t))
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.entries.fill(value);
    }

    /// Overwrites `self` with `other`, reusing the existing allocation.
    pub fn copy_from(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.order = other.order;
        self.entries.clone_from(&other.entries);
    }
}

impl AdjacencyMatrix<u32> {
    /// Sum of row `i`: the out-degree of vertex `i`, loops counted once.
    pub fn row_sum(&self, i: VertexIndex) -> u64 {
        self.row(i).iter().map(|&m| u64::from(m)).sum()
    }

    /// Column positions `j` with a non-zero entry in row `i`, in increasing order.
    pub fn successors(&self, i: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.row(i)
            .iter()
            .positions(|&m| m > 0)
            .map(VertexIndex)
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&m| m == 0)
    }

    /// Number of undirected edges encoded by a symmetric multiplicity matrix.
    pub fn undirected_edge_count(&self) -> usize {
        self.indices()
            .map(|i| {
                self.row(i)[i.0..]
                    .iter()
                    .map(|&m| m as usize)
                    .sum::<usize>()
            })
            .sum()
    }

    /// Removes one copy of the undirected edge `{i, j}`.
    ///
    /// Returns `false` and leaves the matrix untouched if no such edge is left.
    pub fn remove_undirected(&mut self, i: VertexIndex, j: VertexIndex) -> bool {
        if self[(i, j)] == 0 {
            return false;
        }
        self[(i, j)] -= 1;
        if i != j {
            self[(j, i)] -= 1;
        }
        true
    }
}

impl<T> Index<(VertexIndex, VertexIndex)> for AdjacencyMatrix<T> {
    type Output = T;
    fn index(&self, (i, j): (VertexIndex, VertexIndex)) -> &Self::Output {
        &self.entries[i.0 * self.order + j.0]
    }
}

impl<T> IndexMut<(VertexIndex, VertexIndex)> for AdjacencyMatrix<T> {
    fn index_mut(&mut self, (i, j): (VertexIndex, VertexIndex)) -> &mut Self::Output {
        &mut self.entries[i.0 * self.order + j.0]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for AdjacencyMatrix<T> {
    type Error = MatrixShapeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let order = rows.len();
        let mut entries = Vec::with_capacity(order * order);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != order {
                return Err(MatrixShapeError {
                    row,
                    found: values.len(),
                    expected: order,
                });
            }
            entries.extend(values);
        }
        Ok(AdjacencyMatrix { order, entries })
    }
}

impl<T: Display> Display for AdjacencyMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows().take(self.order) {
            writeln!(f, "[{}]", row.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rows_must_be_square() {
        let err = AdjacencyMatrix::try_from(vec![vec![0u32, 1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            MatrixShapeError {
                row: 1,
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn undirected_removal_keeps_symmetry() {
        let mut m = AdjacencyMatrix::try_from(vec![
            vec![0u32, 2, 1],
            vec![2, 0, 0],
            vec![1, 0, 1],
        ])
        .unwrap();
        assert_eq!(m.undirected_edge_count(), 4);

        assert!(m.remove_undirected(VertexIndex(1), VertexIndex(0)));
        assert_eq!(m[(VertexIndex(0), VertexIndex(1))], 1);
        assert_eq!(m[(VertexIndex(1), VertexIndex(0))], 1);

        // loops are stored once on the diagonal
        assert!(m.remove_undirected(VertexIndex(2), VertexIndex(2)));
        assert!(!m.remove_undirected(VertexIndex(2), VertexIndex(2)));
        assert_eq!(m.undirected_edge_count(), 2);
        assert_eq!(
            m.successors(VertexIndex(0)).collect::<Vec<_>>(),
            vec![VertexIndex(1), VertexIndex(2)]
        );
    }

    #[test]
    fn display_rows() {
        let m = AdjacencyMatrix::try_from(vec![vec![0u32, 1], vec![1, 0]]).unwrap();
        insta::assert_snapshot!(m.to_string().trim_end(), @r"
        [0, 1]
        [1, 0]
        ");
    }
}
