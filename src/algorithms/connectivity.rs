//! Connectivity through accumulated matrix powers.
//!
//! `M¹ + M² + … + Mⁿ` has a positive entry `(i, j)` exactly when some walk of length
//! at most `n` leads from `i` to `j`. The graph counts as connected when every pair
//! is reachable, where a vertex always reaches itself and vertices in the ignore set
//! reach (and are reached by) everything.

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::graph::{AdjacencyMatrix, Graph, VertexIndex};

/// Reusable connectivity test.
///
/// Owns the power and accumulator buffers so that repeated queries on graphs of the
/// same order (as in Fleury's bridge test) do not allocate.
#[derive(Clone, Debug, Default)]
pub struct ConnectivityOracle {
    base: AdjacencyMatrix<u64>,
    power: AdjacencyMatrix<u64>,
    next: AdjacencyMatrix<u64>,
    reach: AdjacencyMatrix<u64>,
}

impl ConnectivityOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates buffers for graphs with `order` vertices.
    pub fn with_order(order: usize) -> Self {
        let mut oracle = Self::default();
        oracle.resize(order);
        oracle
    }

    fn resize(&mut self, order: usize) {
        if self.base.order() != order {
            self.base = AdjacencyMatrix::new(order);
            self.power = AdjacencyMatrix::new(order);
            self.next = AdjacencyMatrix::new(order);
            self.reach = AdjacencyMatrix::new(order);
        }
    }

    /// Whether every pair of vertices outside `ignore` is mutually reachable in `m`.
    ///
    /// Bits beyond the end of `ignore` count as not ignored. An empty matrix is
    /// connected.
    pub fn is_connected(&mut self, m: &AdjacencyMatrix<u32>, ignore: &BitSlice) -> bool {
        let n = m.order();
        if n == 0 {
            return true;
        }
        self.resize(n);

        let ignored = |i: VertexIndex| ignore.get(i.0).is_some_and(|b| *b);

        for ((i, j), &count) in m.iter() {
            self.base[(i, j)] = u64::from(count);
        }
        self.power.copy_from(&self.base);
        self.reach.copy_from(&self.base);

        for _ in 1..n {
            if self.all_reached(&ignored) {
                return true;
            }
            multiply_saturating(&self.power, &self.base, &mut self.next);
            std::mem::swap(&mut self.power, &mut self.next);
            if self.power.iter().all(|(_, &p)| p == 0) {
                break;
            }
            for ((i, j), &p) in self.power.iter() {
                self.reach[(i, j)] = self.reach[(i, j)].saturating_add(p);
            }
        }

        self.all_reached(&ignored)
    }

    fn all_reached(&self, ignored: &impl Fn(VertexIndex) -> bool) -> bool {
        self.reach
            .iter()
            .all(|((i, j), &r)| r > 0 || i == j || ignored(i) || ignored(j))
    }
}

fn multiply_saturating(
    a: &AdjacencyMatrix<u64>,
    b: &AdjacencyMatrix<u64>,
    out: &mut AdjacencyMatrix<u64>,
) {
    out.fill(0);
    for i in a.indices() {
        for k in a.indices() {
            let aik = a[(i, k)];
            if aik == 0 {
                continue;
            }
            for j in b.indices() {
                let bkj = b[(k, j)];
                if bkj != 0 {
                    out[(i, j)] = out[(i, j)].saturating_add(aik.saturating_mul(bkj));
                }
            }
        }
    }
}

/// One-shot form of [`ConnectivityOracle::is_connected`].
pub fn is_connected(m: &AdjacencyMatrix<u32>, ignore: &BitSlice) -> bool {
    ConnectivityOracle::with_order(m.order()).is_connected(m, ignore)
}

impl Graph {
    /// Whether the graph is connected (strongly connected if directed).
    pub fn is_connected(&self) -> bool {
        is_connected(self.adjacency_matrix(), &BitVec::<usize>::repeat(false, self.order()))
    }
}
