//! Signed, weighted graph Laplacian `L = D - A`.
//!
//! `A[u][v] = sign(e) * weight(e)` accumulated over parallel edges, and `D[i][i]` is the sum of
//! `|sign(e) * weight(e)|` over edges incident to `i`. With negative edges the row sums of `L`
//! are not zero.

use crate::attribute::AttributeResolver;
use crate::error::Result;
use crate::graph::Graph;
use nalgebra::DMatrix;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub enum Laplacian {
    Dense(DMatrix<f64>),
    /// One map per row, holding only the stored entries of that row.
    Sparse(SparseRows),
}

#[derive(Debug, Clone)]
pub struct SparseRows {
    rows: Vec<FxHashMap<usize, f64>>,
}

impl SparseRows {
    fn zeros(n: usize) -> Self {
        Self {
            rows: vec![FxHashMap::default(); n],
        }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i].get(&j).copied().unwrap_or(0.0)
    }

    fn add(&mut self, i: usize, j: usize, v: f64) {
        *self.rows[i].entry(j).or_insert(0.0) += v;
    }
}

/// Dense storage is used when `n * n <= 4 * edges`, sparse storage otherwise.
pub fn prefers_dense(node_count: usize, edge_count: usize) -> bool {
    node_count.saturating_mul(node_count) <= edge_count.saturating_mul(4)
}

impl Laplacian {
    pub fn zeros(n: usize, dense: bool) -> Self {
        if dense {
            Laplacian::Dense(DMatrix::zeros(n, n))
        } else {
            Laplacian::Sparse(SparseRows::zeros(n))
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            Laplacian::Dense(m) => m.nrows(),
            Laplacian::Sparse(s) => s.rows.len(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Laplacian::Sparse(_))
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        match self {
            Laplacian::Dense(m) => m[(i, j)],
            Laplacian::Sparse(s) => s.get(i, j),
        }
    }

    pub fn add(&mut self, i: usize, j: usize, v: f64) {
        match self {
            Laplacian::Dense(m) => m[(i, j)] += v,
            Laplacian::Sparse(s) => s.add(i, j, v),
        }
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        match self {
            Laplacian::Dense(m) => m.iter().filter(|v| **v != 0.0).count(),
            Laplacian::Sparse(s) => s
                .rows
                .iter()
                .map(|r| r.values().filter(|v| **v != 0.0).count())
                .sum(),
        }
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        match self {
            Laplacian::Dense(m) => m.row(i).sum(),
            Laplacian::Sparse(s) => s.rows[i].values().sum(),
        }
    }

    /// Largest diagonal entry, i.e. the largest weighted degree; `0.0` for an empty matrix.
    pub fn max_diagonal(&self) -> f64 {
        (0..self.dim()).map(|i| self.get(i, i)).fold(0.0, f64::max)
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Laplacian::Dense(m) => m.clone(),
            Laplacian::Sparse(s) => {
                let n = s.rows.len();
                let mut m = DMatrix::zeros(n, n);
                for (i, row) in s.rows.iter().enumerate() {
                    for (&j, &v) in row {
                        m[(i, j)] = v;
                    }
                }
                m
            }
        }
    }

    pub fn into_dense(self) -> DMatrix<f64> {
        match self {
            Laplacian::Dense(m) => m,
            sparse => sparse.to_dense(),
        }
    }
}

pub fn build_laplacian(graph: &Graph, resolver: &AttributeResolver<'_>) -> Result<Laplacian> {
    let endpoints = graph.edge_endpoints()?;
    let n = graph.node_count();
    let dense = prefers_dense(n, endpoints.len());
    let mut laplacian = Laplacian::zeros(n, dense);

    // Off-diagonal (-A) first; the degrees are kept aside and merged into the diagonal at the end.
    let mut degree = vec![0.0_f64; n];
    for (edge, &(u, v)) in graph.edges.iter().zip(&endpoints) {
        let val = resolver.signed_weight(edge);
        laplacian.add(u, v, -val);
        laplacian.add(v, u, -val);
        degree[u] += val.abs();
        degree[v] += val.abs();
    }
    for (i, d) in degree.into_iter().enumerate() {
        if d != 0.0 || !laplacian.is_sparse() {
            laplacian.add(i, i, d);
        }
    }

    tracing::debug!(
        nodes = n,
        edges = endpoints.len(),
        sparse = laplacian.is_sparse(),
        "built graph laplacian"
    );
    Ok(laplacian)
}
