use crate::error::{DecompositionFailure, Error, Result};
use crate::laplacian::Laplacian;
use nalgebra::{DMatrix, DVector, SymmetricEigen};

/// Full eigendecomposition of a symmetric matrix: `vectors.column(i)` belongs to `values[i]`.
///
/// No ordering is guaranteed. Within a repeated eigenvalue the basis (and every vector's sign)
/// is whatever the solver produced; it is stable for identical input but not canonical.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    pub values: DVector<f64>,
    pub vectors: DMatrix<f64>,
}

impl EigenDecomposition {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn decompose(laplacian: Laplacian, max_iterations: usize) -> Result<EigenDecomposition> {
    decompose_symmetric(laplacian.into_dense(), max_iterations)
}

pub fn decompose_symmetric(
    matrix: DMatrix<f64>,
    max_iterations: usize,
) -> Result<EigenDecomposition> {
    let dim = matrix.nrows();
    if !matrix.iter().all(|v| v.is_finite()) {
        return Err(Error::Decomposition {
            dim,
            reason: DecompositionFailure::NonFiniteInput,
        });
    }
    match dim {
        0 => {
            return Ok(EigenDecomposition {
                values: DVector::zeros(0),
                vectors: DMatrix::zeros(0, 0),
            });
        }
        1 => {
            return Ok(EigenDecomposition {
                values: DVector::from_element(1, matrix[(0, 0)]),
                vectors: DMatrix::identity(1, 1),
            });
        }
        _ => {}
    }

    let start = std::time::Instant::now();
    let eigen = SymmetricEigen::try_new(matrix, f64::EPSILON, max_iterations)
        .ok_or(Error::Decomposition {
            dim,
            reason: DecompositionFailure::NoConvergence,
        })?;
    if !(eigen.eigenvalues.iter().all(|v| v.is_finite())
        && eigen.eigenvectors.iter().all(|v| v.is_finite()))
    {
        return Err(Error::Decomposition {
            dim,
            reason: DecompositionFailure::NonFiniteOutput,
        });
    }
    tracing::debug!(dim, elapsed = ?start.elapsed(), "symmetric eigendecomposition");

    Ok(EigenDecomposition {
        values: eigen.eigenvalues,
        vectors: eigen.eigenvectors,
    })
}
