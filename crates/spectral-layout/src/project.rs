use crate::eigen::EigenDecomposition;
use crate::graph::Point;
use crate::options::SpectralOptions;
use crate::select::{EMBEDDING_COMPONENTS, EigenSelection};
use nalgebra::DMatrix;

/// Fixed spread of the layout area; coordinates are `AREA_SCALE * scale` times the eigenvector
/// entries.
pub const AREA_SCALE: f64 = 512.0;

/// Selected eigenvectors, one column per component (`n x 4`). Components the selection could
/// not fill are zero columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub vectors: DMatrix<f64>,
    pub eigenvalues: [Option<f64>; EMBEDDING_COMPONENTS],
}

impl Embedding {
    pub fn from_selection(decomposition: &EigenDecomposition, selection: &EigenSelection) -> Self {
        let n = decomposition.len();
        let mut vectors = DMatrix::zeros(n, EMBEDDING_COMPONENTS);
        let mut eigenvalues = [None; EMBEDDING_COMPONENTS];
        for (k, slot) in selection.slots.iter().enumerate() {
            let Some(pair) = slot else {
                continue;
            };
            vectors
                .column_mut(k)
                .copy_from(&decomposition.vectors.column(pair.index));
            eigenvalues[k] = Some(decomposition.values[pair.index]);
        }
        Self {
            vectors,
            eigenvalues,
        }
    }

    pub fn node_count(&self) -> usize {
        self.vectors.nrows()
    }
}

/// Maps every node to
/// `x =  f * (c0 + third * c2)` and `y = -f * (c1 + fourth * c3)` with `f = AREA_SCALE * scale`.
pub fn project(embedding: &Embedding, options: &SpectralOptions) -> Vec<Point> {
    let f = AREA_SCALE * options.scale;
    let c = &embedding.vectors;
    (0..embedding.node_count())
        .map(|i| Point {
            x: f * (c[(i, 0)] + options.third_component * c[(i, 2)]),
            y: -f * (c[(i, 1)] + options.fourth_component * c[(i, 3)]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedding(rows: &[[f64; 4]]) -> Embedding {
        Embedding {
            vectors: DMatrix::from_fn(rows.len(), 4, |i, j| rows[i][j]),
            eigenvalues: [Some(1.0), Some(1.0), Some(2.0), Some(3.0)],
        }
    }

    #[test]
    fn projects_with_area_scale_and_flipped_y() {
        let e = embedding(&[[0.5, 0.25, 1.0, -1.0]]);
        let p = project(&e, &SpectralOptions::default());
        assert_eq!(p, vec![Point { x: 256.0, y: -128.0 }]);
    }

    #[test]
    fn blends_third_and_fourth_components() {
        let e = embedding(&[[0.5, 0.25, 1.0, -1.0]]);
        let opts = SpectralOptions {
            scale: 2.0,
            third_component: 0.5,
            fourth_component: 0.25,
            ..Default::default()
        };
        let p = project(&e, &opts);
        assert_eq!(p[0].x, 1024.0 * (0.5 + 0.5));
        assert_eq!(p[0].y, -1024.0 * (0.25 - 0.25));
    }
}
