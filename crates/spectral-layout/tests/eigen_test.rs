use nalgebra::DMatrix;
use spectral_layout::eigen::{decompose, decompose_symmetric};
use spectral_layout::laplacian::build_laplacian;
use spectral_layout::{AttributeResolver, DecompositionFailure, Edge, Graph, SpectralOptions};

fn cycle(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(format!("n{i}"));
    }
    for i in 0..n {
        g.add_edge(Edge::new(format!("n{i}"), format!("n{}", (i + 1) % n)));
    }
    g
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

#[test]
fn cycle_of_four_spectrum_is_0_2_2_4() {
    let opts = SpectralOptions::default();
    let l = build_laplacian(&cycle(4), &AttributeResolver::new(&opts)).expect("laplacian");
    let matrix = l.to_dense();
    let eig = decompose(l, 0).expect("decomposition");

    let values = sorted(eig.values.as_slice());
    for (got, want) in values.iter().zip([0.0, 2.0, 2.0, 4.0]) {
        assert!((got - want).abs() < 1e-9, "eigenvalue {got} != {want}");
    }

    // L v = lambda v, with orthonormal eigenvectors.
    for k in 0..4 {
        let v = eig.vectors.column(k).into_owned();
        let residual = &matrix * &v - &v * eig.values[k];
        assert!(residual.norm() < 1e-9, "residual {}", residual.norm());
    }
    let gram = eig.vectors.transpose() * &eig.vectors;
    assert!((gram - DMatrix::<f64>::identity(4, 4)).norm() < 1e-9);
}

#[test]
fn sparse_laplacians_decompose_like_dense_ones() {
    // Ring over 12 nodes: 144 > 48 selects sparse storage.
    let opts = SpectralOptions::default();
    let l = build_laplacian(&cycle(12), &AttributeResolver::new(&opts)).expect("laplacian");
    assert!(l.is_sparse());
    let eig = decompose(l, 0).expect("decomposition");

    let values = sorted(eig.values.as_slice());
    let mut expected: Vec<f64> = (0..12)
        .map(|k| 2.0 - 2.0 * (2.0 * std::f64::consts::PI * k as f64 / 12.0).cos())
        .collect();
    expected.sort_by(f64::total_cmp);
    for (got, want) in values.iter().zip(&expected) {
        assert!((got - want).abs() < 1e-9, "eigenvalue {got} != {want}");
    }
}

#[test]
fn degenerate_sizes_are_answered_directly() {
    let empty = decompose_symmetric(DMatrix::zeros(0, 0), 0).expect("empty");
    assert!(empty.is_empty());

    let single = decompose_symmetric(DMatrix::from_element(1, 1, 3.0), 0).expect("single");
    assert_eq!(single.values.as_slice(), &[3.0]);
    assert_eq!(single.vectors[(0, 0)], 1.0);
}

#[test]
fn non_finite_input_is_a_decomposition_error() {
    let mut m = DMatrix::<f64>::identity(3, 3);
    m[(1, 1)] = f64::NAN;
    let err = decompose_symmetric(m, 0).unwrap_err();
    assert!(matches!(
        err,
        spectral_layout::Error::Decomposition {
            dim: 3,
            reason: DecompositionFailure::NonFiniteInput
        }
    ));
    assert!(!err.is_input_error());
    assert!(err.to_string().contains("non-finite"), "{err}");
}

#[test]
fn hitting_the_iteration_cap_is_reported_as_non_convergence() {
    // Tridiagonal with non-zero off-diagonals: one QR sweep cannot finish it.
    let n = 10;
    let mut m = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        m[(i, i)] = 2.0;
        if i + 1 < n {
            m[(i, i + 1)] = -1.0;
            m[(i + 1, i)] = -1.0;
        }
    }
    let err = decompose_symmetric(m, 1).unwrap_err();
    assert!(matches!(
        err,
        spectral_layout::Error::Decomposition {
            dim: 10,
            reason: DecompositionFailure::NoConvergence
        }
    ));
    assert!(err.to_string().contains("did not converge"), "{err}");
}
