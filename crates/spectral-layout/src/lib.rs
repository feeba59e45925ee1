#![forbid(unsafe_code)]

//! Headless spectral graph layout.
//!
//! Nodes are placed on the eigenvectors belonging to the smallest non-zero eigenvalues of the
//! signed, weighted graph Laplacian `L = D - A` (Kunegis et al., "Spectral Analysis of Signed
//! Graphs for Clustering, Prediction and Visualization").
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`attribute::AttributeResolver`] turns edge attributes into weights and signs.
//! 2. [`laplacian::build_laplacian`] assembles the symmetric Laplacian (dense or sparse).
//! 3. [`eigen::decompose`] computes the full symmetric eigendecomposition.
//! 4. [`select::select_smallest_nonzero`] keeps the four smallest non-zero eigenpairs.
//! 5. [`project::project`] maps the selected eigenvectors to `(x, y)` coordinates.
//!
//! [`SpectralLayout`] wraps the pipeline in the init/apply/end session used by layout hosts;
//! [`layout`] is the one-shot variant.

pub mod attribute;
pub mod eigen;
pub mod error;
pub mod graph;
pub mod laplacian;
pub mod options;
pub mod project;
pub mod select;
pub mod session;

pub use attribute::AttributeResolver;
pub use eigen::EigenDecomposition;
pub use error::{DecompositionFailure, Error, Result};
pub use graph::{AttributeValue, Edge, Graph, LayoutResult, Node, Point};
pub use laplacian::Laplacian;
pub use options::{LAYOUT_NAME, SpectralOptions};
pub use project::{AREA_SCALE, Embedding};
pub use select::{EMBEDDING_COMPONENTS, EigenSelection, SelectedEigenpair};
pub use session::{SessionState, SpectralLayout};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point: computes the embedding and projects it without mutating the
/// graph. Out-of-range options are normalised first, as [`SpectralOptions::normalized`] does.
pub fn layout(graph: &Graph, options: &SpectralOptions) -> Result<LayoutResult> {
    let options = options.clone().normalized();
    let embedding = session::compute_embedding(graph, &options)?;
    let points = project::project(&embedding, &options);

    let mut positions = indexmap::IndexMap::with_capacity(graph.nodes.len());
    for (node, point) in graph.nodes.iter().zip(points) {
        positions.insert(node.id.clone(), point);
    }

    Ok(LayoutResult {
        positions,
        eigenvalues: embedding.eigenvalues,
    })
}
