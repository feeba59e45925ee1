use crate::attribute::AttributeResolver;
use crate::eigen;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::laplacian;
use crate::options::SpectralOptions;
use crate::project::{self, Embedding};
use crate::select::{self, EMBEDDING_COMPONENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No embedding; `init` has not run or the session was ended.
    Uninitialized,
    /// Embedding computed, coordinates not written yet.
    Ready,
    /// Coordinates written; the session must be ended before applying again.
    Applied,
}

/// Layout session driven by a host: `init` computes the embedding, `apply` writes coordinates,
/// `end` clears the session.
///
/// The graph is borrowed for the duration of each call only; the session never keeps a
/// reference to it.
#[derive(Debug, Clone, Default)]
pub struct SpectralLayout {
    options: SpectralOptions,
    embedding: Option<Embedding>,
    applied: bool,
}

impl SpectralLayout {
    pub fn new(options: SpectralOptions) -> Self {
        Self {
            options: options.normalized(),
            embedding: None,
            applied: false,
        }
    }

    pub fn options(&self) -> &SpectralOptions {
        &self.options
    }

    /// Projection parameters (scale, blend coefficients) may be changed between `init` and
    /// `apply`; attribute settings only take effect on the next `init`.
    pub fn options_mut(&mut self) -> &mut SpectralOptions {
        &mut self.options
    }

    pub fn state(&self) -> SessionState {
        match (&self.embedding, self.applied) {
            (None, _) => SessionState::Uninitialized,
            (Some(_), false) => SessionState::Ready,
            (Some(_), true) => SessionState::Applied,
        }
    }

    pub fn can_apply(&self) -> bool {
        self.state() == SessionState::Ready
    }

    pub fn embedding(&self) -> Option<&Embedding> {
        self.embedding.as_ref()
    }

    /// Builds the Laplacian, decomposes it and keeps the selected eigenvectors.
    ///
    /// On failure the previous embedding is discarded and the session is left uninitialized.
    pub fn init(&mut self, graph: &Graph) -> Result<()> {
        self.embedding = None;
        self.applied = false;
        let embedding = compute_embedding(graph, &self.options.clone().normalized())?;
        self.embedding = Some(embedding);
        tracing::debug!(nodes = graph.node_count(), "spectral layout initialized");
        Ok(())
    }

    /// Writes the projected coordinates into the graph's nodes.
    pub fn apply(&mut self, graph: &mut Graph) -> Result<()> {
        let embedding = self.embedding.as_ref().ok_or(Error::NotInitialized)?;
        if self.applied {
            return Err(Error::AlreadyApplied);
        }
        if embedding.node_count() != graph.node_count() {
            return Err(Error::NodeCountMismatch {
                expected: embedding.node_count(),
                actual: graph.node_count(),
            });
        }

        // The fields are public, so `options_mut` may have left them out of range.
        let options = self.options.clone().normalized();
        let points = project::project(embedding, &options);
        for (node, p) in graph.nodes.iter_mut().zip(points) {
            node.x = p.x;
            node.y = p.y;
        }
        self.applied = true;
        tracing::debug!(scale = options.scale, "spectral layout applied");
        Ok(())
    }

    /// Drops the embedding and every node's transient layout data.
    pub fn end(&mut self, graph: &mut Graph) {
        for node in &mut graph.nodes {
            node.layout_data = None;
        }
        self.embedding = None;
        self.applied = false;
        tracing::debug!("spectral layout ended");
    }
}

/// Runs the pipeline up to the selected eigenvectors. `options` must already be normalised.
pub(crate) fn compute_embedding(graph: &Graph, options: &SpectralOptions) -> Result<Embedding> {
    let resolver = AttributeResolver::new(options);
    let laplacian = laplacian::build_laplacian(graph, &resolver)?;
    let threshold = select::zero_threshold(options.zero_tolerance, laplacian.max_diagonal());
    let decomposition = eigen::decompose(laplacian, options.max_iterations)?;
    let selection = select::select_smallest_nonzero(decomposition.values.as_slice(), threshold);

    let filled = selection.filled();
    if filled < EMBEDDING_COMPONENTS && graph.node_count() > 0 {
        tracing::warn!(
            found = filled,
            wanted = EMBEDDING_COMPONENTS,
            "not enough non-zero eigenvalues; missing components are zero"
        );
    }
    tracing::debug!(indices = ?selection.indices(), "selected embedding components");

    Ok(Embedding::from_selection(&decomposition, &selection))
}
