#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references a missing endpoint: {endpoint}")]
    MissingEndpoint { edge: String, endpoint: String },

    #[error("graph contains a duplicated node id: {id}")]
    DuplicateNode { id: String },

    #[error("graph has {actual} nodes but the embedding was computed for {expected}")]
    NodeCountMismatch { expected: usize, actual: usize },

    #[error("symmetric eigendecomposition of the {dim}x{dim} Laplacian failed: {reason}")]
    Decomposition {
        dim: usize,
        reason: DecompositionFailure,
    },

    #[error("layout applied before a successful init")]
    NotInitialized,

    #[error("layout already applied; end the session before applying again")]
    AlreadyApplied,

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
}

/// Why the eigensolver gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionFailure {
    /// The Laplacian holds a NaN or infinite entry, typically from a non-finite edge weight.
    NonFiniteInput,
    /// The iteration cap was reached.
    NoConvergence,
    NonFiniteOutput,
}

impl std::fmt::Display for DecompositionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecompositionFailure::NonFiniteInput => write!(f, "matrix has non-finite entries"),
            DecompositionFailure::NoConvergence => write!(f, "did not converge"),
            DecompositionFailure::NonFiniteOutput => {
                write!(f, "produced non-finite eigenpairs")
            }
        }
    }
}

impl Error {
    /// Whether the error comes from the graph or configuration handed to the layout, as opposed
    /// to a numerical failure or a session misuse.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingEndpoint { .. }
                | Error::DuplicateNode { .. }
                | Error::NodeCountMismatch { .. }
                | Error::InvalidOptions { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
