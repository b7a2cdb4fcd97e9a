use thiserror::Error;

/// Errors returned by the fuzzy clustering core.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A partial result names a cluster id that is not part of the run.
    #[error("no cluster with id {0}")]
    UnknownCluster(u32),

    /// A vector does not match the dimensionality of the cluster it meets.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A required configuration key is absent.
    #[error("missing configuration key {0}")]
    MissingKey(&'static str),

    /// A configuration value could not be parsed.
    #[error("unparsable value for {key}: {value:?}")]
    UnparsableValue {
        /// Configuration key.
        key: &'static str,
        /// Raw value as supplied.
        value: String,
    },

    /// No distance measure is registered under this name.
    #[error("unknown distance measure {0:?}")]
    UnknownMeasure(String),

    /// A persisted cluster record could not be decoded.
    #[error("cannot decode cluster record {record:?}: {field}: {message}")]
    Decode {
        /// The offending record.
        record: String,
        /// Which part of the record failed (`prefix`, `id`, `center`).
        field: &'static str,
        /// Human-readable explanation.
        message: String,
    },
}

impl Error {
    pub(crate) fn decode(record: &str, field: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            record: record.to_string(),
            field,
            message: message.into(),
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
