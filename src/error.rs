use thiserror::Error;

/// Failure to retrieve or read the dataset resource.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {location}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input")]
    Parse(#[from] csv::Error),

    #[error("loader for {location} stopped before producing a result")]
    Interrupted { location: String },
}
