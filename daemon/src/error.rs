use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("invalid value: {0}")]
    Types(#[from] ballot_types::TypesError),

    #[error("election error: {0}")]
    Election(#[from] ballot_election::ElectionError),

    #[error("action {index} ({action}) rejected: {source}")]
    Rejected {
        index: usize,
        action: String,
        source: ballot_election::ElectionError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
