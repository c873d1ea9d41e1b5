use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsloomError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Rating error: {0}")]
    Rating(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
