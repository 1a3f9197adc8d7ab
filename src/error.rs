use thiserror::Error;

#[derive(Error, Debug)]
pub enum BayesError {
    /// `predict` or `score` called before a successful `fit`.
    #[error("model has not been fitted")]
    UntrainedModel,

    #[error("invalid training data: {0}")]
    InvalidTrainingData(String),

    /// Accuracy or report requested over zero samples.
    #[error("cannot compute a ratio over zero samples")]
    DivisionByZero,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("row has {got} columns, model was trained on {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("column `{0}` not found in header")]
    MissingColumn(String),

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("token `{0}` was not seen when the encoder was fitted")]
    UnknownToken(String),

    #[error("code {0} is out of range for this encoder")]
    UnknownCode(u32),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BayesError>;
