use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The language model could not produce a completion (network, auth, bad response).
    #[error("completion failed: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("could not set up the completion client: {0}")]
    ClientSetup(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed before the quiz finished")]
    InputClosed,
}

impl QuizError {
    pub fn is_completion_failure(&self) -> bool {
        matches!(self, QuizError::Completion(_))
    }
}

impl From<chatgpt::err::Error> for QuizError {
    fn from(err: chatgpt::err::Error) -> Self {
        QuizError::Completion(Box::new(err))
    }
}
