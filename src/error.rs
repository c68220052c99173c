use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpiError {
    #[error("Invalid payment URI: {0}")]
    InvalidUri(String),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Host error: {0}")]
    Host(String),
    #[error("Result channel closed before a payment response arrived")]
    ResultChannelClosed,
}

pub type Result<T> = std::result::Result<T, UpiError>;
