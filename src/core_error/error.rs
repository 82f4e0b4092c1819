// Error taxonomy for the FTP client engine
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpClientError {
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("Badly formatted or incomplete response: {0}")]
    BadResponse(String),

    #[error("Control channel closed by the FTP server: {0}")]
    ControlChannelClosed(String),

    #[error("Data channel failure: {0}")]
    DataChannelFailure(String),

    #[error("Cannot access directory: {0}")]
    DirectoryAccessFailure(String),

    #[error("Disconnection failed: {0}")]
    DisconnectFailure(String),

    #[error("Reconnection timeout exceeded after {0:?}")]
    ReconnectTimeout(Duration),

    #[error("Cannot parse listing line: {0}")]
    ListingParse(String),

    #[error("Not connected to an FTP server")]
    NotConnected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FtpResult<T> = Result<T, FtpClientError>;

impl FtpClientError {
    /// Errors the tree traversal absorbs by leaving the subtree unexplored.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FtpClientError::DirectoryAccessFailure(_) | FtpClientError::DataChannelFailure(_)
        )
    }

    /// Reply code carried in the message, when the error came from a server reply.
    pub fn reply_code(&self) -> Option<u16> {
        let message = match self {
            FtpClientError::ConnectionFailure(m)
            | FtpClientError::ControlChannelClosed(m)
            | FtpClientError::DataChannelFailure(m)
            | FtpClientError::DirectoryAccessFailure(m) => m,
            _ => return None,
        };
        let code = message.get(..3)?;
        if code.bytes().all(|b| b.is_ascii_digit()) {
            code.parse().ok()
        } else {
            None
        }
    }
}
