// src/core_ftpcommand/pwd.rs
use crate::client::FtpClient;
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;

/// Returns the text between the first pair of double quotes.
pub fn quoted_path(text: &str) -> Option<&str> {
    let start = text.find('"')? + 1;
    let len = text[start..].find('"')?;
    Some(&text[start..start + len])
}

impl FtpClient {
    /// Asks the server for its current directory.
    pub async fn working_directory_name(&mut self) -> FtpResult<String> {
        let code = self.send_command(FtpCommand::PWD, None).await?;
        if code == 550 {
            return Err(FtpClientError::DirectoryAccessFailure(format!(
                "{} (PWD)",
                self.response_text()
            )));
        }
        if code / 100 != 2 {
            return Err(FtpClientError::DataChannelFailure(format!(
                "{} (PWD)",
                self.response_text()
            )));
        }

        quoted_path(self.response_text())
            .map(str::to_string)
            .ok_or_else(|| {
                FtpClientError::BadResponse(format!(
                    "No quoted path in PWD reply: {}",
                    self.response_text()
                ))
            })
    }
}
