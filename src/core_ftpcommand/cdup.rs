// src/core_ftpcommand/cdup.rs
use crate::client::FtpClient;
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;

impl FtpClient {
    pub async fn change_to_parent_directory(&mut self) -> FtpResult<()> {
        let code = self.send_command(FtpCommand::CDUP, None).await?;
        if code / 100 != 2 {
            return Err(FtpClientError::DirectoryAccessFailure(format!(
                "{} (CDUP)",
                self.response_text()
            )));
        }
        Ok(())
    }
}
