// src/core_ftpcommand/quit.rs
use crate::client::FtpClient;
use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use log::info;

impl FtpClient {
    /// Sends QUIT. The control transport stays open until `disconnect`.
    pub async fn logout(&mut self) -> FtpResult<bool> {
        let code = self.send_command(FtpCommand::QUIT, None).await?;
        if code / 100 == 2 {
            self.session.is_connected = false;
            info!("Logged out");
            return Ok(true);
        }
        Ok(false)
    }
}
