// src/core_ftpcommand/user.rs
use crate::client::FtpClient;
use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use log::{info, warn};

impl FtpClient {
    /// USER, then PASS when the server asks for one.
    ///
    /// Returns `true` once the server accepts the credentials.
    pub async fn login(&mut self, user: &str, password: &str) -> FtpResult<bool> {
        let code = self.send_command(FtpCommand::USER, Some(user)).await?;
        let accepted = match code / 100 {
            2 => true,
            3 => {
                let code = self.send_command(FtpCommand::PASS, Some(password)).await?;
                code / 100 == 2
            }
            _ => false,
        };

        if accepted {
            info!("Logged in as {}", user);
        } else {
            warn!("Login as {} refused: {}", user, self.response_text());
        }
        Ok(accepted)
    }
}
