// src/core_ftpcommand/cwd.rs
use crate::client::FtpClient;
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;

impl FtpClient {
    pub async fn change_working_directory(&mut self, path: &str) -> FtpResult<()> {
        let code = self.send_command(FtpCommand::CWD, Some(path)).await?;
        if code / 100 != 2 {
            return Err(FtpClientError::DirectoryAccessFailure(format!(
                "{} (CWD {})",
                self.response_text(),
                path
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::FtpClient;
    use crate::core_error::FtpClientError;
    use crate::core_transport::fake::{dir_line, FakeServer, CONTROL_PORT};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_cwd() {
        let server = FakeServer::new()
            .with_dir("/", &[dir_line("pub")])
            .with_dir("/pub", &[]);
        let mut ftp = FtpClient::new(Arc::new(server.clone()));
        ftp.connect("127.0.0.1", CONTROL_PORT).await.unwrap();

        ftp.change_working_directory("/pub").await.unwrap();
        assert_eq!(server.cwd(), "/pub");

        let err = ftp.change_working_directory("/nowhere").await.unwrap_err();
        assert!(matches!(err, FtpClientError::DirectoryAccessFailure(_)));
        assert_eq!(err.reply_code(), Some(550));
        assert_eq!(server.cwd(), "/pub");
    }
}
