//! Data-channel negotiation for LIST and friends.

use crate::client::FtpClient;
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::address::resolve_active_ipv4;
use crate::core_network::pasv::parse_pasv_reply;
use crate::core_network::port::format_port_argument;
use crate::core_transport::{DataListener, LineTransport};
use crate::session::DataMode;
use log::{debug, warn};
use std::net::{IpAddr, Ipv4Addr};

impl FtpClient {
    /// Negotiates a data connection and issues `command` over the control channel.
    ///
    /// Returns `None` when the server refuses the command with a non-1xx
    /// reply. In active mode a failed setup (listener, address discovery or
    /// PORT refusal) falls back to passive mode for this attempt only.
    pub async fn ask_data_connection(
        &mut self,
        command: FtpCommand,
        arg: Option<&str>,
    ) -> FtpResult<Option<Box<dyn LineTransport>>> {
        if self.session.control.is_none() {
            return Err(FtpClientError::NotConnected);
        }

        if self.session.data_mode == DataMode::Active {
            match self.prepare_active().await {
                Ok(listener) => return self.finish_active(listener, command, arg).await,
                Err(e) if e.is_recoverable() || matches!(e, FtpClientError::Io(_)) => {
                    warn!("Active mode setup failed ({}), falling back to passive mode", e);
                }
                Err(e) => return Err(e),
            }
        }

        let mut data = self.open_passive().await?;
        let code = match self.send_command(command, arg).await {
            Ok(code) => code,
            Err(e) => {
                let _ = data.close().await;
                return Err(e);
            }
        };
        if code / 100 != 1 {
            debug!("{} refused: {}", command, self.response_text());
            let _ = data.close().await;
            return Ok(None);
        }
        Ok(Some(data))
    }

    async fn open_passive(&mut self) -> FtpResult<Box<dyn LineTransport>> {
        let code = self.send_command(FtpCommand::PASV, None).await?;
        if code / 100 != 2 {
            return Err(FtpClientError::DataChannelFailure(format!(
                "{} (Cannot switch to passive mode)",
                self.response_text()
            )));
        }

        let (host, port) = parse_pasv_reply(self.response_text())?;
        debug!("Opening passive data connection to {}:{}", host, port);
        let data = self.connector.open(&host, port).await.map_err(|e| {
            FtpClientError::DataChannelFailure(format!(
                "Cannot open data connection to {}:{}: {}",
                host, port, e
            ))
        })?;
        self.session.pasv_endpoint = Some((host, port));
        Ok(data)
    }

    async fn prepare_active(&mut self) -> FtpResult<Box<dyn DataListener>> {
        let local = self
            .session
            .control
            .as_ref()
            .and_then(|control| control.local_addr());
        let ip = resolve_active_ipv4(self.options.active_address, local)?;

        let listener = self
            .connector
            .listen(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .await
            .map_err(|e| {
                FtpClientError::DataChannelFailure(format!("Cannot listen for data connection: {}", e))
            })?;

        let arg = format_port_argument(ip, listener.local_port());
        let code = self.send_command(FtpCommand::PORT, Some(&arg)).await?;
        if code / 100 != 2 {
            return Err(FtpClientError::DataChannelFailure(format!(
                "{} (PORT {} rejected)",
                self.response_text(),
                arg
            )));
        }
        debug!("Listening for active data connection on {}:{}", ip, listener.local_port());
        Ok(listener)
    }

    async fn finish_active(
        &mut self,
        mut listener: Box<dyn DataListener>,
        command: FtpCommand,
        arg: Option<&str>,
    ) -> FtpResult<Option<Box<dyn LineTransport>>> {
        let code = self.send_command(command, arg).await?;
        if code / 100 != 1 {
            debug!("{} refused: {}", command, self.response_text());
            return Ok(None);
        }

        let data = match listener.accept(self.options.accept_timeout).await {
            Ok(data) => data,
            Err(e) => {
                // The server still owes the reply that ends the refused transfer.
                self.read_reply().await?;
                return Err(FtpClientError::DataChannelFailure(format!(
                    "No inbound data connection: {}",
                    e
                )));
            }
        };
        debug!("Active data connection accepted");
        Ok(Some(data))
    }
}
