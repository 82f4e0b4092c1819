//! The protocol engine.
//!
//! `FtpClient` owns the control channel. Exactly one command is outstanding
//! at a time: every command is written, then its full reply is read before
//! anything else happens on the channel. The high-level operations live in
//! `core_ftpcommand` (one file per command), data-channel negotiation in
//! `core_network`, traversal in `core_tree` and reconnection in
//! `core_reconnect`.

use crate::constants::{
    DEFAULT_ACCEPT_TIMEOUT, DEFAULT_CONTROL_PORT, DEFAULT_RECONNECT_TIMEOUT,
    DEFAULT_RETRY_INTERVAL,
};
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::response::{read_response, FtpResponse};
use crate::core_transport::{Connector, LineTransport};
use crate::session::{DataMode, Session};
use log::{debug, info, trace};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// Tunables applied by the engine.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Data mode installed on every successful connect.
    pub data_mode: DataMode,
    /// Address advertised in PORT. Defaults to the control connection's local IPv4.
    pub active_address: Option<Ipv4Addr>,
    /// Bound on waiting for the server's inbound data connection in active mode.
    pub accept_timeout: Duration,
    pub reconnect_timeout: Duration,
    pub retry_interval: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            data_mode: DataMode::Passive,
            active_address: None,
            accept_timeout: DEFAULT_ACCEPT_TIMEOUT,
            reconnect_timeout: DEFAULT_RECONNECT_TIMEOUT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

pub struct FtpClient {
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) options: ClientOptions,
    pub(crate) session: Session,
}

/// Opens a control transport and reads the greeting, which must be 2xx.
///
/// The transport is closed again on every failure path.
pub(crate) async fn open_control(
    connector: &dyn Connector,
    host: &str,
    port: u16,
) -> FtpResult<(Box<dyn LineTransport>, FtpResponse)> {
    let mut transport = connector.open(host, port).await.map_err(|e| {
        FtpClientError::ConnectionFailure(format!(
            "Error when trying to connect to {}:{}: {}",
            host, port, e
        ))
    })?;

    let greeting = match read_response(transport.as_mut()).await {
        Ok(greeting) => greeting,
        Err(e) => {
            let _ = transport.close().await;
            return Err(FtpClientError::ConnectionFailure(format!(
                "No valid greeting from {}:{}: {}",
                host, port, e
            )));
        }
    };

    if !greeting.is_completion() {
        let _ = transport.close().await;
        return Err(FtpClientError::ConnectionFailure(format!(
            "{} (FTP server refused connection)",
            greeting.text()
        )));
    }

    Ok((transport, greeting))
}

impl FtpClient {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self::with_options(connector, ClientOptions::default())
    }

    pub fn with_options(connector: Arc<dyn Connector>, options: ClientOptions) -> Self {
        Self {
            connector,
            options,
            session: Session::new(),
        }
    }

    /// Opens the control channel and validates the greeting.
    pub async fn connect(&mut self, host: &str, port: u16) -> FtpResult<()> {
        if let Some(mut previous) = self.session.control.take() {
            let _ = previous.close().await;
        }
        self.session.reset();

        let (transport, greeting) = open_control(self.connector.as_ref(), host, port).await?;
        self.install(transport, greeting);
        info!("Connected to {}:{}", host, port);
        Ok(())
    }

    pub async fn connect_default_port(&mut self, host: &str) -> FtpResult<()> {
        self.connect(host, DEFAULT_CONTROL_PORT).await
    }

    pub(crate) fn install(&mut self, transport: Box<dyn LineTransport>, greeting: FtpResponse) {
        self.session.control = Some(transport);
        self.session.is_connected = true;
        self.session.data_mode = self.options.data_mode;
        self.record(&greeting);
    }

    fn record(&mut self, response: &FtpResponse) {
        self.session.response_code = response.code;
        self.session.response_text = response.text();
    }

    /// Sends `verb[ arg]` and reads its full reply. Returns the reply code.
    pub async fn send_command(&mut self, command: FtpCommand, arg: Option<&str>) -> FtpResult<u16> {
        let control = self
            .session
            .control
            .as_mut()
            .ok_or(FtpClientError::NotConnected)?;

        trace!(">>> {}", command.to_log_line(arg));
        control.send_line(&command.to_line(arg)).await?;
        self.read_reply().await
    }

    /// Reads a reply that was deferred, such as the completion of a transfer.
    pub(crate) async fn read_reply(&mut self) -> FtpResult<u16> {
        let control = self
            .session
            .control
            .as_mut()
            .ok_or(FtpClientError::NotConnected)?;

        let response = match read_response(control.as_mut()).await {
            Ok(response) => response,
            Err(e) => {
                if matches!(e, FtpClientError::ControlChannelClosed(_)) {
                    self.session.is_connected = false;
                }
                return Err(e);
            }
        };
        self.record(&response);

        if response.code == 421 {
            self.session.is_connected = false;
            return Err(FtpClientError::ControlChannelClosed(response.text()));
        }
        Ok(response.code)
    }

    /// Closes the control channel. Session state is reset even when closing fails.
    pub async fn disconnect(&mut self) -> FtpResult<()> {
        let closed = match self.session.control.take() {
            Some(mut control) => control.close().await,
            None => Ok(()),
        };
        self.session.reset();
        debug!("Session state reset");
        closed.map_err(|e| FtpClientError::DisconnectFailure(format!("Disconnection failed: {}", e)))
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected
    }

    pub fn response_code(&self) -> u16 {
        self.session.response_code
    }

    pub fn response_text(&self) -> &str {
        &self.session.response_text
    }

    pub fn data_mode(&self) -> DataMode {
        self.session.data_mode
    }

    pub fn set_data_mode(&mut self, mode: DataMode) {
        self.session.data_mode = mode;
    }

    pub fn passive_endpoint(&self) -> Option<(&str, u16)> {
        self.session
            .pasv_endpoint
            .as_ref()
            .map(|(host, port)| (host.as_str(), *port))
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}
