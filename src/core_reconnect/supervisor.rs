//! Bounded-time reconnection.
//!
//! A worker task retries the control handshake until it succeeds and hands
//! the live transport back through a oneshot channel. The caller races that
//! channel against a deadline and aborts the worker when the deadline wins.

use crate::client::{open_control, FtpClient};
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::response::FtpResponse;
use crate::core_transport::{Connector, LineTransport};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

type Handshake = (Box<dyn LineTransport>, FtpResponse);

/// Retries the handshake with `host:port` every `retry_interval` until `limit` elapses.
pub async fn reconnect_within(
    connector: Arc<dyn Connector>,
    host: &str,
    port: u16,
    limit: Duration,
    retry_interval: Duration,
) -> FtpResult<Handshake> {
    let (tx, rx) = oneshot::channel::<Handshake>();
    let host = host.to_string();

    let worker = tokio::spawn(async move {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match open_control(connector.as_ref(), &host, port).await {
                Ok(handshake) => {
                    // The receiver is gone when the deadline already passed.
                    if let Err((mut transport, _)) = tx.send(handshake) {
                        let _ = transport.close().await;
                    }
                    return;
                }
                Err(e) => {
                    debug!("Reconnect attempt {} to {}:{} failed: {}", attempt, host, port, e);
                    sleep(retry_interval).await;
                }
            }
        }
    });

    match timeout(limit, rx).await {
        Ok(Ok(handshake)) => Ok(handshake),
        Ok(Err(_)) => Err(FtpClientError::ConnectionFailure(
            "Reconnect worker stopped unexpectedly".to_string(),
        )),
        Err(_) => {
            worker.abort();
            Err(FtpClientError::ReconnectTimeout(limit))
        }
    }
}

impl FtpClient {
    /// Replaces the current session with a fresh one, using the configured timeout.
    pub async fn reconnect(&mut self, host: &str, port: u16) -> FtpResult<()> {
        let limit = self.options.reconnect_timeout;
        self.reconnect_with_timeout(host, port, limit).await
    }

    /// Either leaves a fully connected session or no session at all.
    pub async fn reconnect_with_timeout(
        &mut self,
        host: &str,
        port: u16,
        limit: Duration,
    ) -> FtpResult<()> {
        if let Some(mut stale) = self.session.control.take() {
            let _ = stale.close().await;
        }
        self.session.reset();

        info!("Reconnecting to {}:{} (timeout {:?})", host, port, limit);
        match reconnect_within(
            Arc::clone(&self.connector),
            host,
            port,
            limit,
            self.options.retry_interval,
        )
        .await
        {
            Ok((transport, greeting)) => {
                self.install(transport, greeting);
                info!("Reconnected to {}:{}", host, port);
                Ok(())
            }
            Err(e) => {
                warn!("Reconnect to {}:{} failed: {}", host, port, e);
                Err(e)
            }
        }
    }
}
