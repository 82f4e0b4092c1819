// src/core_ftpcommand/list.rs
use crate::client::FtpClient;
use crate::core_error::{FtpClientError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_transport::LineTransport;
use crate::core_tree::listing::parse_listing_line;
use crate::core_tree::node::Node;
use log::{debug, warn};

/// Drains a data channel, turning each listing line into a child of `parent`.
async fn read_listing(data: &mut dyn LineTransport, parent: &Node) -> std::io::Result<Vec<Node>> {
    let mut nodes = Vec::new();
    while let Some(line) = data.receive_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_listing_line(&line, parent) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!("Skipping listing entry: {}", e),
        }
    }
    Ok(nodes)
}

impl FtpClient {
    /// Lists `directory` (the current directory when `None`).
    ///
    /// The returned nodes are not attached to `parent`; their pathnames and
    /// depths are derived from it.
    pub async fn list(&mut self, directory: Option<&str>, parent: &Node) -> FtpResult<Vec<Node>> {
        let mut data = match self.ask_data_connection(FtpCommand::LIST, directory).await? {
            Some(data) if self.response_code() / 100 <= 2 => data,
            Some(mut data) => {
                let _ = data.close().await;
                return Err(self.list_refused(directory));
            }
            None => return Err(self.list_refused(directory)),
        };

        let read = read_listing(data.as_mut(), parent).await;
        if let Err(e) = data.close().await {
            debug!("Closing data channel failed: {}", e);
        }

        // The transfer completion reply is read even after a broken data channel.
        let code = self.read_reply().await?;
        let nodes = read.map_err(|e| {
            FtpClientError::DataChannelFailure(format!("Listing transfer interrupted: {}", e))
        })?;
        if code / 100 != 2 {
            warn!("Listing of {} ended with: {}", parent.pathname(), self.response_text());
        }
        debug!("Listed {} entries for {}", nodes.len(), parent.pathname());
        Ok(nodes)
    }

    fn list_refused(&self, directory: Option<&str>) -> FtpClientError {
        FtpClientError::DataChannelFailure(format!(
            "{} (LIST {})",
            self.response_text(),
            directory.unwrap_or(".")
        ))
    }
}
