//! Reply parsing for the control channel.
//!
//! A reply is a 3-digit code followed by `' '` (final line) or `'-'` (opens a
//! multi-line reply). A multi-line reply ends at the first later line that
//! starts with the same code followed by a space:
//! ```text
//! 230-Welcome
//! 230-Second line
//! 230 Login successful.
//! ```

use crate::core_error::{FtpClientError, FtpResult};
use crate::core_transport::LineTransport;
use log::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FtpResponse {
    pub code: u16,
    pub lines: Vec<String>,
}

impl FtpResponse {
    /// All lines of the reply concatenated in the order received.
    pub fn text(&self) -> String {
        self.lines.concat()
    }

    /// Hundreds digit of the reply code.
    pub fn class(&self) -> u16 {
        self.code / 100
    }

    pub fn is_completion(&self) -> bool {
        self.class() == 2
    }
}

async fn next_line(transport: &mut dyn LineTransport) -> FtpResult<String> {
    match transport.receive_line().await? {
        Some(line) => {
            trace!("<<< {}", line);
            Ok(line)
        }
        None => Err(FtpClientError::ControlChannelClosed(
            "Control channel has been closed by the FTP server".to_string(),
        )),
    }
}

/// Reads one complete, possibly multi-line, reply.
pub async fn read_response(transport: &mut dyn LineTransport) -> FtpResult<FtpResponse> {
    let first = next_line(transport).await?;
    if first.len() < 3 {
        return Err(FtpClientError::BadResponse(format!(
            "Response too short: '{}'",
            first
        )));
    }

    let digits = first
        .get(..3)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| FtpClientError::BadResponse(format!("Invalid reply code in: '{}'", first)))?
        .to_string();
    let code: u16 = digits
        .parse()
        .map_err(|_| FtpClientError::BadResponse(format!("Invalid reply code in: '{}'", first)))?;

    let multi_line = first.as_bytes().get(3) == Some(&b'-');
    let mut lines = vec![first];
    if multi_line {
        let terminator = format!("{} ", digits);
        loop {
            let next = next_line(transport).await?;
            let done = next.starts_with(&terminator);
            lines.push(next);
            if done {
                break;
            }
        }
    }

    Ok(FtpResponse { code, lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::io;
    use std::net::SocketAddr;

    struct Canned(VecDeque<String>);

    impl Canned {
        fn from_wire(wire: &str) -> Self {
            Canned(wire.lines().map(|l| l.trim_end_matches('\r').to_string()).collect())
        }
    }

    #[async_trait]
    impl LineTransport for Canned {
        async fn send_line(&mut self, _line: &str) -> io::Result<()> {
            Ok(())
        }

        async fn receive_line(&mut self) -> io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }

        async fn close(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn local_addr(&self) -> Option<SocketAddr> {
            None
        }
    }

    #[tokio::test]
    async fn test_multi_line_reply_keeps_order() {
        let mut transport = Canned::from_wire("230-Hi\r\n230 Done\r\n");
        let resp = read_response(&mut transport).await.unwrap();
        assert_eq!(resp.code, 230);
        assert_eq!(resp.text(), "230-Hi230 Done");
        assert!(resp.is_completion());
    }

    #[tokio::test]
    async fn test_multi_line_ignores_other_codes_inside() {
        let mut transport =
            Canned::from_wire("211-Features:\r\n MDTM\r\n200 not the end\r\n211 End\r\n220 next\r\n");
        let resp = read_response(&mut transport).await.unwrap();
        assert_eq!(resp.code, 211);
        assert_eq!(resp.lines.len(), 4);
        // The following reply is left for the next read.
        assert_eq!(read_response(&mut transport).await.unwrap().code, 220);
    }

    #[tokio::test]
    async fn test_single_line_reply() {
        let mut transport = Canned::from_wire("227 Entering Passive Mode (127,0,0,1,19,136)\r\n");
        let resp = read_response(&mut transport).await.unwrap();
        assert_eq!(resp.code, 227);
        assert_eq!(resp.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_short_line_is_bad_response() {
        for wire in ["22", "", "2"] {
            let mut transport = Canned(VecDeque::from(vec![wire.to_string()]));
            let err = read_response(&mut transport).await.unwrap_err();
            assert!(matches!(err, FtpClientError::BadResponse(_)), "{:?}", wire);
        }
    }

    #[tokio::test]
    async fn test_non_numeric_code_is_bad_response() {
        let mut transport = Canned::from_wire("abc hello\r\n");
        let err = read_response(&mut transport).await.unwrap_err();
        assert!(matches!(err, FtpClientError::BadResponse(_)));
    }

    #[tokio::test]
    async fn test_end_of_stream_is_control_channel_closed() {
        let mut transport = Canned(VecDeque::new());
        let err = read_response(&mut transport).await.unwrap_err();
        assert!(matches!(err, FtpClientError::ControlChannelClosed(_)));

        let mut transport = Canned::from_wire("220-Welcome\r\n");
        let err = read_response(&mut transport).await.unwrap_err();
        assert!(matches!(err, FtpClientError::ControlChannelClosed(_)));
    }
}
