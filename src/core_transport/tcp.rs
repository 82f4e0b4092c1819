use crate::core_transport::{Connector, DataListener, LineTransport};
use async_trait::async_trait;
use log::{debug, trace};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

/// Plain TCP line transport split into a buffered reader and a writer.
pub struct TcpLineTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    local: Option<SocketAddr>,
}

impl TcpLineTransport {
    pub fn from_stream(stream: TcpStream) -> Self {
        let local = stream.local_addr().ok();
        let (rd, wr) = stream.into_split();
        Self {
            reader: BufReader::new(rd),
            writer: wr,
            local,
        }
    }
}

#[async_trait]
impl LineTransport for TcpLineTransport {
    async fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await
    }

    /// Bytes that are not UTF-8 (Latin-1 file names, for instance) are replaced, not rejected.
    async fn receive_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buffer).await?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buffer);
        Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }

    async fn close(&mut self) -> io::Result<()> {
        self.writer.shutdown().await
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.local
    }
}

/// Listener bound on an ephemeral port, used in active mode.
pub struct TcpDataListener {
    listener: TcpListener,
    port: u16,
}

#[async_trait]
impl DataListener for TcpDataListener {
    fn local_port(&self) -> u16 {
        self.port
    }

    async fn accept(&mut self, timeout: Duration) -> io::Result<Box<dyn LineTransport>> {
        let (stream, addr) = tokio::time::timeout(timeout, self.listener.accept())
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "Data connection accept timed out"))??;
        debug!("Accepted data connection from: {}", addr);
        Ok(Box::new(TcpLineTransport::from_stream(stream)))
    }
}

/// Connector over `tokio::net`, with an optional bound on connection setup.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn open(&self, host: &str, port: u16) -> io::Result<Box<dyn LineTransport>> {
        trace!("Opening TCP connection to {}:{}", host, port);
        let connect = TcpStream::connect((host, port));
        let stream = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("Connection to {}:{} timed out", host, port),
                )
            })??,
            None => connect.await?,
        };
        Ok(Box::new(TcpLineTransport::from_stream(stream)))
    }

    async fn listen(&self, bind_ip: IpAddr) -> io::Result<Box<dyn DataListener>> {
        let listener = TcpListener::bind((bind_ip, 0)).await?;
        let port = listener.local_addr()?.port();
        debug!("Active mode listener set up on IP: {}, Port: {}", bind_ip, port);
        Ok(Box::new(TcpDataListener { listener, port }))
    }
}
