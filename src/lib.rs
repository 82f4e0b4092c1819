//! FTP client that discovers and draws the directory tree of a server.

pub mod client;
pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_error;
pub mod core_ftpcommand;
pub mod core_log;
pub mod core_network;
pub mod core_reconnect;
pub mod core_transport;
pub mod core_tree;
pub mod session;

pub use client::{ClientOptions, FtpClient};
pub use config::ClientConfig;
pub use core_error::{FtpClientError, FtpResult};
pub use core_tree::Node;
pub use session::DataMode;
