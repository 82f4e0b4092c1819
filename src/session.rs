use crate::core_transport::LineTransport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who opens the listening side of a data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// The client listens and reports its address with PORT.
    Active,
    /// The server listens and reports its address in the PASV reply.
    #[default]
    Passive,
}

/// Control-channel state of one client.
pub struct Session {
    pub is_connected: bool,
    pub data_mode: DataMode,
    pub pasv_endpoint: Option<(String, u16)>,
    pub response_code: u16,
    pub response_text: String,
    pub control: Option<Box<dyn LineTransport>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            is_connected: false,
            data_mode: DataMode::Passive,
            pasv_endpoint: None,
            response_code: 0,
            response_text: String::new(),
            control: None,
        }
    }

    /// Drops the control transport without closing it and restores every default.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("is_connected", &self.is_connected)
            .field("data_mode", &self.data_mode)
            .field("pasv_endpoint", &self.pasv_endpoint)
            .field("response_code", &self.response_code)
            .field("response_text", &self.response_text)
            .field("control", &self.control.is_some())
            .finish()
    }
}
