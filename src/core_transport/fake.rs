// Scripted in-memory FTP server used by the unit tests.
use crate::core_transport::{Connector, DataListener, LineTransport};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CONTROL_PORT: u16 = 21;
pub const DATA_PORT: u16 = 5000;
pub const ACTIVE_PORT: u16 = 40001;

pub fn dir_line(name: &str) -> String {
    format!("drwxr-xr-x 2 owner group 4096 Jan 01 00:00 {}", name)
}

pub fn locked_dir_line(name: &str) -> String {
    format!("dr-xr-xr-x 2 owner group 4096 Jan 01 00:00 {}", name)
}

pub fn file_line(name: &str) -> String {
    format!("-rw-r--r-- 1 owner group 2134 Jan 01 00:00 {}", name)
}

pub fn link_line(name: &str, target: &str) -> String {
    format!("lrwxrwxrwx 1 owner group 0 Jan 01 00:00 {} -> {}", name, target)
}

#[derive(Debug)]
pub struct FakeState {
    pub cwd: String,
    pub commands: Vec<String>,
    pub greeting: Vec<String>,
    pub password: String,
    pub listings: HashMap<String, Vec<String>>,
    pub denied: HashSet<String>,
    pub deny_after: HashMap<String, usize>,
    pub scripted: HashMap<String, VecDeque<Vec<String>>>,
    pub hangup_on: Option<String>,
    pub failing_opens: usize,
    pub refuse_all_opens: bool,
    pub control_opens: usize,
    pub data_opens: usize,
    pub data_closes: usize,
    pub refuse_listen: bool,
    pub fail_accept: bool,
    pub fail_close: bool,
    pending_data: Option<Vec<String>>,
}

impl FakeState {
    fn resolve(&self, arg: &str) -> String {
        if arg.starts_with('/') {
            arg.to_string()
        } else if self.cwd == "/" {
            format!("/{}", arg)
        } else {
            format!("{}/{}", self.cwd, arg)
        }
    }

    fn handle(&mut self, line: &str) -> Vec<String> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        self.commands.push(line.to_string());
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb.to_string(), Some(arg.to_string())),
            None => (line.to_string(), None),
        };

        if let Some(queue) = self.scripted.get_mut(&verb) {
            if let Some(reply) = queue.pop_front() {
                if verb == "LIST" {
                    let dir = arg.as_deref().map(|a| self.resolve(a)).unwrap_or(self.cwd.clone());
                    self.pending_data = self.listings.get(&dir).cloned();
                }
                return reply;
            }
        }

        match verb.as_str() {
            "USER" => match arg.as_deref() {
                Some("bad") => vec!["530 Not logged in.".into()],
                Some("nopass") => vec!["230 Login successful.".into()],
                _ => vec!["331 Please specify the password.".into()],
            },
            "PASS" => {
                if arg.as_deref() == Some(self.password.as_str()) {
                    vec!["230 Login successful.".into()]
                } else {
                    vec!["530 Login incorrect.".into()]
                }
            }
            "PWD" => vec![format!("257 \"{}\" is the current directory", self.cwd)],
            "CWD" => {
                let target = self.resolve(arg.as_deref().unwrap_or(""));
                let allowed = match self.deny_after.get_mut(&target) {
                    Some(0) => false,
                    Some(left) => {
                        *left -= 1;
                        true
                    }
                    None => true,
                };
                if allowed && self.listings.contains_key(&target) && !self.denied.contains(&target) {
                    self.cwd = target;
                    vec!["250 Directory successfully changed.".into()]
                } else {
                    vec!["550 Failed to change directory.".into()]
                }
            }
            "CDUP" => {
                if self.cwd != "/" {
                    self.cwd = match self.cwd.rfind('/') {
                        Some(0) | None => "/".to_string(),
                        Some(idx) => self.cwd[..idx].to_string(),
                    };
                }
                vec!["250 Directory successfully changed.".into()]
            }
            "PASV" => vec!["227 Entering Passive Mode (127,0,0,1,19,136).".into()],
            "PORT" => vec!["200 PORT command successful.".into()],
            "LIST" => {
                let dir = arg.as_deref().map(|a| self.resolve(a)).unwrap_or(self.cwd.clone());
                match self.listings.get(&dir) {
                    Some(lines) => {
                        self.pending_data = Some(lines.clone());
                        vec![
                            "150 Here comes the directory listing.".into(),
                            "226 Directory send OK.".into(),
                        ]
                    }
                    None => vec!["550 Failed to open directory.".into()],
                }
            }
            "QUIT" => vec!["221 Goodbye.".into()],
            _ => vec!["502 Command not implemented.".into()],
        }
    }
}

/// Fake server shared between the connector and every transport it opens.
#[derive(Clone)]
pub struct FakeServer {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeServer {
    pub fn new() -> Self {
        let mut listings = HashMap::new();
        listings.insert("/".to_string(), Vec::new());
        Self {
            state: Arc::new(Mutex::new(FakeState {
                cwd: "/".to_string(),
                commands: Vec::new(),
                greeting: vec!["220 Fake FTP ready".to_string()],
                password: "secret".to_string(),
                listings,
                denied: HashSet::new(),
                deny_after: HashMap::new(),
                scripted: HashMap::new(),
                hangup_on: None,
                failing_opens: 0,
                refuse_all_opens: false,
                control_opens: 0,
                data_opens: 0,
                data_closes: 0,
                refuse_listen: false,
                fail_accept: false,
                fail_close: false,
                pending_data: None,
            })),
        }
    }

    pub fn with_dir(self, path: &str, lines: &[String]) -> Self {
        self.state
            .lock()
            .unwrap()
            .listings
            .insert(path.to_string(), lines.to_vec());
        self
    }

    pub fn deny(self, path: &str) -> Self {
        self.state.lock().unwrap().denied.insert(path.to_string());
        self
    }

    /// Lets CWD into `path` succeed `times` times, then refuses it.
    pub fn deny_after(self, path: &str, times: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .deny_after
            .insert(path.to_string(), times);
        self
    }

    pub fn script(&self, verb: &str, reply: &[&str]) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .entry(verb.to_string())
            .or_default()
            .push_back(reply.iter().map(|s| s.to_string()).collect());
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.lock().unwrap().commands.clear();
    }

    pub fn cwd(&self) -> String {
        self.state.lock().unwrap().cwd.clone()
    }

    pub fn set_cwd(&self, cwd: &str) {
        self.state.lock().unwrap().cwd = cwd.to_string();
    }
}

pub struct FakeControl {
    state: Arc<Mutex<FakeState>>,
    queue: VecDeque<String>,
    hung_up: bool,
}

#[async_trait]
impl LineTransport for FakeControl {
    async fn send_line(&mut self, line: &str) -> io::Result<()> {
        if self.hung_up {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "control channel closed"));
        }
        let mut state = self.state.lock().unwrap();
        let replies = state.handle(line);
        let verb = line.split_whitespace().next().unwrap_or("").to_string();
        if state.hangup_on.as_deref() == Some(verb.as_str()) {
            self.hung_up = true;
            self.queue.clear();
        } else {
            self.queue.extend(replies);
        }
        Ok(())
    }

    async fn receive_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.queue.pop_front())
    }

    async fn close(&mut self) -> io::Result<()> {
        self.hung_up = true;
        if self.state.lock().unwrap().fail_close {
            return Err(io::Error::new(io::ErrorKind::Other, "close failed"));
        }
        Ok(())
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        Some(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 50000))
    }
}

pub struct FakeData {
    state: Arc<Mutex<FakeState>>,
    lines: Option<VecDeque<String>>,
}

#[async_trait]
impl LineTransport for FakeData {
    async fn send_line(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }

    async fn receive_line(&mut self) -> io::Result<Option<String>> {
        if self.lines.is_none() {
            let pending = self.state.lock().unwrap().pending_data.take();
            self.lines = Some(pending.unwrap_or_default().into());
        }
        Ok(self.lines.as_mut().and_then(|lines| lines.pop_front()))
    }

    async fn close(&mut self) -> io::Result<()> {
        self.state.lock().unwrap().data_closes += 1;
        Ok(())
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        None
    }
}

pub struct FakeListener {
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl DataListener for FakeListener {
    fn local_port(&self) -> u16 {
        ACTIVE_PORT
    }

    async fn accept(&mut self, _timeout: Duration) -> io::Result<Box<dyn LineTransport>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_accept {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "accept timed out"));
        }
        state.data_opens += 1;
        Ok(Box::new(FakeData {
            state: Arc::clone(&self.state),
            lines: None,
        }))
    }
}

#[async_trait]
impl Connector for FakeServer {
    async fn open(&self, _host: &str, port: u16) -> io::Result<Box<dyn LineTransport>> {
        let mut state = self.state.lock().unwrap();
        if port == DATA_PORT {
            state.data_opens += 1;
            return Ok(Box::new(FakeData {
                state: Arc::clone(&self.state),
                lines: None,
            }));
        }
        if state.refuse_all_opens {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }
        if state.failing_opens > 0 {
            state.failing_opens -= 1;
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }
        state.control_opens += 1;
        state.cwd = "/".to_string();
        Ok(Box::new(FakeControl {
            state: Arc::clone(&self.state),
            queue: state.greeting.iter().cloned().collect(),
            hung_up: false,
        }))
    }

    async fn listen(&self, _bind_ip: IpAddr) -> io::Result<Box<dyn DataListener>> {
        if self.state.lock().unwrap().refuse_listen {
            return Err(io::Error::new(io::ErrorKind::AddrNotAvailable, "cannot listen"));
        }
        Ok(Box::new(FakeListener {
            state: Arc::clone(&self.state),
        }))
    }
}
