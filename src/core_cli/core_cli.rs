use crate::config::ClientConfig;
use crate::constants::{HOSTNAME_REGEX, IP_HOSTNAME_MAX_LENGTH};
use crate::session::DataMode;
use anyhow::{bail, Context, Result};
use clap::Parser;
use regex::Regex;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "rouilletree",
    about = "Draws the directory tree of an FTP server."
)]
pub struct Cli {
    /// Host name, IPv4 address or ftp://[user[:password]@]host[:port][/dir] URL
    pub host: String,

    /// User name (requires --password)
    #[arg(short, long, requires = "password")]
    pub user: Option<String>,

    /// Password (requires --user)
    #[arg(short, long, requires = "user")]
    pub password: Option<String>,

    /// Control port
    #[arg(long)]
    pub port: Option<u16>,

    /// Maximum depth, negative for unbounded
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i32>,

    /// List this directory instead of exploring from the login directory
    #[arg(long)]
    pub dir: Option<String>,

    /// Write the tree as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Use active mode (PORT) for data connections
    #[arg(long)]
    pub active: bool,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

/// Connection target taken from the positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dir: Option<String>,
}

pub fn is_valid_host(host: &str) -> bool {
    if host.parse::<Ipv4Addr>().is_ok() {
        return true;
    }
    host.len() <= IP_HOSTNAME_MAX_LENGTH
        && Regex::new(HOSTNAME_REGEX)
            .map(|re| re.is_match(host))
            .unwrap_or(false)
}

impl Target {
    pub fn parse(arg: &str) -> Result<Self> {
        if !arg.contains("://") {
            if !is_valid_host(arg) {
                bail!("Invalid host name or IPv4 address: {}", arg);
            }
            return Ok(Target {
                host: arg.to_string(),
                port: None,
                user: None,
                password: None,
                dir: None,
            });
        }

        let url = Url::parse(arg).with_context(|| format!("Invalid URL: {}", arg))?;
        if url.scheme() != "ftp" {
            bail!("Unsupported URL scheme: {}", url.scheme());
        }
        let host = match url.host_str() {
            Some(host) if is_valid_host(host) => host.to_string(),
            _ => bail!("Invalid host in URL: {}", arg),
        };
        let user = Some(url.username())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let dir = Some(url.path())
            .filter(|path| !path.is_empty() && *path != "/")
            .map(str::to_string);

        Ok(Target {
            host,
            port: url.port(),
            user,
            password: url.password().map(str::to_string),
            dir,
        })
    }
}

impl Cli {
    /// Merges the arguments over `config`. Flags beat URL parts, which beat the file.
    pub fn apply(&self, config: &mut ClientConfig) -> Result<()> {
        let target = Target::parse(&self.host)?;
        config.host = Some(target.host);

        if let Some(port) = self.port.or(target.port) {
            config.port = port;
        }
        if let Some(user) = self.user.clone().or(target.user) {
            config.user = user;
        }
        if let Some(password) = self.password.clone().or(target.password) {
            config.password = password;
        }
        if let Some(dir) = self.dir.clone().or(target.dir) {
            config.start_dir = Some(dir);
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(json) = &self.json {
            config.json_output = Some(json.clone());
        }
        if self.active {
            config.data_mode = DataMode::Active;
        }
        Ok(())
    }
}
