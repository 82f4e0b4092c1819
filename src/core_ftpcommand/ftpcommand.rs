use crate::constants::EOL;
use std::fmt;

/// The RFC959 verbs this client speaks.
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    LIST,
    PASV,
    PORT,
    CWD,
    PWD,
    CDUP,
    QUIT,
}

impl FtpCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::PASS => "PASS",
            FtpCommand::LIST => "LIST",
            FtpCommand::PASV => "PASV",
            FtpCommand::PORT => "PORT",
            FtpCommand::CWD => "CWD",
            FtpCommand::PWD => "PWD",
            FtpCommand::CDUP => "CDUP",
            FtpCommand::QUIT => "QUIT",
        }
    }

    /// Builds the wire line `VERB[ arg]` followed by the line terminator.
    pub fn to_line(&self, arg: Option<&str>) -> String {
        match arg {
            Some(arg) => format!("{} {}{}", self.as_str(), arg, EOL),
            None => format!("{}{}", self.as_str(), EOL),
        }
    }

    /// Same as the wire line without terminator, with the password masked.
    pub fn to_log_line(&self, arg: Option<&str>) -> String {
        match (self, arg) {
            (FtpCommand::PASS, Some(_)) => "PASS ****".to_string(),
            (_, Some(arg)) => format!("{} {}", self.as_str(), arg),
            (_, None) => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
