// The command set spoken by the client
pub mod ftpcommand;
pub mod response;

// One file per high-level operation
pub mod cdup;
pub mod cwd;
pub mod list;
pub mod pwd;
pub mod quit;
pub mod user;
