pub mod supervisor;

pub use supervisor::reconnect_within;
