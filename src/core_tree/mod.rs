pub mod explore;
pub mod export;
pub mod listing;
pub mod node;
pub mod render;

pub use node::{FileType, Node, Permissions, Rights};
