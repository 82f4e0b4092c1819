pub mod address;
pub mod data_channel;
pub mod pasv;
pub mod port;
