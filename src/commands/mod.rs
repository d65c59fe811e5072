pub mod init;
pub mod steal;
pub mod update;
pub mod version;
