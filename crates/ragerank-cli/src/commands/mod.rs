pub mod add;
pub mod bump;
pub mod export;
pub mod history;
pub mod init;
pub mod list;
pub mod remove;
pub mod save;
