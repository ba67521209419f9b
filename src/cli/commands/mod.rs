pub mod catalog;
pub mod collect;
pub mod config;
pub mod init;
pub mod submit;
