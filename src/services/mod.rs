pub mod cli_runner;
pub mod file_access;
pub mod loader;
