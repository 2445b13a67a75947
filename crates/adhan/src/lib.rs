pub mod automation;
pub mod config;
pub mod system;
pub mod time;
