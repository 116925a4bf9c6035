pub mod config;
pub mod feedback;
pub mod output;
pub mod scoring;
pub mod session;
pub mod transcript;
