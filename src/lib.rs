pub mod bigfile;
pub mod config;
pub mod document;
pub mod probe;
pub mod stopwatch;
pub mod umya;
