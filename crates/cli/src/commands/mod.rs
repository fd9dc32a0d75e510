//! CLI commands

mod demo;

pub use demo::DemoCommand;
