pub mod build;

pub use build::build_command;
