pub mod console;
pub mod summary;

pub use console::{ConsoleObserver, print_header};
pub use summary::{failure_message, render_summary};
