use std::collections::HashMap;

/// Read access to the environment of the host process
pub trait HostEnvironment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHostEnvironment;

impl HostEnvironment for ProcessHostEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl HostEnvironment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
