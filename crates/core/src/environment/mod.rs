//! Build environment handed to the configure, build and install tools

pub mod composer;
pub mod host;
pub mod map;
pub mod script;

pub use composer::{
    ENVIRONMENT_SCRIPT_KEY, EnvironmentComposer, PASSTHROUGH_VARIABLES, PREFIX_PATH_VARIABLE,
};
pub use host::{HostEnvironment, ProcessHostEnvironment};
pub use map::{EnvironmentMap, PATH_SEPARATOR};
pub use script::{BashScriptEnvironment, ScriptEnvironment, ScriptError, parse_env_dump};
