//! Layered configuration for kettle
//!
//! Configuration is spread over INI files below the invocation root. For
//! every scope a shared default file is read first and a `local/` file of the
//! same schema is read on top of it.

pub mod ini;
pub mod layer;
pub mod scope;
pub mod store;

pub use ini::{IniDocument, KeyCase, Section};
pub use layer::{ConfigDiagnostic, LayeredConfig, SectionView};
pub use scope::ScopeKind;
pub use store::{ConfigStore, DEFAULT_SECTION, ENVIRONMENT_SECTION, PROJECT_SECTION};
