mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, load, load_from_dir};
pub use types::{Config, ResolverConfig, Workflow};
