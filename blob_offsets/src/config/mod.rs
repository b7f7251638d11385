mod error;
mod resolver_config;

pub use error::ConfigError;
pub use resolver_config::{ResolvedTable, ResolverConfig, TABLE_PATH_ENV, env_table_path};
