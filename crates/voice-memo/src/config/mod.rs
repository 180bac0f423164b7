#[allow(clippy::module_inception)]
mod config;
mod display_config;
mod storage_config;

pub(crate) use {config::Config, display_config::DisplayConfig, storage_config::StorageConfig};

pub(crate) const DEFAULT_NEWEST_FIRST: bool = false;

pub(crate) fn default_newest_first() -> bool {
    DEFAULT_NEWEST_FIRST
}
