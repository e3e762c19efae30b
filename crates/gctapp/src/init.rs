//! Wiring for production use: a [`JsonRepository`] at the configured path and
//! the system clock, wrapped in a [`GctApi`].

use crate::api::GctApi;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::store::fs_backend::FsBackend;
use crate::store::JsonRepository;
use std::path::PathBuf;
use tracing::debug;

pub struct GctContext {
    pub api: GctApi<JsonRepository, SystemClock>,
    pub data_file: PathBuf,
}

pub fn initialize(config: &Config) -> GctContext {
    debug!(data_file = %config.data_file.display(), "initializing gct");
    let repo = JsonRepository::with_backend(FsBackend::new(&config.data_file));
    GctContext {
        api: GctApi::new(repo, SystemClock),
        data_file: config.data_file.clone(),
    }
}
