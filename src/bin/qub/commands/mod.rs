//! Command implementations

pub mod completions;
pub mod dependents;
pub mod publish;
pub mod tree;

use crate::cli::GlobalArgs;
use qub::core::Repository;
use qub::ops::require_repository;
use qub::util::{Config, GlobalContext};

/// Open the repository named by `--repository`/`QUB_HOME` or the config.
pub(crate) fn open_repository(
    global: &GlobalArgs,
    ctx: &GlobalContext,
    config: &Config,
) -> Result<Repository, qub::ops::PublishError> {
    let root = global
        .repository
        .clone()
        .or_else(|| config.repository.root.clone())
        .filter(|root| !root.as_os_str().is_empty())
        .map(|root| ctx.resolve_folder(Some(root.as_path())));
    require_repository(root)
}
