//! `qub dependents` command

use anyhow::Result;

use crate::cli::{DependentsArgs, GlobalArgs};
use crate::commands::open_repository;
use qub::core::ProjectSignature;
use qub::ops::find_dependents;
use qub::util::GlobalContext;

pub fn execute(args: DependentsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config(ctx.cwd());
    let repo = open_repository(global, &ctx, &config)?;

    let target: ProjectSignature = args.project.parse()?;
    for dependent in find_dependents(&repo, &target.publisher, &target.project) {
        println!("{}", dependent);
    }

    Ok(())
}
