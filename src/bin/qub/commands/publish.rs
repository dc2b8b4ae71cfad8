//! `qub publish` command

use std::time::Instant;

use anyhow::Result;
use miette::Diagnostic;

use crate::cli::{GlobalArgs, MessageFormat, PublishArgs};
use crate::commands::open_repository;
use qub::ops::{
    publish, CommandPacker, Packer, PrebuiltPacker, PublishError, PublishOptions, PublishReport,
};
use qub::util::shell::{format_seconds, Shell};
use qub::util::{Config, GlobalContext};

/// Run a publish and return the process exit code.
pub fn execute(args: PublishArgs, global: &GlobalArgs) -> Result<i32> {
    let started = Instant::now();
    let ctx = GlobalContext::new()?;
    let project_root = ctx.resolve_folder(args.folder.as_deref());
    let config = ctx.load_config(&project_root);

    let shell = Shell::from_flags(
        global.quiet,
        global.verbose,
        global.color,
        args.message_format == MessageFormat::Json,
    );

    let code = match run(&args, global, &ctx, &config, &shell) {
        Ok(report) => {
            shell.json_event(&report.to_json_event());
            0
        }
        Err(err) => {
            if !err.is_reported_upstream() {
                shell.error(&err);
            }
            if shell.is_verbose() {
                if let Some(help) = err.help() {
                    eprintln!("help: {}", help);
                }
            }
            err.exit_code()
        }
    };

    if config.show_duration() {
        shell.line(format!("Done ({})", format_seconds(started.elapsed())));
    }

    Ok(code)
}

fn run(
    args: &PublishArgs,
    global: &GlobalArgs,
    ctx: &GlobalContext,
    config: &Config,
    shell: &Shell,
) -> Result<PublishReport, PublishError> {
    let repo = open_repository(global, ctx, config)?;

    let packer: Box<dyn Packer> = if args.skip_pack {
        Box::new(PrebuiltPacker)
    } else {
        let line = args
            .pack_command
            .as_deref()
            .unwrap_or_else(|| config.pack_command());
        Box::new(CommandPacker::from_command_line(line)?)
    };

    let opts = PublishOptions {
        project_root: ctx.resolve_folder(args.folder.as_deref()),
        launcher_style: config.launcher_style(),
    };

    publish(&repo, packer.as_ref(), shell, &opts)
}
