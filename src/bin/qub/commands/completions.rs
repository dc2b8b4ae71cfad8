//! `qub completions` command

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};
use qub::util::fs::write_string;

/// Print the completion script for `args.shell`, or save it to `--output`.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let mut script = Vec::new();
    generate(args.shell, &mut cmd, name, &mut script);

    match args.output {
        Some(path) => {
            let text = String::from_utf8(script).context("completion script is not UTF-8")?;
            write_string(&path, &text)?;
            tracing::info!("wrote {} completions to {}", args.shell, path.display());
        }
        None => io::stdout()
            .write_all(&script)
            .context("failed to write completions to stdout")?,
    }

    Ok(())
}
