//! `qub tree` command

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, TreeArgs};
use crate::commands::open_repository;
use qub::core::ProjectSignature;
use qub::resolver::DependencyGraph;
use qub::util::GlobalContext;

pub fn execute(args: TreeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config(ctx.cwd());
    let repo = open_repository(global, &ctx, &config)?;

    let requested: ProjectSignature = args.package.parse()?;
    let root = if requested.version.any() {
        requested
    } else {
        repo.latest_signature(&requested.publisher, &requested.project)
            .with_context(|| format!("{} has not been published", requested.display_project()))?
    };

    let descriptor = repo
        .descriptor(&root.publisher, &root.project, &root.version)
        .with_context(|| format!("no readable project.json for {}", root))?;

    let graph = DependencyGraph::resolve(&repo, &root, descriptor.dependencies())?;

    if args.flat {
        for dep in graph.closure() {
            println!("{}", dep);
        }
        return Ok(());
    }

    let mut seen = HashSet::new();
    print_tree(
        &graph,
        graph.root(),
        0,
        args.depth.unwrap_or(usize::MAX),
        &mut seen,
        args.duplicates,
    );

    Ok(())
}

fn print_tree<'g>(
    graph: &'g DependencyGraph,
    package: &'g ProjectSignature,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<&'g ProjectSignature>,
    show_duplicates: bool,
) {
    if depth > max_depth {
        return;
    }

    let is_duplicate = !seen.insert(package);

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let dup_marker = if is_duplicate && !show_duplicates {
        " (*)"
    } else {
        ""
    };

    println!("{}{}{}", prefix, package, dup_marker);

    // Don't recurse into duplicates unless explicitly requested
    if is_duplicate && !show_duplicates {
        return;
    }

    for dep in graph.deps(package) {
        print_tree(graph, dep, depth + 1, max_depth, seen, show_duplicates);
    }
}
