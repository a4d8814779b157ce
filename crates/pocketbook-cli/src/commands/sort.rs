use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use pocketbook_sort::{sort_directory, Category};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SortArgs {
    /// Directory to tidy in place
    pub dir: PathBuf,
}

pub fn sort(ctx: &Context<'_>, args: SortArgs) -> Result<()> {
    let report = sort_directory(&args.dir)
        .with_context(|| format!("sort {}", args.dir.display()))?;
    for moved in &report.moved {
        debug!(from = %moved.from.display(), to = %moved.to.display(), "moved");
    }

    if ctx.json {
        return print_json(&report);
    }
    if report.moved.is_empty() {
        println!("nothing to sort in {}", args.dir.display());
        return Ok(());
    }
    println!(
        "Sorted {} files in {}",
        report.moved.len(),
        args.dir.display()
    );
    for category in Category::ALL {
        let count = report.count(category);
        if count > 0 {
            println!("  {category}: {count}");
        }
    }
    if !report.removed_dirs.is_empty() {
        println!("Removed {} empty folders", report.removed_dirs.len());
    }
    Ok(())
}
