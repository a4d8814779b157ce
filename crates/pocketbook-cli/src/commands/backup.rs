use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::{Context as _, Result};
use clap::Args;
use pocketbook_core::time::now_utc;
use pocketbook_store::error::StoreError;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: String,
    size_bytes: u64,
}

#[derive(Debug, Serialize)]
struct RestoreReport {
    source: String,
    contacts: usize,
    notes: usize,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let now = now_utc();
    let out = args
        .out
        .unwrap_or_else(|| ctx.store.default_backup_path(now));

    if let Err(err) = ctx.store.backup_to(&out, now) {
        if matches!(err, StoreError::InvalidBackupPath(_)) {
            return Err(err)
                .with_context(|| format!("backup path matches live data: {}", out.display()));
        }
        return Err(err).with_context(|| format!("write backup to {}", out.display()));
    }

    let size = fs::metadata(&out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    if ctx.json {
        let report = BackupReport {
            output: out.display().to_string(),
            size_bytes: size,
        };
        return print_json(&report);
    }

    println!("Backup written to {}", out.display());
    Ok(())
}

pub fn restore(ctx: &Context<'_>, args: RestoreArgs) -> Result<()> {
    if !args.file.exists() {
        return Err(not_found(format!("backup {}", args.file.display())));
    }
    let (contacts, notes) = ctx
        .store
        .restore_from(&args.file)
        .with_context(|| format!("restore from {}", args.file.display()))?;

    if ctx.json {
        return print_json(&RestoreReport {
            source: args.file.display().to_string(),
            contacts: contacts.len(),
            notes: notes.len(),
        });
    }
    println!(
        "Restored {} contacts and {} notes from {}",
        contacts.len(),
        notes.len(),
        args.file.display()
    );
    Ok(())
}
