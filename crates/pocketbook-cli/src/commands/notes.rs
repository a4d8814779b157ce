use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::{ArgAction, Args, Subcommand};
use pocketbook_core::{CoreError, Note, NoteBook, NoteId, NoteLocator, NoteSnapshot, TagName};
use pocketbook_store::legacy;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    Add(AddNoteArgs),
    Edit(EditNoteArgs),
    Rm(LocatorArgs),
    Tag(TagNoteArgs),
    Untag(TagNoteArgs),
    List(ListNotesArgs),
    Search(SearchNotesArgs),
    /// Every tag with the number of notes carrying it
    Tags,
    /// Append notes from a `text;tag;tag` file
    #[command(name = "import-lines")]
    ImportLines(LinesFileArgs),
    /// Write every note as a `text;tag;tag` line
    #[command(name = "export-lines")]
    ExportLines(LinesFileArgs),
}

/// A note id, or text matched as a substring (`--exact` for equality).
#[derive(Debug, Args)]
pub struct LocatorArgs {
    pub locator: String,
    #[arg(long, action = ArgAction::SetTrue)]
    pub exact: bool,
    /// Choose among several matches, 1-based
    #[arg(long, value_name = "N")]
    pub pick: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AddNoteArgs {
    pub text: String,
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
}

#[derive(Debug, Args)]
pub struct EditNoteArgs {
    #[command(flatten)]
    pub target: LocatorArgs,
    pub text: String,
}

#[derive(Debug, Args)]
pub struct TagNoteArgs {
    #[command(flatten)]
    pub target: LocatorArgs,
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct ListNotesArgs {
    /// Most-tagged notes first
    #[arg(long, action = ArgAction::SetTrue)]
    pub sort_by_tags: bool,
}

#[derive(Debug, Args)]
pub struct SearchNotesArgs {
    #[arg(long)]
    pub word: Option<String>,
    #[arg(long, value_name = "TAG")]
    pub tag: Vec<String>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "tag")]
    pub untagged: bool,
}

#[derive(Debug, Args)]
pub struct LinesFileArgs {
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct TagCount {
    tag: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct LinesReport {
    file: String,
    notes: usize,
}

pub fn run(ctx: &Context<'_>, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add(args) => add_note(ctx, args),
        NoteCommand::Edit(args) => edit_note(ctx, args),
        NoteCommand::Rm(args) => remove_note(ctx, args),
        NoteCommand::Tag(args) => tag_note(ctx, args),
        NoteCommand::Untag(args) => untag_note(ctx, args),
        NoteCommand::List(args) => list_notes(ctx, args),
        NoteCommand::Search(args) => search_notes(ctx, args),
        NoteCommand::Tags => list_tags(ctx),
        NoteCommand::ImportLines(args) => import_lines(ctx, args),
        NoteCommand::ExportLines(args) => export_lines(ctx, args),
    }
}

pub fn add_note(ctx: &Context<'_>, args: AddNoteArgs) -> Result<()> {
    let note = Note::new(&args.text, parse_tags(&args.tag)?)?;
    let snapshot = NoteSnapshot::from(&note);
    let mut notes = ctx.load_notes()?;
    let id = notes.add_note(note);
    ctx.save_notes(&notes)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        println!("Note added: {}", id.short());
    }
    Ok(())
}

pub fn edit_note(ctx: &Context<'_>, args: EditNoteArgs) -> Result<()> {
    let mut notes = ctx.load_notes()?;
    let id = resolve_note(&notes, &args.target)?;
    notes.edit_note(id, &args.text)?;
    ctx.save_notes(&notes)?;
    print_note_change(ctx, &notes, id, "Note updated")
}

pub fn remove_note(ctx: &Context<'_>, args: LocatorArgs) -> Result<()> {
    let mut notes = ctx.load_notes()?;
    let id = resolve_note(&notes, &args)?;
    let removed = notes.delete_note(id)?;
    ctx.save_notes(&notes)?;

    if ctx.json {
        print_json(&NoteSnapshot::from(&removed))?;
    } else {
        println!("Note deleted: {}", removed.id().short());
    }
    Ok(())
}

pub fn tag_note(ctx: &Context<'_>, args: TagNoteArgs) -> Result<()> {
    let tag = TagName::new(&args.tag)?;
    let mut notes = ctx.load_notes()?;
    let id = resolve_note(&notes, &args.target)?;
    let added = notes.add_tag(id, tag.clone())?;
    if added {
        ctx.save_notes(&notes)?;
    }
    let message = if added {
        format!("Tag {} added", tag.hashtag())
    } else {
        format!("Note already tagged {}", tag.hashtag())
    };
    print_note_change(ctx, &notes, id, &message)
}

pub fn untag_note(ctx: &Context<'_>, args: TagNoteArgs) -> Result<()> {
    let tag = TagName::new(&args.tag)?;
    let mut notes = ctx.load_notes()?;
    let id = resolve_note(&notes, &args.target)?;
    let removed = notes.remove_tag(id, &tag)?;
    if removed {
        ctx.save_notes(&notes)?;
    }
    let message = if removed {
        format!("Tag {} removed", tag.hashtag())
    } else {
        format!("Note was not tagged {}", tag.hashtag())
    };
    print_note_change(ctx, &notes, id, &message)
}

pub fn list_notes(ctx: &Context<'_>, args: ListNotesArgs) -> Result<()> {
    let mut notes = ctx.load_notes()?;
    if args.sort_by_tags {
        notes.sort_by_tag_count();
    }
    print_notes(ctx, notes.iter().collect())
}

pub fn search_notes(ctx: &Context<'_>, args: SearchNotesArgs) -> Result<()> {
    let tags = parse_tags(&args.tag)?;
    let notes = ctx.load_notes()?;
    let word = args.word.as_deref();

    let mut hits = if args.untagged {
        notes.search_untagged()
    } else {
        match (tags.as_slice(), word) {
            ([], Some(word)) => notes.search_by_word(word),
            ([], None) => notes.iter().collect(),
            ([tag], _) => notes.search_by_tag(tag),
            (tags, _) => notes.search_by_tags(tags),
        }
    };
    if let Some(word) = word {
        hits.retain(|note| note.contains_word(word));
    }
    print_notes(ctx, hits)
}

pub fn list_tags(ctx: &Context<'_>) -> Result<()> {
    let notes = ctx.load_notes()?;
    let items: Vec<TagCount> = notes
        .tag_counts()
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("no tags");
        return Ok(());
    }
    for item in items {
        println!("#{} ({})", item.tag, item.count);
    }
    Ok(())
}

pub fn import_lines(ctx: &Context<'_>, args: LinesFileArgs) -> Result<()> {
    let imported = legacy::import_note_lines(&args.file)
        .with_context(|| format!("import notes from {}", args.file.display()))?;
    let mut notes = ctx.load_notes()?;
    let count = imported.len();
    for note in imported {
        notes.add_note(note);
    }
    ctx.save_notes(&notes)?;
    report_lines(ctx, &args, count, "imported from")
}

pub fn export_lines(ctx: &Context<'_>, args: LinesFileArgs) -> Result<()> {
    let notes = ctx.load_notes()?;
    let count = legacy::export_note_lines(&args.file, &notes)
        .with_context(|| format!("export notes to {}", args.file.display()))?;
    report_lines(ctx, &args, count, "exported to")
}

fn report_lines(ctx: &Context<'_>, args: &LinesFileArgs, count: usize, verb: &str) -> Result<()> {
    if ctx.json {
        return print_json(&LinesReport {
            file: args.file.display().to_string(),
            notes: count,
        });
    }
    println!("{count} notes {verb} {}", args.file.display());
    Ok(())
}

fn parse_tags(raw: &[String]) -> Result<Vec<TagName>> {
    raw.iter()
        .map(|tag| TagName::new(tag).map_err(Into::into))
        .collect()
}

fn parse_locator(args: &LocatorArgs) -> NoteLocator {
    if let Ok(id) = NoteId::from_str(args.locator.trim()) {
        return NoteLocator::Id(id);
    }
    if args.exact {
        NoteLocator::Exact(args.locator.clone())
    } else {
        NoteLocator::Contains(args.locator.clone())
    }
}

/// Ambiguous matches are listed on stderr unless `--pick` chooses one.
fn resolve_note(notes: &NoteBook, args: &LocatorArgs) -> Result<NoteId> {
    let locator = parse_locator(args);
    match notes.resolve(&locator) {
        Ok(id) => Ok(id),
        Err(err @ CoreError::AmbiguousNote { .. }) => {
            let candidates = notes.find_candidates(&locator);
            if let Some(pick) = args.pick {
                return pick
                    .checked_sub(1)
                    .and_then(|index| candidates.get(index))
                    .map(|note| note.id())
                    .ok_or_else(|| {
                        invalid_input(format!(
                            "--pick {pick} is out of range (1..={})",
                            candidates.len()
                        ))
                    });
            }
            eprintln!("several notes match \"{locator}\"; choose one with --pick N:");
            for (index, note) in candidates.iter().enumerate() {
                eprintln!("  {}. [{}] {}", index + 1, note.id().short(), note.text());
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_note_change(ctx: &Context<'_>, notes: &NoteBook, id: NoteId, message: &str) -> Result<()> {
    if ctx.json {
        if let Some(note) = notes.get(id) {
            print_json(&NoteSnapshot::from(note))?;
        }
        return Ok(());
    }
    println!("{message}: {}", id.short());
    Ok(())
}

fn print_notes(ctx: &Context<'_>, notes: Vec<&Note>) -> Result<()> {
    if ctx.json {
        let items: Vec<NoteSnapshot> = notes.into_iter().map(NoteSnapshot::from).collect();
        return print_json(&items);
    }
    if notes.is_empty() {
        println!("no notes");
        return Ok(());
    }
    for note in notes {
        println!("[{}] {}", note.id().short(), note);
    }
    Ok(())
}
