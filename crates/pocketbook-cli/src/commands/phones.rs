use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::Result;
use clap::{Args, Subcommand};
use pocketbook_core::{AddressBook, ContactSnapshot, Phone, Record};

#[derive(Debug, Subcommand)]
pub enum PhoneCommand {
    Add(PhoneArgs),
    Rm(PhoneArgs),
    /// Replace one number with another
    Edit(EditPhoneArgs),
}

#[derive(Debug, Args)]
pub struct PhoneArgs {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct EditPhoneArgs {
    pub name: String,
    pub old: String,
    pub new: String,
}

pub fn run(ctx: &Context<'_>, command: PhoneCommand) -> Result<()> {
    match command {
        PhoneCommand::Add(args) => add_phone(ctx, args),
        PhoneCommand::Rm(args) => remove_phone(ctx, args),
        PhoneCommand::Edit(args) => edit_phone(ctx, args),
    }
}

pub fn add_phone(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let phone = Phone::new(&args.phone)?;
    let mut book = ctx.load_contacts()?;
    let record = require_record(&mut book, &args.name)?;
    let added = record.add_phone(phone.clone());
    let snapshot = ContactSnapshot::from(&*record);
    if added {
        ctx.save_contacts(&book)?;
    }

    if ctx.json {
        print_json(&snapshot)?;
    } else if added {
        println!("Phone {} added to {}", phone, snapshot.name);
    } else {
        println!("{} already has phone {}", snapshot.name, phone);
    }
    Ok(())
}

pub fn remove_phone(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let phone = Phone::new(&args.phone)?;
    let mut book = ctx.load_contacts()?;
    let record = require_record(&mut book, &args.name)?;
    let removed = record.delete_phone(&phone)?;
    let snapshot = ContactSnapshot::from(&*record);
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        println!("Phone {} removed from {}", removed, snapshot.name);
    }
    Ok(())
}

pub fn edit_phone(ctx: &Context<'_>, args: EditPhoneArgs) -> Result<()> {
    let old = Phone::new(&args.old)?;
    let new = Phone::new(&args.new)?;
    let mut book = ctx.load_contacts()?;
    let record = require_record(&mut book, &args.name)?;
    record.edit_phone(&old, new.clone())?;
    let snapshot = ContactSnapshot::from(&*record);
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        println!("Phone {} changed to {} for {}", old, new, snapshot.name);
    }
    Ok(())
}

fn require_record<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record> {
    book.get_mut(name)
        .ok_or_else(|| not_found(format!("contact {name}")))
}
