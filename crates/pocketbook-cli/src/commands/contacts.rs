use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::Result;
use clap::{ArgGroup, Args, Subcommand};
use pocketbook_config::validate_page_size;
use pocketbook_core::{
    parse_optional, Address, Birthday, ContactSnapshot, Criterion, Email, Name, Phone, Record,
};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Create a contact, or extend an existing one
    Add(AddContactArgs),
    Show(ShowArgs),
    Edit(EditContactArgs),
    List(ListArgs),
    Delete(DeleteArgs),
    /// Exact match on every given criterion
    Search(SearchArgs),
    /// Substring match on name or phone
    Find(FindArgs),
}

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_name = "PHONE")]
    pub phone: Vec<String>,
    #[arg(long, value_name = "DD.MM.YYYY")]
    pub birthday: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub name: String,
}

/// An empty value clears the field.
#[derive(Debug, Args)]
pub struct EditContactArgs {
    pub name: String,
    #[arg(long = "name", value_name = "NEW_NAME")]
    pub new_name: Option<String>,
    #[arg(long, value_name = "DD.MM.YYYY")]
    pub birthday: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// `field=value` pairs (`name`, `phone`)
    #[arg(value_name = "FIELD=VALUE")]
    pub criteria: Vec<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("query").required(true).args(["name", "phone"])))]
pub struct FindArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContactPage {
    page: usize,
    page_count: usize,
    page_size: usize,
    total: usize,
    contacts: Vec<ContactSnapshot>,
}

pub fn run(ctx: &Context<'_>, command: ContactCommand) -> Result<()> {
    match command {
        ContactCommand::Add(args) => add_contact(ctx, args),
        ContactCommand::Show(args) => show_contact(ctx, args),
        ContactCommand::Edit(args) => edit_contact(ctx, args),
        ContactCommand::List(args) => list_contacts(ctx, args),
        ContactCommand::Delete(args) => delete_contact(ctx, args),
        ContactCommand::Search(args) => search_contacts(ctx, args),
        ContactCommand::Find(args) => find_contacts(ctx, args),
    }
}

pub fn add_contact(ctx: &Context<'_>, args: AddContactArgs) -> Result<()> {
    let name = Name::new(&args.name)?;
    let phones = args
        .phone
        .iter()
        .map(|raw| Phone::new(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let birthday = parse_optional::<Birthday>(args.birthday.as_deref())?;
    let address = parse_optional::<Address>(args.address.as_deref())?;
    let email = parse_optional::<Email>(args.email.as_deref())?;

    let mut book = ctx.load_contacts()?;
    let created = !book.contains(name.as_str());
    if created {
        book.add_record(Record::new(name.clone()));
    }
    let record = book
        .get_mut(name.as_str())
        .ok_or_else(|| not_found(format!("contact {name}")))?;
    for phone in phones {
        record.add_phone(phone);
    }
    if let Some(birthday) = birthday {
        record.set_birthday(birthday);
    }
    if address.is_some() {
        record.set_address(address);
    }
    if email.is_some() {
        record.set_email(email);
    }
    let snapshot = ContactSnapshot::from(&*record);
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else if created {
        println!("Contact added: {}", snapshot.name);
    } else {
        println!("Contact updated: {}", snapshot.name);
    }
    Ok(())
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let book = ctx.load_contacts()?;
    let record = book
        .get(&args.name)
        .ok_or_else(|| not_found(format!("contact {}", args.name)))?;
    if ctx.json {
        print_json(&ContactSnapshot::from(record))
    } else {
        println!("{record}");
        Ok(())
    }
}

pub fn edit_contact(ctx: &Context<'_>, args: EditContactArgs) -> Result<()> {
    if args.new_name.is_none()
        && args.birthday.is_none()
        && args.address.is_none()
        && args.email.is_none()
    {
        return Err(invalid_input("no updates provided"));
    }
    let new_name = args.new_name.as_deref().map(Name::new).transpose()?;
    let birthday = args
        .birthday
        .as_deref()
        .map(|raw| parse_optional::<Birthday>(Some(raw)))
        .transpose()?;
    let address = args
        .address
        .as_deref()
        .map(|raw| parse_optional::<Address>(Some(raw)))
        .transpose()?;
    let email = args
        .email
        .as_deref()
        .map(|raw| parse_optional::<Email>(Some(raw)))
        .transpose()?;

    let mut book = ctx.load_contacts()?;
    let record = book
        .get_mut(&args.name)
        .ok_or_else(|| not_found(format!("contact {}", args.name)))?;
    match birthday {
        Some(Some(birthday)) => {
            record.set_birthday(birthday);
        }
        Some(None) => {
            record.clear_birthday();
        }
        None => {}
    }
    if let Some(address) = address {
        record.set_address(address);
    }
    if let Some(email) = email {
        record.set_email(email);
    }

    let mut current = args.name.clone();
    if let Some(new_name) = new_name {
        book.rename_record(&args.name, new_name.clone())?;
        current = new_name.to_string();
    }
    let snapshot = book
        .get(&current)
        .map(ContactSnapshot::from)
        .ok_or_else(|| not_found(format!("contact {current}")))?;
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        println!("Contact updated: {}", snapshot.name);
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let page_size = validate_page_size(args.page_size.unwrap_or(ctx.config.page_size))?;
    let index = args
        .page
        .checked_sub(1)
        .ok_or_else(|| invalid_input("page numbers start at 1"))?;

    let book = ctx.load_contacts()?;
    let records = book.page(page_size, index)?;
    let page_count = book.page_count(page_size)?;

    if ctx.json {
        return print_json(&ContactPage {
            page: args.page,
            page_count,
            page_size,
            total: book.len(),
            contacts: records.iter().map(ContactSnapshot::from).collect(),
        });
    }

    if book.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    if records.is_empty() {
        println!("page {} is past the end ({} pages)", args.page, page_count);
        return Ok(());
    }
    println!("Page {}/{}", args.page, page_count);
    for record in records {
        println!("{record}");
    }
    Ok(())
}

pub fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let mut book = ctx.load_contacts()?;
    let removed = book.delete_record(&args.name)?;
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&ContactSnapshot::from(&removed))?;
    } else {
        println!("Contact deleted: {}", removed.name());
    }
    Ok(())
}

pub fn search_contacts(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let mut criteria = args
        .criteria
        .iter()
        .map(|raw| raw.parse::<Criterion>())
        .collect::<Result<Vec<_>, _>>()?;
    criteria.extend(args.name.map(Criterion::Name));
    criteria.extend(args.phone.map(Criterion::Phone));

    let book = ctx.load_contacts()?;
    print_records(ctx, book.search_records(&criteria))
}

pub fn find_contacts(ctx: &Context<'_>, args: FindArgs) -> Result<()> {
    let book = ctx.load_contacts()?;
    let hits = match (args.name.as_deref(), args.phone.as_deref()) {
        (Some(name), _) => book.search_by_name(name),
        (None, Some(phone)) => book.search_by_phone(phone),
        (None, None) => return Err(invalid_input("pass --name or --phone")),
    };
    print_records(ctx, hits)
}

fn print_records(ctx: &Context<'_>, records: Vec<&Record>) -> Result<()> {
    if ctx.json {
        let items: Vec<ContactSnapshot> = records.into_iter().map(ContactSnapshot::from).collect();
        return print_json(&items);
    }
    if records.is_empty() {
        println!("no matching contacts");
        return Ok(());
    }
    for record in records {
        println!("{record}");
    }
    Ok(())
}
