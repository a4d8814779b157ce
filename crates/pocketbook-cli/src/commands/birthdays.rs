use crate::commands::{print_json, resolve_today, Context};
use crate::error::not_found;
use anyhow::Result;
use clap::{Args, Subcommand};
use pocketbook_config::validate_upcoming_days;
use pocketbook_core::{Birthday, ContactSnapshot};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum BirthdayCommand {
    Set(SetBirthdayArgs),
    /// Days until the contact's next birthday
    Days(DaysArgs),
    /// Birthdays falling within the next N days
    Upcoming(UpcomingArgs),
}

#[derive(Debug, Args)]
pub struct SetBirthdayArgs {
    pub name: String,
    #[arg(value_name = "DD.MM.YYYY")]
    pub date: String,
}

#[derive(Debug, Args)]
pub struct DaysArgs {
    pub name: String,
    #[arg(long, value_name = "DD.MM.YYYY", hide = true)]
    pub today: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpcomingArgs {
    #[arg(long)]
    pub days: Option<i64>,
    #[arg(long, value_name = "DD.MM.YYYY", hide = true)]
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
struct BirthdayDistance {
    name: String,
    birthday: Option<String>,
    days: Option<i64>,
}

pub fn run(ctx: &Context<'_>, command: BirthdayCommand) -> Result<()> {
    match command {
        BirthdayCommand::Set(args) => set_birthday(ctx, args),
        BirthdayCommand::Days(args) => days_to_birthday(ctx, args),
        BirthdayCommand::Upcoming(args) => upcoming_birthdays(ctx, args),
    }
}

pub fn set_birthday(ctx: &Context<'_>, args: SetBirthdayArgs) -> Result<()> {
    let birthday = Birthday::new(&args.date)?;
    let mut book = ctx.load_contacts()?;
    let record = book
        .get_mut(&args.name)
        .ok_or_else(|| not_found(format!("contact {}", args.name)))?;
    record.set_birthday(birthday.clone());
    let snapshot = ContactSnapshot::from(&*record);
    ctx.save_contacts(&book)?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        println!("Birthday {} set for {}", birthday, snapshot.name);
    }
    Ok(())
}

pub fn days_to_birthday(ctx: &Context<'_>, args: DaysArgs) -> Result<()> {
    let today = resolve_today(args.today.as_deref())?;
    let book = ctx.load_contacts()?;
    let record = book
        .get(&args.name)
        .ok_or_else(|| not_found(format!("contact {}", args.name)))?;
    let item = BirthdayDistance {
        name: record.name().to_string(),
        birthday: record.birthday().map(Birthday::to_string),
        days: record.days_to_birthday(today),
    };

    if ctx.json {
        return print_json(&item);
    }
    match item.days {
        Some(0) => println!("{}'s birthday is today", item.name),
        Some(days) => println!("{} days until {}'s birthday", days, item.name),
        None => println!("{} has no birthday set", item.name),
    }
    Ok(())
}

pub fn upcoming_birthdays(ctx: &Context<'_>, args: UpcomingArgs) -> Result<()> {
    let within = validate_upcoming_days(args.days.unwrap_or(ctx.config.upcoming_days))?;
    let today = resolve_today(args.today.as_deref())?;
    let book = ctx.load_contacts()?;
    let items: Vec<BirthdayDistance> = book
        .upcoming_birthdays(today, within)
        .into_iter()
        .map(|item| BirthdayDistance {
            name: item.record.name().to_string(),
            birthday: item.record.birthday().map(Birthday::to_string),
            days: Some(item.days),
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("no birthdays in the next {within} days");
        return Ok(());
    }
    for item in items {
        let when = match item.days {
            Some(0) => "today".to_string(),
            Some(1) => "tomorrow".to_string(),
            Some(days) => format!("in {days} days"),
            None => continue,
        };
        println!(
            "{} ({}) {}",
            item.name,
            item.birthday.unwrap_or_default(),
            when
        );
    }
    Ok(())
}
