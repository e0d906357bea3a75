//! `contacts` - CLI for contactbook
//!
//! This binary is a thin front end over [`contactbook::ContactBook`]: it loads
//! the contacts file, applies one command, and lets the book save the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::collections::HashSet;

use anyhow::{bail, Context};
use clap::Parser;

use contactbook::cli::render::{render_detail, render_json, render_plain, render_table, Row};
use contactbook::cli::{CheckCommand, Cli, Command, ConfigCommand, EditCommand, OutputFormat};
use contactbook::{init_logging, Config, ContactBook, ContactId, Error, Validator};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(file) = &cli.file {
        config.storage.contacts_path = Some(file.clone());
    }

    match cli.command {
        Command::List(cmd) => {
            let book = open_book(&config)?;
            print_rows(&all_rows(&book), cmd.format)
        }
        Command::Show { row } => {
            let book = open_book(&config)?;
            let id = book.id_at(row)?;
            let contact = book.get(id).ok_or(Error::ContactNotFound(id))?;
            print!("{}", render_detail(row, contact));
            Ok(())
        }
        Command::Add(cmd) => {
            let mut book = open_book(&config)?;
            book.add(cmd.to_draft())?;
            println!("Added {} as row {}.", cmd.name, book.len());
            Ok(())
        }
        Command::Edit(cmd) => {
            let mut book = open_book(&config)?;
            handle_edit(&mut book, &cmd)
        }
        Command::Delete { row } => {
            let mut book = open_book(&config)?;
            let id = book.id_at(row)?;
            let removed = book.remove(id)?;
            println!("Deleted {} (row {row}).", removed.name());
            Ok(())
        }
        Command::Search(cmd) => {
            let book = open_book(&config)?;
            let hits: HashSet<ContactId> = book.search(&cmd.query).iter().map(|c| c.id()).collect();
            let rows: Vec<Row<'_>> = all_rows(&book)
                .into_iter()
                .filter(|(_, c)| hits.contains(&c.id()))
                .collect();
            print_rows(&rows, cmd.format)
        }
        Command::Check(cmd) => handle_check(&config.validator(), &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_book(config: &Config) -> anyhow::Result<ContactBook> {
    let store = config.store();
    let path = store.path().to_path_buf();
    let (book, skipped) = ContactBook::open(store, config.validator())
        .with_context(|| format!("opening contacts file {}", path.display()))?;

    for row in &skipped {
        eprintln!(
            "warning: skipped line {} of {}: {}",
            row.line,
            path.display(),
            row.reason
        );
    }
    Ok(book)
}

fn all_rows(book: &ContactBook) -> Vec<Row<'_>> {
    book.contacts()
        .iter()
        .enumerate()
        .map(|(index, contact)| (index + 1, contact))
        .collect()
}

fn print_rows(rows: &[Row<'_>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", render_plain(rows)),
        OutputFormat::Table => print!("{}", render_table(rows)),
        OutputFormat::Json => println!("{}", render_json(rows)?),
    }
    Ok(())
}

fn handle_edit(book: &mut ContactBook, cmd: &EditCommand) -> anyhow::Result<()> {
    let id = book.id_at(cmd.row)?;
    let mut draft = book
        .get(id)
        .map(contactbook::Contact::to_draft)
        .ok_or(Error::ContactNotFound(id))?;
    cmd.apply_to(&mut draft);
    book.update(id, draft)?;
    println!("Updated row {}.", cmd.row);
    Ok(())
}

fn handle_check(validator: &Validator, cmd: &CheckCommand) -> anyhow::Result<()> {
    let mut failures = 0;
    let mut report = |value: &str, result: Result<(), contactbook::ValidationError>| match result
    {
        Ok(()) => println!("ok       {value}"),
        Err(reason) => {
            failures += 1;
            println!("invalid  {reason}");
        }
    };

    for email in &cmd.email {
        report(email, validator.check_email(email));
    }
    if let Some(phone) = &cmd.phone {
        report(phone, validator.check_line_number(phone));
    }
    if let Some(locality) = &cmd.locality {
        report(locality, validator.check_locality_code(locality));
    }

    if failures > 0 {
        bail!("{failures} value(s) failed validation");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Contacts file:      {}", config.contacts_path().display());
                println!("  Atomic writes:      {}", config.storage.atomic_writes);
                println!();
                println!("[Validation]");
                println!("  Phone numbers:      {}", config.validation.line_number);
                println!("  Postal codes:       {}", config.validation.locality_code);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
