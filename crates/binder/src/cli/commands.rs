//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides where logs go
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Each subcommand maps to one `BinderApi` call; the returned `CmdResult` is
//! rendered and printed. Errors bubble up to `main`, which prints them and exits 1.

use super::render::{
    render_affected_cards, render_binder_list, render_binder_view, render_messages,
};
use super::setup::{Cli, Commands, ConfigCommands};
use anyhow::{Context, Result};
use binderapp::api::{InsertPosition, NewCard};
use binderapp::commands::CmdResult;
use binderapp::config::{BinderConfig, CONFIG_FILE};
use binderapp::init::{initialize, BinderContext};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx =
        initialize(cli.data_dir.clone()).context("could not open the binder data directory")?;
    debug!(command = ?cli.command, "dispatching");

    let command = cli.command.unwrap_or(Commands::List);
    let result = match command {
        Commands::Config { action } => return handle_config(action, &ctx),
        Commands::Create {
            name,
            rows,
            columns,
            pages,
        } => {
            let geometry = ctx.config.geometry(rows, columns, pages)?;
            ctx.api.create_binder(&name, geometry)?
        }
        Commands::List => ctx.api.list_binders()?,
        Commands::View { binder, page } => ctx.api.view_binder(&binder, page.as_deref())?,
        Commands::Rename { binder, name } => ctx.api.rename_binder(&binder, &name)?,
        Commands::Delete { binder } => ctx.api.delete_binder(&binder)?,
        Commands::Place {
            binder,
            name,
            at,
            set,
            number,
        } => {
            let card = NewCard {
                name: name.join(" "),
                set_code: set,
                number,
            };
            ctx.api.place_card(&binder, card, at.as_deref())?
        }
        Commands::Move { binder, from, to } => ctx.api.move_card(&binder, &from, &to)?,
        Commands::Remove { binder, at, shift } => ctx.api.remove_card(&binder, &at, shift)?,
        Commands::InsertSlot { binder, at } => ctx.api.insert_slot(&binder, &at)?,
        Commands::CloseSlot { binder, at } => ctx.api.close_slot(&binder, &at)?,
        Commands::MovePage {
            binder,
            source,
            target,
        } => ctx.api.move_page(&binder, &source, &target)?,
        Commands::InsertPage {
            binder,
            page,
            after,
        } => {
            let position = if after {
                InsertPosition::After
            } else {
                InsertPosition::Before
            };
            ctx.api.insert_page(&binder, &page, position)?
        }
        Commands::DeletePage { binder, page } => ctx.api.delete_page(&binder, &page)?,
        Commands::AddPages { binder, count } => ctx.api.append_pages(&binder, count)?,
        Commands::Doctor => ctx.api.doctor()?,
    };

    print_result(&result);
    Ok(())
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` wins over
/// the default level; `--verbose` turns on debug logs for the library.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,binderapp=debug,binder=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_result(result: &CmdResult) {
    let mut out = String::new();
    out.push_str(&render_binder_list(&result.listed_binders));
    if let Some(view) = &result.binder {
        if !view.cards.is_empty() || view.page.is_some() || result.messages.is_empty() {
            out.push_str(&render_binder_view(view));
        }
    }
    out.push_str(&render_messages(&result.messages));
    out.push_str(&render_affected_cards(&result.affected_cards));
    print!("{}", out);
}

fn handle_config(action: Option<ConfigCommands>, ctx: &BinderContext) -> Result<()> {
    match action.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            let c = &ctx.config;
            println!("default_rows = {}", c.default_rows);
            println!("default_columns = {}", c.default_columns);
            println!("default_pages = {}", c.default_pages);
        }
        ConfigCommands::Path => {
            println!("data directory: {}", ctx.data_dir.display());
            println!("config file:    {}", ctx.data_dir.join(CONFIG_FILE).display());
        }
        ConfigCommands::Template => print!("{}", BinderConfig::template()),
    }
    Ok(())
}
