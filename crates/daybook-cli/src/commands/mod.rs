//! Command implementations
//!
//! Each module handles one group of subcommands against an [`AppContext`].

pub mod blocks;
pub mod config;
pub mod docs;
pub mod query;
pub mod views;

use anyhow::{bail, Result};

use crate::cli::Commands;
use crate::context::AppContext;

/// Dispatch every command that works on the workspace
pub fn execute(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Today => docs::today(ctx),
        Commands::Journal(crate::cli::JournalCommands::New) => docs::new_journal(ctx),
        Commands::Page { name } => docs::page(ctx, &name),
        Commands::Open { kind, id } => docs::open(ctx, kind.into(), &id),
        Commands::Docs => docs::list(ctx),
        Commands::Show => docs::show(ctx),
        Commands::Add { text, query } => blocks::add(ctx, text, query),
        Commands::Edit { id, text } => blocks::edit(ctx, &id, &text),
        Commands::Cycle { id } => blocks::cycle(ctx, &id),
        Commands::Rm { id } => blocks::remove(ctx, &id),
        Commands::Query { body, limit } => query::run(ctx, &body, limit),
        Commands::Backlinks { limit } => query::backlinks(ctx, limit),
        Commands::Tags { tag, limit } => query::tags(ctx, tag.as_deref(), limit),
        Commands::Views(cmd) => views::execute(ctx, cmd),
        Commands::Reset { yes } => docs::reset(ctx, yes),
        Commands::Config(_) => bail!("config commands are handled before the workspace opens"),
    }
}
