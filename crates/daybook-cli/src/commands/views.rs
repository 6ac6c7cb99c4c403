//! Saved view commands

use anyhow::{bail, Result};
use colored::Colorize;

use daybook_core::ViewSpec;

use crate::cli::ViewCommands;
use crate::context::AppContext;
use crate::formatting::{entry_views, print_entries, print_json, resolve_id, short_id, ViewSummary};

pub fn execute(ctx: &mut AppContext, cmd: ViewCommands) -> Result<()> {
    match cmd {
        ViewCommands::List => list(ctx),
        ViewCommands::Save { name, body } => save(ctx, &name, &body),
        ViewCommands::Rm { id } => remove(ctx, &id),
        ViewCommands::Run { id, limit } => run(ctx, &id, limit),
    }
}

fn resolve_view(ctx: &AppContext, prefix: &str) -> Result<String> {
    let ids = ctx.workspace.views().iter().map(|view| view.id.as_str());
    resolve_id(ids, prefix, "view")
}

fn list(ctx: &AppContext) -> Result<()> {
    let views: Vec<ViewSummary> = ctx.workspace.views().iter().map(ViewSummary::from).collect();
    if ctx.json {
        return print_json(&views);
    }
    if views.is_empty() {
        println!("{}", "No saved views.".dimmed());
    }
    for view in &views {
        println!(
            "{}  {}  {}",
            short_id(&view.id).dimmed(),
            view.name.bold(),
            view.subtitle.dimmed()
        );
    }
    Ok(())
}

fn save(ctx: &mut AppContext, name: &str, body: &str) -> Result<()> {
    let Some(view) = ctx.workspace.save_view(name, ViewSpec::parse_body(body)) else {
        bail!("View name must not be empty");
    };
    if ctx.json {
        return print_json(&ViewSummary::from(&view));
    }
    println!(
        "{} view {} ({})",
        "Saved".green().bold(),
        view.name.bold(),
        short_id(&view.id)
    );
    Ok(())
}

fn remove(ctx: &mut AppContext, prefix: &str) -> Result<()> {
    let id = resolve_view(ctx, prefix)?;
    ctx.workspace.remove_view(&id);
    if ctx.json {
        return print_json(&serde_json::json!({ "id": id, "removed": true }));
    }
    println!("{} view {}", "Deleted".green().bold(), short_id(&id));
    Ok(())
}

fn run(ctx: &AppContext, prefix: &str, limit: Option<usize>) -> Result<()> {
    let id = resolve_view(ctx, prefix)?;
    let limit = limit.unwrap_or(ctx.config.display.view_limit);
    let results = ctx.workspace.run_view(&id)?;

    if ctx.json {
        return print_json(&entry_views(&results, limit));
    }
    if let Some(view) = ctx.workspace.view(&id) {
        println!("{} {}", view.name.bold(), view.query.subtitle().dimmed());
    }
    print_entries(&results, limit, ctx.snippet_width(), "No results.");
    Ok(())
}
