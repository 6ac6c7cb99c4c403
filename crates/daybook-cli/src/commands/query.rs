//! Ad-hoc queries, backlinks and tags

use anyhow::Result;
use colored::Colorize;

use daybook_core::ViewSpec;

use crate::context::AppContext;
use crate::formatting::{entry_views, print_entries, print_json, tag_line};

pub fn run(ctx: &AppContext, body: &str, limit: Option<usize>) -> Result<()> {
    let spec = ViewSpec::parse_body(body);
    let limit = limit.unwrap_or(ctx.config.display.query_limit);
    let results = ctx.workspace.evaluate(&spec);

    if ctx.json {
        return print_json(&entry_views(&results, limit));
    }
    println!("{} {}", "query".blue().bold(), spec.subtitle().dimmed());
    print_entries(&results, limit, ctx.snippet_width(), "No results.");
    Ok(())
}

pub fn backlinks(ctx: &AppContext, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.display.backlink_limit);
    let hits = ctx.workspace.backlinks()?;

    if ctx.json {
        return print_json(&entry_views(&hits, limit));
    }
    let current = ctx.workspace.current();
    println!("{} {} {}", "Backlinks to".bold(), current.kind, current.id.bold());
    print_entries(&hits, limit, ctx.snippet_width(), "No backlinks.");
    Ok(())
}

pub fn tags(ctx: &AppContext, tag: Option<&str>, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.display.tag_limit);

    if let Some(tag) = tag {
        let hits = ctx.workspace.blocks_with_tag(tag);
        if ctx.json {
            return print_json(&entry_views(&hits, limit));
        }
        let tag = tag.trim_start_matches('#');
        println!("{}", format!("#{}", tag).magenta().bold());
        print_entries(&hits, limit, ctx.snippet_width(), "No blocks.");
        return Ok(());
    }

    let counts = ctx.workspace.tag_frequencies();
    let shown: Vec<_> = counts.into_iter().take(limit).collect();
    if ctx.json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("{}", "No tags yet. Add #tags in blocks.".dimmed());
    }
    for count in &shown {
        println!("{}", tag_line(count));
    }
    Ok(())
}
