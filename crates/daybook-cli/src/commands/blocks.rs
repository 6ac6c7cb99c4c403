//! Block commands on the current document

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use daybook_core::{BlockStatus, ViewSpec};

use crate::context::AppContext;
use crate::formatting::{print_json, resolve_id, short_id, status_label};

#[derive(Serialize)]
struct BlockResult<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<BlockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

/// Full block id for an exact id or unique prefix
pub fn resolve_block(ctx: &AppContext, prefix: &str) -> Result<String> {
    let ids = ctx
        .workspace
        .store()
        .documents()
        .flat_map(|(_, doc)| doc.blocks.iter().map(|block| block.id.as_str()));
    resolve_id(ids, prefix, "block")
}

pub fn add(
    ctx: &mut AppContext,
    text: Option<String>,
    query: Option<Option<String>>,
) -> Result<()> {
    let id = match query {
        Some(Some(body)) => ctx
            .workspace
            .add_query_block(Some(&ViewSpec::parse_body(&body)))?,
        Some(None) => ctx.workspace.add_query_block(None)?,
        None => ctx.workspace.add_block(text.as_deref().unwrap_or_default())?,
    };

    let block = ctx.workspace.store().find_block(&id).map(|(_, block)| block);
    if ctx.json {
        return print_json(&BlockResult {
            id: &id,
            status: block.map(|b| b.status),
            text: block.map(|b| b.text.as_str()),
        });
    }
    println!("{} block {}", "Added".green().bold(), short_id(&id));
    Ok(())
}

pub fn edit(ctx: &mut AppContext, prefix: &str, text: &str) -> Result<()> {
    let id = resolve_block(ctx, prefix)?;
    ctx.workspace.edit_block(&id, text)?;
    if ctx.json {
        return print_json(&BlockResult {
            id: &id,
            status: None,
            text: Some(text),
        });
    }
    println!("{} block {}", "Updated".green().bold(), short_id(&id));
    Ok(())
}

pub fn cycle(ctx: &mut AppContext, prefix: &str) -> Result<()> {
    let id = resolve_block(ctx, prefix)?;
    let status = ctx.workspace.cycle_block(&id)?;
    if ctx.json {
        return print_json(&BlockResult {
            id: &id,
            status: Some(status),
            text: None,
        });
    }
    println!("{} {}", status_label(status), short_id(&id));
    Ok(())
}

pub fn remove(ctx: &mut AppContext, prefix: &str) -> Result<()> {
    let id = resolve_block(ctx, prefix)?;
    let removed = ctx.workspace.delete_block(&id)?;
    if ctx.json {
        return print_json(&BlockResult {
            id: &id,
            status: Some(removed.status),
            text: Some(&removed.text),
        });
    }
    println!("{} block {}", "Deleted".green().bold(), short_id(&id));
    Ok(())
}
