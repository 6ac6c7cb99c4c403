//! Navigation and document commands

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;

use daybook_core::query::parse_query_block;
use daybook_core::{DocRef, DocumentKind};

use crate::context::AppContext;
use crate::formatting::{
    entry_line, entry_views, print_json, short_id, status_label, BlockView, DocumentSummary,
    DocumentView, QueryView,
};

#[derive(Serialize)]
struct Opened<'a> {
    kind: DocumentKind,
    id: &'a str,
}

fn report_opened(ctx: &AppContext, doc: &DocRef, verb: &str) -> Result<()> {
    if ctx.json {
        return print_json(&Opened {
            kind: doc.kind,
            id: &doc.id,
        });
    }
    println!("{} {} {}", verb.green().bold(), doc.kind, doc.id.bold());
    Ok(())
}

pub fn today(ctx: &mut AppContext) -> Result<()> {
    let doc = ctx.workspace.open_today();
    report_opened(ctx, &doc, "Opened")
}

pub fn new_journal(ctx: &mut AppContext) -> Result<()> {
    let doc = ctx.workspace.new_journal();
    report_opened(ctx, &doc, "Created")
}

pub fn page(ctx: &mut AppContext, name: &str) -> Result<()> {
    let Some(doc) = ctx.workspace.new_page(name) else {
        bail!("Page name must not be empty");
    };
    report_opened(ctx, &doc, "Opened")
}

pub fn open(ctx: &mut AppContext, kind: DocumentKind, id: &str) -> Result<()> {
    let doc = DocRef::new(kind, id);
    ctx.workspace
        .navigate(doc.clone())
        .with_context(|| format!("Cannot open {}", doc))?;
    report_opened(ctx, &doc, "Opened")
}

pub fn list(ctx: &AppContext) -> Result<()> {
    let journals = ctx.workspace.journals();
    let pages = ctx.workspace.pages();
    if ctx.json {
        let all: Vec<DocumentSummary> = journals
            .iter()
            .map(|doc| DocumentSummary::new(DocumentKind::Journal, doc))
            .chain(pages.iter().map(|doc| DocumentSummary::new(DocumentKind::Page, doc)))
            .collect();
        return print_json(&all);
    }

    let current = ctx.workspace.current();
    let marker = |kind: DocumentKind, id: &str| {
        if current.kind == kind && current.id == id {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        }
    };

    println!("{}", "Journals".bold());
    for doc in &journals {
        println!(
            "{} {}  {}",
            marker(DocumentKind::Journal, &doc.id),
            doc.id,
            format!("{} blocks", doc.blocks.len()).dimmed()
        );
    }
    println!("{}", "Pages".bold());
    for doc in &pages {
        println!(
            "{} {}  {}",
            marker(DocumentKind::Page, &doc.id),
            doc.title,
            format!("{} blocks", doc.blocks.len()).dimmed()
        );
    }
    Ok(())
}

pub fn show(ctx: &AppContext) -> Result<()> {
    let workspace = &ctx.workspace;
    let current = workspace.current();
    let document = workspace.current_document()?;
    let parser = workspace.parser();
    let limit = ctx.config.display.query_limit;
    let width = ctx.snippet_width();

    if ctx.json {
        let mut blocks = Vec::with_capacity(document.blocks.len());
        for block in &document.blocks {
            let query = match parse_query_block(&block.text) {
                Some(spec) => {
                    let results = workspace.query_block_results(&block.id)?.unwrap_or_default();
                    Some(QueryView {
                        subtitle: spec.subtitle(),
                        total: results.len(),
                        results: entry_views(&results, limit),
                    })
                }
                None => None,
            };
            blocks.push(BlockView::new(
                block,
                parser.tags(&block.text),
                parser.links(&block.text),
                query,
            ));
        }
        return print_json(&DocumentView {
            kind: current.kind,
            id: document.id.clone(),
            title: document.title.clone(),
            blocks,
        });
    }

    println!("{} {}", current.kind.to_string().dimmed(), document.title.bold());
    if document.blocks.is_empty() {
        println!("{}", "(no blocks)".dimmed());
    }
    for block in &document.blocks {
        let text = if block.text.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            block.text.clone()
        };
        println!(
            "{} {}  {}",
            status_label(block.status),
            short_id(&block.id).dimmed(),
            text
        );

        let annotations = parser.annotate(&block.text);
        if !annotations.is_empty() {
            let tags: Vec<String> = annotations.tags.iter().map(|t| format!("#{}", t)).collect();
            let links: Vec<String> =
                annotations.links.iter().map(|l| format!("[[{}]]", l)).collect();
            let joined = tags.into_iter().chain(links).collect::<Vec<_>>().join(" ");
            println!("    {}", joined.magenta());
        }

        if let Some(spec) = parse_query_block(&block.text) {
            let results = workspace.query_block_results(&block.id)?.unwrap_or_default();
            println!("    {} {}", "view".blue().bold(), spec.subtitle().dimmed());
            if results.is_empty() {
                println!("      {}", "No results.".dimmed());
            }
            for entry in results.iter().take(limit) {
                println!("      {}", entry_line(entry, width));
            }
        }
    }
    Ok(())
}

pub fn reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        bail!("Reset discards every journal, page and saved view; pass --yes to confirm");
    }
    ctx.workspace.reset();
    if ctx.json {
        let current = ctx.workspace.current();
        return print_json(&Opened {
            kind: current.kind,
            id: &current.id,
        });
    }
    println!("{} workspace reset", "Done:".green().bold());
    Ok(())
}
