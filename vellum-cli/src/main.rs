//! Vellum CLI
//!
//! A headless HTML inspector for testing and debugging.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use vellum_core::css::query_selector_all;
use vellum_core::html::outer_html;
use vellum_core::{ParseOptions, Window, document_view, parse_with_options, print_tree};

/// Headless HTML inspector with selector queries and JSON export
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree of a file
    vellum ./index.html

    # Parse inline HTML
    vellum --html '<h1>Test</h1>'

    # Run a selector query
    vellum --query '.card, #main' ./index.html

    # Dump the DOM as JSON
    vellum --json ./index.html

    # Set the document href and print the split location
    vellum --base 'https://example.com/a?q=1#top' ./index.html
"#)]
struct Cli {
    /// Path to an HTML file to load
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print elements matching a selector list instead of the whole tree
    #[arg(long, value_name = "SELECTOR")]
    query: Option<String>,

    /// Dump the document as pretty JSON
    #[arg(long)]
    json: bool,

    /// Href the window location is derived from
    #[arg(long, value_name = "HREF")]
    base: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let markup = load_markup(&cli)?;

    let options = ParseOptions {
        href: cli.base.clone(),
    };
    let window = parse_with_options(&markup, options);

    if cli.base.is_some() {
        print_location(&window);
    }

    if let Some(ref selectors) = cli.query {
        return run_query(&window, selectors);
    }

    if cli.json {
        let rendered = serde_json::to_string_pretty(&document_view(&window.document))
            .context("failed to render the document as JSON")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", "=== DOM Tree ===".bold());
    print_tree(&window.document, window.document.root(), 0);
    Ok(())
}

/// Read markup from `--html` or the file argument.
fn load_markup(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref file) = cli.file {
        fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file.display()))
    } else {
        anyhow::bail!("provide a file path or --html; see --help")
    }
}

/// Print the split location parts for `--base`.
fn print_location(window: &Window) {
    println!("{}", "=== Location ===".bold());
    println!("pathname: {}", window.location.pathname);
    println!("search:   {}", window.location.search);
    println!("hash:     {}", window.location.hash);
    println!();
}

/// Compile the selector list and print each match with its serialized HTML.
fn run_query(window: &Window, selectors: &str) -> Result<()> {
    let doc = &window.document;
    let hits = query_selector_all(doc, doc.root(), selectors)
        .with_context(|| format!("invalid selector list '{selectors}'"))?;

    println!("{} match(es)", hits.len().green());
    for id in hits {
        println!("{}", outer_html(doc, id));
    }
    Ok(())
}
