use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use navrender::{HtmlAdapter, Level, MenuParser, Navigation, RendererKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("navrender")
        .about("Render a JSON navigation menu as HTML, text or JSON")
        .arg(
            Arg::new("input")
                .help("Menu definition (JSON)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("renderer")
                .long("renderer")
                .short('r')
                .help("One of: list, links, breadcrumbs, text, json")
                .default_value("list")
                .value_parser(|s: &str| s.parse::<RendererKind>()),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .help("'all', a single depth, or an inclusive range like 1..2")
                .value_parser(|s: &str| s.parse::<Level>()),
        )
        .arg(
            Arg::new("current")
                .long("current")
                .help("URL of the current page; selects the matching item and its ancestors"),
        )
        .arg(
            Arg::new("expand-all")
                .long("expand-all")
                .help("Render every sub-level regardless of selection")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-if-empty")
                .long("skip-if-empty")
                .help("Emit nothing for an empty menu")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ordered")
                .long("ordered")
                .help("Use <ol> instead of <ul> for lists")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("static-leaf")
                .long("static-leaf")
                .help("Render the last breadcrumb as plain text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("join-with")
                .long("join-with")
                .help("Separator between links, breadcrumbs or text entries"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Text shown before a non-empty breadcrumb trail"),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input file")?;
    let kind = matches
        .get_one::<RendererKind>("renderer")
        .copied()
        .unwrap_or_default();

    let mut menu = MenuParser::parse_file(input)?;

    // Flags override whatever the menu file configured
    if let Some(level) = matches.get_one::<Level>("level") {
        menu.options.level = level.clone();
    }
    if let Some(join_with) = matches.get_one::<String>("join-with") {
        menu.options.join_with = Some(join_with.clone());
    }
    if let Some(prefix) = matches.get_one::<String>("prefix") {
        menu.options.prefix = Some(prefix.clone());
    }
    menu.options.expand_all |= matches.get_flag("expand-all");
    menu.options.skip_if_empty |= matches.get_flag("skip-if-empty");
    menu.options.ordered |= matches.get_flag("ordered");
    menu.options.static_leaf |= matches.get_flag("static-leaf");

    if let Some(current) = matches.get_one::<String>("current") {
        if !menu.root.select_current(current) {
            warn!(url = %current, "no menu item matches the current URL");
        }
    }

    debug!(options = ?menu.options, "render options");
    let navigation = Navigation::new(menu.root, menu.options, Arc::new(HtmlAdapter));
    let output = navigation
        .render(kind)
        .with_context(|| format!("Failed to render {} navigation", kind))?;

    println!("{}", output);

    Ok(())
}
