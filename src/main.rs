// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and open the settings store
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = nothing redirected, 2 = error)
//
// The redirect logic itself lives in the library (src/lib.rs); this file only hosts it:
// it plays the part of the browser (delivering clicks, opening tabs) and of
// the options page (editing the settings).
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod logging; // src/logging.rs - tracing setup

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use scraper::{Html, Selector};

use cli::{Cli, Commands, SetArgs, SettingsCommand};
use reddit_user_redirect::config::{default_store_path, RedirectConfig};
use reddit_user_redirect::page::{self, DocumentKind, ScanReport};
use reddit_user_redirect::redirect::{
    self, Anchor, ClickEvent, ClickOutcome, Redirector, StdoutOpener,
};
use reddit_user_redirect::settings::{self, JsonFileStore, MemoryStore, Settings, SettingsStore};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = redirected / profile links found / settings updated
//   Ok(1) = nothing to redirect
//   Err   = unexpected error (exit code 2)
async fn run(cli: Cli) -> Result<i32> {
    let config = RedirectConfig::default();
    let (store, store_label) = open_store(&cli)?;
    tracing::debug!(store = %store_label, "using settings store");

    match cli.command {
        Commands::Resolve { href, json } => handle_resolve(config, store, &href, json).await,
        Commands::Scan { sources, json } => handle_scan(&config, store.as_ref(), sources, json).await,
        Commands::Click {
            source,
            selector,
            index,
            json,
        } => handle_click(config, store, &source, &selector, index, json).await,
        Commands::Settings(command) => {
            handle_settings(&config, store.as_ref(), &store_label, command).await
        }
    }
}

// Picks the settings backend from the global flags.
// Returns the store plus a human-readable description of where it lives.
fn open_store(cli: &Cli) -> Result<(Box<dyn SettingsStore>, String)> {
    if cli.no_store {
        return Ok((Box::new(MemoryStore::new()), "built-in defaults".to_string()));
    }

    let path = match &cli.store {
        Some(path) => path.clone(),
        None => default_store_path()
            .context("could not find a config directory, pass --store <PATH>")?,
    };

    let store = JsonFileStore::new(path);
    let label = store.path().display().to_string();
    Ok((Box::new(store), label))
}

// Handles the 'resolve' subcommand: a click on a bare <a href="...">
async fn handle_resolve(
    config: RedirectConfig,
    store: Box<dyn SettingsStore>,
    href: &str,
    json: bool,
) -> Result<i32> {
    let redirector = Redirector::new(config, store, StdoutOpener { quiet: json });

    let mut event = ClickEvent::new(Anchor::new(href));
    let outcome = redirector.handle_click(&mut event).await;

    print_outcome(&outcome, json)?;
    Ok(exit_code_for(&outcome))
}

// Handles the 'scan' subcommand
async fn handle_scan(
    config: &RedirectConfig,
    store: &dyn SettingsStore,
    sources: Vec<String>,
    json: bool,
) -> Result<i32> {
    // One snapshot for the whole report
    let settings = settings::load_settings(store, &config.defaults).await;
    let classifier = redirect::LinkClassifier::new();
    let client = page::http_client()?;

    if !json {
        println!("🔍 Scanning {} source(s)", sources.len());
    }

    let results = page::load_documents(&client, sources.clone()).await;

    let mut reports = Vec::new();
    for (source, result) in results {
        match result {
            Ok(document) => {
                reports.push(page::scan_document(&document, &classifier, config, &settings));
            }
            Err(e) => {
                eprintln!("⚠️  Could not load {}: {:#}", source, e);
            }
        }
    }

    if reports.is_empty() {
        bail!("none of the sources could be loaded");
    }

    // buffer_unordered finishes in any order; report in the order given
    reports.sort_by_key(|report| sources.iter().position(|s| *s == report.source));

    print_reports(&reports, json)?;

    let found = reports.iter().any(|r| !r.profile_links.is_empty());
    Ok(if found { 0 } else { 1 })
}

// Handles the 'click' subcommand
async fn handle_click(
    config: RedirectConfig,
    store: Box<dyn SettingsStore>,
    source: &str,
    selector: &str,
    index: usize,
    json: bool,
) -> Result<i32> {
    let client = page::http_client()?;
    let document = page::load_document(&client, source).await?;

    if document.kind != DocumentKind::Html {
        bail!("click needs an HTML document, {} is Markdown", source);
    }

    let html = Html::parse_document(&document.body);
    let parsed_selector =
        Selector::parse(selector).map_err(|e| anyhow!("invalid selector '{}': {}", selector, e))?;
    let target = html
        .select(&parsed_selector)
        .nth(index)
        .with_context(|| format!("no element #{} matches '{}' in {}", index, selector, source))?;

    let redirector = Redirector::new(config, store, StdoutOpener { quiet: json });

    let mut event = ClickEvent::new(target);
    let outcome = redirector.handle_click(&mut event).await;

    print_outcome(&outcome, json)?;
    if !json && event.default_prevented() {
        println!("   (default navigation was cancelled)");
    }

    Ok(exit_code_for(&outcome))
}

// Handles the 'settings' subcommands: the options page
async fn handle_settings(
    config: &RedirectConfig,
    store: &dyn SettingsStore,
    store_label: &str,
    command: SettingsCommand,
) -> Result<i32> {
    match command {
        SettingsCommand::Show { json } => {
            let current = settings::load_settings(store, &config.defaults).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&current)?);
            } else {
                println!("📁 Settings from {}", store_label);
                print_settings(&current);
            }
        }
        SettingsCommand::Set(args) => {
            // Start from what the form would be pre-filled with
            let current = settings::load_settings(store, &config.defaults).await;
            let updated = apply_changes(current, args);

            settings::save_settings(store, &updated)
                .await
                .context("failed to save settings")?;

            println!("✅ Settings saved successfully!");
            print_settings(&updated);
        }
        SettingsCommand::Reset => {
            settings::reset_settings(store)
                .await
                .context("failed to reset settings")?;

            println!("✅ Settings reset to defaults");
            print_settings(&config.defaults);
        }
    }

    Ok(0)
}

// Overlays the flags that were given onto the current settings
fn apply_changes(current: Settings, changes: SetArgs) -> Settings {
    Settings {
        limit: changes.limit.unwrap_or(current.limit),
        sort: changes.sort.unwrap_or(current.sort),
        mode: changes.mode.unwrap_or(current.mode),
        backend: changes.backend.unwrap_or(current.backend),
    }
}

fn exit_code_for(outcome: &ClickOutcome) -> i32 {
    if outcome.is_redirected() {
        0
    } else {
        1
    }
}

fn print_outcome(outcome: &ClickOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        ClickOutcome::NoLink => {
            println!("ℹ️  The clicked element is not inside a link");
        }
        ClickOutcome::PassThrough { href } => {
            println!("➡️  {} is not a profile link, normal navigation", href);
        }
        ClickOutcome::Suppressed { href } => {
            println!("⚠️  {} looks like a profile link but names no user; click suppressed", href);
        }
        ClickOutcome::Redirected { username, url, .. } => {
            println!("✅ u/{} -> {}", username, url);
        }
        ClickOutcome::Failed { href, error } => {
            println!("❌ Could not redirect {}: {}", href, error);
        }
    }

    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("   limit:   {}", settings.limit);
    println!("   sort:    {}", settings.sort);
    println!("   mode:    {}", settings.mode);
    println!("   backend: {}", settings.backend);
}

// Prints scan reports either as a table or JSON
fn print_reports(reports: &[ScanReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        print_table(reports);
    }
    Ok(())
}

// Prints scan reports as a human-readable table in the terminal
fn print_table(reports: &[ScanReport]) {
    for report in reports {
        println!(
            "\n📄 {} ({} link(s), {} profile link(s))",
            report.source,
            report.anchors,
            report.profile_links.len()
        );

        if report.profile_links.is_empty() {
            continue;
        }

        println!("{:<40} {:<20} {}", "HREF", "USER", "REDIRECT");
        println!("{}", "=".repeat(100));

        for link in &report.profile_links {
            println!(
                "{:<40} {:<20} {}",
                truncate(&link.href, 37),
                link.username.as_deref().unwrap_or("-"),
                link.redirect.as_deref().unwrap_or("(click would be suppressed)")
            );
        }
    }

    let total: usize = reports.iter().map(|r| r.profile_links.len()).sum();
    println!("\n📊 Summary:");
    println!("   📄 Sources: {}", reports.len());
    println!("   👤 Profile links: {}", total);
}

// Shortens long hrefs for display, on a char boundary
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reddit_user_redirect::settings::{SearchMode, SortOrder};

    #[test]
    fn test_apply_changes_keeps_unset_fields() {
        let current = RedirectConfig::default().defaults;
        let changes = SetArgs {
            limit: Some(25),
            mode: Some(SearchMode::Comments),
            ..SetArgs::default()
        };

        let updated = apply_changes(current, changes);
        assert_eq!(updated.limit, 25);
        assert_eq!(updated.mode, SearchMode::Comments);
        assert_eq!(updated.sort, SortOrder::Desc);
        assert_eq!(updated.backend, "artic_shift");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("/u/bob", 37), "/u/bob");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("jörgjörg", 4), "jörg...");
    }

    #[test]
    fn test_exit_codes() {
        let redirected = ClickOutcome::Redirected {
            href: "/u/bob".to_string(),
            username: "bob".to_string(),
            url: "https://ihsoyct.github.io/".to_string(),
        };
        assert_eq!(exit_code_for(&redirected), 0);
        assert_eq!(exit_code_for(&ClickOutcome::NoLink), 1);
    }

    #[tokio::test]
    async fn test_settings_set_then_resolve_uses_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let config = RedirectConfig::default();

        let store = JsonFileStore::new(&path);
        let changes = SetArgs {
            sort: Some(SortOrder::Asc),
            backend: Some("other".to_string()),
            ..SetArgs::default()
        };
        let current = settings::load_settings(&store, &config.defaults).await;
        settings::save_settings(&store, &apply_changes(current, changes))
            .await
            .unwrap();

        let redirector = Redirector::new(
            config,
            Box::new(JsonFileStore::new(&path)) as Box<dyn SettingsStore>,
            StdoutOpener { quiet: true },
        );
        let mut event = ClickEvent::new(Anchor::new("https://www.reddit.com/user/erin/"));
        let outcome = redirector.handle_click(&mut event).await;

        assert_eq!(
            outcome,
            ClickOutcome::Redirected {
                href: "https://www.reddit.com/user/erin/".to_string(),
                username: "erin".to_string(),
                url: "https://ihsoyct.github.io/?backend=other&mode=submissions&author=erin&limit=100&sort=asc"
                    .to_string(),
            }
        );
    }
}
