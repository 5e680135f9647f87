// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - resolve: where would clicking this href take me?
// - scan: list the profile links in pages or Markdown posts
// - click: deliver a click to an element in a saved page
// - settings: show / change / reset the search settings
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use reddit_user_redirect::settings::{SearchMode, SortOrder};

#[derive(Parser, Debug)]
#[command(
    name = "reddit-user-redirect",
    version = "0.1.0",
    about = "Redirect Reddit username links to a user search tool",
    long_about = "reddit-user-redirect recognises links to Reddit user profiles and turns them into \
                  search tool URLs for that user, using your saved limit, sort, mode and backend."
)]
pub struct Cli {
    /// Settings file (default: <config dir>/reddit-user-redirect/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Ignore the settings file and use the built-in defaults
    #[arg(long, global = true, conflicts_with = "store")]
    pub no_store: bool,

    /// Log debug output to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show where clicking a link with this href would redirect
    ///
    /// Example: reddit-user-redirect resolve /user/spez
    Resolve {
        /// The href attribute, relative or absolute
        href: String,

        /// Output the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List profile links in HTML pages or Markdown posts
    ///
    /// Example: reddit-user-redirect scan saved.html https://old.reddit.com/r/rust/
    Scan {
        /// Files or http(s) URLs. Files ending in .md / .markdown are read as Markdown
        #[arg(required = true)]
        sources: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Click an element in an HTML page and report what happens
    ///
    /// Example: reddit-user-redirect click saved.html --selector "a.author"
    Click {
        /// HTML file or http(s) URL
        source: String,

        /// CSS selector for the element to click
        #[arg(long, short)]
        selector: String,

        /// Which match to click when the selector matches several elements
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Output the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the search settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the effective settings (stored values merged with defaults)
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Change settings. Fields you leave out keep their current value
    Set(SetArgs),

    /// Remove the stored settings so the defaults apply again
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Maximum number of results (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Result order
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Search submissions or comments
    #[arg(long, value_enum)]
    pub mode: Option<SearchMode>,

    /// Search backend identifier
    #[arg(long)]
    pub backend: Option<String>,
}
