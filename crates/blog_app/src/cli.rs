use std::path::PathBuf;

use blog_engine::DEFAULT_COMMIT_MESSAGE;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "blog", version, about = "Read and maintain a JSON-backed blog")]
pub struct Cli {
    /// Articles payload: a local path or an http(s) URL.
    #[arg(long, global = true, env = "BLOG_SOURCE", default_value = "articles.json")]
    pub source: String,

    /// Directory holding the saved reader preferences.
    #[arg(long, global = true, env = "BLOG_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List articles, newest first.
    List {
        /// Only show articles whose title contains this text.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one article.
    Show {
        /// Article slug (the `id` of `article.html?id=`).
        slug: Option<String>,
        /// Print the HTML fragment instead of text.
        #[arg(long)]
        html: bool,
    },
    /// Switch between the light and dark theme.
    Theme,
    /// Switch to the next reading font.
    Font,
    /// Show the saved preferences.
    Prefs,
    /// Maintain the articles file.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Check that a payload parses as a list of articles.
    Check {
        #[arg(default_value = "articles.json")]
        file: PathBuf,
    },
    /// Pretty-print a payload with two-space indentation.
    Format {
        #[arg(default_value = "articles.json")]
        file: PathBuf,
        /// Rewrite the file in place instead of printing.
        #[arg(long)]
        write: bool,
    },
    /// Create an article, or replace the one given by `--replace`.
    Save {
        #[arg(long, default_value = "articles.json")]
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        /// Header image path.
        #[arg(long)]
        image: Option<String>,
        /// Plain-text body; paragraphs are separated by blank lines.
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Slug of the article being edited.
        #[arg(long)]
        replace: Option<String>,
    },
    /// Delete an article by slug.
    Delete {
        slug: String,
        #[arg(long, default_value = "articles.json")]
        file: PathBuf,
    },
    /// Upload the articles file to a GitHub repository.
    Publish {
        #[arg(long, default_value = "articles.json")]
        file: PathBuf,
        /// Repository as `owner/name`.
        #[arg(long)]
        repo: String,
        /// Path of the payload inside the repository.
        #[arg(long, default_value = "articles.json")]
        path: String,
        #[arg(long, env = "BLOG_GITHUB_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long, default_value = DEFAULT_COMMIT_MESSAGE)]
        message: String,
    },
}
