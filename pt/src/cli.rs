//! CLI argument parsing for pt

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "pt")]
#[command(author, version, about = "Extract, open and inline template partials", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at DEBUG level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract lines into a partial, or open the partial included on a line
    Partial {
        /// File to edit
        #[arg(required = true)]
        file: PathBuf,

        /// Cursor line (1-based); opens the partial included there
        #[arg(short, long, conflicts_with = "select", required_unless_present = "select")]
        line: Option<usize>,

        /// Lines to extract, as START:END (1-based, inclusive)
        #[arg(short, long)]
        select: Option<LineRange>,

        /// Partial name; prompts when omitted
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing partial without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace the include statement on a line with the partial's contents
    Dispose {
        /// File to edit
        #[arg(required = true)]
        file: PathBuf,

        /// Line holding the include statement (1-based)
        #[arg(short, long, required = true)]
        line: usize,

        /// Delete the partial afterwards without asking
        #[arg(long, conflicts_with = "keep")]
        delete: bool,

        /// Keep the partial without asking
        #[arg(long)]
        keep: bool,
    },

    /// Show where a reference written in FILE resolves to
    Resolve {
        /// File the reference is written in
        #[arg(required = true)]
        file: PathBuf,

        /// Reference as it appears in the include statement
        #[arg(required = true)]
        reference: String,
    },

    /// List supported extensions and their include templates
    Syntaxes,
}

/// Inclusive, 1-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').unwrap_or((s, s));
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid line number '{}' in '{}'", part, s))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        if start == 0 || end < start {
            return Err(format!("Invalid line range '{}': expected START:END with 1 <= START <= END", s));
        }
        Ok(Self { start, end })
    }
}
