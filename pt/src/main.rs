//! pt - template partials from the terminal

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use partials::cli::{Cli, Command, LineRange};
use partials::config::Config;
use partials::resolver::display_path;
use partials::{Action, Buffer, Partials, TerminalHost, command};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("partials")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("partials.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let partials = Partials::from_config(&config).context("Invalid syntax configuration")?;
    debug!(?partials, "main: toolkit ready");

    let succeeded = match cli.command {
        Command::Partial {
            file,
            line,
            select,
            name,
            yes,
        } => cmd_partial(&partials, &file, line, select, name, yes)?,
        Command::Dispose {
            file,
            line,
            delete,
            keep,
        } => {
            let answer = if delete {
                Some(true)
            } else if keep {
                Some(false)
            } else {
                None
            };
            cmd_dispose(&partials, &file, line, answer)?
        }
        Command::Resolve { file, reference } => cmd_resolve(&partials, &file, &reference)?,
        Command::Syntaxes => {
            cmd_syntaxes(&partials);
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn load_buffer(file: &Path) -> Result<Buffer> {
    let text = fs::read_to_string(file).context(format!("Failed to read {}", file.display()))?;
    Ok(Buffer::new(Some(file.to_path_buf()), text))
}

/// Run a command against `host` and save the buffer; false when the command failed
fn run_in(partials: &Partials, mut host: TerminalHost, action: Action) -> Result<bool> {
    let result = command::run(partials, &mut host, action);
    host.finish().context("Failed to save buffer")?;
    Ok(result.is_ok())
}

fn cmd_partial(
    partials: &Partials,
    file: &Path,
    line: Option<usize>,
    select: Option<LineRange>,
    name: Option<String>,
    yes: bool,
) -> Result<bool> {
    debug!(?file, ?line, ?select, "cmd_partial: called");
    let buffer = load_buffer(file)?;
    let buffer = match (select, line) {
        (Some(range), _) => buffer
            .select_lines(range.start, range.end)
            .ok_or_else(|| eyre!("Lines {}:{} are out of range", range.start, range.end))?,
        (None, Some(line)) => buffer
            .cursor_at_line(line)
            .ok_or_else(|| eyre!("Line {} is out of range", line))?,
        (None, None) => return Err(eyre!("Either --line or --select is required")),
    };

    let host = TerminalHost::new(buffer)
        .with_name(name)
        .with_answer(yes.then_some(true));
    run_in(partials, host, Action::ExtractOrNavigate)
}

fn cmd_dispose(partials: &Partials, file: &Path, line: usize, answer: Option<bool>) -> Result<bool> {
    debug!(?file, line, ?answer, "cmd_dispose: called");
    let buffer = load_buffer(file)?
        .cursor_at_line(line)
        .ok_or_else(|| eyre!("Line {} is out of range", line))?;

    let host = TerminalHost::new(buffer).with_answer(answer);
    run_in(partials, host, Action::Dispose)
}

fn cmd_resolve(partials: &Partials, file: &Path, reference: &str) -> Result<bool> {
    debug!(?file, %reference, "cmd_resolve: called");
    let resolution = match partials.resolve(file, reference) {
        Ok(resolution) => resolution,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            return Ok(false);
        }
    };

    for (candidate, found) in &resolution.candidates {
        match found {
            Some(path) => println!("{} {}", "✓".green(), display_path(path)),
            None => println!("{} {}", "-".dimmed(), display_path(candidate).dimmed()),
        }
    }

    let Some(found) = resolution.found() else {
        eprintln!("{} Partial not found", "✗".red());
        return Ok(false);
    };

    let (rule, extension) = partials.registry().rule_for_path(file)?;
    let current_dir = file.parent().unwrap_or_else(|| Path::new(""));
    let include_name = partials.resolver().to_include_name(found, current_dir, &extension);
    println!("{}", rule.format(&include_name).cyan());
    Ok(true)
}

fn cmd_syntaxes(partials: &Partials) {
    for rule in partials.registry().rules() {
        println!("{} {}", format!("{:<12}", rule.extension()).yellow(), rule.template());
    }
}
