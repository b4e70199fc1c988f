use anyhow::{bail, Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peekjson::config::Config;
use peekjson::document::value::Value;
use peekjson::file::loader::{load_file, load_from_stdin};
use peekjson::input::InputHandler;
use peekjson::query;
use peekjson::render::{render, RenderOptions, RenderStyle};
use peekjson::theme::{get_builtin_theme, list_builtin_themes, Theme};
use peekjson::ui::UI;
use peekjson::viewer::Viewer;

/// peekjson - An interactive terminal viewer for large JSON documents
#[derive(Parser)]
#[command(name = "peekjson")]
#[command(version)]
#[command(about = "An interactive terminal viewer for large JSON documents", long_about = None)]
struct Cli {
    /// JSON or YAML file, optionally gzip-compressed (omit or use `-` to read stdin)
    file: Option<String>,

    /// Filter expression; the result is printed instead of opening the viewer
    filter: Option<String>,

    /// Theme name (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Write debug logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the document fully expanded instead of opening the viewer
    #[arg(short, long)]
    print: bool,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// Without this, panic messages would be hidden by the alternate screen.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

/// Sends tracing output to `path`. The terminal belongs to the viewer, so
/// without a log file nothing is logged.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "peekjson=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = Config::load();

    // Stdin may carry the document, so it is read before the terminal is taken over.
    let (document, filename, stdin_was_piped) = match cli.file.as_deref() {
        Some(path) if path != "-" => (load_file(path)?, Some(path.to_string()), false),
        _ => {
            if io::stdin().is_terminal() {
                bail!("No input: pass a file name or pipe a document on stdin");
            }
            (load_from_stdin()?, None, true)
        }
    };

    if cli.filter.is_some() || cli.print || !io::stdout().is_terminal() {
        return print_document(document, cli.filter.as_deref(), config.indent_size);
    }

    let theme_name = cli.theme.clone().unwrap_or_else(|| config.theme.clone());
    let theme = resolve_theme(&theme_name)?;

    run_viewer(document, filename, stdin_was_piped, theme, &config)
}

fn resolve_theme(name: &str) -> Result<Theme> {
    if let Some(theme) = get_builtin_theme(name) {
        return Ok(theme);
    }
    eprintln!(
        "Warning: Theme '{}' not found, using default-dark (available: {})",
        name,
        list_builtin_themes().join(", ")
    );
    get_builtin_theme("default-dark").context("Built-in theme default-dark is missing")
}

/// One-shot mode: evaluates the filter, if any, and prints fully expanded.
fn print_document(document: Value, filter: Option<&str>, indent: usize) -> Result<()> {
    let document = match filter {
        Some(expression) => {
            let result = query::evaluate(&document, expression)
                .with_context(|| format!("Failed to evaluate filter '{}'", expression))?;
            if result.is_undefined() {
                bail!("Filter '{}' selects nothing", expression);
            }
            result
        }
        None => document,
    };

    let rendered = render(
        &document,
        &RenderOptions {
            indent,
            ..Default::default()
        },
    );
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.text()).context("Failed to write to stdout")?;
    Ok(())
}

fn run_viewer(
    document: Value,
    filename: Option<String>,
    stdin_was_piped: bool,
    theme: Theme,
    config: &Config,
) -> Result<()> {
    setup_panic_hook();

    let mut viewer = Viewer::new(document, config, RenderStyle::from(&theme.colors));
    if let Some(name) = filename {
        viewer.set_filename(name);
    }
    let ui = UI::new(theme);
    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    tracing::info!(rows = viewer.rendered().line_count(), "starting viewer");

    {
        let stdout = io::stdout()
            .into_raw_mode()
            .context("Failed to enable raw mode")?;
        let stdout = MouseTerminal::from(stdout);
        let stdout = stdout
            .into_alternate_screen()
            .context("Failed to enter alternate screen")?;

        let backend = TermionBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_event_loop(&mut terminal, &ui, &mut input_handler, &mut viewer);

        write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
        terminal.backend_mut().flush()?;
        result?;
    }

    // The alternate screen is gone once the terminal is dropped.
    if let Some(text) = viewer.take_pending_print() {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
    }

    Ok(())
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &UI,
    input_handler: &mut InputHandler,
    viewer: &mut Viewer,
) -> Result<()> {
    loop {
        ui.render(terminal, viewer)?;

        match input_handler.poll_event(Duration::from_millis(100))? {
            Some(event) => {
                if input_handler.handle_event(event, viewer)? {
                    break;
                }
            }
            None => break,
        }
    }

    Ok(())
}
