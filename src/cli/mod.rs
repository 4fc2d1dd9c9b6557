//! # CLI Module
//!
//! Command-line interface for the quote of the moment.
//!
//! ## Usage
//! ```bash
//! # Fetch a quote, preview it, then reveal it
//! quote-moment next
//!
//! # Copy it as well, without saving it to history
//! quote-moment next --copy --no-save
//!
//! # Saved quotes as JSON
//! quote-moment history --output json
//!
//! # Key-driven session
//! quote-moment interactive
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use quote_moment::core::history::HistoryList;
use quote_moment::core::quote::DEFAULT_API_URL;
use quote_moment::core::reveal::{preview_text, DEFAULT_PREVIEW_LENGTH};
use quote_moment::core::storage::SqliteStore;
use quote_moment::core::QuoteWidget;
use quote_moment::error::{QuoteMomentError, Result};
use quote_moment::events::{
    DisplayEvent, Event, EventChannel, EventReceiver, EventSender, HistoryEvent, ThemeEvent,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Quote Moment - a quote, revealed a little at a time
#[derive(Parser, Debug)]
#[command(name = "quote-moment")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Storage database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Quote API endpoint
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Characters shown before the full reveal
    #[arg(long, global = true, default_value_t = DEFAULT_PREVIEW_LENGTH)]
    preview_length: usize,

    /// Delay before the full quote is revealed, in milliseconds
    #[arg(long, global = true, default_value_t = 1200)]
    reveal_delay_ms: u64,

    /// Don't save fetched quotes to history
    #[arg(long, global = true)]
    no_save: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and reveal a new quote
    Next {
        /// Copy the quote to the clipboard
        #[arg(short, long)]
        copy: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// List saved quotes, most recent first
    History {
        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Reveal a saved quote again
    Show {
        /// Position in the history list (1 = most recent)
        index: usize,
    },
    /// Remove all saved quotes
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or change the color theme
    Theme {
        mode: Option<ThemeMode>,
    },
    /// Key-driven session
    Interactive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeMode {
    /// Flip the current theme
    Toggle,
    Dark,
    Light,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (sender, receiver) = EventChannel::new();
    let widget = build_widget(&cli.global, sender)?;

    match cli.command {
        Commands::Next { copy, output } => run_next(widget, receiver, copy, output),
        Commands::History { output } => run_history(&widget, output),
        Commands::Show { index } => run_show(widget, receiver, index),
        Commands::Clear { yes } => run_clear(&widget, yes),
        Commands::Theme { mode } => run_theme(&widget, mode),
        Commands::Interactive => run_interactive(widget, receiver),
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quote-moment")
        .join("storage.db")
}

fn build_widget(args: &GlobalArgs, events: EventSender) -> Result<QuoteWidget> {
    if args.preview_length == 0 {
        return Err(QuoteMomentError::Config(
            "--preview-length must be at least 1".to_string(),
        ));
    }

    let db_path = args.db.clone().unwrap_or_else(default_db_path);
    let storage = SqliteStore::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "Opened storage");

    QuoteWidget::builder()
        .api_url(args.api_url.clone())
        .preview_length(args.preview_length)
        .reveal_delay(Duration::from_millis(args.reveal_delay_ms))
        .auto_save(!args.no_save)
        .storage(Arc::new(storage))
        .events(events)
        .build()
}

/// Draws widget events on the terminal
struct Renderer {
    term: Term,
    dark: bool,
    author: String,
    preview_lines: usize,
    /// Replace the preview in place when the full text arrives
    rewrite_preview: bool,
    /// Print loading and history notices (interactive session)
    verbose: bool,
}

impl Renderer {
    fn new(term: Term, verbose: bool) -> Self {
        let rewrite_preview = term.is_term() && !verbose;
        Self {
            term,
            dark: false,
            author: String::new(),
            preview_lines: 0,
            rewrite_preview,
            verbose,
        }
    }

    fn line(&self, text: &str) {
        self.term.write_line(text).ok();
    }

    fn rows(&self, text: &str) -> usize {
        let width = usize::from(self.term.size().1).max(1);
        console::measure_text_width(text) / width + 1
    }

    fn accent(&self, text: &str) -> String {
        if self.dark {
            style(text).cyan().bright().to_string()
        } else {
            style(text).blue().to_string()
        }
    }

    /// Render one event; returns the sequence number when a quote was revealed
    fn render(&mut self, event: &Event) -> Option<u64> {
        match event {
            Event::Display(DisplayEvent::Previewed {
                preview, author, ..
            }) => {
                let preview_line = format!("  {}", style(preview).italic().dim());
                let author_line = format!("  — {}", self.accent(author));
                self.preview_lines = self.rows(&preview_line) + self.rows(&author_line);
                self.author = author.clone();
                self.line(&preview_line);
                self.line(&author_line);
                None
            }
            Event::Display(DisplayEvent::Revealed { sequence, content }) => {
                if self.rewrite_preview {
                    self.term.clear_last_lines(self.preview_lines).ok();
                }
                let body = if self.dark {
                    style(content).bold().white().bright().to_string()
                } else {
                    style(content).bold().to_string()
                };
                self.line(&format!("  “{}”", body));
                self.line(&format!("  — {}", self.accent(&self.author)));
                self.preview_lines = 0;
                Some(*sequence)
            }
            Event::Display(DisplayEvent::Failed { message }) => {
                self.line(&format!("  {}", style(message).red()));
                None
            }
            Event::History(HistoryEvent::Changed { entries }) => {
                if self.verbose {
                    self.line(&format!(
                        "  {}",
                        style(format!("{} saved quote(s)", entries.len())).dim()
                    ));
                }
                None
            }
            Event::Theme(ThemeEvent::Changed { dark }) => {
                self.dark = *dark;
                None
            }
            Event::LoadingChanged { loading } => {
                if self.verbose && *loading {
                    self.line(&format!("  {}", style("⏳ Loading…").dim()));
                }
                None
            }
        }
    }
}

/// Render events until `sequence` is revealed or `timeout` elapses
fn wait_for_reveal(
    receiver: &EventReceiver,
    renderer: &mut Renderer,
    sequence: u64,
    timeout: Duration,
) {
    let deadline = Instant::now() + timeout;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match receiver.recv_timeout(remaining) {
            Some(event) => {
                if renderer.render(&event) == Some(sequence) {
                    return;
                }
            }
            None => return,
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn run_next(
    widget: QuoteWidget,
    receiver: EventReceiver,
    copy: bool,
    output: OutputFormat,
) -> Result<()> {
    widget.boot();

    let pb = matches!(output, OutputFormat::Pretty).then(|| spinner("Loading…"));
    let result = widget.load_and_show();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let quote = match result {
        Ok(quote) => quote,
        Err(e) => {
            if matches!(output, OutputFormat::Pretty) {
                let mut renderer = Renderer::new(Term::stdout(), false);
                for event in receiver.drain() {
                    renderer.render(&event);
                }
            }
            return Err(e.into());
        }
    };

    match output {
        OutputFormat::Pretty => {
            let mut renderer = Renderer::new(Term::stdout(), false);
            let sequence = widget.display().sequence;
            let timeout = widget.config().reveal.reveal_delay + Duration::from_secs(1);
            wait_for_reveal(&receiver, &mut renderer, sequence, timeout);
        }
        OutputFormat::Json => print_json(&quote)?,
    }

    if copy {
        let term = Term::stderr();
        match widget.copy_current() {
            Ok(_) => {
                term.write_line(&format!("{} Copied!", style("✓").green())).ok();
            }
            Err(e) => {
                term.write_line(&format!(
                    "{} Unable to copy to clipboard: {}",
                    style("✗").red(),
                    e
                ))
                .ok();
            }
        }
    }

    Ok(())
}

fn run_history(widget: &QuoteWidget, output: OutputFormat) -> Result<()> {
    let list = widget.history().load();
    match output {
        OutputFormat::Pretty => print_history(&Term::stdout(), &list, widget.is_dark()),
        OutputFormat::Json => print_json(&list)?,
    }
    Ok(())
}

fn run_show(widget: QuoteWidget, receiver: EventReceiver, index: usize) -> Result<()> {
    widget.boot();
    receiver.drain();

    let quote = index
        .checked_sub(1)
        .and_then(|i| widget.restore(i))
        .ok_or_else(|| QuoteMomentError::Config(format!("No saved quote #{}", index)))?;
    tracing::debug!(id = %quote.id, "Restored quote");

    let mut renderer = Renderer::new(Term::stdout(), false);
    renderer.dark = widget.is_dark();
    let timeout = widget.config().restore_delay + Duration::from_secs(1);
    wait_for_reveal(&receiver, &mut renderer, widget.display().sequence, timeout);
    Ok(())
}

fn run_clear(widget: &QuoteWidget, yes: bool) -> Result<()> {
    let term = Term::stderr();
    if !yes && !confirm(&term, "Clear all saved quotes? This cannot be undone.") {
        term.write_line("Nothing cleared.").ok();
        return Ok(());
    }

    widget.clear_history();
    term.write_line(&format!("{} History cleared", style("✓").green()))
        .ok();
    Ok(())
}

fn run_theme(widget: &QuoteWidget, mode: Option<ThemeMode>) -> Result<()> {
    let dark = match mode {
        None => widget.is_dark(),
        Some(ThemeMode::Toggle) => widget.toggle_dark(),
        Some(ThemeMode::Dark) => {
            widget.set_dark(true);
            true
        }
        Some(ThemeMode::Light) => {
            widget.set_dark(false);
            false
        }
    };
    println!("{}", if dark { "dark" } else { "light" });
    Ok(())
}

fn run_interactive(widget: QuoteWidget, receiver: EventReceiver) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(QuoteMomentError::Config(
            "interactive mode needs a terminal".to_string(),
        ));
    }

    let render_thread = thread::spawn(move || {
        let mut renderer = Renderer::new(Term::stdout(), true);
        for event in receiver.iter() {
            renderer.render(&event);
        }
    });

    term.write_line(&format!(
        "{}  {}",
        style("Quote Moment").bold().cyan(),
        style("[n]ew  [s]ave  [c]opy  [h]istory  [1-9] restore  [d]ark  [x] clear  [q]uit").dim()
    ))
    .ok();

    widget.boot();
    widget.load_and_show().ok();

    loop {
        let key = match term.read_char() {
            Ok(key) => key,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read key");
                break;
            }
        };

        match key {
            'n' => {
                widget.load_and_show().ok();
            }
            's' => {
                let message = if widget.current().is_none() {
                    style("Nothing to save yet").yellow().to_string()
                } else if widget.save_current() {
                    style("✓ Saved!").green().to_string()
                } else {
                    style("Already the latest saved quote").dim().to_string()
                };
                term.write_line(&format!("  {}", message)).ok();
            }
            'c' => match widget.copy_current() {
                Ok(_) => {
                    term.write_line(&format!("  {}", style("✓ Copied!").green()))
                        .ok();
                }
                Err(e) => {
                    term.write_line(&format!(
                        "  {} {}",
                        style("Unable to copy to clipboard:").red(),
                        e
                    ))
                    .ok();
                }
            },
            'h' => print_history(&term, &widget.history().load(), widget.is_dark()),
            'd' => {
                let dark = widget.toggle_dark();
                term.write_line(&format!(
                    "  {}",
                    style(if dark { "Dark theme" } else { "Light theme" }).dim()
                ))
                .ok();
            }
            'x' => {
                if confirm(&term, "Clear all saved quotes? This cannot be undone.") {
                    widget.clear_history();
                }
            }
            'q' | '\u{1b}' => break,
            digit @ '1'..='9' => {
                let index = digit as usize - '1' as usize;
                if widget.restore(index).is_none() {
                    term.write_line(&format!(
                        "  {}",
                        style(format!("No saved quote #{}", index + 1)).yellow()
                    ))
                    .ok();
                }
            }
            _ => {}
        }
    }

    // Pending reveal timers hold senders too; they finish within the delay
    drop(widget);
    render_thread.join().ok();
    Ok(())
}

fn confirm(term: &Term, prompt: &str) -> bool {
    term.write_str(&format!("{} [y/N] ", prompt)).ok();
    term.read_line()
        .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false)
}

fn print_history(term: &Term, list: &HistoryList, dark: bool) {
    if list.is_empty() {
        term.write_line(&format!("  {}", style("No saved quotes yet.").dim()))
            .ok();
        return;
    }

    for (i, entry) in list.iter().enumerate() {
        let number = format!("{:>2}.", i + 1);
        let number = if dark {
            style(number).cyan().bright().to_string()
        } else {
            style(number).blue().to_string()
        };
        term.write_line(&format!(
            "{} {}",
            number,
            style(preview_text(&entry.quote.content, 120)).bold()
        ))
        .ok();
        term.write_line(&format!(
            "    {} · {}",
            entry.quote.author,
            style(format_saved_at(entry.saved_at)).dim()
        ))
        .ok();
    }
}

fn format_saved_at(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown time".to_string())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| QuoteMomentError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
