use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

use extprs::services::{load_settings, Settings};
use extprs::utils::get_current_repo;
use extprs::{ui, update, App, Command, Message};

/// A TUI for externally-contributed GitHub pull requests
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Repository to watch, as owner/name (overrides the config file)
    #[arg(long)]
    repo: Option<String>,

    /// Print the config file location and exit
    #[arg(long)]
    config_path: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.config_path {
        let path = extprs::get_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        println!("{}", path.display());
        return Ok(());
    }

    let settings = load_settings()?;
    let (owner, repo) = resolve_repo(cli.repo.as_deref(), &settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(owner, repo, &settings)?;
    app.start_fetch();

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Pick the repository to watch: the CLI flag wins, then the config file,
/// then the origin remote of the current directory.
fn resolve_repo(flag: Option<&str>, settings: &Settings) -> Result<(String, String)> {
    if let Some(spec) = flag {
        return parse_repo_spec(spec);
    }
    if let Some(repo) = settings.repo() {
        return Ok(repo);
    }
    get_current_repo().ok_or_else(|| {
        anyhow::anyhow!(
            "No repository configured. Pass --repo owner/name, set repo_owner/repo_name \
             in the config file, or run inside a GitHub clone."
        )
    })
}

fn parse_repo_spec(spec: &str) -> Result<(String, String)> {
    match spec.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => anyhow::bail!("Invalid --repo value '{}': expected owner/name", spec),
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Check for async fetch results
        if let Some(progress) = app.check_fetch_update() {
            if let Some(cmd) = update(app, Message::FetchProgress(progress)) {
                if handle_command(app, cmd) {
                    return Ok(());
                }
            }
        }

        // Update spinner
        if let Some(cmd) = update(app, Message::Tick) {
            if handle_command(app, cmd) {
                return Ok(());
            }
        }

        // Draw UI
        terminal.draw(|f| ui(f, app))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = key_to_message(app, key.code) {
                        if let Some(cmd) = update(app, msg) {
                            if handle_command(app, cmd) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Handle a command returned from update
fn handle_command(app: &mut App, cmd: Command) -> bool {
    match cmd {
        Command::Quit => true,
        Command::StartFetch => {
            app.start_fetch();
            false
        }
    }
}

/// Convert a key press to a message based on current app state
fn key_to_message(app: &App, key: KeyCode) -> Option<Message> {
    // Help popup - any key dismisses
    if app.show_help_popup {
        return Some(Message::DismissHelp);
    }

    // Error popup
    if app.show_error_popup {
        return match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissError),
            KeyCode::Char('r') => Some(Message::Refresh),
            _ => None,
        };
    }

    // Add author popup
    if app.show_add_author_popup {
        return match key {
            KeyCode::Esc => Some(Message::CloseAddAuthorPopup),
            KeyCode::Enter => Some(Message::AddAuthor),
            KeyCode::Backspace => Some(Message::AuthorBackspace),
            KeyCode::Char(c) => Some(Message::AuthorInput(c)),
            _ => None,
        };
    }

    // Excluded authors popup
    if app.show_excluded_popup {
        return match key {
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::CloseExcludedPopup),
            KeyCode::Char('a') => Some(Message::OpenAddAuthorPopup),
            KeyCode::Char('d') | KeyCode::Backspace => Some(Message::RemoveSelectedAuthor),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ExcludedNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ExcludedPrevious),
            _ => None,
        };
    }

    // Search mode
    if app.search_mode {
        return match key {
            KeyCode::Esc => Some(Message::ExitSearchMode { clear: true }),
            KeyCode::Enter => Some(Message::ExitSearchMode { clear: false }),
            KeyCode::Backspace => Some(Message::SearchBackspace),
            KeyCode::Char(c) => Some(Message::SearchInput(c)),
            KeyCode::Down | KeyCode::Tab => Some(Message::NextItem),
            KeyCode::Up | KeyCode::BackTab => Some(Message::PreviousItem),
            _ => None,
        };
    }

    // Normal mode
    match key {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('/') => Some(Message::EnterSearchMode),
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                Some(Message::ExitSearchMode { clear: true })
            } else {
                None
            }
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NextItem),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviousItem),
        KeyCode::Char('o') | KeyCode::Enter => Some(Message::OpenSelected),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('x') => Some(Message::OpenExcludedPopup),
        KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::Char('G') => Some(Message::GoToBottom),
        _ => None,
    }
}
