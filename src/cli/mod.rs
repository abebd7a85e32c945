use std::io::{self, BufRead, IsTerminal, Write};

use clap::Subcommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::warn;

pub const API_KEY_WARNING: &str = "Please enter your OpenAI API key to proceed.";

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a blog post from a topic
    Generate {
        /// Topic of the post; prompted for when omitted
        #[arg(short, long)]
        topic: Option<String>,

        /// OpenAI API key; prompted for (without echo) when omitted
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Also generate a decorative background image from the topic
        #[arg(short, long)]
        background: bool,

        /// Print the finished post as JSON instead of step-by-step headings
        #[arg(long)]
        json: bool,
    },

    /// Show the prompt templates used by each stage
    Prompts {
        #[arg(long)]
        json: bool,
    },
}

/// Ask for one line of input. The trailing newline is stripped; everything
/// else is returned as typed so validation sees exactly what the user entered.
pub fn ask(reader: &mut impl BufRead, writer: &mut impl Write, label: &str) -> io::Result<String> {
    write!(writer, "{label}")?;
    writer.flush()?;
    read_line(reader)
}

/// Ask for a secret on stderr/stdin without echoing it.
///
/// On a terminal, echo is turned off by switching to raw mode for the
/// duration of the read. Piped input is read as a plain line.
pub fn ask_secret(label: &str) -> io::Result<String> {
    let mut prompt_out = io::stderr();
    write!(prompt_out, "{label}")?;
    prompt_out.flush()?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let secret = read_secret_from_terminal();
        writeln!(prompt_out)?;
        secret
    } else {
        read_secret(&mut stdin.lock())
    }
}

/// Read a secret from a non-terminal source. Nothing is written back.
pub fn read_secret(reader: &mut impl BufRead) -> io::Result<String> {
    read_line(reader)
}

fn read_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Submit,
    Cancel,
}

/// Fold one key press into the secret being typed.
fn apply_key(secret: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Cancel
        }
        KeyCode::Backspace => {
            secret.pop();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) => {
            secret.push(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

fn read_secret_from_terminal() -> io::Result<String> {
    let _raw_mode = RawModeGuard::enable()?;
    let mut secret = String::new();

    loop {
        if let Event::Key(key) = event::read()? {
            match apply_key(&mut secret, key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Submit => return Ok(secret),
                KeyOutcome::Cancel => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "input cancelled"))
                }
            }
        }
    }
}
