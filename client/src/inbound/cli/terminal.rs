//! Terminal-backed implementations of the interaction ports.

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use crate::domain::ports::{Navigator, Route, UserDialog};

/// Asks confirmations on a line-oriented terminal.
///
/// Prompts and alerts go to `output`; answers are read from `input`. Only
/// `y` or `yes` (any case) counts as agreement.
#[derive(Debug)]
pub struct TerminalDialog<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalDialog<BufReader<Stdin>, Stderr> {
    /// Dialog reading stdin and writing to stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R, W> TerminalDialog<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Dialog over arbitrary streams.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Give back the streams.
    #[must_use]
    pub fn into_inner(self) -> (R, W) {
        (
            self.input.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.output.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn ask(&self, prompt: &str) -> io::Result<bool> {
        {
            let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
            write!(output, "{prompt} [y/N] ")?;
            output.flush()?;
        }
        let mut answer = String::new();
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R, W> UserDialog for TerminalDialog<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, prompt: &str) -> bool {
        self.ask(prompt).unwrap_or_else(|error| {
            warn!(%error, "could not read confirmation; treating as no");
            false
        })
    }

    fn alert(&self, message: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(output, "{message}") {
            warn!(%error, alert = message, "could not write alert");
        }
    }
}

/// Confirms every prompt without asking; alerts still reach the inner dialog.
pub struct PreConfirmed<'a, D: ?Sized>(pub &'a D);

impl<D> UserDialog for PreConfirmed<'_, D>
where
    D: UserDialog + ?Sized,
{
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }

    fn alert(&self, message: &str) {
        self.0.alert(message);
    }
}

/// Navigation has no screen to switch on the command line; it is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "flow finished");
    }
}
