use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::repl::Command;

/// Completes command names at the start of the line.
pub struct EqHelper {
    commands: Vec<String>,
}

impl EqHelper {
    pub fn new() -> Self {
        let mut commands: Vec<String> = Command::ALL
            .iter()
            .map(|cmd| cmd.name().to_string())
            .collect();
        commands.push("exit".to_string());
        commands.push("quit".to_string());
        Self { commands }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let (start, word) = extract_word(line, pos);
        // Only the first word is a command
        if !line[..start].trim().is_empty() {
            return (start, Vec::new());
        }

        let matches = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        (start, matches)
    }
}

impl Default for EqHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for EqHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for EqHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for EqHelper {}

impl Validator for EqHelper {}

impl Helper for EqHelper {}

fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let line = &line[..pos];
    if line.is_empty() {
        return (0, "");
    }

    let mut start = pos;
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == '(' || c == ',' || c == '"' {
            break;
        }
        start = i;
    }
    (start, &line[start..pos])
}
