mod command;
mod core;
mod error_render;
mod help;
mod output;

pub use self::command::{split_command, Command};
pub use self::core::ReplCore;
pub use self::error_render::{render_error_with_caret, render_parse_error};
pub use self::help::{help_reply, BANNER};
pub use self::output::{reply_error, ReplMsg, ReplReply, ReplReplyExt};

use std::io::{BufRead, Write};
use std::path::PathBuf;

use rustyline::error::ReadlineError;

use crate::completer::EqHelper;
use crate::config::CalcConfig;

const HISTORY_FILE_NAME: &str = ".eqcalc_history";

fn is_exit(line: &str) -> bool {
    line == "quit" || line == "exit"
}

fn print_reply(out: &mut impl Write, reply: &ReplReply) -> std::io::Result<()> {
    for msg in reply {
        writeln!(out, "{}", msg.render())?;
    }
    Ok(())
}

/// Interactive front end: a line editor around [`ReplCore`].
pub struct Repl {
    core: ReplCore,
    config: CalcConfig,
    use_history: bool,
}

impl Repl {
    pub fn new(config: CalcConfig) -> Self {
        let use_history = config.history_file;
        Self {
            core: ReplCore::new(),
            config,
            use_history,
        }
    }

    /// Disable loading and saving the history file for this session.
    pub fn without_history(mut self) -> Self {
        self.use_history = false;
        self
    }

    fn history_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(HISTORY_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(HISTORY_FILE_NAME))
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        if self.config.show_banner {
            println!("{}", BANNER);
        }

        let config = rustyline::Config::builder()
            .max_history_size(self.config.max_history_size)?
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut rl =
            rustyline::Editor::<EqHelper, rustyline::history::DefaultHistory>::with_config(
                config,
            )?;
        rl.set_helper(Some(EqHelper::new()));

        let history_path = Self::history_path();
        if self.use_history {
            // A missing history file is normal on first start
            if let Err(err) = rl.load_history(&history_path) {
                tracing::debug!(path = %history_path.display(), %err, "no history loaded");
            }
        }

        let stdout = std::io::stdout();
        loop {
            match rl.readline(&self.config.prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line)?;

                    if is_exit(line) {
                        println!("Goodbye!");
                        break;
                    }

                    let reply = self.core.handle_line(line);
                    print_reply(&mut stdout.lock(), &reply)?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        if self.use_history {
            if let Err(err) = rl.save_history(&history_path) {
                tracing::warn!(path = %history_path.display(), %err, "could not save history");
            }
        }

        Ok(())
    }
}

/// Execute commands read line by line from `input`, writing every reply to
/// `output`. Stops at end of input or at `exit`/`quit`.
///
/// Returns the number of lines whose reply contained an error.
pub fn run_batch<R: BufRead, W: Write>(input: R, output: &mut W) -> std::io::Result<usize> {
    let mut core = ReplCore::new();
    let mut failures = 0;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_exit(line) {
            break;
        }

        let reply = core.handle_line(line);
        if reply.iter().any(ReplMsg::is_error) {
            failures += 1;
        }
        print_reply(output, &reply)?;
    }
    Ok(failures)
}
