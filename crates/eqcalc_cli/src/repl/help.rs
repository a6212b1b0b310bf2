use super::command::Command;
use super::output::{ReplMsg, ReplReply};

pub const BANNER: &str = "Welcome to the equational calculator. You may enter equations \
and use the inference rules of equational reasoning on them.\n\
Type \"help\" for a list of commands.";

/// Help for all commands, or for the command named in `args`.
pub fn help_reply(args: &str) -> ReplReply {
    let topic = args.trim();
    if topic.is_empty() {
        let mut text = String::from("Commands:\n");
        for cmd in Command::ALL {
            text.push_str(&format!("  {:<10}{}\n", cmd.name(), cmd.summary()));
        }
        text.push_str("  exit      Quit the calculator\n\n");
        text.push_str("References to stored equations are written @N (or just N).\n");
        text.push_str("Variables are written :name, anything else is a function symbol.");
        return vec![ReplMsg::info(text)];
    }

    match Command::from_name(topic) {
        Some(cmd) => vec![ReplMsg::info(format!(
            "{}\n\nUsage: {}\n\nExample:\n{}",
            cmd.summary(),
            cmd.usage(),
            cmd.example()
        ))],
        None => vec![ReplMsg::error(format!("No help for unknown command: {}", topic))],
    }
}
