//! Output types for ReplCore - structured messages instead of direct printing.

/// Structured message returned by ReplCore operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplMsg {
    /// Main output/result (stored or shown equations)
    Output(String),
    /// Informational message (help text)
    Info(String),
    /// Warning message (non-fatal issue, the command still did something)
    Warn(String),
    /// Error message (operation failed, nothing was stored)
    Error(String),
}

impl ReplMsg {
    pub fn output(s: impl Into<String>) -> Self {
        ReplMsg::Output(s.into())
    }

    pub fn info(s: impl Into<String>) -> Self {
        ReplMsg::Info(s.into())
    }

    pub fn warn(s: impl Into<String>) -> Self {
        ReplMsg::Warn(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        ReplMsg::Error(s.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReplMsg::Error(_))
    }

    /// Text as shown to the user. Warnings and errors are prefixed with
    /// `-- ` on every line.
    pub fn render(&self) -> String {
        match self {
            ReplMsg::Output(s) | ReplMsg::Info(s) => s.clone(),
            ReplMsg::Warn(s) | ReplMsg::Error(s) => s
                .lines()
                .map(|line| format!("-- {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Collection of messages returned by a ReplCore operation
pub type ReplReply = Vec<ReplMsg>;

/// Extension trait for ReplReply to add helper methods
pub trait ReplReplyExt {
    fn push_info(&mut self, s: impl Into<String>);
    fn push_warn(&mut self, s: impl Into<String>);
}

impl ReplReplyExt for ReplReply {
    fn push_info(&mut self, s: impl Into<String>) {
        self.push(ReplMsg::info(s));
    }

    fn push_warn(&mut self, s: impl Into<String>) {
        self.push(ReplMsg::warn(s));
    }
}

/// Create a reply with a single error message
pub fn reply_error(s: impl Into<String>) -> ReplReply {
    vec![ReplMsg::error(s)]
}
