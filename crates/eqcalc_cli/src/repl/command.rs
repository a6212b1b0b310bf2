//! The closed set of calculator commands.

/// A calculator command, selected by the first word of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Pairs of terms become equations.
    Enter,
    /// Symmetry.
    Reverse,
    /// Congruence.
    Apply,
    /// Reflexivity.
    Reflexive,
    /// Substitution.
    Subst,
    /// Transitivity over a chain of equations.
    Combine,
    Show,
    /// Signature validation.
    Check,
    Help,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Enter,
        Command::Reverse,
        Command::Apply,
        Command::Reflexive,
        Command::Subst,
        Command::Combine,
        Command::Show,
        Command::Check,
        Command::Help,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Enter => "enter",
            Command::Reverse => "reverse",
            Command::Apply => "apply",
            Command::Reflexive => "self",
            Command::Subst => "subst",
            Command::Combine => "combine",
            Command::Show => "show",
            Command::Check => "check",
            Command::Help => "help",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Enter => "enter TERM TERM [TERM TERM ...]",
            Command::Reverse => "reverse REF [REF ...]",
            Command::Apply => "apply SYMBOL [REF ...]",
            Command::Reflexive => "self TERM|REF [TERM|REF ...]",
            Command::Subst => "subst REF [REF ...] VAR=TERM [VAR=TERM ...]",
            Command::Combine => "combine REF REF [REF ...]",
            Command::Show => "show all | show REF [REF ...]",
            Command::Check => "check REF [REF ...] SYMBOL/ARITY [SYMBOL/ARITY ...]",
            Command::Help => "help [COMMAND]",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Command::Enter => "Enter terms; each two consecutive terms form a new equation",
            Command::Reverse => "Swap the sides of the given equations (symmetry)",
            Command::Apply => "Apply a function symbol to the sides of the given equations (congruence)",
            Command::Reflexive => "State that terms are equal to themselves (reflexivity)",
            Command::Subst => "Substitute terms for variables in the given equations",
            Command::Combine => "Chain equations whose adjacent sides match (transitivity)",
            Command::Show => "Display some or all known equations",
            Command::Check => "Check equations against a signature of function arities",
            Command::Help => "Show help for all or one command",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            Command::Enter => {
                "> enter \"*(e, :x)\" :x\n\
                 @1: *(e, :x) <=> :x"
            }
            Command::Reverse => {
                "> reverse 1\n\
                 @2: :x <=> *(e, :x)"
            }
            Command::Apply => {
                "> apply t @1 @2\n\
                 @3: t(*(e, :x), :x) <=> t(:x, *(e, :x))"
            }
            Command::Reflexive => {
                "> self :x @1\n\
                 @4: :x <=> :x\n\
                 @5: *(e, :x) <=> *(e, :x)\n\
                 @6: :x <=> :x"
            }
            Command::Subst => {
                "> subst @1 x=e\n\
                 @7: *(e, e) <=> e"
            }
            Command::Combine => {
                "> combine @2 @1\n\
                 @8: :x <=> :x"
            }
            Command::Show => {
                "> show 1 @2\n\
                 @1: *(e, :x) <=> :x\n\
                 @2: :x <=> *(e, :x)"
            }
            Command::Check => {
                "> check @1 */2 e/0\n\
                 @1: matches the signature"
            }
            Command::Help => "> help subst",
        }
    }
}

/// Split an input line into command name and argument text.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], &line[idx..]),
        None => (line, ""),
    }
}
