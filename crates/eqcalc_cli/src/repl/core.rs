//! Core REPL logic without I/O.
//!
//! ReplCore owns the session's equation store and turns command lines into
//! structured replies. Nothing here prints.

use eqcalc_ast::{equation_matches_signature, Equation, Signature};
use eqcalc_engine::{
    congruence, reflexivity, reflexivity_of_sides, substitution, symmetry, transitivity_chain,
    InferenceError,
};
use eqcalc_parser::{ParseError, Parser, TermOrReference};
use eqcalc_session_core::{EntryId, EquationStore, ResolveError};
use thiserror::Error;

use super::command::{split_command, Command};
use super::error_render::render_parse_error;
use super::help::help_reply;
use super::output::{reply_error, ReplMsg, ReplReply, ReplReplyExt};

/// Why a command stored nothing.
#[derive(Error, Debug)]
enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("Usage: {}", .0.usage())]
    Usage(Command),
    #[error("{0}")]
    Invalid(String),
}

type CommandResult = Result<ReplReply, CommandError>;

/// Core REPL logic - pure computation without I/O.
#[derive(Debug, Default)]
pub struct ReplCore {
    store: EquationStore,
}

impl ReplCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &EquationStore {
        &self.store
    }

    /// Execute one command line.
    pub fn handle_line(&mut self, line: &str) -> ReplReply {
        let (name, args) = split_command(line);
        if name.is_empty() {
            return ReplReply::new();
        }

        let Some(command) = Command::from_name(name) else {
            return vec![
                ReplMsg::error(format!("Unknown command: {}", name)),
                ReplMsg::error("Type \"help\" for a list of commands"),
            ];
        };

        // Quotes only group text; blanking them keeps byte offsets intact
        // for error carets.
        let args = args.replace('"', " ");
        tracing::debug!(command = command.name(), args = %args.trim(), "dispatching");

        match self.execute(command, &args) {
            Ok(reply) => reply,
            Err(CommandError::Parse(err)) => {
                let trimmed = args.trim_start();
                let shifted = ParseError::new(
                    err.offset.saturating_sub(args.len() - trimmed.len()),
                    err.expected.clone(),
                );
                reply_error(render_parse_error(trimmed, &shifted))
            }
            Err(err) => reply_error(err.to_string()),
        }
    }

    fn execute(&mut self, command: Command, args: &str) -> CommandResult {
        match command {
            Command::Enter => self.handle_enter(args),
            Command::Reverse => self.handle_reverse(args),
            Command::Apply => self.handle_apply(args),
            Command::Reflexive => self.handle_self(args),
            Command::Subst => self.handle_subst(args),
            Command::Combine => self.handle_combine(args),
            Command::Show => self.handle_show(args),
            Command::Check => self.handle_check(args),
            Command::Help => Ok(help_reply(args)),
        }
    }

    fn add_equation(&mut self, equation: Equation) -> ReplMsg {
        let id = self.store.push(equation);
        self.show_equation(id)
    }

    fn show_equation(&self, id: EntryId) -> ReplMsg {
        match self.store.get(id) {
            Some(equation) => ReplMsg::output(format!("@{}: {}", id, equation)),
            None => ReplMsg::error(ResolveError::NotFound(vec![id]).to_string()),
        }
    }

    // ========== INFERENCE COMMANDS ==========

    /// `enter TERM TERM ...`: consecutive pairs become equations.
    fn handle_enter(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let mut pairs = Vec::new();
        let mut trailing = false;
        while let Some(lhs) = parser.parse_term(true)? {
            match parser.parse_term(true)? {
                Some(rhs) => pairs.push(Equation::new(lhs, rhs)),
                None => {
                    trailing = true;
                    break;
                }
            }
        }
        parser.expect_end()?;

        if pairs.is_empty() && !trailing {
            return Err(CommandError::Usage(Command::Enter));
        }

        let mut reply: ReplReply = pairs.into_iter().map(|eq| self.add_equation(eq)).collect();
        if trailing {
            reply.push_warn("There was a trailing term which was ignored");
            reply.push_warn("Perhaps the right side of the equation is missing?");
        }
        Ok(reply)
    }

    /// `reverse REF ...`: symmetry.
    fn handle_reverse(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let ids = parse_reference_list(&mut parser);
        parser.expect_end()?;
        if ids.is_empty() {
            return Err(CommandError::Usage(Command::Reverse));
        }

        let derived: Vec<Equation> = self
            .store
            .resolve_all(&ids)?
            .into_iter()
            .map(symmetry)
            .collect();
        Ok(derived.into_iter().map(|eq| self.add_equation(eq)).collect())
    }

    /// `apply SYMBOL REF ...`: congruence.
    fn handle_apply(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        if parser.is_at_end() {
            return Err(CommandError::Usage(Command::Apply));
        }
        let symbol = parser.parse_function_symbol(false)?.unwrap_or_default();
        let ids = parse_reference_list(&mut parser);
        parser.expect_end()?;

        let derived = congruence(&symbol, self.store.resolve_all(&ids)?);
        Ok(vec![self.add_equation(derived)])
    }

    /// `self TERM|REF ...`: reflexivity for terms, and for both sides of
    /// referenced equations.
    fn handle_self(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let mut items = Vec::new();
        while let Some(item) = parser.parse_term_or_reference(true)? {
            items.push(item);
        }
        parser.expect_end()?;
        if items.is_empty() {
            return Err(CommandError::Usage(Command::Reflexive));
        }

        let ids: Vec<EntryId> = items
            .iter()
            .filter_map(|item| match item {
                TermOrReference::Reference(id) => Some(*id),
                TermOrReference::Term(_) => None,
            })
            .collect();
        self.store.resolve_all(&ids)?;

        let mut derived = Vec::new();
        for item in &items {
            match item {
                TermOrReference::Term(term) => derived.push(reflexivity(term)),
                TermOrReference::Reference(id) => {
                    if let Some(equation) = self.store.get(*id) {
                        let (lhs, rhs) = reflexivity_of_sides(equation);
                        derived.push(lhs);
                        derived.push(rhs);
                    }
                }
            }
        }
        Ok(derived.into_iter().map(|eq| self.add_equation(eq)).collect())
    }

    /// `subst REF ... VAR=TERM ...`: substitution.
    fn handle_subst(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let ids = parse_reference_list(&mut parser);
        if ids.is_empty() {
            return Err(CommandError::Usage(Command::Subst));
        }
        let mapping = parser.parse_substitution_list()?;
        parser.expect_end()?;

        let derived: Vec<Equation> = self
            .store
            .resolve_all(&ids)?
            .into_iter()
            .map(|eq| substitution(eq, &mapping))
            .collect();
        Ok(derived.into_iter().map(|eq| self.add_equation(eq)).collect())
    }

    /// `combine REF REF ...`: transitivity, left to right.
    fn handle_combine(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let ids = parse_reference_list(&mut parser);
        parser.expect_end()?;
        if ids.len() < 2 {
            return Err(CommandError::Invalid(
                "Expected at least two references to equations".to_string(),
            ));
        }

        match transitivity_chain(self.store.resolve_all(&ids)?) {
            Ok(derived) => Ok(vec![self.add_equation(derived)]),
            Err(InferenceError::ChainMismatch(mismatches)) => Ok(mismatches
                .iter()
                .map(|m| {
                    ReplMsg::error(format!(
                        "Equations @{} and @{} don't have matching adjacent sides ({} vs. {})",
                        ids[m.left_position - 1],
                        ids[m.right_position - 1],
                        m.left_side,
                        m.right_side
                    ))
                })
                .collect()),
            Err(err) => Err(err.into()),
        }
    }

    // ========== INSPECTION COMMANDS ==========

    /// `show all` or `show REF ...`.
    fn handle_show(&mut self, args: &str) -> CommandResult {
        let topic = args.trim();
        if topic.is_empty() {
            return Ok(vec![
                ReplMsg::error("Which equations shall be shown?"),
                ReplMsg::error("Hint: > show all"),
            ]);
        }

        let ids: Vec<EntryId> = if topic.eq_ignore_ascii_case("all") {
            self.store.entries().map(|entry| entry.id).collect()
        } else {
            let mut parser = Parser::new(args);
            let ids = parse_reference_list(&mut parser);
            parser.expect_end()?;
            self.store.resolve_all(&ids)?;
            ids
        };

        let mut reply: ReplReply = ids.into_iter().map(|id| self.show_equation(id)).collect();
        if reply.is_empty() {
            reply.push_info("No equations stored yet");
        }
        Ok(reply)
    }

    /// `check REF ... SYMBOL/ARITY ...`: validate against a signature.
    fn handle_check(&mut self, args: &str) -> CommandResult {
        let mut parser = Parser::new(args);
        let ids = parse_reference_list(&mut parser);
        let signature = parse_signature(&mut parser)?;
        parser.expect_end()?;
        if ids.is_empty() || signature.is_empty() {
            return Err(CommandError::Usage(Command::Check));
        }

        let equations = self.store.resolve_all(&ids)?;
        let reply = ids
            .iter()
            .zip(equations)
            .map(|(id, equation)| {
                match equation_matches_signature(equation, &signature) {
                    Ok(()) => ReplMsg::output(format!("@{}: matches the signature", id)),
                    Err(err) => ReplMsg::error(format!("@{}: {}", id, err)),
                }
            })
            .collect();
        Ok(reply)
    }
}

/// References written `@N` or bare `N`, in order, until neither follows.
///
/// A number directly followed by `/` starts a `symbol/arity` declaration
/// and is left for the caller.
fn parse_reference_list(parser: &mut Parser<'_>) -> Vec<EntryId> {
    let mut ids = Vec::new();
    loop {
        if let Ok(Some(id)) = parser.parse_reference(true) {
            ids.push(id);
            continue;
        }

        let mut lookahead = parser.clone();
        match lookahead.parse_int() {
            Some(id) if !lookahead.remaining().starts_with('/') => {
                *parser = lookahead;
                ids.push(id);
            }
            _ => return ids,
        }
    }
}

/// `symbol/arity` declarations until the input ends.
fn parse_signature(parser: &mut Parser<'_>) -> Result<Signature, CommandError> {
    let mut signature = Signature::new();
    while let Some(token) = parser.parse_function_symbol(true)? {
        let declaration = token
            .rsplit_once('/')
            .and_then(|(symbol, arity)| Some((symbol, arity.parse::<usize>().ok()?)))
            .filter(|(symbol, _)| !symbol.is_empty());
        match declaration {
            Some((symbol, arity)) => signature.declare(symbol, arity),
            None => {
                return Err(CommandError::Invalid(format!(
                    "Expected a declaration of the form symbol/arity, got \"{}\"",
                    token
                )))
            }
        }
    }
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(core: &mut ReplCore, line: &str) -> Vec<String> {
        core.handle_line(line).iter().map(ReplMsg::render).collect()
    }

    #[test]
    fn test_enter_pairs() {
        let mut core = ReplCore::new();
        assert_eq!(
            run(&mut core, "enter \"*(-1(:x), :x)\" e \"*(*(:x, :y), :z)\" \"*(:x, *(:y, :z))\""),
            vec![
                "@1: *(-1(:x), :x) <=> e",
                "@2: *(*(:x, :y), :z) <=> *(:x, *(:y, :z))",
            ]
        );
    }

    #[test]
    fn test_enter_trailing_term() {
        let mut core = ReplCore::new();
        assert_eq!(
            run(&mut core, "enter \"*(e, :x)\" :x e"),
            vec![
                "@1: *(e, :x) <=> :x",
                "-- There was a trailing term which was ignored",
                "-- Perhaps the right side of the equation is missing?",
            ]
        );
        assert_eq!(core.store().len(), 1);
    }

    #[test]
    fn test_enter_parse_error_stores_nothing() {
        let mut core = ReplCore::new();
        let out = run(&mut core, "enter a b f(:x");
        assert_eq!(out.len(), 1);
        let caret = format!("-- a b f(:x\n-- {}^ expected either", " ".repeat(8));
        assert!(out[0].starts_with(&caret));
        assert!(core.store().is_empty());
    }

    #[test]
    fn test_reverse_accepts_bare_and_prefixed_references() {
        let mut core = ReplCore::new();
        run(&mut core, "enter \"*(e, :x)\" :x");
        assert_eq!(run(&mut core, "reverse 1"), vec!["@2: :x <=> *(e, :x)"]);
        assert_eq!(
            run(&mut core, "reverse @1 2"),
            vec!["@3: :x <=> *(e, :x)", "@4: *(e, :x) <=> :x"]
        );
    }

    #[test]
    fn test_missing_references_store_nothing() {
        let mut core = ReplCore::new();
        run(&mut core, "enter a b");
        assert_eq!(
            run(&mut core, "reverse 1 3 4"),
            vec!["-- The following references are invalid: @3, @4"]
        );
        assert_eq!(core.store().len(), 1);
    }

    #[test]
    fn test_apply() {
        let mut core = ReplCore::new();
        run(&mut core, "enter \"*(e, :x)\" :x \"*(-1(:x), :x)\" e");
        assert_eq!(
            run(&mut core, "apply t @1 @2"),
            vec!["@3: t(*(e, :x), *(-1(:x), :x)) <=> t(:x, e)"]
        );
        assert_eq!(run(&mut core, "apply c"), vec!["@4: c <=> c"]);
        assert_eq!(run(&mut core, "apply"), vec!["-- Usage: apply SYMBOL [REF ...]"]);
    }

    #[test]
    fn test_self() {
        let mut core = ReplCore::new();
        assert_eq!(run(&mut core, "self :x"), vec!["@1: :x <=> :x"]);
        assert_eq!(
            run(&mut core, "self t(2) t(4)"),
            vec!["@2: t(2) <=> t(2)", "@3: t(4) <=> t(4)"]
        );
        run(&mut core, "enter \"*(e, :x)\" :x");
        assert_eq!(
            run(&mut core, "self @4"),
            vec!["@5: *(e, :x) <=> *(e, :x)", "@6: :x <=> :x"]
        );
        assert_eq!(
            run(&mut core, "self :y @9"),
            vec!["-- The referenced equation @9 doesn't exist"]
        );
        assert_eq!(core.store().len(), 6);
    }

    #[test]
    fn test_subst() {
        let mut core = ReplCore::new();
        run(&mut core, "enter \"*(*(:x, :y), :z)\" \"*(:x, *(:y, :z))\"");
        assert_eq!(
            run(&mut core, "subst @1 x=e y=-(-e)"),
            vec!["@2: *(*(e, -(-e)), :z) <=> *(e, *(-(-e), :z))"]
        );
        assert_eq!(
            run(&mut core, "subst @1 z=\"*(-(e), e)\""),
            vec!["@3: *(*(:x, :y), *(-(e), e)) <=> *(:x, *(:y, *(-(e), e)))"]
        );
        assert_eq!(
            run(&mut core, "subst @2 z=*(-(e),e)"),
            vec!["@4: *(*(e, -(-e)), *(-(e), e)) <=> *(e, *(-(-e), *(-(e), e)))"]
        );
    }

    #[test]
    fn test_subst_parse_error_is_rendered_against_arguments() {
        let mut core = ReplCore::new();
        run(&mut core, "enter :x :y");
        let out = run(&mut core, "subst @1 x e");
        assert_eq!(
            out,
            vec![format!(
                "-- @1 x e\n-- {}^ expected an equality sign (\"=\") after the variable name",
                " ".repeat(5)
            )]
        );
    }

    #[test]
    fn test_combine() {
        let mut core = ReplCore::new();
        run(&mut core, "enter e \"*(e, e)\" \"*(-(e), e)\" e");
        assert_eq!(run(&mut core, "combine 2 1"), vec!["@3: *(-(e), e) <=> *(e, e)"]);
    }

    #[test]
    fn test_combine_reports_every_mismatch() {
        let mut core = ReplCore::new();
        run(&mut core, "enter a b c d d e f g");
        assert_eq!(
            run(&mut core, "combine @1 @2 @3 @4"),
            vec![
                "-- Equations @1 and @2 don't have matching adjacent sides (b vs. c)",
                "-- Equations @3 and @4 don't have matching adjacent sides (e vs. f)",
            ]
        );
        assert_eq!(core.store().len(), 4);
    }

    #[test]
    fn test_combine_needs_two_references() {
        let mut core = ReplCore::new();
        run(&mut core, "enter a b");
        assert_eq!(
            run(&mut core, "combine 1"),
            vec!["-- Expected at least two references to equations"]
        );
    }

    #[test]
    fn test_show() {
        let mut core = ReplCore::new();
        run(&mut core, "enter \"*(e, :x)\" :x \"*(-1(:x), :x)\" e");
        assert_eq!(
            run(&mut core, "show 1 @2"),
            vec!["@1: *(e, :x) <=> :x", "@2: *(-1(:x), :x) <=> e"]
        );
        assert_eq!(
            run(&mut core, "show"),
            vec!["-- Which equations shall be shown?", "-- Hint: > show all"]
        );
        assert_eq!(run(&mut core, "show ALL").len(), 2);
        assert_eq!(
            run(&mut core, "show 3"),
            vec!["-- The referenced equation @3 doesn't exist"]
        );
    }

    #[test]
    fn test_show_all_on_empty_store() {
        let mut core = ReplCore::new();
        assert_eq!(run(&mut core, "show all"), vec!["No equations stored yet"]);
    }

    #[test]
    fn test_check() {
        let mut core = ReplCore::new();
        run(&mut core, "enter \"*(e, :x)\" :x \"*(:x)\" e");
        assert_eq!(
            run(&mut core, "check @1 @2 */2 e/0"),
            vec![
                "@1: matches the signature",
                "-- @2: function symbol '*' expects 2 argument(s) but was applied to 1",
            ]
        );
        assert_eq!(
            run(&mut core, "check @1 */x"),
            vec!["-- Expected a declaration of the form symbol/arity, got \"*/x\""]
        );
        assert_eq!(
            run(&mut core, "check @1"),
            vec!["-- Usage: check REF [REF ...] SYMBOL/ARITY [SYMBOL/ARITY ...]"]
        );
    }

    #[test]
    fn test_check_numeric_constant_declaration() {
        let mut core = ReplCore::new();
        run(&mut core, "enter t(2) t(2)");
        assert_eq!(run(&mut core, "check @1 t/1 2/0"), vec!["@1: matches the signature"]);
        assert_eq!(run(&mut core, "check 1 2/0 t/1"), vec!["@1: matches the signature"]);
        assert_eq!(
            run(&mut core, "check 1 2/1 t/1"),
            vec!["-- @1: function symbol '2' expects 1 argument(s) but was applied to 0"]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut core = ReplCore::new();
        assert_eq!(
            run(&mut core, "frobnicate 1"),
            vec!["-- Unknown command: frobnicate", "-- Type \"help\" for a list of commands"]
        );
        assert!(core.handle_line("   ").is_empty());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let mut core = ReplCore::new();
        run(&mut core, "enter a b");
        let out = run(&mut core, "reverse 1 )");
        assert_eq!(out, vec![format!("-- 1 )\n-- {}^ expected end of input", " ".repeat(2))]);
        assert_eq!(core.store().len(), 1);
    }

    #[test]
    fn test_show_caret_points_at_trailing_garbage() {
        let mut core = ReplCore::new();
        run(&mut core, "enter a b");
        assert_eq!(
            run(&mut core, "show 1 )"),
            vec![format!("-- 1 )\n-- {}^ expected end of input", " ".repeat(2))]
        );
        assert_eq!(
            run(&mut core, "show   1 )"),
            vec![format!("-- 1 )\n-- {}^ expected end of input", " ".repeat(2))]
        );
    }

    #[test]
    fn test_deeply_nested_input_is_reported() {
        let mut core = ReplCore::new();
        let deep = format!("{}:x{}", "f(".repeat(50_000), ")".repeat(50_000));
        let out = core.handle_line(&format!("enter {} e", deep));
        assert_eq!(out.len(), 1);
        assert!(out[0].is_error());
        assert!(out[0].render().ends_with("^ expected a less deeply nested term"));
        assert!(core.store().is_empty());
    }
}
