//! Cursor-based recursive-descent parser.
//!
//! Grammar:
//!
//! ```text
//! term        := variable | application | '(' term ')'
//! variable    := ':' word
//! application := symbol [ '(' [ term (',' term)* ] ')' ]
//! symbol      := run of characters other than ',' '(' ')' '[' ']' and whitespace
//! reference   := '@' digits
//! pair        := [':'] word '=' term
//! ```
//!
//! Whitespace is skipped before every token. The cursor only moves forward;
//! after an error the position is left where parsing stopped, which is only
//! meaningful for diagnostics. Nesting deeper than [`MAX_DEPTH`] is a parse
//! error.

use std::rc::Rc;

use eqcalc_ast::{Substitution, Term};
use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::digit1,
    combinator::{map_res, opt},
    sequence::preceded,
    IResult,
};

use crate::error::ParseError;

const EXPECTED_TERM: &str = "a term";
const EXPECTED_CLOSING: &str = "a closing parenthesis (\")\")";
const EXPECTED_SEPARATOR: &str =
    "either an argument separator (\",\") or a closing parenthesis (\")\")";
const EXPECTED_VARIABLE: &str = "a variable (a \":\" followed by some word characters)";
const EXPECTED_SYMBOL: &str = "a function symbol";
const EXPECTED_REFERENCE: &str = "a reference, beginning with an \"@\"";
const EXPECTED_EQUALS: &str = "an equality sign (\"=\") after the variable name";
const EXPECTED_END: &str = "end of input";
const EXPECTED_SHALLOWER: &str = "a less deeply nested term";

/// Deepest accepted nesting of parentheses and argument lists.
pub const MAX_DEPTH: usize = 512;

/// Either a parsed term or an `@N` reference to a stored equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOrReference {
    Term(Rc<Term>),
    Reference(u64),
}

// ============================================================================
// Tokens
// ============================================================================

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | '[' | ']')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(is_symbol_char)(input)
}

// :name
fn variable(input: &str) -> IResult<&str, &str> {
    preceded(tag(":"), take_while1(is_word_char))(input)
}

// Left side of a substitution pair, the colon is optional: `:x` or `x`
fn pair_variable(input: &str) -> IResult<&str, &str> {
    preceded(opt(tag(":")), take_while1(is_word_char))(input)
}

fn unsigned(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>())(input)
}

// @42
fn reference(input: &str) -> IResult<&str, u64> {
    preceded(tag("@"), unsigned)(input)
}

fn open_paren(input: &str) -> IResult<&str, &str> {
    tag("(")(input)
}

fn close_paren(input: &str) -> IResult<&str, &str> {
    tag(")")(input)
}

fn comma(input: &str) -> IResult<&str, &str> {
    tag(",")(input)
}

fn equals(input: &str) -> IResult<&str, &str> {
    tag("=")(input)
}

// ============================================================================
// Cursor
// ============================================================================

/// A parsing cursor over a source buffer.
///
/// Every `parse_*` method taking `source_may_empty` behaves the same way
/// when nothing of the requested kind starts at the cursor: with `true` it
/// returns `Ok(None)` and consumes nothing but whitespace, with `false` it
/// fails with a [`ParseError`] at the current offset.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unparsed input after the cursor, whitespace included.
    pub fn remaining(&self) -> &'a str {
        self.rest()
    }

    /// True when only whitespace remains.
    pub fn is_at_end(&self) -> bool {
        self.rest().trim_start().is_empty()
    }

    /// Fail unless only whitespace remains.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.pos < self.src.len() {
            return Err(self.fail(EXPECTED_END));
        }
        Ok(())
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Run `token` at the cursor and advance past it on success.
    fn try_token<T>(
        &mut self,
        token: impl FnOnce(&'a str) -> IResult<&'a str, T>,
    ) -> Option<T> {
        match token(self.rest()) {
            Ok((remaining, value)) => {
                self.pos = self.src.len() - remaining.len();
                Some(value)
            }
            Err(_) => None,
        }
    }

    fn skip_whitespace(&mut self) {
        self.try_token(whitespace);
    }

    fn fail(&self, expected: &str) -> ParseError {
        ParseError::new(self.pos, expected)
    }

    fn absent<T>(&self, source_may_empty: bool, expected: &str) -> Result<Option<T>, ParseError> {
        if source_may_empty {
            Ok(None)
        } else {
            Err(self.fail(expected))
        }
    }

    // ------------------------------------------------------------------------
    // Terms
    // ------------------------------------------------------------------------

    pub fn parse_term(&mut self, source_may_empty: bool) -> Result<Option<Rc<Term>>, ParseError> {
        self.skip_whitespace();

        if let Some(name) = self.try_token(variable) {
            return Ok(Some(Term::var(name)));
        }

        if let Some(name) = self.try_token(symbol) {
            return self.parse_application_arguments(name).map(Some);
        }

        if self.try_token(open_paren).is_some() {
            self.descend()?;
            let term = self.expect_term()?;
            self.skip_whitespace();
            if self.try_token(close_paren).is_none() {
                return Err(self.fail(EXPECTED_CLOSING));
            }
            self.depth -= 1;
            return Ok(Some(term));
        }

        self.absent(source_may_empty, EXPECTED_TERM)
    }

    /// Parse a term that must be present.
    pub fn expect_term(&mut self) -> Result<Rc<Term>, ParseError> {
        match self.parse_term(false)? {
            Some(term) => Ok(term),
            None => Err(self.fail(EXPECTED_TERM)),
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.fail(EXPECTED_SHALLOWER));
        }
        self.depth += 1;
        Ok(())
    }

    // Called with the symbol already consumed. A symbol not followed by `(`
    // is a constant.
    fn parse_application_arguments(&mut self, name: &str) -> Result<Rc<Term>, ParseError> {
        self.skip_whitespace();
        if self.try_token(open_paren).is_none() {
            return Ok(Term::constant(name));
        }

        let mut args = Vec::new();
        self.skip_whitespace();
        if self.try_token(close_paren).is_some() {
            return Ok(Term::app(name, args));
        }

        self.descend()?;
        loop {
            args.push(self.expect_term()?);
            self.skip_whitespace();
            if self.try_token(comma).is_some() {
                continue;
            }
            if self.try_token(close_paren).is_some() {
                break;
            }
            return Err(self.fail(EXPECTED_SEPARATOR));
        }

        self.depth -= 1;
        Ok(Term::app(name, args))
    }

    pub fn parse_function_symbol(
        &mut self,
        source_may_empty: bool,
    ) -> Result<Option<String>, ParseError> {
        self.skip_whitespace();
        match self.try_token(symbol) {
            Some(name) => Ok(Some(name.to_string())),
            None => self.absent(source_may_empty, EXPECTED_SYMBOL),
        }
    }

    /// Parse `:name`, returning the name without the colon.
    pub fn parse_variable(&mut self, source_may_empty: bool) -> Result<Option<String>, ParseError> {
        self.skip_whitespace();
        match self.try_token(variable) {
            Some(name) => Ok(Some(name.to_string())),
            None => self.absent(source_may_empty, EXPECTED_VARIABLE),
        }
    }

    // ------------------------------------------------------------------------
    // References and integers
    // ------------------------------------------------------------------------

    pub fn parse_reference(&mut self, source_may_empty: bool) -> Result<Option<u64>, ParseError> {
        self.skip_whitespace();
        match self.try_token(reference) {
            Some(id) => Ok(Some(id)),
            None => self.absent(source_may_empty, EXPECTED_REFERENCE),
        }
    }

    /// All consecutive `@N` references at the cursor, in order.
    pub fn parse_references(&mut self) -> Vec<u64> {
        let mut references = Vec::new();
        while let Ok(Some(id)) = self.parse_reference(true) {
            references.push(id);
        }
        references
    }

    /// An unsigned integer, or `None` (without consuming anything but
    /// whitespace) if none starts at the cursor.
    pub fn parse_int(&mut self) -> Option<u64> {
        self.skip_whitespace();
        self.try_token(unsigned)
    }

    /// All consecutive unsigned integers at the cursor, in order.
    pub fn parse_integer_list(&mut self) -> Vec<u64> {
        let mut values = Vec::new();
        while let Some(value) = self.parse_int() {
            values.push(value);
        }
        values
    }

    // ------------------------------------------------------------------------
    // Substitutions
    // ------------------------------------------------------------------------

    /// Parse one `variable = term` pair.
    ///
    /// The variable may be written `:x` or just `x`. Once a variable has been
    /// read the rest of the pair is mandatory.
    pub fn parse_substitution(
        &mut self,
        source_may_empty: bool,
    ) -> Result<Option<(String, Rc<Term>)>, ParseError> {
        self.skip_whitespace();
        let name = match self.try_token(pair_variable) {
            Some(name) => name,
            None => return self.absent(source_may_empty, EXPECTED_VARIABLE),
        };

        self.skip_whitespace();
        if self.try_token(equals).is_none() {
            return Err(self.fail(EXPECTED_EQUALS));
        }

        let term = self.expect_term()?;
        Ok(Some((name.to_string(), term)))
    }

    /// Parse pairs until none remain. A variable bound twice keeps its last
    /// binding.
    pub fn parse_substitution_list(&mut self) -> Result<Substitution, ParseError> {
        let mut pairs = Vec::new();
        while let Some(pair) = self.parse_substitution(true)? {
            pairs.push(pair);
        }
        Ok(pairs.into_iter().collect())
    }

    /// A reference if one starts at the cursor, otherwise a term.
    pub fn parse_term_or_reference(
        &mut self,
        source_may_empty: bool,
    ) -> Result<Option<TermOrReference>, ParseError> {
        if let Some(id) = self.parse_reference(true)? {
            return Ok(Some(TermOrReference::Reference(id)));
        }
        Ok(self
            .parse_term(source_may_empty)?
            .map(TermOrReference::Term))
    }
}
