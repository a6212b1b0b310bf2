use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::substitution::Substitution;

/// A symbolic term: either a free variable or a function symbol applied to
/// zero or more argument terms.
///
/// Terms are immutable trees. Subterms are shared through `Rc`, so cloning a
/// handle or reusing an unchanged subtree is cheap and never aliases mutable
/// state.
///
/// Equality is structural: symbols, names, arity and every argument (in
/// position) must match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// `:name`
    Variable(String),
    /// `symbol(arg1, ..., argN)`; zero arguments is a constant.
    Application(String, Vec<Rc<Term>>),
}

impl Term {
    // Helper constructors for cleaner code
    pub fn var(name: &str) -> Rc<Self> {
        Rc::new(Term::Variable(name.to_string()))
    }

    pub fn app(symbol: &str, args: Vec<Rc<Term>>) -> Rc<Self> {
        Rc::new(Term::Application(symbol.to_string(), args))
    }

    pub fn constant(symbol: &str) -> Rc<Self> {
        Rc::new(Term::Application(symbol.to_string(), Vec::new()))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Function symbol of an application, `None` for variables.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Term::Variable(_) => None,
            Term::Application(symbol, _) => Some(symbol),
        }
    }

    /// Arguments of an application; variables have none.
    pub fn args(&self) -> &[Rc<Term>] {
        match self {
            Term::Variable(_) => &[],
            Term::Application(_, args) => args,
        }
    }

    /// Number of nodes (variables and applications) in the term.
    pub fn size(&self) -> usize {
        1 + self.args().iter().map(|arg| arg.size()).sum::<usize>()
    }

    /// Names of all variables occurring anywhere in the term.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Term::Variable(name) => {
                out.insert(name.clone());
            }
            Term::Application(_, args) => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
        }
    }

    /// Replace every variable bound in `mapping` by its image.
    ///
    /// The replacement is simultaneous: images are inserted as-is and never
    /// revisited, so `{x := :y, y := :x}` swaps the two variables.
    /// Subtrees without any substituted variable are shared with `self`.
    pub fn substitute(self: &Rc<Self>, mapping: &Substitution) -> Rc<Term> {
        match self.as_ref() {
            Term::Variable(name) => match mapping.get(name) {
                Some(image) => Rc::clone(image),
                None => Rc::clone(self),
            },
            Term::Application(symbol, args) => {
                let mut changed = false;
                let mut new_args = Vec::with_capacity(args.len());
                for arg in args {
                    let new_arg = arg.substitute(mapping);
                    if !Rc::ptr_eq(&new_arg, arg) {
                        changed = true;
                    }
                    new_args.push(new_arg);
                }
                if changed {
                    Rc::new(Term::Application(symbol.clone(), new_args))
                } else {
                    Rc::clone(self)
                }
            }
        }
    }

    /// Surface syntax of the term; the parser reads it back unchanged.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, ":{}", name),
            Term::Application(symbol, args) => {
                write!(f, "{}", symbol)?;
                if args.is_empty() {
                    return Ok(());
                }
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mul(l: Rc<Term>, r: Rc<Term>) -> Rc<Term> {
        Term::app("*", vec![l, r])
    }

    #[test]
    fn test_display() {
        let t = mul(Term::constant("e"), Term::var("x"));
        assert_eq!(t.to_text(), "*(e, :x)");
        assert_eq!(Term::constant("e").to_text(), "e");
        assert_eq!(Term::var("x").to_text(), ":x");
    }

    #[test]
    fn test_nested_display() {
        let t = Term::app("-", vec![Term::app("-", vec![Term::constant("e")])]);
        assert_eq!(format!("{}", t), "-(-(e))");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(mul(Term::var("x"), Term::var("y")), mul(Term::var("x"), Term::var("y")));
        assert_ne!(mul(Term::var("x"), Term::var("y")), mul(Term::var("y"), Term::var("x")));
        assert_ne!(Term::app("f", vec![Term::var("x")]), Term::app("g", vec![Term::var("x")]));
        assert_ne!(
            Term::app("f", vec![Term::var("x")]),
            Term::app("f", vec![Term::var("x"), Term::var("x")])
        );
        // A variable never equals an application, even with the same spelling.
        assert_ne!(*Term::var("e"), *Term::constant("e"));
    }

    #[test]
    fn test_variables() {
        let t = mul(mul(Term::var("x"), Term::constant("e")), Term::var("y"));
        let vars: Vec<_> = t.variables().into_iter().collect();
        assert_eq!(vars, vec!["x".to_string(), "y".to_string()]);
        assert!(Term::constant("e").variables().is_empty());
    }

    #[test]
    fn test_substitute_is_simultaneous() {
        let mut mapping = Substitution::new();
        mapping.insert("x".to_string(), Term::var("y"));
        mapping.insert("y".to_string(), Term::var("x"));

        assert_eq!(Term::var("x").substitute(&mapping), Term::var("y"));
        let swapped = mul(Term::var("x"), Term::var("y")).substitute(&mapping);
        assert_eq!(swapped.to_text(), "*(:y, :x)");
    }

    #[test]
    fn test_substitute_leaves_unbound_variables() {
        let mut mapping = Substitution::new();
        mapping.insert("x".to_string(), Term::constant("e"));

        let t = mul(Term::var("x"), Term::var("z"));
        assert_eq!(t.substitute(&mapping).to_text(), "*(e, :z)");
        // The input term is untouched.
        assert_eq!(t.to_text(), "*(:x, :z)");
    }

    #[test]
    fn test_substitute_shares_unchanged_subtrees() {
        let mut mapping = Substitution::new();
        mapping.insert("x".to_string(), Term::constant("e"));

        let untouched = Term::app("f", vec![Term::var("z")]);
        let t = mul(Term::var("x"), Rc::clone(&untouched));
        let result = t.substitute(&mapping);
        assert!(Rc::ptr_eq(&result.args()[1], &untouched));

        let no_change = untouched.substitute(&mapping);
        assert!(Rc::ptr_eq(&no_change, &untouched));
    }

    #[test]
    fn test_accessors() {
        let t = Term::app("f", vec![Term::var("x")]);
        assert_eq!(t.symbol(), Some("f"));
        assert_eq!(t.args().len(), 1);
        assert!(t.args()[0].is_variable());
        assert_eq!(Term::var("x").symbol(), None);
        assert!(Term::var("x").args().is_empty());
        assert_eq!(Term::var("x").size(), 1);
        assert_eq!(Term::app("*", vec![t, Term::constant("e")]).size(), 4);
    }
}
