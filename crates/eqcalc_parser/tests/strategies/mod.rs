use std::rc::Rc;

use eqcalc_ast::Term;
use proptest::prelude::*;

/// Function symbols: any run of symbol characters that does not read back
/// as a variable (leading `:` followed by a word character).
pub fn arb_symbol() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        Just("-".to_string()),
        Just("e".to_string()),
        Just("-1".to_string()),
        Just("@1".to_string()),
        Just(":+".to_string()),
        "[a-zA-Z+*/^=<>@-][a-zA-Z0-9_+*/^=<>@:-]{0,3}",
    ]
}

pub fn arb_variable_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,3}"
}

pub fn arb_term() -> impl Strategy<Value = Rc<Term>> {
    let leaf = prop_oneof![
        arb_variable_name().prop_map(|name| Term::var(&name)),
        arb_symbol().prop_map(|symbol| Term::constant(&symbol)),
    ];

    leaf.prop_recursive(
        4,  // levels deep
        48, // max size
        4,  // items per collection
        |inner| {
            (arb_symbol(), prop::collection::vec(inner, 1..4))
                .prop_map(|(symbol, args)| Term::app(&symbol, args))
        },
    )
}
