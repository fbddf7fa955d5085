//! Key name resolution for properties, members, and private names
//!
//! Only keys whose name is known without evaluation resolve to a name:
//! identifiers, string literals (computed or not), and private names.
//! Everything else (numbers, bigints, computed expressions) resolves to `None`
//! and can never be matched by name.

use swc_ecma_ast::{ComputedPropName, Expr, Lit, MemberProp, PrivateName, PropName, Str};

/// Resolve an object or class key to a comparable name
pub fn resolve_key_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(str_lit) => Some(string_value(str_lit)),
        PropName::Computed(computed) => computed_string_key(computed),
        PropName::Num(_) | PropName::BigInt(_) => None,
    }
}

/// Resolve the property of a member expression (`obj.name`, `obj['name']`)
///
/// Private members (`this.#name`) do not resolve.
pub fn resolve_member_name(prop: &MemberProp) -> Option<String> {
    match prop {
        MemberProp::Ident(ident) => Some(ident.sym.to_string()),
        MemberProp::Computed(computed) => computed_string_key(computed),
        MemberProp::PrivateName(_) => None,
    }
}

/// Resolve a private name (`#name`) to its bare identifier
pub fn resolve_private_name(name: &PrivateName) -> Option<String> {
    if name.name.is_empty() {
        None
    } else {
        Some(name.name.to_string())
    }
}

/// `['name']` keys resolve like `'name'`; any other expression does not
fn computed_string_key(computed: &ComputedPropName) -> Option<String> {
    match &*computed.expr {
        Expr::Lit(Lit::Str(str_lit)) => Some(string_value(str_lit)),
        Expr::Paren(paren) => match &*paren.expr {
            Expr::Lit(Lit::Str(str_lit)) => Some(string_value(str_lit)),
            _ => None,
        },
        _ => None,
    }
}

fn string_value(str_lit: &Str) -> String {
    // Wtf8Atom to String via to_atom_lossy (borrows when possible)
    str_lit.value.to_atom_lossy().to_string()
}
