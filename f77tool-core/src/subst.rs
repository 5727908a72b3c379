//! Minimal `$NAME` substitution over construction variables.
//!
//! Enough to observe what a template will turn into; the orchestrator's own
//! substitution engine does the real work at execution time. Names this tool
//! produces expand to nothing when unset; any other unknown name is kept.

use f77tool_types::VarValue;
use f77tool_types::vars::PRODUCED;
use std::collections::BTreeMap;
use tracing::warn;

pub(crate) fn expand_value(value: &VarValue, vars: &BTreeMap<String, VarValue>) -> String {
    let mut stack = Vec::new();
    collapse(&expand_var(value, vars, &mut stack))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn expand_var(
    value: &VarValue,
    vars: &BTreeMap<String, VarValue>,
    stack: &mut Vec<String>,
) -> String {
    match value {
        VarValue::Str(s) => expand_str(s, vars, stack),
        VarValue::List(items) => items
            .iter()
            .map(|item| expand_str(item, vars, stack))
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn expand_str(s: &str, vars: &BTreeMap<String, VarValue>, stack: &mut Vec<String>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        let (name, raw_len) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => {
                    out.push_str(&rest[pos..]);
                    return out;
                }
            }
        } else {
            let len = after
                .char_indices()
                .take_while(|(i, c)| {
                    *c == '_' || c.is_ascii_alphabetic() || (*i > 0 && c.is_ascii_digit())
                })
                .map(|(_, c)| c.len_utf8())
                .sum::<usize>();
            (&after[..len], len)
        };

        if name.is_empty() {
            out.push('$');
            rest = after;
            continue;
        }

        let raw = &rest[pos..pos + 1 + raw_len];
        match vars.get(name) {
            Some(_) if stack.iter().any(|n| n == name) => {
                warn!(var = name, "recursive variable reference; expanding to nothing");
            }
            Some(value) => {
                stack.push(name.to_string());
                out.push_str(&expand_var(value, vars, stack));
                stack.pop();
            }
            None if PRODUCED.contains(&name) => {}
            None => out.push_str(raw),
        }
        rest = &rest[pos + 1 + raw_len..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, VarValue)]) -> BTreeMap<String, VarValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn expand(template: &str, vars: &BTreeMap<String, VarValue>) -> String {
        expand_value(&VarValue::from(template), vars)
    }

    #[test]
    fn expands_nested_references() {
        let v = vars(&[
            ("F77", VarValue::from("f77")),
            ("SHF77", VarValue::from("$F77")),
            ("F77FLAGS", VarValue::clvar("-O2")),
        ]);
        assert_eq!(expand("$SHF77 ${F77FLAGS} -c", &v), "f77 -O2 -c");
    }

    #[test]
    fn unknown_names_are_kept() {
        let v = vars(&[("F77", VarValue::from("f77"))]);
        assert_eq!(
            expand("$F77 $_F77INCFLAGS -c -o $TARGET $SOURCES", &v),
            "f77 $_F77INCFLAGS -c -o $TARGET $SOURCES"
        );
    }

    #[test]
    fn unset_tool_variables_expand_to_nothing() {
        let v = vars(&[
            ("F77", VarValue::from("f77")),
            ("SHF77FLAGS", VarValue::clvar("$F77FLAGS")),
        ]);
        assert_eq!(expand_value(&v["SHF77FLAGS"], &v), "");
        assert_eq!(
            expand("$F77 ${F77FLAGS} $_F77INCFLAGS -c", &v),
            "f77 $_F77INCFLAGS -c"
        );
    }

    #[test]
    fn empty_lists_collapse_whitespace() {
        let v = vars(&[
            ("F77", VarValue::from("f77")),
            ("F77FLAGS", VarValue::empty_list()),
        ]);
        assert_eq!(expand("$F77   $F77FLAGS -c", &v), "f77 -c");
    }

    #[test]
    fn dollar_escapes_and_cycles() {
        let v = vars(&[
            ("A", VarValue::from("$B")),
            ("B", VarValue::from("x $A")),
        ]);
        assert_eq!(expand("$$HOME", &v), "$HOME");
        assert_eq!(expand("$A", &v), "x");
        assert_eq!(expand("cost: $5", &v), "cost: $5");
    }

    #[test]
    fn unterminated_brace_is_literal() {
        let v = vars(&[]);
        assert_eq!(expand("a ${F77", &v), "a ${F77");
    }
}
