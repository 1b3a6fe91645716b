/// Placeholder substitution
///
/// Templates may contain positional placeholders ({0}, {1}, ...) that are
/// replaced with the literal text of the matching runtime argument.
/// Substitution is purely textual; no shell quoting or escaping happens
/// here, the rendered string goes to the shell exactly as built.

use crate::error::{EzError, Result};
use regex::Regex;
use std::sync::LazyLock;

// Compiled once; only explicit numeric indices are placeholders, so
// things like {} or {name} pass through untouched.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

/// Render a template against an ordered argument list.
///
/// Every `{i}` occurrence becomes `args[i]`. An index with no matching
/// argument fails with `MissingArgument` instead of leaking the literal
/// placeholder into the shell. Arguments beyond the highest referenced
/// index are silently ignored.
pub fn render(template: &str, args: &[String]) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for m in PLACEHOLDER.find_iter(template) {
        rendered.push_str(&template[last..m.start()]);

        // The match is "{<digits>}"; digit runs too large for usize can
        // never have a matching argument anyway.
        let digits = &template[m.start() + 1..m.end() - 1];
        let index = digits.parse::<usize>().unwrap_or(usize::MAX);

        match args.get(index) {
            Some(value) => rendered.push_str(value),
            None => {
                return Err(EzError::MissingArgument {
                    index,
                    provided: args.len(),
                })
            }
        }

        last = m.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}
