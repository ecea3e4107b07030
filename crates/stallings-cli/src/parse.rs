//! Textual word syntax.
//!
//! Letters are `name` or `name^<exponent>` with names matching
//! `[A-Za-z][A-Za-z0-9_]*`, joined by `*`. `x^-1` is the inverse letter,
//! `x^3` expands to three letters, and `1` denotes the empty word. The
//! parsed word is freely reduced by construction.

use stallings_core::{Symbol, Word};

/// Parses one word. Returns a human-readable message on malformed input.
pub fn parse_word(input: &str) -> Result<Word, String> {
    let mut symbols = Vec::new();
    for token in input.split('*') {
        let token = token.trim();
        if token.is_empty() {
            return Err(format!("empty factor in word '{}'", input));
        }
        if token == "1" {
            continue;
        }
        let (name, exponent) = match token.split_once('^') {
            Some((name, exp)) => {
                let exp: i32 = exp
                    .parse()
                    .map_err(|_| format!("invalid exponent '{}' in word '{}'", exp, input))?;
                (name, exp)
            }
            None => (token, 1),
        };
        if !is_valid_name(name) {
            return Err(format!("invalid generator name '{}' in word '{}'", name, input));
        }
        if exponent == 0 {
            continue;
        }
        let letter = if exponent < 0 {
            Symbol::new(name).inverse()
        } else {
            Symbol::new(name)
        };
        for _ in 0..exponent.unsigned_abs() {
            symbols.push(letter.clone());
        }
    }
    Ok(Word::new(symbols))
}

/// Parses a list of word arguments.
pub fn parse_words(inputs: &[String]) -> Result<Vec<Word>, String> {
    inputs.iter().map(|s| parse_word(s)).collect()
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
