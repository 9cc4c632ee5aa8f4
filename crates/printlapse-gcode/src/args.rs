//! Argument decoder
//!
//! Converts an argument string such as `"X10.5 Y-3 F1500"` into a mapping
//! from axis letter to numeric value. Decoding never fails a line: a token
//! whose numeric suffix does not parse decodes as `1.0` (a bare letter acts
//! as a boolean-style flag), and unknown letters are preserved for the
//! consumer to warn about.

use crate::context::ParseContext;

/// Decoded arguments of one command, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgMap {
    entries: Vec<(char, f64)>,
}

impl ArgMap {
    /// Decode an argument string
    ///
    /// Malformed numeric suffixes are warned through the context and
    /// defaulted to `1.0`. A repeated letter overwrites the earlier value.
    pub fn decode(ctx: &ParseContext, args: &str) -> Self {
        let mut map = ArgMap::default();
        for token in args.split_whitespace() {
            let mut chars = token.chars();
            let letter = match chars.next() {
                Some(c) => c,
                None => continue,
            };
            let value = match chars.as_str().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    ctx.warn(format!(
                        "Malformed argument '{token}', defaulting to 1.0"
                    ));
                    1.0
                }
            };
            map.insert(letter, value);
        }
        map
    }

    fn insert(&mut self, letter: char, value: f64) {
        match self.entries.iter_mut().find(|(l, _)| *l == letter) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((letter, value)),
        }
    }

    /// Value for an axis letter, if present
    pub fn get(&self, letter: char) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, v)| *v)
    }

    /// Whether an axis letter is present
    pub fn contains(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Whether no arguments were decoded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(letter, value)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.entries.iter().copied()
    }
}
