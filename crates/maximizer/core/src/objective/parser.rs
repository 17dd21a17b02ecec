//! Tokenizer and term classifier for objective strings.
//!
//! Terms are separated by commas and/or whitespace. Each term is classified by
//! its lexical shape:
//!
//! ```text
//! mus                  bare modifier, weight +1
//! 2.5 meat             weighted modifier
//! -combat              signed modifier, weight -1
//! meat 400 max         cap on the preceding term
//! -acc1                slot exclusion (leading '-' + slot name)
//! -tie / tie           tiebreak policy
//! +equip <item>        forced equip        -equip <item>   forbidden item
//! +25 bonus <item>     item bonus          switch <familiar>
//! ```
//!
//! Item and familiar names run until the next token that starts with `+`/`-`
//! or the end of the comma-separated chunk.

use super::{BonusTerm, Objective, Term};
use crate::catalog::CatalogOracle;
use crate::error::{MaximizerError, Result};
use crate::modifiers::ModifierId;
use crate::state::Slot;

/// Longest modifier name, in words, tried when matching a modifier phrase.
const MAX_PHRASE_WORDS: usize = 3;

pub(super) struct ObjectiveParser<'a> {
    catalog: &'a dyn CatalogOracle,
    objective: Objective,
}

/// Leading weight/sign of a term.
#[derive(Clone, Copy, Debug)]
struct Prefix {
    weight: Option<f64>,
    negative: bool,
    signed: bool,
}

impl Prefix {
    fn weight(&self) -> f64 {
        self.weight
            .unwrap_or(if self.negative { -1.0 } else { 1.0 })
    }

    /// `-word` with no numeric weight: the only shape that may name a slot.
    fn is_exclusion(&self) -> bool {
        self.weight.is_none() && self.negative
    }
}

impl<'a> ObjectiveParser<'a> {
    pub(super) fn new(catalog: &'a dyn CatalogOracle) -> Self {
        Self {
            catalog,
            objective: Objective::empty(),
        }
    }

    pub(super) fn parse(mut self, input: &str) -> Result<Objective> {
        for chunk in input.split(',') {
            let tokens: Vec<&str> = chunk.split_whitespace().collect();
            let mut position = 0;
            while position < tokens.len() {
                position = self.parse_term(&tokens, position)?;
            }
        }

        if let Some(item) = self
            .objective
            .forced
            .iter()
            .find(|item| self.objective.forbidden.contains(item))
        {
            let name = self
                .catalog
                .item(*item)
                .map_or_else(|| format!("{item:?}"), |definition| definition.name.clone());
            return Err(MaximizerError::forced(name, "item is both forced and forbidden"));
        }

        Ok(self.objective)
    }

    /// Parses one term starting at `start`; returns the index after it.
    fn parse_term(&mut self, tokens: &[&str], start: usize) -> Result<usize> {
        let first = tokens[start];
        let (prefix, word, next) = if let Some(weight) = parse_number(first) {
            let word = tokens
                .get(start + 1)
                .ok_or_else(|| MaximizerError::syntax(first, "weight without a keyword"))?;
            if word.starts_with(['+', '-']) {
                return Err(MaximizerError::syntax(
                    format!("{first} {word}"),
                    "weight followed by a signed keyword",
                ));
            }
            let prefix = Prefix {
                weight: Some(weight),
                negative: weight < 0.0,
                signed: true,
            };
            (prefix, *word, start + 1)
        } else if let Some(rest) = first.strip_prefix('-') {
            let prefix = Prefix {
                weight: None,
                negative: true,
                signed: true,
            };
            (prefix, rest, start)
        } else if let Some(rest) = first.strip_prefix('+') {
            let prefix = Prefix {
                weight: None,
                negative: false,
                signed: true,
            };
            (prefix, rest, start)
        } else {
            let prefix = Prefix {
                weight: None,
                negative: false,
                signed: false,
            };
            (prefix, first, start)
        };

        if word.is_empty() {
            return Err(MaximizerError::syntax(first, "sign without a keyword"));
        }

        match word.to_ascii_lowercase().as_str() {
            "tie" => {
                if prefix.weight.is_some() {
                    return Err(MaximizerError::syntax(word, "tie takes no weight"));
                }
                self.objective.tiebreak = !prefix.negative;
                Ok(next + 1)
            }
            "equip" => self.parse_equip(tokens, first, next, prefix),
            "bonus" => self.parse_bonus(tokens, first, next, prefix),
            "switch" => self.parse_switch(tokens, first, next, prefix),
            _ => self.parse_modifier(tokens, word, next, prefix),
        }
    }

    fn parse_equip(
        &mut self,
        tokens: &[&str],
        first: &str,
        keyword: usize,
        prefix: Prefix,
    ) -> Result<usize> {
        if prefix.weight.is_some() {
            return Err(MaximizerError::syntax(first, "equip takes no weight"));
        }
        let (name, next) = take_name(tokens, keyword + 1);
        if name.is_empty() {
            return Err(MaximizerError::syntax(first, "missing item name"));
        }
        let item = self
            .catalog
            .find_item(&name)
            .ok_or(MaximizerError::UnknownItem { name: name.clone() })?
            .id;

        let list = if prefix.negative {
            &mut self.objective.forbidden
        } else {
            &mut self.objective.forced
        };
        if !list.contains(&item) {
            list.push(item);
        }
        Ok(next)
    }

    fn parse_bonus(
        &mut self,
        tokens: &[&str],
        first: &str,
        keyword: usize,
        prefix: Prefix,
    ) -> Result<usize> {
        let value = prefix
            .weight
            .ok_or_else(|| MaximizerError::syntax(first, "bonus requires a value"))?;
        let (name, next) = take_name(tokens, keyword + 1);
        if name.is_empty() {
            return Err(MaximizerError::syntax(first, "missing item name"));
        }
        let item = self
            .catalog
            .find_item(&name)
            .ok_or(MaximizerError::UnknownItem { name: name.clone() })?
            .id;

        match self.objective.bonuses.iter_mut().find(|bonus| bonus.item == item) {
            Some(existing) => existing.value += value,
            None => self.objective.bonuses.push(BonusTerm { item, value }),
        }
        Ok(next)
    }

    fn parse_switch(
        &mut self,
        tokens: &[&str],
        first: &str,
        keyword: usize,
        prefix: Prefix,
    ) -> Result<usize> {
        if prefix.signed {
            return Err(MaximizerError::syntax(first, "switch takes no sign or weight"));
        }
        let (name, next) = take_name(tokens, keyword + 1);
        if name.is_empty() {
            return Err(MaximizerError::syntax(first, "missing familiar name"));
        }
        let familiar = self
            .catalog
            .find_familiar(&name)
            .ok_or(MaximizerError::UnknownFamiliar { name: name.clone() })?
            .id;
        if !self.objective.switches.contains(&familiar) {
            self.objective.switches.push(familiar);
        }
        Ok(next)
    }

    /// Matches the longest modifier phrase starting at `word`, or a slot exclusion.
    fn parse_modifier(
        &mut self,
        tokens: &[&str],
        word: &str,
        position: usize,
        prefix: Prefix,
    ) -> Result<usize> {
        let mut words = vec![word];
        words.extend(
            tokens[position + 1..]
                .iter()
                .take(MAX_PHRASE_WORDS - 1)
                .take_while(|token| !token.starts_with(['+', '-']) && parse_number(token).is_none()),
        );

        for length in (1..=words.len()).rev() {
            if length == 1 && prefix.is_exclusion() {
                if let Some(slot) = Slot::from_keyword(word) {
                    self.objective.excluded.insert(slot);
                    return Ok(position + 1);
                }
            }

            let phrase = words[..length].join(" ");
            if let Some(modifier) = ModifierId::from_keyword(&phrase) {
                let mut next = position + length;
                let max = match (tokens.get(next), tokens.get(next + 1)) {
                    (Some(value), Some(keyword)) if keyword.eq_ignore_ascii_case("max") => {
                        let cap = parse_number(value)
                            .ok_or_else(|| MaximizerError::syntax(*value, "invalid cap"))?;
                        next += 2;
                        Some(cap)
                    }
                    _ => None,
                };
                self.push_term(Term {
                    modifier,
                    weight: prefix.weight(),
                    max,
                });
                return Ok(next);
            }
        }

        if prefix.is_exclusion() {
            Err(MaximizerError::syntax(
                format!("-{word}"),
                "not a slot, modifier or keyword",
            ))
        } else {
            Err(MaximizerError::UnknownModifier {
                name: word.to_string(),
            })
        }
    }

    fn push_term(&mut self, term: Term) {
        match self
            .objective
            .terms
            .iter_mut()
            .find(|existing| existing.modifier == term.modifier)
        {
            Some(existing) => {
                existing.weight += term.weight;
                existing.max = term.max.or(existing.max);
            }
            None => self.objective.terms.push(term),
        }
    }
}

/// Collects a multi-word name starting at `start`.
fn take_name(tokens: &[&str], start: usize) -> (String, usize) {
    let words: Vec<&str> = tokens
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(|token| !token.starts_with(['+', '-']))
        .copied()
        .collect();
    (words.join(" "), start + words.len())
}

/// Parses a signed decimal weight; rejects words such as `inf` or `nan`.
fn parse_number(token: &str) -> Option<f64> {
    let numeric = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    if numeric && has_digit {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_require_digits() {
        assert_eq!(parse_number("+25"), Some(25.0));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("acc1"), None);
    }

    #[test]
    fn names_stop_at_signed_tokens() {
        let tokens = ["buddy", "bjorn", "-tie", "mus"];
        assert_eq!(take_name(&tokens, 0), ("buddy bjorn".to_string(), 2));
        assert_eq!(take_name(&tokens, 4), (String::new(), 4));
    }
}
