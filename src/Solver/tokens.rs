/// Token extraction from free question text: numeric literals, chemical formulas
/// and particle counts written in scientific notation. Every extractor is pure,
/// keeps the left-to-right order of appearance and returns an empty result
/// instead of failing.
use crate::Chemistry::compounds;
use crate::Chemistry::elements::is_known_symbol;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// "× 10²³", "x10^5", "* 10^-3": the power-of-ten tail of a scientific number
static SCIENTIFIC_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[×xX*·]\s*10\s*(?:\^\s*[-−+]?[0-9]+|[⁻⁺]?[⁰¹²³⁴⁵⁶⁷⁸⁹]+)").unwrap()
});
static SCIENTIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+(?:[.,][0-9]+)?)(?:\s*[×xX*·]\s*10\s*(?:\^\s*([-−+]?[0-9]+)|([⁻⁺]?[⁰¹²³⁴⁵⁶⁷⁸⁹]+))|[eE]([-+]?[0-9]+))",
    )
    .unwrap()
});
// a number must not continue a formula (H2O, (NO3)2) or another number
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9.,)\]_^₀-₉])([0-9]+(?:[.,][0-9]+)?)").unwrap()
});
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9()₀-₉]+").unwrap());
static FORMULA_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][a-z]?[0-9]*|\((?:[A-Z][a-z]?[0-9]*)+\)[0-9]*)+$").unwrap()
});
static SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z][a-z]?").unwrap());

/// Numbers and formulas found in one question. The first number is the primary
/// quantity, the first formula the primary substance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedTokens {
    pub numbers: Vec<f64>,
    pub formulas: Vec<String>,
}

impl ExtractedTokens {
    /// Extracts both token lists. When no formula is written in the text, compounds
    /// named in words ("suv", "osh tuzi") stand in for it.
    pub fn from_question(question: &str) -> Self {
        let numbers = extract_numbers(question);
        let mut formulas = extract_formulas(question);
        if formulas.is_empty() {
            formulas = compounds::mentioned_in_text(question)
                .iter()
                .map(|c| c.formula.to_string())
                .collect();
        }
        debug!("tokens: numbers {:?}, formulas {:?}", numbers, formulas);
        Self { numbers, formulas }
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.numbers.get(index).copied()
    }

    pub fn formula(&self, index: usize) -> Option<&str> {
        self.formulas.get(index).map(|f| f.as_str())
    }
}

fn parse_decimal(literal: &str) -> Option<f64> {
    literal.replace(',', ".").parse().ok()
}

fn normalize_subscripts(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            '₀'..='₉' => char::from_digit(c as u32 - '₀' as u32, 10).unwrap_or(c),
            other => other,
        })
        .collect()
}

fn superscript_to_int(text: &str) -> Option<i32> {
    let mut plain = String::new();
    for c in text.chars() {
        let mapped = match c {
            '⁰' => '0',
            '¹' => '1',
            '²' => '2',
            '³' => '3',
            '⁴' => '4',
            '⁵' => '5',
            '⁶' => '6',
            '⁷' => '7',
            '⁸' => '8',
            '⁹' => '9',
            '⁻' => '-',
            '⁺' => '+',
            _ => return None,
        };
        plain.push(mapped);
    }
    plain.parse().ok()
}

/// Numeric literals in order of appearance. Comma is accepted as decimal separator.
/// For "6.022 × 10²³" only the coefficient 6.022 is returned.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    let without_powers = SCIENTIFIC_TAIL.replace_all(text, "");
    NUMBER
        .captures_iter(&without_powers)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| parse_decimal(m.as_str()))
        .collect()
}

// "(H2O)" -> "H2O", "H2O)" -> "H2O", "2H2O" -> "H2O"
fn trim_token(token: &str) -> &str {
    let mut token = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if token.starts_with('(') && token.ends_with(')') && token.len() > 2 {
        let inner = &token[1..token.len() - 1];
        if !inner.contains('(') && !inner.contains(')') {
            token = inner;
        }
    }
    let opening = token.matches('(').count();
    let closing = token.matches(')').count();
    if closing > opening {
        token = token.trim_end_matches(')');
    } else if opening > closing {
        token = token.trim_start_matches('(');
    }
    token
}

fn looks_like_formula(token: &str) -> bool {
    // a lone capital letter is more often a unit or a variable (V, A, C) than an element
    if token.len() < 2 || !FORMULA_SHAPE.is_match(token) {
        return false;
    }
    SYMBOL
        .find_iter(token)
        .all(|symbol| is_known_symbol(symbol.as_str()))
}

/// Substrings shaped like chemical formulas, in order of appearance, duplicates kept
pub fn extract_formulas(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| normalize_subscripts(m.as_str()))
        .filter_map(|token| {
            let trimmed = trim_token(&token);
            if looks_like_formula(trimmed) {
                Some(trimmed.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// A particle count written in scientific notation: "3,01 × 10²³", "6.022*10^23", "1.2e24"
pub fn extract_scientific_count(text: &str) -> Option<f64> {
    let caps = SCIENTIFIC.captures(text)?;
    let mantissa = parse_decimal(caps.get(1)?.as_str())?;
    let exponent = if let Some(power) = caps.get(2) {
        power.as_str().replace('−', "-").parse::<i32>().ok()?
    } else if let Some(power) = caps.get(3) {
        superscript_to_int(power.as_str())?
    } else {
        caps.get(4)?.as_str().parse::<i32>().ok()?
    };
    Some(mantissa * 10f64.powi(exponent))
}
