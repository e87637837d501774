/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Parsing never fails: characters that cannot belong to a formula are dropped,
/// unknown element symbols contribute no mass, and a formula where nothing was
/// recognised yields a zero molar mass.
use crate::Chemistry::elements::lookup;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

const PHASE_MARKS: [&str; 7] = ["(aq)", "(g)", "(l)", "(s)", "(c)", "(k)", "(q)"];
const HYDRATE_SEPARATORS: [char; 4] = ['·', '•', '*', '.'];
const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

// ion charge written after the formula: SO4^2-, NH4+, CO3 2-
static CHARGE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s+\d*|\^\d*)?[+\-−]+$").unwrap());

/// Rounds to a fixed number of decimal places. Values too large to scale are
/// returned unchanged, they have no fractional digits left to round.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Element -> count pairs in order of first appearance, every element listed once
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedFormula {
    entries: Vec<(String, usize)>,
}

impl ParsedFormula {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// adds atoms of an element, merging with an existing entry
    pub fn add(&mut self, symbol: &str, count: usize) {
        if count == 0 || symbol.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(s, _)| s.as_str() == symbol) {
            Some((_, existing)) => *existing = existing.saturating_add(count),
            None => self.entries.push((symbol.to_string(), count)),
        }
    }

    /// adds every entry of another formula multiplied by `multiplier`
    pub fn merge(&mut self, other: &ParsedFormula, multiplier: usize) {
        for (symbol, count) in &other.entries {
            self.add(symbol, count.saturating_mul(multiplier));
        }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn count_of(&self, symbol: &str) -> usize {
        self.entries
            .iter()
            .find(|(s, _)| s.as_str() == symbol)
            .map_or(0, |(_, c)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_hashmap(&self) -> HashMap<String, usize> {
        self.entries.iter().cloned().collect()
    }
}

/// Molar mass of a formula together with the per-element breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MolarMassResult {
    pub formula: String,
    pub composition: ParsedFormula,
    /// g/mol, rounded to 2 decimal places
    pub molar_mass: f64,
    /// lines like "2 × H = 2.016", unknown symbols are not listed
    pub breakdown: Vec<String>,
}

impl MolarMassResult {
    /// true when nothing usable was recognised in the formula
    pub fn is_empty(&self) -> bool {
        self.molar_mass <= 0.0
    }

    pub fn breakdown_sum(&self) -> String {
        self.breakdown
            .iter()
            .map(|line| line.rsplit(" = ").next().unwrap_or(line.as_str()))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Removes phase marks, arrows, charges and anything else that is not part of the formula
pub fn filter_phases_marks(formula: &str) -> String {
    let mut formula: String = formula
        .chars()
        .map(|c| match SUBSCRIPTS.iter().position(|s| *s == c) {
            Some(digit) => char::from(b'0' + digit as u8),
            None => c,
        })
        .filter(|c| !matches!(*c, '⁰' | '¹' | '²' | '³' | '⁴' | '⁵' | '⁶' | '⁷' | '⁸' | '⁹' | '⁺' | '⁻'))
        .collect();
    for phase in PHASE_MARKS {
        formula = formula.replace(phase, "");
    }
    let formula = CHARGE_TAIL.replace(formula.trim(), "");
    formula
        .chars()
        .map(|c| match c {
            '[' | '{' => '(',
            ']' | '}' => ')',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '(' | ')') || HYDRATE_SEPARATORS.contains(c))
        .collect()
}

fn read_count(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if start == *pos {
        return None;
    }
    let digits: String = chars[start..*pos].iter().collect();
    digits.parse().ok()
}

// closes the innermost open bracket group into its parent
fn close_group(stack: &mut Vec<ParsedFormula>, multiplier: usize) {
    if stack.len() < 2 {
        return;
    }
    if let Some(inner) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.merge(&inner, multiplier);
        }
    }
}

// one hydrate part; open bracket groups live on an explicit stack so that
// nesting depth is bounded by memory only
fn parse_part(chars: &[char]) -> ParsedFormula {
    let mut stack: Vec<ParsedFormula> = vec![ParsedFormula::new()];
    let mut pos = 0;
    while pos < chars.len() {
        let c = chars[pos];
        if c == '(' {
            pos += 1;
            stack.push(ParsedFormula::new());
        } else if c == ')' {
            pos += 1;
            // an unmatched closing bracket is skipped
            if stack.len() > 1 {
                let multiplier = read_count(chars, &mut pos).unwrap_or(1);
                close_group(&mut stack, multiplier);
            }
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            pos += 1;
            if pos < chars.len() && chars[pos].is_ascii_lowercase() {
                symbol.push(chars[pos]);
                pos += 1;
            }
            let count = read_count(chars, &mut pos).unwrap_or(1);
            if let Some(group) = stack.last_mut() {
                group.add(&symbol, count);
            }
        } else {
            // stray lowercase letters and digits
            pos += 1;
        }
    }
    // brackets left open count once
    while stack.len() > 1 {
        close_group(&mut stack, 1);
    }
    stack.pop().unwrap_or_default()
}

/// Function to parse a chemical formula into element counts. Handles subscript digits,
/// nested brackets with multipliers and hydrate parts like CuSO4·5H2O.
pub fn parse_formula(formula: &str) -> ParsedFormula {
    let cleaned = filter_phases_marks(formula);
    debug!("parsing formula {:?} (cleaned {:?})", formula, cleaned);
    let mut parsed = ParsedFormula::new();
    for part in cleaned.split(HYDRATE_SEPARATORS) {
        let chars: Vec<char> = part.chars().collect();
        let mut pos = 0;
        let multiplier = read_count(&chars, &mut pos).unwrap_or(1);
        parsed.merge(&parse_part(&chars[pos..]), multiplier);
    }
    debug!("composition of {}: {:?}", formula, parsed.entries());
    parsed
}

/// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> MolarMassResult {
    let composition = parse_formula(formula);
    let mut molar_mass = 0.0;
    let mut breakdown = Vec::new();
    for (symbol, count) in composition.entries() {
        match lookup(symbol) {
            Some(element) => {
                let contribution = element.atomic_mass * *count as f64;
                molar_mass += contribution;
                breakdown.push(format!("{} × {} = {:.3}", count, symbol, contribution));
            }
            None => debug!("unknown element {} in {} skipped", symbol, formula),
        }
    }
    MolarMassResult {
        formula: formula.trim().to_string(),
        composition,
        molar_mass: round_to(molar_mass, 2),
        breakdown,
    }
}

/// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(vec_of_formulae: &[&str]) -> Vec<f64> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula).molar_mass)
        .collect()
}
