//! # Domain calculators
//!
//! One calculator per problem category, all behind the [`ProblemCalculator`] trait
//! and dispatched statically through [`CalculatorEnum`].
//!
//! Every calculator is a list of branches checked in order. A branch whose
//! predicate holds computes a worked solution; when none applies the calculator
//! returns its reference card (formulas and definitions, asking for more data).
//! There is no "not enough data" error.
//!
//! | Module | Calculators |
//! |---|---|
//! | `stoichiometry` | molar mass, moles, mass (with reaction mass), gas volume |
//! | `solutions` | concentration, pH, percentage, density |
//! | `electrochemistry` | electrolysis |
//! | `reference` | reaction balancing card, general fallback |

pub mod electrochemistry;
pub mod reference;
pub mod solutions;
pub mod stoichiometry;

use crate::Chemistry::molmass::{MolarMassResult, calculate_molar_mass, round_to};
use crate::Solver::classifier::{ProblemType, normalize_question};
use crate::Solver::solution::ChemistrySolution;
use crate::Solver::solver_error::SolverError;
use crate::Solver::tokens::ExtractedTokens;
use electrochemistry::ElectrolysisCalculator;
use enum_dispatch::enum_dispatch;
use log::debug;
use reference::{GeneralCalculator, ReactionBalanceCalculator};
use regex::Regex;
use solutions::{ConcentrationCalculator, DensityCalculator, PercentCalculator, PhCalculator};
use std::sync::LazyLock;
use stoichiometry::{GasVolumeCalculator, MassCalculator, MolarMassCalculator, MoleCalculator};

/// Avogadro's number, 1/mol
pub const AVOGADRO: f64 = 6.022e23;
/// molar volume of an ideal gas at normal conditions, L/mol
pub const MOLAR_VOLUME: f64 = 22.4;
/// Faraday constant, C/mol
pub const FARADAY: f64 = 96485.0;
/// pH + pOH at 25 °C
pub const PH_NEUTRAL_SUM: f64 = 14.0;

// decimal places of the printed quantities
pub const MOLES_DP: usize = 4;
pub const MASS_DP: usize = 3;
pub const CONCENTRATION_DP: usize = 4;
pub const PERCENT_DP: usize = 2;
pub const DENSITY_DP: usize = 4;
pub const VOLUME_DP: usize = 3;
pub const MOLAR_MASS_DP: usize = 2;
pub const PH_DP: usize = 2;
pub const CHARGE_DP: usize = 2;

const NUMBER: &str = r"[0-9]+(?:[.,][0-9]+)?";

static MASS_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\s*(?:g|gr|gramm[a-z']*|kg|mg)\b", NUMBER)).unwrap()
});
static MOLE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{}\s*mol(?:\s|$|[,.;:?!)])", NUMBER)).unwrap());
static VOLUME_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\s*(?:l|litr[a-z']*|ml|dm3)\b", NUMBER)).unwrap()
});
static MILLILITRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{}\s*ml\b", NUMBER)).unwrap());

/// Everything a calculator looks at: the question as typed, its normalised
/// lower-case form and the extracted tokens.
#[derive(Debug, Clone)]
pub struct ProblemContext<'a> {
    pub question: &'a str,
    pub text: String,
    pub tokens: &'a ExtractedTokens,
}

impl<'a> ProblemContext<'a> {
    pub fn new(question: &'a str, tokens: &'a ExtractedTokens) -> Self {
        Self {
            question,
            text: normalize_question(question),
            tokens,
        }
    }

    pub fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.text.contains(k))
    }

    pub fn number_count(&self) -> usize {
        self.tokens.numbers.len()
    }

    /// a mass with its unit ("18 g") or the word "massa"
    pub fn has_mass_unit(&self) -> bool {
        MASS_UNIT.is_match(&self.text) || self.mentions(&["massa", "gramm"])
    }

    /// an amount of substance ("0.5 mol"), not the unit "mol/l" or the word "molyar"
    pub fn has_mole_count(&self) -> bool {
        MOLE_COUNT.is_match(&self.text) || self.mentions(&["mol soni", "modda miqdori"])
    }

    pub fn has_volume(&self) -> bool {
        VOLUME_UNIT.is_match(&self.text) || self.mentions(&["hajm", "litr"])
    }

    pub fn has_millilitres(&self) -> bool {
        MILLILITRES.is_match(&self.text)
    }

    /// Molar mass of the n-th extracted formula, `None` if absent or unusable
    pub fn molar_mass_of(&self, index: usize) -> Option<MolarMassResult> {
        let formula = self.tokens.formula(index)?;
        let result = calculate_molar_mass(formula);
        if result.is_empty() { None } else { Some(result) }
    }
}

pub type BranchPredicate = fn(&ProblemContext) -> bool;
pub type BranchHandler = fn(&ProblemContext) -> Result<ChemistrySolution, SolverError>;

/// One computed path of a calculator
pub struct Branch {
    pub name: &'static str,
    pub applies: BranchPredicate,
    pub solve: BranchHandler,
}

/// Runs the first branch whose predicate holds, the reference card otherwise
pub fn run_branches(
    ctx: &ProblemContext,
    branches: &[Branch],
    reference_card: fn(&ProblemContext) -> ChemistrySolution,
) -> Result<ChemistrySolution, SolverError> {
    match branches.iter().find(|branch| (branch.applies)(ctx)) {
        Some(branch) => {
            debug!("branch '{}' selected", branch.name);
            (branch.solve)(ctx)
        }
        None => {
            debug!("no branch applies, returning reference card");
            Ok(reference_card(ctx))
        }
    }
}

#[enum_dispatch]
pub trait ProblemCalculator {
    /// Solves the question, falling back to the reference card when data is missing
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError>;
    fn problem_type(&self) -> ProblemType;
}

#[derive(Debug, Clone, Copy)]
#[enum_dispatch(ProblemCalculator)]
pub enum CalculatorEnum {
    MolarMass(MolarMassCalculator),
    Mole(MoleCalculator),
    Mass(MassCalculator),
    Concentration(ConcentrationCalculator),
    Ph(PhCalculator),
    GasVolume(GasVolumeCalculator),
    Electrolysis(ElectrolysisCalculator),
    Percent(PercentCalculator),
    ReactionBalance(ReactionBalanceCalculator),
    Density(DensityCalculator),
    General(GeneralCalculator),
}

pub fn create_calculator(problem: ProblemType) -> CalculatorEnum {
    match problem {
        ProblemType::MolarMass => CalculatorEnum::MolarMass(MolarMassCalculator),
        ProblemType::MoleCalculation => CalculatorEnum::Mole(MoleCalculator),
        ProblemType::MassCalculation => CalculatorEnum::Mass(MassCalculator),
        ProblemType::Concentration => CalculatorEnum::Concentration(ConcentrationCalculator),
        ProblemType::PhCalculation => CalculatorEnum::Ph(PhCalculator),
        ProblemType::GasVolume => CalculatorEnum::GasVolume(GasVolumeCalculator),
        ProblemType::Electrolysis => CalculatorEnum::Electrolysis(ElectrolysisCalculator),
        ProblemType::PercentCalculation => CalculatorEnum::Percent(PercentCalculator),
        ProblemType::ReactionBalance => CalculatorEnum::ReactionBalance(ReactionBalanceCalculator),
        ProblemType::Density => CalculatorEnum::Density(DensityCalculator),
        ProblemType::General => CalculatorEnum::General(GeneralCalculator),
    }
}

/// The value exactly as `fixed` prints it. Later steps of a solution compute
/// with this so that every printed step checks by hand.
pub fn shown(value: f64, decimals: usize) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    round_to(value, decimals as i32) + 0.0
}

/// Fixed-precision rendering of a computed quantity
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, shown(value, decimals))
}

/// Input values are echoed as typed: 18 -> "18", 0.5 -> "0.5"
pub fn plain(value: f64) -> String {
    format!("{}", value)
}

fn superscript(exponent: i32) -> String {
    exponent
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        })
        .collect()
}

/// Scientific notation with superscript exponent: 0.001 -> "10⁻³", 2.5e-4 -> "2.50 × 10⁻⁴"
pub fn scientific(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return plain(value);
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exponent);
    // rounding may carry the mantissa up to 10.00
    if round_to(mantissa.abs(), 2) >= 10.0 {
        exponent += 1;
        mantissa /= 10.0;
    }
    let power = format!("10{}", superscript(exponent));
    if (round_to(mantissa, 2) - 1.0).abs() < 1e-9 {
        power
    } else {
        format!("{:.2} × {}", mantissa, power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_and_plain() {
        assert_eq!(fixed(18.0 / 18.02, MOLES_DP), "0.9989");
        assert_eq!(fixed(2.0, DENSITY_DP), "2.0000");
        assert_eq!(fixed(44.8, VOLUME_DP), "44.800");
        assert_eq!(fixed(-f64::log10(1.0), 2), "0.00");
        assert_eq!(plain(18.0), "18");
        assert_eq!(plain(0.5), "0.5");
    }

    #[test]
    fn test_fixed_of_huge_values() {
        // 1e306 × 10⁴ is not representable, the value is printed without rounding
        let printed = fixed(1e306, DENSITY_DP);
        assert!(printed.starts_with("1000000"));
        assert!(printed.ends_with(".0000"));
        assert!(!printed.contains("inf"));
        assert_eq!(fixed(f64::MAX, MASS_DP).len(), 309 + 4);
        assert_eq!(shown(0.099910, MOLES_DP), 0.0999);
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(10f64.powf(-3.0)), "10⁻³");
        assert_eq!(scientific(10f64.powf(-11.0)), "10⁻¹¹");
        assert_eq!(scientific(2.5e-4), "2.50 × 10⁻⁴");
        assert_eq!(scientific(3.01e23), "3.01 × 10²³");
        assert_eq!(scientific(0.999999), "10⁰");
        assert_eq!(scientific(0.0), "0");
    }

    #[test]
    fn test_context_unit_detection() {
        let tokens = ExtractedTokens::from_question("18 g suv necha mol?");
        let ctx = ProblemContext::new("18 g suv necha mol?", &tokens);
        assert!(ctx.has_mass_unit());
        assert!(!ctx.has_mole_count());
        assert!(!ctx.has_volume());
        assert_eq!(ctx.molar_mass_of(0).unwrap().molar_mass, 18.02);
        assert!(ctx.molar_mass_of(1).is_none());

        let tokens = ExtractedTokens::from_question("0.5 mol NaCl 250 ml eritmada, molyar konsentratsiya");
        let ctx = ProblemContext::new("0.5 mol NaCl 250 ml eritmada, molyar konsentratsiya", &tokens);
        assert!(ctx.has_mole_count());
        assert!(ctx.has_volume());
        assert!(ctx.has_millilitres());

        // a concentration unit is not an amount of substance
        let tokens = ExtractedTokens::from_question("0.1 mol/l HCl");
        let ctx = ProblemContext::new("0.1 mol/l HCl", &tokens);
        assert!(!ctx.has_mole_count());
    }

    #[test]
    fn test_create_calculator_matches_problem_type() {
        let all = [
            ProblemType::MolarMass,
            ProblemType::MoleCalculation,
            ProblemType::MassCalculation,
            ProblemType::Concentration,
            ProblemType::PhCalculation,
            ProblemType::GasVolume,
            ProblemType::Electrolysis,
            ProblemType::PercentCalculation,
            ProblemType::ReactionBalance,
            ProblemType::Density,
            ProblemType::General,
        ];
        for problem in all {
            assert_eq!(create_calculator(problem).problem_type(), problem);
        }
    }

    #[test]
    fn test_every_calculator_has_reference_card() {
        // no numbers and no formulas: every calculator must still answer
        let tokens = ExtractedTokens::default();
        for problem in [
            ProblemType::MolarMass,
            ProblemType::MoleCalculation,
            ProblemType::MassCalculation,
            ProblemType::Concentration,
            ProblemType::PhCalculation,
            ProblemType::GasVolume,
            ProblemType::Electrolysis,
            ProblemType::PercentCalculation,
            ProblemType::ReactionBalance,
            ProblemType::Density,
            ProblemType::General,
        ] {
            let solution = create_calculator(problem).compute("", &tokens).unwrap();
            assert!(!solution.given.is_empty(), "{}", problem);
            assert!(!solution.find.is_empty(), "{}", problem);
            assert!(!solution.solution.is_empty(), "{}", problem);
            assert!(!solution.answer.is_empty(), "{}", problem);
        }
    }
}
