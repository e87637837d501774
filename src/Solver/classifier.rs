/// Problem classification by ordered keyword rules over the lower-cased question.
/// The first matching rule wins, so a question mentioning both "mol" and "massa"
/// ends up in exactly one category. Nothing matched means `General`.
use crate::Chemistry::elements::normalize_apostrophes;
use log::info;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    MolarMass,
    MoleCalculation,
    MassCalculation,
    Concentration,
    PhCalculation,
    GasVolume,
    Electrolysis,
    PercentCalculation,
    ReactionBalance,
    Density,
    General,
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::MolarMass => "molar_mass",
            ProblemType::MoleCalculation => "mole_calculation",
            ProblemType::MassCalculation => "mass_calculation",
            ProblemType::Concentration => "concentration",
            ProblemType::PhCalculation => "ph_calculation",
            ProblemType::GasVolume => "gas_volume",
            ProblemType::Electrolysis => "electrolysis",
            ProblemType::PercentCalculation => "percent_calculation",
            ProblemType::ReactionBalance => "reaction_balance",
            ProblemType::Density => "density",
            ProblemType::General => "general",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// predicate over the normalised (lower-case) question
pub type RulePredicate = fn(&str) -> bool;

static PH_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bp(?:o)?h\b").unwrap());

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn is_molar_mass(text: &str) -> bool {
    contains_any(text, &["molyar massa", "molar massa", "molekulyar massa", "mr("])
}

fn is_ph(text: &str) -> bool {
    PH_WORD.is_match(text)
        || contains_any(text, &["[h+]", "[oh-]", "[h⁺]", "[oh⁻]", "vodorod ko'rsatkich"])
}

fn is_electrolysis(text: &str) -> bool {
    contains_any(text, &["elektroliz", "faradey", "tok kuchi"])
}

fn is_concentration(text: &str) -> bool {
    contains_any(text, &["konsentratsiya", "molyarlik", "mol/l", "mol/litr"])
}

fn is_density(text: &str) -> bool {
    contains_any(text, &["zichl", "g/ml", "g/sm"])
}

fn is_percent(text: &str) -> bool {
    contains_any(text, &["foiz", "%", "ulush"])
}

fn asks_for_moles(text: &str) -> bool {
    contains_any(text, &["necha mol", "mol soni", "modda miqdori"])
}

fn is_gas_volume(text: &str) -> bool {
    contains_any(text, &["hajm", "n.sh", "normal sharoit"])
}

fn is_reaction_balance(text: &str) -> bool {
    contains_any(text, &["tenglashtir", "tenglama", "koeffitsient"])
}

fn is_mass(text: &str) -> bool {
    contains_any(text, &["massa", "necha g", "necha gramm"])
}

fn mentions_moles(text: &str) -> bool {
    text.contains("mol")
}

const RULES: &[(ProblemType, RulePredicate)] = &[
    (ProblemType::MolarMass, is_molar_mass),
    (ProblemType::PhCalculation, is_ph),
    (ProblemType::Electrolysis, is_electrolysis),
    (ProblemType::Concentration, is_concentration),
    (ProblemType::Density, is_density),
    (ProblemType::PercentCalculation, is_percent),
    (ProblemType::MoleCalculation, asks_for_moles),
    (ProblemType::GasVolume, is_gas_volume),
    (ProblemType::ReactionBalance, is_reaction_balance),
    (ProblemType::MassCalculation, is_mass),
    (ProblemType::MoleCalculation, mentions_moles),
];

/// The ordered rule table, first match wins
pub fn classification_rules() -> &'static [(ProblemType, RulePredicate)] {
    RULES
}

/// Lower-cases the question and unifies apostrophes, the form every keyword rule sees
pub fn normalize_question(question: &str) -> String {
    normalize_apostrophes(question).to_lowercase()
}

pub fn classify(question: &str) -> ProblemType {
    let text = normalize_question(question);
    let problem = RULES
        .iter()
        .find(|(_, predicate)| predicate(&text))
        .map_or(ProblemType::General, |(problem, _)| *problem);
    info!("question classified as {}", problem);
    problem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("H2O molyar massasini hisoblang"), ProblemType::MolarMass);
        assert_eq!(classify("18 g suv necha mol?"), ProblemType::MoleCalculation);
        assert_eq!(classify("pH = 3 bo'lsa [H+] necha?"), ProblemType::PhCalculation);
        assert_eq!(classify("50 g va 25 ml zichligi"), ProblemType::Density);
        assert_eq!(classify("asdkjh qwoe"), ProblemType::General);
    }

    #[test]
    fn test_classify_every_category() {
        assert_eq!(
            classify("CuSO4 eritmasi elektroliz qilinganda 2 A tok 100 s o'tdi"),
            ProblemType::Electrolysis
        );
        assert_eq!(
            classify("0.5 mol NaCl 2 l eritmada. Molyar konsentratsiyani toping"),
            ProblemType::Concentration
        );
        assert_eq!(classify("20 g tuz 80 g eritmada, foizini toping"), ProblemType::PercentCalculation);
        assert_eq!(classify("2 mol CO2 ning n.sh. dagi hajmi"), ProblemType::GasVolume);
        assert_eq!(classify("H2 + O2 = H2O tenglamani tenglashtiring"), ProblemType::ReactionBalance);
        assert_eq!(classify("0.5 mol H2SO4 massasini toping"), ProblemType::MassCalculation);
        assert_eq!(classify("3 mol kislorod"), ProblemType::MoleCalculation);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // mentions both mol and massa, the explicit "necha mol" question is checked first
        assert_eq!(classify("36 g massali suv necha mol?"), ProblemType::MoleCalculation);
        // pH outranks the moles and volume keywords
        assert_eq!(classify("0.01 mol/l HCl eritmasining pH qiymati"), ProblemType::PhCalculation);
        // molar mass outranks plain "massa"
        assert_eq!(classify("NaCl ning molyar massasi va massasi"), ProblemType::MolarMass);
    }

    #[test]
    fn test_ph_word_boundaries() {
        assert_eq!(classify("pOH = 4 bo'lsa"), ProblemType::PhCalculation);
        // "ph" inside a word is not pH
        assert_eq!(classify("fosfor, phosphor so'zi"), ProblemType::General);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let question = "12 g Mg reaksiyada necha g MgO hosil qiladi";
        let first = classify(question);
        for _ in 0..10 {
            assert_eq!(classify(question), first);
        }
        assert_eq!(first, ProblemType::MassCalculation);
    }

    #[test]
    fn test_rule_table_order() {
        let rules = classification_rules();
        assert_eq!(rules.first().unwrap().0, ProblemType::MolarMass);
        assert_eq!(rules.last().unwrap().0, ProblemType::MoleCalculation);
        assert!(rules.iter().all(|(problem, _)| *problem != ProblemType::General));
    }

    #[test]
    fn test_problem_type_names() {
        assert_eq!(ProblemType::PhCalculation.to_string(), "ph_calculation");
        assert_eq!(
            serde_json::to_string(&ProblemType::MoleCalculation).unwrap(),
            "\"mole_calculation\""
        );
    }
}
