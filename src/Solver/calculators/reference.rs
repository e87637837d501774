/// Reference answers: the reaction balancing card and the general fallback.
/// Neither can fail; the general solution is also what the entry point returns
/// when another calculator runs into an error.
use super::{ProblemCalculator, ProblemContext};
use crate::Chemistry::compounds::{self, Compound};
use crate::Chemistry::elements::{self, Element};
use crate::Chemistry::molmass::calculate_molar_mass;
use crate::Chemistry::reactions::{examples_by_type, find_involving};
use crate::Solver::calculators::stoichiometry::{molar_mass_line, molar_mass_solution};
use crate::Solver::calculators::{MOLAR_MASS_DP, fixed};
use crate::Solver::classifier::ProblemType;
use crate::Solver::solution::{ChemistrySolution, numbered_steps};
use crate::Solver::solver_error::SolverError;
use crate::Solver::tokens::ExtractedTokens;
use log::debug;

////////////////////////////////REACTION BALANCE////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct ReactionBalanceCalculator;

const BALANCING_RULES: &[&str] = &[
    "Reaksiyadan oldin va keyin har bir element atomlari soni teng bo'lishi kerak (massaning saqlanish qonuni)",
    "Avval metallarni, keyin nometallarni, so'ngra vodorod va kislorodni tenglashtiring",
    "Formulalardagi indekslarni o'zgartirmang, faqat koeffitsientlar qo'ying",
    "Koeffitsientlarni eng kichik butun sonlarga keltiring",
    "Oksidlanish-qaytarilish reaksiyalarida berilgan va olingan elektronlar sonini tenglang",
];

fn reaction_balance_card(ctx: &ProblemContext) -> ChemistrySolution {
    let given = if ctx.tokens.formulas.is_empty() {
        "Reaksiya tenglamasi".to_string()
    } else {
        format!("Moddalar: {}", ctx.tokens.formulas.join(", "))
    };
    let examples = examples_by_type()
        .iter()
        .map(|r| format!("{}: {}", r.reaction_type.as_str(), r.equation))
        .collect::<Vec<_>>()
        .join("\n");
    let solution = format!(
        "{}\n\nMisollar:\n{}",
        numbered_steps(BALANCING_RULES),
        examples
    );
    let mut distinct: Vec<String> = Vec::new();
    for formula in &ctx.tokens.formulas {
        if !distinct.contains(formula) {
            distinct.push(formula.clone());
        }
    }
    let known = find_involving(&distinct);
    let answer = if known.is_empty() {
        "Tenglamani yuqoridagi qoidalar asosida tenglashtiring".to_string()
    } else {
        let equations = known
            .iter()
            .map(|r| r.equation)
            .collect::<Vec<_>>()
            .join("\n");
        format!("Ma'lum tenglama:\n{}", equations)
    };
    ChemistrySolution::new(given, "Koeffitsientlar - ?", solution, answer)
        .with_note("Ixtiyoriy tenglamani avtomatik tenglashtirish qo'llab-quvvatlanmaydi, yuqoridagi qoidalardan foydalaning.")
}

impl ProblemCalculator for ReactionBalanceCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        Ok(reaction_balance_card(&ctx))
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::ReactionBalance
    }
}

////////////////////////////////GENERAL////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct GeneralCalculator;

type GeneralStep = fn(&ProblemContext) -> Option<ChemistrySolution>;

// a formula token that is a bare symbol ("Fe") or an element named in words
fn mentioned_element(ctx: &ProblemContext) -> Option<&'static Element> {
    ctx.tokens
        .formulas
        .iter()
        .find_map(|f| elements::lookup(f))
        .or_else(|| elements::mentioned_in_text(ctx.question))
}

fn element_card(ctx: &ProblemContext) -> Option<ChemistrySolution> {
    let element = mentioned_element(ctx)?;
    debug!("general: element {} recognised", element.symbol);
    Some(
        ChemistrySolution::new(
            format!("Element: {} ({})", element.name, element.symbol),
            "Element ma'lumotlari",
            numbered_steps(&[
                format!("Kimyoviy belgisi: {}", element.symbol),
                format!("Tartib raqami: {}", element.atomic_number),
                format!("Nisbiy atom massasi: Ar = {}", element.atomic_mass),
            ]),
            format!(
                "{} ({}): Z = {}, Ar = {}",
                element.name, element.symbol, element.atomic_number, element.atomic_mass
            ),
        )
        .with_note(format!(
            "1 mol {} atomlari massasi {} g ga teng.",
            element.symbol, element.atomic_mass
        )),
    )
}

fn mentioned_compound(ctx: &ProblemContext) -> Option<&'static Compound> {
    compounds::mentioned_in_text(ctx.question)
        .into_iter()
        .next()
        .or_else(|| {
            ctx.tokens
                .formulas
                .iter()
                .find_map(|f| compounds::find_by_formula(f))
        })
}

fn compound_card(ctx: &ProblemContext) -> Option<ChemistrySolution> {
    let compound = mentioned_compound(ctx)?;
    let result = calculate_molar_mass(compound.formula);
    if result.is_empty() {
        return None;
    }
    debug!("general: compound {} recognised", compound.formula);
    Some(ChemistrySolution::new(
        format!("Modda: {} ({})", compound.display_name(), compound.formula),
        format!("M({}) - ?, moddalar sinfi - ?", compound.formula),
        numbered_steps(&[
            result.breakdown.join("; "),
            molar_mass_line(&result),
            format!("Sinfi: {}", compound.class.as_str()),
        ]),
        format!(
            "M({}) = {} g/mol, sinfi: {}",
            compound.formula,
            fixed(result.molar_mass, MOLAR_MASS_DP),
            compound.class.as_str()
        ),
    ))
}

fn formulas_card(ctx: &ProblemContext) -> Option<ChemistrySolution> {
    molar_mass_solution(&ctx.tokens.formulas)
}

const CHEAT_SHEET: &[&str] = &[
    "Modda miqdori: n = m / M = N / Nₐ = V / Vₘ",
    "Molyar massa: M = Σ (atomlar soni × Ar)",
    "Gaz hajmi (n.sh.): V = n × 22.4 L/mol",
    "Molyar konsentratsiya: C = n / V",
    "Massa ulushi: ω = m(modda) / m(eritma) × 100%",
    "Zichlik: ρ = m / V",
    "pH = -lg[H⁺], pH + pOH = 14",
    "Elektroliz: Q = I × t, m = (M × Q) / (z × F)",
];

fn cheat_sheet(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Savoldan tanish ma'lumot aniqlanmadi",
        "Asosiy kimyoviy formulalar",
        numbered_steps(CHEAT_SHEET),
        "Savolni aniqroq yozing: modda formulasi, son qiymatlari va ularning birliklarini kiriting",
    )
    .with_note("Nₐ = 6.022 × 10²³ mol⁻¹, Vₘ = 22.4 L/mol, F = 96485 C/mol, Kw = 10⁻¹⁴")
}

const GENERAL_CHAIN: &[GeneralStep] = &[element_card, compound_card, formulas_card];

/// The answer of last resort: element data, compound data, molar masses, or the
/// formula cheat-sheet, whichever applies first
pub fn general_solution(question: &str, tokens: &ExtractedTokens) -> ChemistrySolution {
    let ctx = ProblemContext::new(question, tokens);
    GENERAL_CHAIN
        .iter()
        .find_map(|step| step(&ctx))
        .unwrap_or_else(|| cheat_sheet(&ctx))
}

impl ProblemCalculator for GeneralCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        Ok(general_solution(question, tokens))
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::General
    }
}
