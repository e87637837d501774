/// Calculators for solutions: molar concentration, pH/pOH, mass fraction and density
use super::{
    Branch, CONCENTRATION_DP, DENSITY_DP, MOLAR_MASS_DP, MOLES_DP, PERCENT_DP, PH_DP,
    PH_NEUTRAL_SUM, ProblemCalculator, ProblemContext, fixed, plain, run_branches, scientific,
    shown,
};
use crate::Solver::classifier::ProblemType;
use crate::Solver::solution::{ChemistrySolution, numbered_steps};
use crate::Solver::solver_error::{SolverError, checked_div, finite};
use crate::Solver::tokens::ExtractedTokens;
use regex::Regex;
use std::sync::LazyLock;

////////////////////////////////CONCENTRATION////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct ConcentrationCalculator;

/// Second number as a volume in litres, plus the conversion step when it was given in ml
fn volume_in_litres(ctx: &ProblemContext, value: f64) -> (f64, Option<String>) {
    if ctx.has_millilitres() {
        let litres = value / 1000.0;
        (litres, Some(format!("V = {} ml = {} L", plain(value), plain(litres))))
    } else {
        (value, None)
    }
}

fn subject(ctx: &ProblemContext, quantity: &str) -> String {
    match ctx.tokens.formula(0) {
        Some(formula) => format!("{}({})", quantity, formula),
        None => quantity.to_string(),
    }
}

fn moles_and_volume_given(ctx: &ProblemContext) -> bool {
    ctx.has_mole_count() && ctx.has_volume() && ctx.number_count() >= 2
}

fn concentration_from_moles(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(moles), Some(value)) = (ctx.tokens.number(0), ctx.tokens.number(1)) else {
        return Ok(concentration_card(ctx));
    };
    let (volume, conversion) = volume_in_litres(ctx, value);
    let concentration = checked_div(moles, volume, "concentration")?;
    let c = subject(ctx, "C");
    let mut steps: Vec<String> = conversion.into_iter().collect();
    steps.push(format!(
        "C = n / V = {} / {} = {} mol/L",
        plain(moles),
        plain(volume),
        fixed(concentration, CONCENTRATION_DP)
    ));
    Ok(ChemistrySolution::new(
        format!("n = {} mol\nV = {} L", plain(moles), plain(volume)),
        format!("{} - ?", c),
        numbered_steps(&steps),
        format!("{} = {} mol/L", c, fixed(concentration, CONCENTRATION_DP)),
    ))
}

fn mass_and_formula_given(ctx: &ProblemContext) -> bool {
    ctx.has_mass_unit() && ctx.molar_mass_of(0).is_some() && ctx.number_count() >= 2
}

fn concentration_from_mass(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(result), Some(mass), Some(value)) =
        (ctx.molar_mass_of(0), ctx.tokens.number(0), ctx.tokens.number(1))
    else {
        return Ok(concentration_card(ctx));
    };
    let formula = result.formula.as_str();
    let (volume, conversion) = volume_in_litres(ctx, value);
    let moles = checked_div(mass, result.molar_mass, "moles")?;
    let concentration = checked_div(shown(moles, MOLES_DP), volume, "concentration")?;
    let mut steps = vec![format!(
        "n = m / M = {} / {} = {} mol",
        plain(mass),
        fixed(result.molar_mass, MOLAR_MASS_DP),
        fixed(moles, MOLES_DP)
    )];
    steps.extend(conversion);
    steps.push(format!(
        "C = n / V = {} / {} = {} mol/L",
        fixed(moles, MOLES_DP),
        plain(volume),
        fixed(concentration, CONCENTRATION_DP)
    ));
    Ok(ChemistrySolution::new(
        format!(
            "m({}) = {} g\nM({}) = {} g/mol\nV = {} L",
            formula,
            plain(mass),
            formula,
            fixed(result.molar_mass, MOLAR_MASS_DP),
            plain(volume)
        ),
        format!("C({}) - ?", formula),
        numbered_steps(&steps),
        format!("C({}) = {} mol/L", formula, fixed(concentration, CONCENTRATION_DP)),
    ))
}

fn concentration_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Erigan modda miqdori va eritma hajmi aniqlanmadi",
        "C - ?",
        numbered_steps(&[
            "Molyar konsentratsiya: C = n / V (mol/L)",
            "Massa berilgan bo'lsa avval n = m / M topiladi",
            "Hajm millilitrda berilsa litrga o'tkaziladi: 1 L = 1000 ml",
        ]),
        "Hisoblash uchun erigan modda miqdorini (mol) yoki massasini va eritma hajmini kiriting",
    )
}

const CONCENTRATION_BRANCHES: &[Branch] = &[
    Branch {
        name: "concentration from moles and volume",
        applies: moles_and_volume_given,
        solve: concentration_from_moles,
    },
    Branch {
        name: "concentration from mass and volume",
        applies: mass_and_formula_given,
        solve: concentration_from_mass,
    },
];

impl ProblemCalculator for ConcentrationCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, CONCENTRATION_BRANCHES, concentration_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::Concentration
    }
}

////////////////////////////////pH////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct PhCalculator;

// "ph = 3", "ph: 2,5", "poh=4"
static PH_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bp(o)?h\s*[=:]?\s*([0-9]+(?:[.,][0-9]+)?)").unwrap()
});

const ACID_KEYWORDS: &[&str] = &["kislota", "[h+]", "[h⁺]", "h+", "hcl", "hno3", "h2so4", "hbr"];
const BASE_KEYWORDS: &[&str] = &[
    "ishqor", "asos", "gidroksid", "[oh-]", "[oh⁻]", "oh-", "naoh", "koh", "lioh",
];

const KW_NOTE: &str = "25 °C da [H⁺] × [OH⁻] = Kw = 10⁻¹⁴, shuning uchun pH + pOH = 14.";

/// pH read from the text; a given pOH is converted. `None` outside 0..=14.
fn given_ph(ctx: &ProblemContext) -> Option<f64> {
    let caps = PH_VALUE.captures(&ctx.text)?;
    let value: f64 = caps.get(2)?.as_str().replace(',', ".").parse().ok()?;
    let ph = if caps.get(1).is_some() { PH_NEUTRAL_SUM - value } else { value };
    (0.0..=PH_NEUTRAL_SUM).contains(&ph).then_some(ph)
}

fn medium(ph: f64) -> &'static str {
    let ph = (ph * 100.0).round() / 100.0;
    if ph < 7.0 {
        "kislotali"
    } else if ph > 7.0 {
        "ishqoriy"
    } else {
        "neytral"
    }
}

fn positive_concentration(ctx: &ProblemContext) -> bool {
    ctx.tokens.number(0).is_some_and(|c| c > 0.0)
}

fn acid_given(ctx: &ProblemContext) -> bool {
    !PH_VALUE.is_match(&ctx.text) && ctx.mentions(ACID_KEYWORDS) && positive_concentration(ctx)
}

fn ph_of_acid(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(c) = ctx.tokens.number(0) else {
        return Ok(ph_card(ctx));
    };
    let ph = finite(-c.log10(), "pH")?;
    let poh = PH_NEUTRAL_SUM - ph;
    Ok(ChemistrySolution::new(
        format!("[H⁺] = C(kislota) = {} mol/L", plain(c)),
        "pH - ?, pOH - ?",
        numbered_steps(&[
            format!("pH = -lg[H⁺] = -lg({}) = {}", plain(c), fixed(ph, PH_DP)),
            format!("pOH = 14 - pH = 14 - {} = {}", fixed(ph, PH_DP), fixed(poh, PH_DP)),
            format!("Muhit: {}", medium(ph)),
        ]),
        format!("pH = {}, pOH = {}", fixed(ph, PH_DP), fixed(poh, PH_DP)),
    )
    .with_note(format!(
        "Kuchli kislota to'liq dissotsilanadi deb olindi: [H⁺] = C(kislota). {}",
        KW_NOTE
    )))
}

fn base_given(ctx: &ProblemContext) -> bool {
    !PH_VALUE.is_match(&ctx.text) && ctx.mentions(BASE_KEYWORDS) && positive_concentration(ctx)
}

fn ph_of_base(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(c) = ctx.tokens.number(0) else {
        return Ok(ph_card(ctx));
    };
    let poh = finite(-c.log10(), "pOH")?;
    let ph = PH_NEUTRAL_SUM - poh;
    Ok(ChemistrySolution::new(
        format!("[OH⁻] = C(ishqor) = {} mol/L", plain(c)),
        "pOH - ?, pH - ?",
        numbered_steps(&[
            format!("pOH = -lg[OH⁻] = -lg({}) = {}", plain(c), fixed(poh, PH_DP)),
            format!("pH = 14 - pOH = 14 - {} = {}", fixed(poh, PH_DP), fixed(ph, PH_DP)),
            format!("Muhit: {}", medium(ph)),
        ]),
        format!("pOH = {}, pH = {}", fixed(poh, PH_DP), fixed(ph, PH_DP)),
    )
    .with_note(format!(
        "Kuchli ishqor to'liq dissotsilanadi deb olindi: [OH⁻] = C(ishqor). {}",
        KW_NOTE
    )))
}

fn ph_given(ctx: &ProblemContext) -> bool {
    given_ph(ctx).is_some()
}

fn ions_from_ph(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(ph) = given_ph(ctx) else {
        return Ok(ph_card(ctx));
    };
    let poh = PH_NEUTRAL_SUM - ph;
    let h = finite(10f64.powf(-ph), "[H+]")?;
    let oh = finite(10f64.powf(-poh), "[OH-]")?;
    Ok(ChemistrySolution::new(
        format!("pH = {}", plain(ph)),
        "[H⁺] - ?, [OH⁻] - ?",
        numbered_steps(&[
            format!("[H⁺] = 10^(-pH) = {} mol/L", scientific(h)),
            format!("pOH = 14 - pH = 14 - {} = {}", plain(ph), fixed(poh, PH_DP)),
            format!("[OH⁻] = 10^(-pOH) = {} mol/L", scientific(oh)),
            format!("Muhit: {}", medium(ph)),
        ]),
        format!("[H⁺] = {} mol/L, [OH⁻] = {} mol/L", scientific(h), scientific(oh)),
    )
    .with_note(KW_NOTE))
}

fn ph_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Kislota yoki ishqor konsentratsiyasi, yoki 0 dan 14 gacha pH qiymati aniqlanmadi",
        "pH - ?",
        numbered_steps(&[
            "pH = -lg[H⁺]",
            "pOH = -lg[OH⁻]",
            "pH + pOH = 14",
            "[H⁺] = 10^(-pH), [OH⁻] = 10^(-pOH)",
            "pH < 7: kislotali, pH = 7: neytral, pH > 7: ishqoriy muhit",
        ]),
        "Hisoblash uchun kislota yoki ishqor konsentratsiyasini (mol/L) yoki pH qiymatini kiriting",
    )
    .with_note(KW_NOTE)
}

const PH_BRANCHES: &[Branch] = &[
    Branch {
        name: "pH of a strong acid",
        applies: acid_given,
        solve: ph_of_acid,
    },
    Branch {
        name: "pH of a strong base",
        applies: base_given,
        solve: ph_of_base,
    },
    Branch {
        name: "ion concentrations from pH",
        applies: ph_given,
        solve: ions_from_ph,
    },
];

impl ProblemCalculator for PhCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, PH_BRANCHES, ph_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::PhCalculation
    }
}

////////////////////////////////PERCENT////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct PercentCalculator;

fn two_numbers(ctx: &ProblemContext) -> bool {
    ctx.number_count() >= 2
}

fn mass_fraction(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(part), Some(whole)) = (ctx.tokens.number(0), ctx.tokens.number(1)) else {
        return Ok(percent_card(ctx));
    };
    let percent = checked_div(part, whole, "percentage")? * 100.0;
    let unit = if ctx.has_mass_unit() { " g" } else { "" };
    Ok(ChemistrySolution::new(
        format!("m(qism) = {}{}\nm(umumiy) = {}{}", plain(part), unit, plain(whole), unit),
        "ω - ?",
        numbered_steps(&[format!(
            "ω = m(qism) / m(umumiy) × 100% = {} / {} × 100% = {} %",
            plain(part),
            plain(whole),
            fixed(percent, PERCENT_DP)
        )]),
        format!("ω = {} %", fixed(percent, PERCENT_DP)),
    ))
}

fn percent_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Qism va umumiy miqdor aniqlanmadi",
        "ω - ?",
        numbered_steps(&[
            "Massa ulushi: ω = m(modda) / m(eritma) × 100%",
            "Eritma massasi: m(eritma) = m(modda) + m(erituvchi)",
            "Element ulushi: ω(E) = n × Ar(E) / M × 100%",
        ]),
        "Hisoblash uchun qism va umumiy miqdorni kiriting",
    )
}

const PERCENT_BRANCHES: &[Branch] = &[Branch {
    name: "mass fraction",
    applies: two_numbers,
    solve: mass_fraction,
}];

impl ProblemCalculator for PercentCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, PERCENT_BRANCHES, percent_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::PercentCalculation
    }
}

////////////////////////////////DENSITY////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct DensityCalculator;

fn density_from_mass_and_volume(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(mass), Some(volume)) = (ctx.tokens.number(0), ctx.tokens.number(1)) else {
        return Ok(density_card(ctx));
    };
    let density = checked_div(mass, volume, "density")?;
    Ok(ChemistrySolution::new(
        format!("m = {} g\nV = {} mL", plain(mass), plain(volume)),
        "ρ - ?",
        numbered_steps(&[format!(
            "ρ = m / V = {} / {} = {} g/mL",
            plain(mass),
            plain(volume),
            fixed(density, DENSITY_DP)
        )]),
        format!("ρ = {} g/mL", fixed(density, DENSITY_DP)),
    ))
}

fn density_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Massa va hajm aniqlanmadi",
        "ρ - ?",
        numbered_steps(&[
            "ρ = m / V (g/mL)",
            "m = ρ × V, V = m / ρ",
            "Gazlar uchun (n.sh.): ρ = M / 22.4 (g/L)",
        ]),
        "Hisoblash uchun massa (g) va hajmni (mL) kiriting",
    )
}

const DENSITY_BRANCHES: &[Branch] = &[Branch {
    name: "density from mass and volume",
    applies: two_numbers,
    solve: density_from_mass_and_volume,
}];

impl ProblemCalculator for DensityCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, DENSITY_BRANCHES, density_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::Density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(calculator: impl ProblemCalculator, question: &str) -> Result<ChemistrySolution, SolverError> {
        let tokens = ExtractedTokens::from_question(question);
        calculator.compute(question, &tokens)
    }

    #[test]
    fn test_concentration_from_moles() {
        let solution = solve(ConcentrationCalculator, "0.5 mol NaCl 2 l eritmada. Molyar konsentratsiyani toping").unwrap();
        assert_eq!(solution.answer, "C(NaCl) = 0.2500 mol/L");
        let solution = solve(ConcentrationCalculator, "0,1 mol modda 250 ml eritmada, konsentratsiya?").unwrap();
        assert_eq!(solution.answer, "C = 0.4000 mol/L");
        assert!(solution.solution.starts_with("1) V = 250 ml = 0.25 L"));
    }

    #[test]
    fn test_concentration_from_mass() {
        let solution = solve(ConcentrationCalculator, "5.85 g NaCl 500 ml eritmada. Molyar konsentratsiyani toping").unwrap();
        assert_eq!(solution.answer, "C(NaCl) = 0.2002 mol/L");
    }

    #[test]
    fn test_concentration_reference_card() {
        let solution = solve(ConcentrationCalculator, "molyar konsentratsiya nima?").unwrap();
        assert_eq!(solution.find, "C - ?");
        assert!(solution.solution.contains("C = n / V"));
    }

    #[test]
    fn test_concentration_zero_volume_is_an_error() {
        let result = solve(ConcentrationCalculator, "0.5 mol NaCl 0 l eritmada konsentratsiya");
        assert_eq!(result, Err(SolverError::DivisionByZero { quantity: "concentration" }));
    }

    #[test]
    fn test_ph_from_given_value() {
        let solution = solve(PhCalculator, "pH = 3 bo'lsa [H+] necha?").unwrap();
        assert_eq!(solution.answer, "[H⁺] = 10⁻³ mol/L, [OH⁻] = 10⁻¹¹ mol/L");
        assert!(solution.solution.contains("Muhit: kislotali"));
        assert!(solution.note.unwrap().contains("10⁻¹⁴"));
    }

    #[test]
    fn test_ph_from_given_poh() {
        let solution = solve(PhCalculator, "pOH = 4 bo'lsa [H+] qancha?").unwrap();
        assert_eq!(solution.given, "pH = 10");
        assert!(solution.answer.starts_with("[H⁺] = 10⁻¹⁰ mol/L"));
        assert!(solution.solution.contains("Muhit: ishqoriy"));
    }

    #[test]
    fn test_ph_of_acid_and_base() {
        let solution = solve(PhCalculator, "0.01 mol/l HCl eritmasining pH qiymati").unwrap();
        assert_eq!(solution.answer, "pH = 2.00, pOH = 12.00");
        let solution = solve(PhCalculator, "0.001 M NaOH eritmasining pH qiymatini toping").unwrap();
        assert_eq!(solution.answer, "pOH = 3.00, pH = 11.00");
    }

    #[test]
    fn test_ph_out_of_range_gives_reference_card() {
        let solution = solve(PhCalculator, "pH = 15 bo'lishi mumkinmi?").unwrap();
        assert_eq!(solution.find, "pH - ?");
        assert!(solution.solution.contains("pH + pOH = 14"));
    }

    #[test]
    fn test_ph_invariant_sums_to_fourteen() {
        for c in [0.1, 0.05, 0.002, 1e-5] {
            let ph = -f64::log10(c);
            let question = format!("{} mol/l HCl pH", c);
            let solution = solve(PhCalculator, &question).unwrap();
            let expected = format!("pH = {:.2}, pOH = {:.2}", ph, 14.0 - ph);
            assert_eq!(solution.answer, expected);
        }
    }

    #[test]
    fn test_percent() {
        let solution = solve(PercentCalculator, "20 g tuz 80 g eritmada, foizini toping").unwrap();
        assert_eq!(solution.answer, "ω = 25.00 %");
        assert!(solution.given.contains("m(qism) = 20 g"));
        let card = solve(PercentCalculator, "massa ulushi nima?").unwrap();
        assert_eq!(card.find, "ω - ?");
    }

    #[test]
    fn test_density() {
        let solution = solve(DensityCalculator, "50 g va 25 ml zichligi").unwrap();
        assert_eq!(solution.answer, "ρ = 2.0000 g/mL");
        assert_eq!(solution.solution, "1) ρ = m / V = 50 / 25 = 2.0000 g/mL");
        let card = solve(DensityCalculator, "zichlik nima?").unwrap();
        assert!(card.answer.contains("massa (g) va hajmni (mL)"));
        assert_eq!(
            solve(DensityCalculator, "10 g va 0 ml zichligi"),
            Err(SolverError::DivisionByZero { quantity: "density" })
        );
    }

    #[test]
    fn test_density_of_huge_mass_is_printed_in_full() {
        let question = format!("1{} g va 1 ml zichligi", "0".repeat(306));
        let solution = solve(DensityCalculator, &question).unwrap();
        assert!(solution.answer.starts_with("ρ = 1000000"));
        assert!(solution.answer.ends_with(".0000 g/mL"));
        assert!(!solution.answer.contains("inf"));
    }
}
