/// Molar mass, amount of substance, mass (including mass from a reaction) and
/// gas volume at normal conditions.
use super::{
    AVOGADRO, Branch, MASS_DP, MOLAR_MASS_DP, MOLAR_VOLUME, MOLES_DP, ProblemCalculator,
    ProblemContext, VOLUME_DP, fixed, plain, run_branches, scientific, shown,
};
use crate::Chemistry::molmass::{MolarMassResult, calculate_molar_mass};
use crate::Chemistry::reactions::find_involving;
use crate::Solver::classifier::ProblemType;
use crate::Solver::solution::{ChemistrySolution, numbered_steps};
use crate::Solver::solver_error::{SolverError, checked_div, finite};
use crate::Solver::tokens::{ExtractedTokens, extract_scientific_count};
use log::debug;

const NEXT_STEP_NOTE: &str = "Keyingi qadam: reaksiya tenglamasini yozing, mol nisbat bo'yicha \
     hosil bo'lgan modda miqdorini toping va m = n × M formulasi bilan uning massasini hisoblang.";

const REACTION_CONTEXT: &[&str] = &[
    "reaksiya", "hosil bo", "ta'sir", "yonish", "yondir", "yong", "→", "->", "unum",
];

/// "M(H2O) = 2.016 + 16.000 = 18.02 g/mol"
pub fn molar_mass_line(result: &MolarMassResult) -> String {
    format!(
        "M({}) = {} = {} g/mol",
        result.formula,
        result.breakdown_sum(),
        fixed(result.molar_mass, MOLAR_MASS_DP)
    )
}

/// Worked molar masses of every usable formula, `None` when none is usable
pub fn molar_mass_solution(formulas: &[String]) -> Option<ChemistrySolution> {
    let mut results: Vec<MolarMassResult> = Vec::new();
    for formula in formulas {
        if results.iter().any(|r| &r.formula == formula) {
            continue;
        }
        let result = calculate_molar_mass(formula);
        if !result.is_empty() {
            results.push(result);
        }
    }
    if results.is_empty() {
        return None;
    }
    let names: Vec<&str> = results.iter().map(|r| r.formula.as_str()).collect();
    let given = if names.len() == 1 {
        format!("Formula: {}", names[0])
    } else {
        format!("Formulalar: {}", names.join(", "))
    };
    let find = names
        .iter()
        .map(|f| format!("M({}) - ?", f))
        .collect::<Vec<_>>()
        .join(", ");
    let steps: Vec<String> = results
        .iter()
        .map(|r| format!("{}\n   {}", r.breakdown.join("; "), molar_mass_line(r)))
        .collect();
    let answer = results
        .iter()
        .map(|r| format!("M({}) = {} g/mol", r.formula, fixed(r.molar_mass, MOLAR_MASS_DP)))
        .collect::<Vec<_>>()
        .join("; ");
    Some(
        ChemistrySolution::new(given, find, numbered_steps(&steps), answer)
            .with_note("Molyar massa elementlar atom massalarining atomlar soniga ko'paytmalari yig'indisiga teng."),
    )
}

////////////////////////////////MOLAR MASS////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct MolarMassCalculator;

fn has_usable_formula(ctx: &ProblemContext) -> bool {
    ctx.tokens
        .formulas
        .iter()
        .any(|f| !calculate_molar_mass(f).is_empty())
}

fn molar_masses(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    Ok(molar_mass_solution(&ctx.tokens.formulas).unwrap_or_else(|| molar_mass_card(ctx)))
}

fn molar_mass_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Modda formulasi berilmagan",
        "M - ?",
        numbered_steps(&[
            "M = Σ (atomlar soni × Ar)",
            "Masalan: M(H2O) = 2 × 1.008 + 1 × 16.00 = 18.02 g/mol",
        ]),
        "Molyar massani hisoblash uchun modda formulasini kiriting (masalan: H2SO4)",
    )
}

const MOLAR_MASS_BRANCHES: &[Branch] = &[Branch {
    name: "molar masses of formulas",
    applies: has_usable_formula,
    solve: molar_masses,
}];

impl ProblemCalculator for MolarMassCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, MOLAR_MASS_BRANCHES, molar_mass_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MolarMass
    }
}

////////////////////////////////MOLES////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct MoleCalculator;

fn mass_given(ctx: &ProblemContext) -> bool {
    ctx.has_mass_unit() && ctx.molar_mass_of(0).is_some() && ctx.tokens.number(0).is_some()
}

fn moles_from_mass(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(result), Some(mass)) = (ctx.molar_mass_of(0), ctx.tokens.number(0)) else {
        return Ok(moles_card(ctx));
    };
    let formula = result.formula.as_str();
    let moles = checked_div(mass, result.molar_mass, "moles")?;
    let solution = ChemistrySolution::new(
        format!(
            "m({}) = {} g\nM({}) = {} g/mol",
            formula,
            plain(mass),
            formula,
            fixed(result.molar_mass, MOLAR_MASS_DP)
        ),
        format!("n({}) - ?", formula),
        numbered_steps(&[
            molar_mass_line(&result),
            format!(
                "n = m / M = {} / {} = {} mol",
                plain(mass),
                fixed(result.molar_mass, MOLAR_MASS_DP),
                fixed(moles, MOLES_DP)
            ),
        ]),
        format!("n({}) = {} mol", formula, fixed(moles, MOLES_DP)),
    );
    Ok(solution)
}

fn particles_given(ctx: &ProblemContext) -> bool {
    extract_scientific_count(ctx.question).is_some()
}

fn moles_from_particles(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(particles) = extract_scientific_count(ctx.question) else {
        return Ok(moles_card(ctx));
    };
    let particles = finite(particles, "particle count")?;
    let moles = checked_div(particles, AVOGADRO, "moles")?;
    let subject = match ctx.tokens.formula(0) {
        Some(formula) => format!("n({})", formula),
        None => "n".to_string(),
    };
    let solution = ChemistrySolution::new(
        format!(
            "N = {} ta zarracha\nNₐ = 6.022 × 10²³ mol⁻¹",
            scientific(particles)
        ),
        format!("{} - ?", subject),
        numbered_steps(&[format!(
            "n = N / Nₐ = {} / 6.022 × 10²³ = {} mol",
            scientific(particles),
            fixed(moles, MOLES_DP)
        )]),
        format!("{} = {} mol", subject, fixed(moles, MOLES_DP)),
    );
    Ok(solution)
}

fn volume_given(ctx: &ProblemContext) -> bool {
    ctx.has_volume() && ctx.tokens.number(0).is_some()
}

fn moles_from_volume(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(value) = ctx.tokens.number(0) else {
        return Ok(moles_card(ctx));
    };
    let mut steps = Vec::new();
    let volume = if ctx.has_millilitres() {
        let litres = value / 1000.0;
        steps.push(format!("V = {} ml = {} L", plain(value), plain(litres)));
        litres
    } else {
        value
    };
    let moles = checked_div(volume, MOLAR_VOLUME, "moles")?;
    steps.push(format!(
        "n = V / Vₘ = {} / {} = {} mol",
        plain(volume),
        plain(MOLAR_VOLUME),
        fixed(moles, MOLES_DP)
    ));
    let subject = match ctx.tokens.formula(0) {
        Some(formula) => format!("n({})", formula),
        None => "n".to_string(),
    };
    let solution = ChemistrySolution::new(
        format!("V = {} L (n.sh.)\nVₘ = 22.4 L/mol", plain(volume)),
        format!("{} - ?", subject),
        numbered_steps(&steps),
        format!("{} = {} mol", subject, fixed(moles, MOLES_DP)),
    )
    .with_note("Normal sharoitda (0 °C, 1 atm) 1 mol istalgan gaz 22.4 L hajmni egallaydi.");
    Ok(solution)
}

fn moles_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Modda massasi, zarrachalar soni yoki gaz hajmi aniqlanmadi",
        "n - ?",
        numbered_steps(&[
            "Massa orqali: n = m / M",
            "Zarrachalar soni orqali: n = N / Nₐ, Nₐ = 6.022 × 10²³ mol⁻¹",
            "Gaz hajmi orqali (n.sh.): n = V / Vₘ, Vₘ = 22.4 L/mol",
        ]),
        "Hisoblash uchun modda massasi va formulasini, zarrachalar sonini yoki gaz hajmini kiriting",
    )
}

const MOLE_BRANCHES: &[Branch] = &[
    Branch {
        name: "moles from mass",
        applies: mass_given,
        solve: moles_from_mass,
    },
    Branch {
        name: "moles from particle count",
        applies: particles_given,
        solve: moles_from_particles,
    },
    Branch {
        name: "moles from gas volume",
        applies: volume_given,
        solve: moles_from_volume,
    },
];

impl ProblemCalculator for MoleCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, MOLE_BRANCHES, moles_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MoleCalculation
    }
}

////////////////////////////////MASS////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct MassCalculator;

fn reaction_context(ctx: &ProblemContext) -> bool {
    ctx.mentions(REACTION_CONTEXT)
}

/// Mass of a product (or reactant) from the mass or amount of another substance
/// of the same reaction. Without a balanced equation the molar ratio is taken as 1:1.
pub fn reaction_mass(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(given), Some(value)) = (ctx.molar_mass_of(0), ctx.tokens.number(0)) else {
        return Ok(reaction_mass_card(ctx));
    };
    let moles_given = ctx.has_mole_count();
    let (given_lines, moles, moles_step) = if moles_given {
        (
            format!(
                "n({}) = {} mol\nM({}) = {} g/mol",
                given.formula,
                plain(value),
                given.formula,
                fixed(given.molar_mass, MOLAR_MASS_DP)
            ),
            value,
            format!("n({}) = {} mol (berilgan)", given.formula, plain(value)),
        )
    } else {
        let moles = checked_div(value, given.molar_mass, "moles of the given substance")?;
        (
            format!(
                "m({}) = {} g\nM({}) = {} g/mol",
                given.formula,
                plain(value),
                given.formula,
                fixed(given.molar_mass, MOLAR_MASS_DP)
            ),
            shown(moles, MOLES_DP),
            format!(
                "n({}) = m / M = {} / {} = {} mol",
                given.formula,
                plain(value),
                fixed(given.molar_mass, MOLAR_MASS_DP),
                fixed(moles, MOLES_DP)
            ),
        )
    };
    // moles as printed in the steps above
    let moles_text = if moles_given { plain(moles) } else { fixed(moles, MOLES_DP) };

    let target = ctx
        .tokens
        .formulas
        .iter()
        .skip(1)
        .find(|f| f.as_str() != given.formula)
        .map(|f| calculate_molar_mass(f))
        .filter(|r| !r.is_empty());

    let Some(target) = target else {
        debug!("reaction mass: only {} is known", given.formula);
        if moles_given {
            return Ok(mass_from_moles(ctx)?.with_note(NEXT_STEP_NOTE));
        }
        let solution = ChemistrySolution::new(
            given_lines,
            format!("n({}) - ?", given.formula),
            numbered_steps(&[moles_step]),
            format!("n({}) = {} mol", given.formula, fixed(moles, MOLES_DP)),
        )
        .with_note(NEXT_STEP_NOTE);
        return Ok(solution);
    };

    let target_mass = finite(moles * target.molar_mass, "target mass")?;
    let mut note = String::from(
        "Koeffitsientlar 1:1 deb qabul qilindi. Reaksiya tenglamasini tekshiring!",
    );
    let pair = [given.formula.clone(), target.formula.clone()];
    if let Some(reaction) = find_involving(&pair).first() {
        note.push_str(&format!("\nMa'lum tenglama: {}", reaction.equation));
    }
    let solution = ChemistrySolution::new(
        format!(
            "{}\nM({}) = {} g/mol",
            given_lines,
            target.formula,
            fixed(target.molar_mass, MOLAR_MASS_DP)
        ),
        format!("m({}) - ?", target.formula),
        numbered_steps(&[
            moles_step,
            format!(
                "Mol nisbat 1:1 deb olinadi: n({}) = n({}) = {} mol",
                target.formula,
                given.formula,
                moles_text
            ),
            format!(
                "m({}) = n × M = {} × {} = {} g",
                target.formula,
                moles_text,
                fixed(target.molar_mass, MOLAR_MASS_DP),
                fixed(target_mass, MASS_DP)
            ),
        ]),
        format!("m({}) ≈ {} g", target.formula, fixed(target_mass, MASS_DP)),
    )
    .with_note(note);
    Ok(solution)
}

fn reaction_mass_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Reaksiyadagi moddalardan birining massasi va formulasi aniqlanmadi",
        "m - ?",
        numbered_steps(&[
            "Reaksiya tenglamasini yozing va tenglashtiring",
            "Berilgan modda miqdorini toping: n = m / M",
            "Tenglamadagi koeffitsientlar nisbati bo'yicha izlanayotgan modda miqdorini toping",
            "Izlanayotgan modda massasi: m = n × M",
        ]),
        "Berilgan moddaning massasi va formulasini hamda izlanayotgan modda formulasini kiriting",
    )
}

fn moles_and_formula_given(ctx: &ProblemContext) -> bool {
    ctx.has_mole_count() && ctx.molar_mass_of(0).is_some() && ctx.tokens.number(0).is_some()
}

fn mass_from_moles(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(result), Some(moles)) = (ctx.molar_mass_of(0), ctx.tokens.number(0)) else {
        return Ok(mass_card(ctx));
    };
    let formula = result.formula.as_str();
    let mass = finite(moles * result.molar_mass, "mass")?;
    let solution = ChemistrySolution::new(
        format!(
            "n({}) = {} mol\nM({}) = {} g/mol",
            formula,
            plain(moles),
            formula,
            fixed(result.molar_mass, MOLAR_MASS_DP)
        ),
        format!("m({}) - ?", formula),
        numbered_steps(&[
            molar_mass_line(&result),
            format!(
                "m = n × M = {} × {} = {} g",
                plain(moles),
                fixed(result.molar_mass, MOLAR_MASS_DP),
                fixed(mass, MASS_DP)
            ),
        ]),
        format!("m({}) = {} g", formula, fixed(mass, MASS_DP)),
    );
    Ok(solution)
}

fn mass_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Modda miqdori yoki formulasi aniqlanmadi",
        "m - ?",
        numbered_steps(&["m = n × M", "M = Σ (atomlar soni × Ar)"]),
        "Hisoblash uchun modda miqdori (mol) va formulasini kiriting",
    )
}

const MASS_BRANCHES: &[Branch] = &[
    Branch {
        name: "mass from reaction",
        applies: reaction_context,
        solve: reaction_mass,
    },
    Branch {
        name: "mass from moles",
        applies: moles_and_formula_given,
        solve: mass_from_moles,
    },
];

impl ProblemCalculator for MassCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, MASS_BRANCHES, mass_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::MassCalculation
    }
}

////////////////////////////////GAS VOLUME////////////////////////////////

#[derive(Debug, Clone, Copy)]
pub struct GasVolumeCalculator;

fn gas_mass_given(ctx: &ProblemContext) -> bool {
    !ctx.has_mole_count() && ctx.molar_mass_of(0).is_some() && ctx.tokens.number(0).is_some()
}

fn volume_from_mass(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(result), Some(mass)) = (ctx.molar_mass_of(0), ctx.tokens.number(0)) else {
        return Ok(gas_volume_card(ctx));
    };
    let formula = result.formula.as_str();
    let moles = checked_div(mass, result.molar_mass, "moles")?;
    let volume = finite(shown(moles, MOLES_DP) * MOLAR_VOLUME, "volume")?;
    let solution = ChemistrySolution::new(
        format!(
            "m({}) = {} g\nM({}) = {} g/mol\nVₘ = 22.4 L/mol",
            formula,
            plain(mass),
            formula,
            fixed(result.molar_mass, MOLAR_MASS_DP)
        ),
        format!("V({}) - ?", formula),
        numbered_steps(&[
            format!(
                "n = m / M = {} / {} = {} mol",
                plain(mass),
                fixed(result.molar_mass, MOLAR_MASS_DP),
                fixed(moles, MOLES_DP)
            ),
            format!(
                "V = n × Vₘ = {} × 22.4 = {} L",
                fixed(moles, MOLES_DP),
                fixed(volume, VOLUME_DP)
            ),
        ]),
        format!("V({}) = {} L", formula, fixed(volume, VOLUME_DP)),
    )
    .with_note("Hajm normal sharoit (0 °C, 1 atm) uchun hisoblandi.");
    Ok(solution)
}

fn gas_moles_given(ctx: &ProblemContext) -> bool {
    ctx.has_mole_count() && ctx.tokens.number(0).is_some()
}

fn volume_from_moles(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let Some(moles) = ctx.tokens.number(0) else {
        return Ok(gas_volume_card(ctx));
    };
    let volume = finite(moles * MOLAR_VOLUME, "volume")?;
    let subject = match ctx.tokens.formula(0) {
        Some(formula) => format!("V({})", formula),
        None => "V".to_string(),
    };
    let solution = ChemistrySolution::new(
        format!("n = {} mol\nVₘ = 22.4 L/mol", plain(moles)),
        format!("{} - ?", subject),
        numbered_steps(&[format!(
            "V = n × Vₘ = {} × 22.4 = {} L",
            plain(moles),
            fixed(volume, VOLUME_DP)
        )]),
        format!("{} = {} L", subject, fixed(volume, VOLUME_DP)),
    )
    .with_note("Hajm normal sharoit (0 °C, 1 atm) uchun hisoblandi.");
    Ok(solution)
}

fn gas_volume_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Gaz massasi yoki modda miqdori aniqlanmadi",
        "V - ?",
        numbered_steps(&[
            "V = n × Vₘ, Vₘ = 22.4 L/mol (n.sh.)",
            "Massa berilgan bo'lsa: n = m / M",
        ]),
        "Hisoblash uchun gaz formulasi va massasini yoki modda miqdorini (mol) kiriting",
    )
}

const GAS_VOLUME_BRANCHES: &[Branch] = &[
    Branch {
        name: "gas volume from mass",
        applies: gas_mass_given,
        solve: volume_from_mass,
    },
    Branch {
        name: "gas volume from moles",
        applies: gas_moles_given,
        solve: volume_from_moles,
    },
];

impl ProblemCalculator for GasVolumeCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, GAS_VOLUME_BRANCHES, gas_volume_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::GasVolume
    }
}
