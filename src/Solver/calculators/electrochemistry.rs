/// Electrolysis by Faraday's laws: charge passed and moles of electrons
use super::{
    Branch, CHARGE_DP, FARADAY, MOLES_DP, ProblemCalculator, ProblemContext, fixed, plain,
    run_branches,
};
use crate::Solver::classifier::ProblemType;
use crate::Solver::solution::{ChemistrySolution, numbered_steps};
use crate::Solver::solver_error::{SolverError, checked_div, finite};
use crate::Solver::tokens::ExtractedTokens;

#[derive(Debug, Clone, Copy)]
pub struct ElectrolysisCalculator;

fn current_and_time_given(ctx: &ProblemContext) -> bool {
    ctx.number_count() >= 2
}

/// Current in amperes is the first number, time in seconds the second
fn charge_and_electrons(ctx: &ProblemContext) -> Result<ChemistrySolution, SolverError> {
    let (Some(current), Some(time)) = (ctx.tokens.number(0), ctx.tokens.number(1)) else {
        return Ok(electrolysis_card(ctx));
    };
    let charge = finite(current * time, "charge")?;
    let electrons = checked_div(charge, FARADAY, "moles of electrons")?;
    let mut note = String::from(
        "Ajralib chiqqan modda massasi m = (M × Q) / (z × F) formula bilan topiladi. \
         Buning uchun modda formulasi va bir ionga to'g'ri keladigan elektronlar soni (z) kerak.",
    );
    if let Some(formula) = ctx.tokens.formula(0) {
        note.push_str(&format!(" Savolda {} moddasi ko'rsatilgan, z ni tenglamadan aniqlang.", formula));
    }
    Ok(ChemistrySolution::new(
        format!(
            "I = {} A\nt = {} s\nF = 96485 C/mol",
            plain(current),
            plain(time)
        ),
        "Q - ?, n(e⁻) - ?",
        numbered_steps(&[
            format!(
                "Q = I × t = {} × {} = {} C",
                plain(current),
                plain(time),
                fixed(charge, CHARGE_DP)
            ),
            format!(
                "n(e⁻) = Q / F = {} / 96485 = {} mol",
                fixed(charge, CHARGE_DP),
                fixed(electrons, MOLES_DP)
            ),
        ]),
        format!(
            "Q = {} C, n(e⁻) = {} mol",
            fixed(charge, CHARGE_DP),
            fixed(electrons, MOLES_DP)
        ),
    )
    .with_note(note))
}

fn electrolysis_card(_ctx: &ProblemContext) -> ChemistrySolution {
    ChemistrySolution::new(
        "Tok kuchi va vaqt aniqlanmadi",
        "Q - ?, m - ?",
        numbered_steps(&[
            "Zaryad miqdori: Q = I × t (C)",
            "Elektronlar miqdori: n(e⁻) = Q / F, F = 96485 C/mol",
            "Faradeyning birlashgan qonuni: m = (M × I × t) / (z × F)",
        ]),
        "Hisoblash uchun tok kuchini (A) va vaqtni (s) kiriting",
    )
}

const ELECTROLYSIS_BRANCHES: &[Branch] = &[Branch {
    name: "charge and electrons",
    applies: current_and_time_given,
    solve: charge_and_electrons,
}];

impl ProblemCalculator for ElectrolysisCalculator {
    fn compute(
        &self,
        question: &str,
        tokens: &ExtractedTokens,
    ) -> Result<ChemistrySolution, SolverError> {
        let ctx = ProblemContext::new(question, tokens);
        run_branches(&ctx, ELECTROLYSIS_BRANCHES, electrolysis_card)
    }

    fn problem_type(&self) -> ProblemType {
        ProblemType::Electrolysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(question: &str) -> ChemistrySolution {
        let tokens = ExtractedTokens::from_question(question);
        ElectrolysisCalculator.compute(question, &tokens).unwrap()
    }

    #[test]
    fn test_charge_and_electrons() {
        let solution = solve("CuSO4 eritmasi elektroliz qilinganda 2 A tok 965 s davomida o'tdi");
        assert_eq!(solution.answer, "Q = 1930.00 C, n(e⁻) = 0.0200 mol");
        assert!(solution.given.starts_with("I = 2 A\nt = 965 s"));
        assert!(solution.note.unwrap().contains("CuSO4"));
    }

    #[test]
    fn test_electrolysis_reference_card() {
        let solution = solve("elektroliz nima?");
        assert_eq!(solution.find, "Q - ?, m - ?");
        assert!(solution.solution.contains("96485"));
    }
}
