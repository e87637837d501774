//////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Solver::classifier::ProblemType;
    use crate::Solver::solution::{ANSWER_LABEL, FIND_LABEL, GIVEN_LABEL, SOLUTION_LABEL};
    use crate::Solver::solver_api::{ChemistrySolver, solve_chemistry_problem};
    use approx::assert_relative_eq;
    use std::thread;

    const SCENARIOS: &[&str] = &[
        "H2O molyar massasini hisoblang",
        "18 g suv necha mol?",
        "pH = 3 bo'lsa [H+] necha?",
        "50 g va 25 ml zichligi",
        "asdkjh qwoe",
    ];

    fn has_all_sections(text: &str) -> bool {
        [GIVEN_LABEL, FIND_LABEL, SOLUTION_LABEL, ANSWER_LABEL]
            .iter()
            .all(|label| text.contains(label))
    }

    #[test]
    fn test_molar_mass_scenario() {
        let report = ChemistrySolver::new().solve("H2O molyar massasini hisoblang");
        assert_eq!(report.problem_type, ProblemType::MolarMass);
        assert_eq!(report.tokens.formulas, vec!["H2O"]);
        assert!(report.formatted.contains("Javob:\nM(H2O) = 18.02 g/mol"));
    }

    #[test]
    fn test_mole_scenario() {
        let report = ChemistrySolver::new().solve("18 g suv necha mol?");
        assert_eq!(report.problem_type, ProblemType::MoleCalculation);
        assert_eq!(report.tokens.numbers, vec![18.0]);
        assert_eq!(report.solution.answer, "n(H2O) = 0.9989 mol");
    }

    #[test]
    fn test_ph_scenario() {
        let text = solve_chemistry_problem("pH = 3 bo'lsa [H+] necha?");
        assert!(text.contains("Javob:\n[H⁺] = 10⁻³ mol/L, [OH⁻] = 10⁻¹¹ mol/L"));
        assert!(text.contains("Eslatma:"));
    }

    #[test]
    fn test_density_scenario() {
        let report = ChemistrySolver::new().solve("50 g va 25 ml zichligi");
        assert_eq!(report.problem_type, ProblemType::Density);
        assert_eq!(report.tokens.numbers, vec![50.0, 25.0]);
        assert_eq!(report.solution.answer, "ρ = 2.0000 g/mL");
    }

    #[test]
    fn test_general_scenario() {
        let report = ChemistrySolver::new().solve("asdkjh qwoe");
        assert_eq!(report.problem_type, ProblemType::General);
        assert!(report.tokens.numbers.is_empty());
        assert!(report.tokens.formulas.is_empty());
        assert_eq!(report.solution.find, "Asosiy kimyoviy formulalar");
        assert!(has_all_sections(&report.formatted));
    }

    #[test]
    fn test_every_scenario_has_all_sections() {
        for question in SCENARIOS {
            let text = solve_chemistry_problem(question);
            assert!(has_all_sections(&text), "{}", question);
            let positions: Vec<usize> = [GIVEN_LABEL, FIND_LABEL, SOLUTION_LABEL, ANSWER_LABEL]
                .iter()
                .map(|label| text.find(label).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", question);
        }
    }

    #[test]
    fn test_no_panic_on_odd_input() {
        let long = "H2O(".repeat(2000) + &"9".repeat(500);
        let inputs = [
            "",
            "   ",
            "?!.,;:()[]{}",
            "Привет, мир",
            "水の分子量",
            "😀 mol 😀",
            "((((((((((",
            "1e999 g suv necha mol?",
            "0.0.0.0 g ,,, ml zichligi",
            long.as_str(),
        ];
        for input in inputs {
            let text = solve_chemistry_problem(input);
            assert!(has_all_sections(&text), "{:?}", input);
        }
    }

    #[test]
    fn test_calculator_error_falls_back_to_general() {
        let report = ChemistrySolver::new().solve("10 g va 0 ml zichligi");
        // the classification is kept, the content comes from the general fallback
        assert_eq!(report.problem_type, ProblemType::Density);
        assert_eq!(report.solution.find, "Asosiy kimyoviy formulalar");
        assert!(!report.formatted.contains("inf"));
        assert!(!report.formatted.contains("NaN"));
    }

    #[test]
    fn test_molar_volume_round_trip() {
        let solver = ChemistrySolver::new();
        for moles in [0.5, 1.0, 2.5] {
            let report = solver.solve(&format!("{} mol CO2 ning n.sh. dagi hajmi", moles));
            assert_eq!(report.problem_type, ProblemType::GasVolume);
            let volume = moles * 22.4;
            assert_eq!(report.solution.answer, format!("V(CO2) = {:.3} L", volume));

            let back = solver.solve(&format!("{} l CO2 necha mol?", volume));
            assert_eq!(back.problem_type, ProblemType::MoleCalculation);
            assert_eq!(back.solution.answer, format!("n(CO2) = {:.4} mol", moles));
        }
    }

    /// lg of a printed concentration like "3.16 × 10⁻²" or "10⁻⁷"
    fn lg_of_printed(value: &str) -> f64 {
        let (mantissa, power) = match value.split_once(" × ") {
            Some((mantissa, power)) => (mantissa.parse::<f64>().unwrap(), power),
            None => (1.0, value),
        };
        let exponent: String = power
            .strip_prefix("10")
            .unwrap()
            .chars()
            .map(|c| match "⁰¹²³⁴⁵⁶⁷⁸⁹".chars().position(|s| s == c) {
                Some(digit) => char::from(b'0' + digit as u8),
                None => '-',
            })
            .collect();
        mantissa.log10() + exponent.parse::<f64>().unwrap()
    }

    #[test]
    fn test_ph_round_trip() {
        let solver = ChemistrySolver::new();
        for ph in [1.5, 2.5, 3.0, 7.0, 9.25, 12.8] {
            let report = solver.solve(&format!("pH = {} bo'lsa [H+] necha?", ph));
            assert_eq!(report.problem_type, ProblemType::PhCalculation);
            let answer = report.solution.answer.as_str();
            let (h, oh) = answer
                .strip_prefix("[H⁺] = ")
                .and_then(|rest| rest.strip_suffix(" mol/L"))
                .and_then(|rest| rest.split_once(" mol/L, [OH⁻] = "))
                .unwrap();
            let recovered_ph = -lg_of_printed(h);
            let recovered_poh = -lg_of_printed(oh);
            assert_relative_eq!(recovered_ph, ph, epsilon = 0.01);
            assert_relative_eq!(recovered_ph + recovered_poh, 14.0, epsilon = 0.01);
            assert!(report.solution.solution.contains(&format!("= {:.2}", 14.0 - ph)));
        }

        let report = solver.solve("pH = 3 bo'lsa [H+] necha?");
        assert!(report.solution.answer.starts_with("[H⁺] = 10⁻³"));
        let back = solver.solve("0.001 mol/l HCl eritmasining pH qiymati");
        assert_eq!(back.problem_type, ProblemType::PhCalculation);
        assert_eq!(back.solution.answer, "pH = 3.00, pOH = 11.00");
    }

    #[test]
    fn test_reaction_questions_through_pipeline() {
        let solver = ChemistrySolver::new();
        let report = solver.solve("H2 + O2 = H2O tenglamani tenglashtiring");
        assert_eq!(report.problem_type, ProblemType::ReactionBalance);
        assert!(report.solution.answer.contains("2H₂ + O₂ → 2H₂O"));

        let report = solver.solve("10 g CaCO3 parchalanganda necha g CaO hosil bo'ladi? massasini toping");
        assert_eq!(report.problem_type, ProblemType::MassCalculation);
        assert!(report.solution.note.unwrap().contains("1:1"));

        // an amount in mol is used as it is, not divided by the molar mass
        let report = solver.solve("0.5 mol Zn reaksiyaga kirishganda necha g ZnCl2 hosil bo'ladi?");
        assert_eq!(report.problem_type, ProblemType::MassCalculation);
        assert_eq!(report.solution.answer, "m(ZnCl2) ≈ 68.140 g");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = ChemistrySolver::new().solve("H2O molyar massasini hisoblang");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["problem_type"], "molar_mass");
        assert_eq!(json["tokens"]["formulas"][0], "H2O");
        assert_eq!(json["solution"]["answer"], "M(H2O) = 18.02 g/mol");
        assert!(json["solution"]["note"].is_string());
        assert_eq!(json["formatted"], report.formatted.as_str());
    }

    #[test]
    fn test_solve_all_keeps_order() {
        let reports = ChemistrySolver::new().solve_all(SCENARIOS);
        let types: Vec<ProblemType> = reports.iter().map(|r| r.problem_type).collect();
        assert_eq!(
            types,
            vec![
                ProblemType::MolarMass,
                ProblemType::MoleCalculation,
                ProblemType::PhCalculation,
                ProblemType::Density,
                ProblemType::General,
            ]
        );
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let expected: Vec<String> = SCENARIOS.iter().map(|q| solve_chemistry_problem(q)).collect();
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| SCENARIOS.iter().map(|q| solve_chemistry_problem(q)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
