/// Entry point of the engine: question text in, formatted solution out.
///
/// The pipeline is extract tokens -> classify -> run the calculator of the class ->
/// format. It never fails: a calculator error or panic is replaced by the general
/// solution for the same question.
use crate::Solver::calculators::reference::general_solution;
use crate::Solver::calculators::{ProblemCalculator, create_calculator};
use crate::Solver::classifier::{ProblemType, classify};
use crate::Solver::solution::ChemistrySolution;
use crate::Solver::tokens::ExtractedTokens;
use log::{error, info, warn};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// Everything known about one solved question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub question: String,
    pub problem_type: ProblemType,
    pub tokens: ExtractedTokens,
    pub solution: ChemistrySolution,
    pub formatted: String,
}

impl SolveReport {
    fn new(
        question: &str,
        problem_type: ProblemType,
        tokens: ExtractedTokens,
        solution: ChemistrySolution,
    ) -> Self {
        let formatted = solution.format();
        Self {
            question: question.to_string(),
            problem_type,
            tokens,
            solution,
            formatted,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChemistrySolver {}

impl ChemistrySolver {
    pub fn new() -> Self {
        Self {}
    }

    /// Solves one question. Always returns a report, whatever the input.
    pub fn solve(&self, question: &str) -> SolveReport {
        match panic::catch_unwind(AssertUnwindSafe(|| Self::run_pipeline(question))) {
            Ok(report) => report,
            Err(_) => {
                error!("solver panicked on question {:?}, using general solution", question);
                let tokens = ExtractedTokens::default();
                let solution = general_solution(question, &tokens);
                SolveReport::new(question, ProblemType::General, tokens, solution)
            }
        }
    }

    pub fn solve_all(&self, questions: &[&str]) -> Vec<SolveReport> {
        questions.iter().map(|q| self.solve(q)).collect()
    }

    fn run_pipeline(question: &str) -> SolveReport {
        let tokens = ExtractedTokens::from_question(question);
        let problem_type = classify(question);
        let calculator = create_calculator(problem_type);
        info!("dispatching to {} calculator", problem_type);
        match calculator.compute(question, &tokens) {
            Ok(solution) => SolveReport::new(question, problem_type, tokens, solution),
            Err(err) => {
                warn!("{} calculator failed: {}, using general solution", problem_type, err);
                let solution = general_solution(question, &tokens);
                SolveReport::new(question, problem_type, tokens, solution)
            }
        }
    }
}

/// Solves a free-text chemistry question and returns the formatted solution
/// with the sections "Berilgan:", "Topish kerak:", "Yechim:", "Javob:" and,
/// when there is something to add, "Eslatma:".
pub fn solve_chemistry_problem(question: &str) -> String {
    ChemistrySolver::new().solve(question).formatted
}
