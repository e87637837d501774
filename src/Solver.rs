/// Problem solving pipeline for free-text chemistry questions written in Uzbek.
///
/// The question is split into tokens (numbers and formulas), classified into a
/// problem type by ordered keyword rules, solved by the calculator of that type
/// and rendered as a solution with the sections Berilgan / Topish kerak / Yechim /
/// Javob / Eslatma.
/// # Examples
/// ```
/// use ChemSolver::Solver::solver_api::solve_chemistry_problem;
/// let text = solve_chemistry_problem("18 g suv necha mol?");
/// assert!(text.contains("n(H2O) = 0.9989 mol"));
/// ```
pub mod solver_api;
/// Numbers, chemical formulas and scientific-notation particle counts found in the question
/// # Examples
/// ```
/// use ChemSolver::Solver::tokens::ExtractedTokens;
/// let tokens = ExtractedTokens::from_question("0,5 mol H2SO4 massasini toping");
/// assert_eq!(tokens.numbers, vec![0.5]);
/// assert_eq!(tokens.formulas, vec!["H2SO4"]);
/// ```
pub mod tokens;
/// Ordered first-match keyword rules mapping a question to a problem type
pub mod classifier;
/// One calculator per problem type behind the `ProblemCalculator` trait
/// # Examples
/// ```
/// use ChemSolver::Solver::calculators::{ProblemCalculator, create_calculator};
/// use ChemSolver::Solver::classifier::ProblemType;
/// use ChemSolver::Solver::tokens::ExtractedTokens;
/// let question = "50 g va 25 ml zichligi";
/// let tokens = ExtractedTokens::from_question(question);
/// let solution = create_calculator(ProblemType::Density).compute(question, &tokens).unwrap();
/// assert_eq!(solution.answer, "ρ = 2.0000 g/mL");
/// ```
pub mod calculators;
pub mod solution;
pub mod solver_error;
/// tests
mod solver_tests;
