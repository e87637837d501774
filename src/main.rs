use ChemSolver::ChemistrySolver;
use ChemSolver::Utils::logger::init_logger;
use ChemSolver::cli::cli_main::{print_solution, run_interactive_menu};
use ChemSolver::settings::{DEFAULT_CONFIG_FILE, Settings};
use std::env;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let settings = match Settings::load(DEFAULT_CONFIG_FILE) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}, using default settings", err);
            Settings::default()
        }
    };
    if let Err(err) = init_logger(&settings) {
        eprintln!("{}", err);
    }

    // "ChemSolver 18 g suv necha mol?" solves the question and exits
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        let question = args.join(" ");
        print_solution(&ChemistrySolver::new(), &question, &settings);
        return ExitCode::SUCCESS;
    }

    match run_interactive_menu(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal error: {}", err);
            ExitCode::FAILURE
        }
    }
}
