use super::cli_examples::examples_menu;
use crate::Chemistry::elements::{find_by_name, lookup};
use crate::Chemistry::molmass::calculate_molar_mass;
use crate::Solver::solver_api::ChemistrySolver;
use crate::Utils::pretty_print::{element_table, molar_mass_table, print_report};
use crate::settings::{OutputFormat, Settings};
use log::info;
use std::io::{self, Write};

pub fn run_interactive_menu(settings: &Settings) -> io::Result<()> {
    let solver = ChemistrySolver::new();
    loop {
        show_main_menu()?;
        let choice = get_user_input()?;

        match choice.trim() {
            "1" => solve_question_menu(&solver, settings)?,
            "2" => molar_mass_menu()?,
            "3" => element_menu()?,
            "4" => examples_menu(&solver, settings)?,
            "0" => {
                println!("Xayr!");
                break;
            }
            _ => println!("Noto'g'ri tanlov. Qaytadan urinib ko'ring."),
        }
    }
    Ok(())
}
/* colors
Blue (\x1b[34m) - header
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Reset (\x1b[0m)
*/
fn show_main_menu() -> io::Result<()> {
    println!("\x1b[34m\n ChemSolver: kimyo masalalarini qadamma-qadam yechish\n\x1b[0m");
    println!("\x1b[33m1. Masalani yechish\x1b[0m");
    println!("\x1b[33m2. Molyar massa jadvali\x1b[0m");
    println!("\x1b[33m3. Element haqida ma'lumot\x1b[0m");
    println!("\x1b[33m4. Namunaviy masalalar\x1b[0m");
    println!("\x1b[33m0. Chiqish\x1b[0m");
    prompt("Tanlovingizni kiriting: ")
}

pub(crate) fn prompt(text: &str) -> io::Result<()> {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush()
}

pub(crate) fn get_user_input() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}

/// Prints one solved question in the configured output format
pub fn print_solution(solver: &ChemistrySolver, question: &str, settings: &Settings) {
    let report = solver.solve(question);
    match settings.output_format {
        OutputFormat::Text => print_report(&report, settings.show_tokens),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            // the report holds only strings and numbers, fall back to text anyway
            Err(_) => print_report(&report, settings.show_tokens),
        },
    }
}

fn solve_question_menu(solver: &ChemistrySolver, settings: &Settings) -> io::Result<()> {
    prompt("Masala matnini kiriting: ")?;
    let question = get_user_input()?;
    info!("question from terminal: {}", question.trim());
    println!();
    print_solution(solver, question.trim(), settings);
    Ok(())
}

fn molar_mass_menu() -> io::Result<()> {
    prompt("Formulani kiriting (masalan CuSO4*5H2O): ")?;
    let formula = get_user_input()?;
    let result = calculate_molar_mass(formula.trim());
    if result.is_empty() {
        println!("Formulada ma'lum element topilmadi.");
    } else {
        molar_mass_table(&result).printstd();
    }
    Ok(())
}

fn element_menu() -> io::Result<()> {
    prompt("Element belgisi yoki nomini kiriting: ")?;
    let input = get_user_input()?;
    let query = input.trim();
    match lookup(query).or_else(|| find_by_name(query)) {
        Some(element) => element_table(&[element]).printstd(),
        None => println!("'{}' elementi topilmadi.", query),
    }
    Ok(())
}
