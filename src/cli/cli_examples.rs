use super::cli_main::{get_user_input, print_solution, prompt};
use crate::Solver::solver_api::ChemistrySolver;
use crate::settings::Settings;
use std::io;

/// Built-in questions, one or more per problem type
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "H2SO4 molyar massasini hisoblang",
    "18 g suv necha mol?",
    "3,01 × 10²³ ta CO2 molekulasi necha mol?",
    "0.5 mol H2SO4 massasini toping",
    "10 g CaCO3 parchalanganda necha g CaO hosil bo'ladi?",
    "0.5 mol NaCl 2 l eritmada. Molyar konsentratsiyani toping",
    "pH = 3 bo'lsa [H+] necha?",
    "0.01 mol/l HCl eritmasining pH qiymati",
    "2 mol CO2 ning n.sh. dagi hajmi",
    "CuSO4 eritmasi elektroliz qilinganda 2 A tok 965 s o'tdi",
    "20 g tuz 80 g eritmada, foizini toping",
    "H2 + O2 = H2O tenglamani tenglashtiring",
    "50 g va 25 ml zichligi",
    "Temir haqida ma'lumot bering",
];

pub fn examples_menu(solver: &ChemistrySolver, settings: &Settings) -> io::Result<()> {
    loop {
        println!("\n=== Namunaviy masalalar ===");
        for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
            println!("{}. {}", i + 1, question);
        }
        println!("a. Hammasini yechish");
        println!("0. Asosiy menyuga qaytish");
        prompt("Tanlovingizni kiriting: ")?;

        let choice = get_user_input()?;
        match choice.trim() {
            "0" => break,
            "a" => {
                for question in EXAMPLE_QUESTIONS {
                    run_example(solver, question, settings);
                }
            }
            other => match other.parse::<usize>() {
                Ok(n) if (1..=EXAMPLE_QUESTIONS.len()).contains(&n) => {
                    run_example(solver, EXAMPLE_QUESTIONS[n - 1], settings)
                }
                _ => println!("Noto'g'ri tanlov. Qaytadan urinib ko'ring."),
            },
        }
    }
    Ok(())
}

fn run_example(solver: &ChemistrySolver, question: &str, settings: &Settings) {
    println!("\n>>> {}\n", question);
    print_solution(solver, question, settings);
}
