//! Terminal tables for the CLI: molar mass breakdowns, element data and solve reports
use crate::Chemistry::elements::{Element, lookup};
use crate::Chemistry::molmass::MolarMassResult;
use crate::Solver::solver_api::SolveReport;
use prettytable::{Table, row};

/// One row per element: count, atomic mass and contribution to the molar mass
pub fn molar_mass_table(result: &MolarMassResult) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Element", "Soni", "Ar", "Hissa, g/mol"]);
    for (symbol, count) in result.composition.entries() {
        let Some(element) = lookup(symbol) else {
            continue;
        };
        table.add_row(row![
            format!("{} ({})", element.symbol, element.name),
            count,
            format!("{:.3}", element.atomic_mass),
            format!("{:.3}", element.atomic_mass * *count as f64)
        ]);
    }
    table.add_row(row![
        format!("M({})", result.formula),
        "",
        "",
        format!("{:.2}", result.molar_mass)
    ]);
    table
}

pub fn element_table(elements: &[&Element]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Belgi", "Nomi", "Z", "Ar"]);
    for element in elements {
        table.add_row(row![
            element.symbol,
            element.name,
            element.atomic_number,
            element.atomic_mass
        ]);
    }
    table
}

/// Question metadata: detected problem type and extracted tokens
pub fn report_table(report: &SolveReport) -> Table {
    let numbers = report
        .tokens
        .numbers
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let mut table = Table::new();
    table.add_row(row!["Savol", report.question]);
    table.add_row(row!["Masala turi", report.problem_type.as_str()]);
    table.add_row(row!["Sonlar", format!("[{}]", numbers)]);
    table.add_row(row!["Formulalar", format!("[{}]", report.tokens.formulas.join(", "))]);
    table
}

pub fn print_report(report: &SolveReport, show_tokens: bool) {
    if show_tokens {
        report_table(report).printstd();
    }
    println!("{}", report.formatted);
}
