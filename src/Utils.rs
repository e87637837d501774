/// simplelog setup driven by the settings file
pub mod logger;
/// prettytable rendering for the terminal
/// # Examples
/// ```
/// use ChemSolver::Chemistry::molmass::calculate_molar_mass;
/// use ChemSolver::Utils::pretty_print::molar_mass_table;
/// let table = molar_mass_table(&calculate_molar_mass("CaCO3"));
/// assert!(table.to_string().contains("100.09"));
/// ```
pub mod pretty_print;
