/// Element table: symbol, atomic number, atomic mass and Uzbek display name
///
///  # Examples
/// ```
/// use ChemSolver::Chemistry::elements::lookup;
/// let iron = lookup("Fe").unwrap();
/// assert_eq!(iron.name, "Temir");
/// assert!(lookup("Xx").is_none());
/// ```
pub mod elements;
/// common compounds with their everyday Uzbek names ("suv" -> H2O, "osh tuzi" -> NaCl)
pub mod compounds;
/// canned balanced reactions used as worked examples
pub mod reactions;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use ChemSolver::Chemistry::molmass::{calculate_molar_mass, parse_formula};
/// let result = calculate_molar_mass("H2O");
/// assert_eq!(result.molar_mass, 18.02);
/// assert_eq!(result.breakdown[0], "2 × H = 2.016");
/// let composition = parse_formula("Na(NO3)2");
/// assert_eq!(composition.count_of("O"), 6);
/// ```
pub mod molmass;
