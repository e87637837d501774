/// Element table: symbols, atomic numbers, atomic masses and Uzbek display names
/// of the elements the solver works with. The table is static, the symbol index
/// is built once on first access.
use std::collections::HashMap;
use std::sync::LazyLock;

/// a chemical element record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_number: u8,
    pub atomic_mass: f64,
}

macro_rules! element {
    ($symbol:expr, $name:expr, $number:expr, $mass:expr) => {
        Element {
            symbol: $symbol,
            name: $name,
            atomic_number: $number,
            atomic_mass: $mass,
        }
    };
}

// school-table atomic masses, oxygen is taken as 16.00
const ELEMENTS: &[Element] = &[
    element!("H", "Vodorod", 1, 1.008),
    element!("He", "Geliy", 2, 4.0026),
    element!("Li", "Litiy", 3, 6.94),
    element!("Be", "Berilliy", 4, 9.012),
    element!("B", "Bor", 5, 10.81),
    element!("C", "Uglerod", 6, 12.011),
    element!("N", "Azot", 7, 14.007),
    element!("O", "Kislorod", 8, 16.00),
    element!("F", "Ftor", 9, 18.998),
    element!("Ne", "Neon", 10, 20.18),
    element!("Na", "Natriy", 11, 22.99),
    element!("Mg", "Magniy", 12, 24.305),
    element!("Al", "Alyuminiy", 13, 26.98),
    element!("Si", "Kremniy", 14, 28.085),
    element!("P", "Fosfor", 15, 30.974),
    element!("S", "Oltingugurt", 16, 32.06),
    element!("Cl", "Xlor", 17, 35.45),
    element!("Ar", "Argon", 18, 39.948),
    element!("K", "Kaliy", 19, 39.098),
    element!("Ca", "Kalsiy", 20, 40.078),
    element!("Sc", "Skandiy", 21, 44.956),
    element!("Ti", "Titan", 22, 47.867),
    element!("V", "Vanadiy", 23, 50.942),
    element!("Cr", "Xrom", 24, 51.996),
    element!("Mn", "Marganes", 25, 54.938),
    element!("Fe", "Temir", 26, 55.845),
    element!("Co", "Kobalt", 27, 58.933),
    element!("Ni", "Nikel", 28, 58.693),
    element!("Cu", "Mis", 29, 63.546),
    element!("Zn", "Rux", 30, 65.38),
    element!("Ga", "Galliy", 31, 69.723),
    element!("Ge", "Germaniy", 32, 72.63),
    element!("As", "Mishyak", 33, 74.922),
    element!("Se", "Selen", 34, 78.971),
    element!("Br", "Brom", 35, 79.904),
    element!("Rb", "Rubidiy", 37, 85.468),
    element!("Sr", "Stronsiy", 38, 87.62),
    element!("Mo", "Molibden", 42, 95.95),
    element!("Ag", "Kumush", 47, 107.868),
    element!("Cd", "Kadmiy", 48, 112.414),
    element!("Sn", "Qalay", 50, 118.71),
    element!("Sb", "Surma", 51, 121.76),
    element!("I", "Yod", 53, 126.904),
    element!("Xe", "Ksenon", 54, 131.293),
    element!("Cs", "Seziy", 55, 132.905),
    element!("Ba", "Bariy", 56, 137.327),
    element!("W", "Volfram", 74, 183.84),
    element!("Pt", "Platina", 78, 195.084),
    element!("Au", "Oltin", 79, 196.967),
    element!("Hg", "Simob", 80, 200.59),
    element!("Pb", "Qo'rg'oshin", 82, 207.2),
    element!("Bi", "Vismut", 83, 208.98),
    element!("U", "Uran", 92, 238.029),
];

// names that are also everyday Uzbek words ("bor" = "there is")
const AMBIGUOUS_NAMES: &[&str] = &["bor"];

// case endings an element name may carry inside a sentence
const NAME_SUFFIXES: &[&str] = &["", "ning", "ni", "ga", "da", "dan", "dagi", "li"];

static SYMBOL_INDEX: LazyLock<HashMap<&'static str, &'static Element>> =
    LazyLock::new(|| ELEMENTS.iter().map(|e| (e.symbol, e)).collect());

/// Finds an element by its symbol. A miss is not an error: callers treat an
/// unknown symbol as contributing no mass.
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    SYMBOL_INDEX.get(symbol).copied()
}

pub fn is_known_symbol(symbol: &str) -> bool {
    SYMBOL_INDEX.contains_key(symbol)
}

pub fn all_elements() -> &'static [Element] {
    ELEMENTS
}

/// Unifies the apostrophe variants used in Uzbek Latin script (o‘, oʻ, o’)
pub fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '‘' | '’' | 'ʻ' | 'ʼ' | '`' => '\'',
            other => other,
        })
        .collect()
}

/// Case-insensitive lookup by display name, e.g. "temir" -> Fe
pub fn find_by_name(name: &str) -> Option<&'static Element> {
    let name = normalize_apostrophes(name).to_lowercase();
    ELEMENTS.iter().find(|e| e.name.to_lowercase() == name)
}

/// Looks for the first element mentioned by name in free text. Grammatical case
/// endings are accepted ("temirning", "misdan"), longer words that merely start
/// with a name ("misol") are not.
pub fn mentioned_in_text(text: &str) -> Option<&'static Element> {
    let text = normalize_apostrophes(text).to_lowercase();
    for word in text.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
        if word.is_empty() {
            continue;
        }
        for element in ELEMENTS {
            let name = element.name.to_lowercase();
            if AMBIGUOUS_NAMES.contains(&name.as_str()) {
                continue;
            }
            let Some(rest) = word.strip_prefix(name.as_str()) else {
                continue;
            };
            if NAME_SUFFIXES.contains(&rest) {
                return Some(element);
            }
        }
    }
    None
}
