/// Static lookup of common compounds: formula, everyday Uzbek names and
/// compound class. Used to resolve substance names written in words
/// ("18 g suv") and by the general fallback.
use crate::Chemistry::elements::normalize_apostrophes;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompoundClass {
    Oxide,
    Acid,
    Base,
    Salt,
    Organic,
    SimpleSubstance,
    Other,
}

impl CompoundClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundClass::Oxide => "oksid",
            CompoundClass::Acid => "kislota",
            CompoundClass::Base => "asos",
            CompoundClass::Salt => "tuz",
            CompoundClass::Organic => "organik modda",
            CompoundClass::SimpleSubstance => "oddiy modda",
            CompoundClass::Other => "boshqa birikma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compound {
    pub formula: &'static str,
    /// lower-case names, the first one is the display name
    pub names: &'static [&'static str],
    pub class: CompoundClass,
}

impl Compound {
    pub fn display_name(&self) -> &'static str {
        self.names.first().copied().unwrap_or(self.formula)
    }
}

const COMPOUNDS: &[Compound] = &[
    Compound { formula: "H2O", names: &["suv"], class: CompoundClass::Oxide },
    Compound { formula: "CO2", names: &["karbonat angidrid", "uglerod(iv) oksid"], class: CompoundClass::Oxide },
    Compound { formula: "CO", names: &["is gazi", "uglerod(ii) oksid"], class: CompoundClass::Oxide },
    Compound { formula: "NaCl", names: &["osh tuzi", "natriy xlorid"], class: CompoundClass::Salt },
    Compound { formula: "H2SO4", names: &["sulfat kislota"], class: CompoundClass::Acid },
    Compound { formula: "HCl", names: &["xlorid kislota", "vodorod xlorid"], class: CompoundClass::Acid },
    Compound { formula: "HNO3", names: &["nitrat kislota"], class: CompoundClass::Acid },
    Compound { formula: "H3PO4", names: &["fosfat kislota", "ortofosfat kislota"], class: CompoundClass::Acid },
    Compound { formula: "CH3COOH", names: &["sirka kislota"], class: CompoundClass::Organic },
    Compound { formula: "NaOH", names: &["natriy gidroksid", "o'yuvchi natriy"], class: CompoundClass::Base },
    Compound { formula: "KOH", names: &["kaliy gidroksid", "o'yuvchi kaliy"], class: CompoundClass::Base },
    Compound { formula: "Ca(OH)2", names: &["kalsiy gidroksid", "so'ndirilgan ohak"], class: CompoundClass::Base },
    Compound { formula: "CaO", names: &["kalsiy oksid", "so'ndirilmagan ohak"], class: CompoundClass::Oxide },
    Compound { formula: "CaCO3", names: &["kalsiy karbonat", "ohaktosh", "bo'r"], class: CompoundClass::Salt },
    Compound { formula: "NH3", names: &["ammiak"], class: CompoundClass::Other },
    Compound { formula: "CH4", names: &["metan"], class: CompoundClass::Organic },
    Compound { formula: "C2H6", names: &["etan"], class: CompoundClass::Organic },
    Compound { formula: "C2H4", names: &["etilen"], class: CompoundClass::Organic },
    Compound { formula: "C2H2", names: &["atsetilen"], class: CompoundClass::Organic },
    Compound { formula: "C2H5OH", names: &["etil spirt", "etanol"], class: CompoundClass::Organic },
    Compound { formula: "C6H12O6", names: &["glyukoza"], class: CompoundClass::Organic },
    Compound { formula: "C12H22O11", names: &["saxaroza", "shakar"], class: CompoundClass::Organic },
    Compound { formula: "H2O2", names: &["vodorod peroksid"], class: CompoundClass::Other },
    Compound { formula: "Fe2O3", names: &["temir(iii) oksid", "temir oksid"], class: CompoundClass::Oxide },
    Compound { formula: "CuSO4", names: &["mis sulfat", "mis(ii) sulfat"], class: CompoundClass::Salt },
    Compound { formula: "KMnO4", names: &["kaliy permanganat"], class: CompoundClass::Salt },
    Compound { formula: "AgNO3", names: &["kumush nitrat"], class: CompoundClass::Salt },
    Compound { formula: "SO2", names: &["oltingugurt(iv) oksid", "sulfit angidrid"], class: CompoundClass::Oxide },
    Compound { formula: "O2", names: &["kislorod gazi"], class: CompoundClass::SimpleSubstance },
    Compound { formula: "H2", names: &["vodorod gazi"], class: CompoundClass::SimpleSubstance },
    Compound { formula: "N2", names: &["azot gazi"], class: CompoundClass::SimpleSubstance },
    Compound { formula: "Cl2", names: &["xlor gazi"], class: CompoundClass::SimpleSubstance },
];

pub fn find_by_formula(formula: &str) -> Option<&'static Compound> {
    COMPOUNDS.iter().find(|c| c.formula == formula)
}

/// Compounds whose names occur in the text, ordered by position of the first
/// occurrence. Overlapping matches are resolved in favour of the longer name.
pub fn mentioned_in_text(text: &str) -> Vec<&'static Compound> {
    let text = normalize_apostrophes(text).to_lowercase();
    let mut hits: Vec<(usize, usize, &'static Compound)> = Vec::new();
    for compound in COMPOUNDS {
        for name in compound.names {
            for (position, _) in text.match_indices(name) {
                if !starts_at_word_boundary(&text, position) {
                    continue;
                }
                hits.push((position, name.len(), compound));
            }
        }
    }
    // earliest first, on ties the longest name
    hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    let mut found: Vec<&'static Compound> = Vec::new();
    let mut covered_until = 0;
    for (position, length, compound) in hits {
        if position < covered_until {
            continue;
        }
        covered_until = position + length;
        if !found.iter().any(|c| c.formula == compound.formula) {
            found.push(compound);
        }
    }
    found
}

fn starts_at_word_boundary(text: &str, position: usize) -> bool {
    text[..position]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}
