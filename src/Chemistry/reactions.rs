/// Canned reactions used as worked examples: balanced equations with their
/// reaction type. The table is read-only reference data; the solver never
/// balances equations itself.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReactionType {
    Combination,
    Decomposition,
    SingleReplacement,
    DoubleReplacement,
    Combustion,
    Neutralization,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Combination => "birikish",
            ReactionType::Decomposition => "parchalanish",
            ReactionType::SingleReplacement => "o'rin olish",
            ReactionType::DoubleReplacement => "almashinish",
            ReactionType::Combustion => "yonish",
            ReactionType::Neutralization => "neytrallanish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannedReaction {
    pub reactants: &'static [&'static str],
    pub products: &'static [&'static str],
    pub equation: &'static str,
    pub reaction_type: ReactionType,
}

impl CannedReaction {
    pub fn involves(&self, formula: &str) -> bool {
        self.reactants.contains(&formula) || self.products.contains(&formula)
    }
}

const REACTIONS: &[CannedReaction] = &[
    CannedReaction {
        reactants: &["H2", "O2"],
        products: &["H2O"],
        equation: "2H₂ + O₂ → 2H₂O",
        reaction_type: ReactionType::Combination,
    },
    CannedReaction {
        reactants: &["CaCO3"],
        products: &["CaO", "CO2"],
        equation: "CaCO₃ → CaO + CO₂↑",
        reaction_type: ReactionType::Decomposition,
    },
    CannedReaction {
        reactants: &["Zn", "HCl"],
        products: &["ZnCl2", "H2"],
        equation: "Zn + 2HCl → ZnCl₂ + H₂↑",
        reaction_type: ReactionType::SingleReplacement,
    },
    CannedReaction {
        reactants: &["Fe", "CuSO4"],
        products: &["FeSO4", "Cu"],
        equation: "Fe + CuSO₄ → FeSO₄ + Cu",
        reaction_type: ReactionType::SingleReplacement,
    },
    CannedReaction {
        reactants: &["AgNO3", "NaCl"],
        products: &["AgCl", "NaNO3"],
        equation: "AgNO₃ + NaCl → AgCl↓ + NaNO₃",
        reaction_type: ReactionType::DoubleReplacement,
    },
    CannedReaction {
        reactants: &["CH4", "O2"],
        products: &["CO2", "H2O"],
        equation: "CH₄ + 2O₂ → CO₂ + 2H₂O",
        reaction_type: ReactionType::Combustion,
    },
    CannedReaction {
        reactants: &["C2H5OH", "O2"],
        products: &["CO2", "H2O"],
        equation: "C₂H₅OH + 3O₂ → 2CO₂ + 3H₂O",
        reaction_type: ReactionType::Combustion,
    },
    CannedReaction {
        reactants: &["HCl", "NaOH"],
        products: &["NaCl", "H2O"],
        equation: "HCl + NaOH → NaCl + H₂O",
        reaction_type: ReactionType::Neutralization,
    },
    CannedReaction {
        reactants: &["H2SO4", "NaOH"],
        products: &["Na2SO4", "H2O"],
        equation: "H₂SO₄ + 2NaOH → Na₂SO₄ + 2H₂O",
        reaction_type: ReactionType::Neutralization,
    },
    CannedReaction {
        reactants: &["N2", "H2"],
        products: &["NH3"],
        equation: "N₂ + 3H₂ → 2NH₃",
        reaction_type: ReactionType::Combination,
    },
    CannedReaction {
        reactants: &["Mg", "O2"],
        products: &["MgO"],
        equation: "2Mg + O₂ → 2MgO",
        reaction_type: ReactionType::Combination,
    },
    CannedReaction {
        reactants: &["H2O2"],
        products: &["H2O", "O2"],
        equation: "2H₂O₂ → 2H₂O + O₂↑",
        reaction_type: ReactionType::Decomposition,
    },
    CannedReaction {
        reactants: &["Na", "H2O"],
        products: &["NaOH", "H2"],
        equation: "2Na + 2H₂O → 2NaOH + H₂↑",
        reaction_type: ReactionType::SingleReplacement,
    },
    CannedReaction {
        reactants: &["Al", "HCl"],
        products: &["AlCl3", "H2"],
        equation: "2Al + 6HCl → 2AlCl₃ + 3H₂↑",
        reaction_type: ReactionType::SingleReplacement,
    },
];

/// One representative reaction per type, in table order
pub fn examples_by_type() -> Vec<&'static CannedReaction> {
    let mut examples: Vec<&'static CannedReaction> = Vec::new();
    for reaction in REACTIONS {
        if !examples
            .iter()
            .any(|r| r.reaction_type == reaction.reaction_type)
        {
            examples.push(reaction);
        }
    }
    examples
}

/// Reactions in which every given formula takes part. An empty query finds nothing.
pub fn find_involving(formulas: &[String]) -> Vec<&'static CannedReaction> {
    if formulas.is_empty() {
        return Vec::new();
    }
    REACTIONS
        .iter()
        .filter(|r| formulas.iter().all(|f| r.involves(f)))
        .collect()
}
