/// The structured answer every calculator returns and its text rendering.
/// Sections always come in the same order: Given, Find, Solution, Answer and,
/// when present, Note.
use serde::Serialize;
use std::fmt;

pub const GIVEN_LABEL: &str = "Berilgan:";
pub const FIND_LABEL: &str = "Topish kerak:";
pub const SOLUTION_LABEL: &str = "Yechim:";
pub const ANSWER_LABEL: &str = "Javob:";
pub const NOTE_LABEL: &str = "Eslatma:";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemistrySolution {
    pub given: String,
    pub find: String,
    /// may span several lines with numbered steps
    pub solution: String,
    pub answer: String,
    pub note: Option<String>,
}

impl ChemistrySolution {
    pub fn new(
        given: impl Into<String>,
        find: impl Into<String>,
        solution: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            given: given.into(),
            find: find.into(),
            solution: solution.into(),
            answer: answer.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Renders the labelled sections into one text block
    pub fn format(&self) -> String {
        let mut sections = vec![
            format!("{}\n{}", GIVEN_LABEL, self.given),
            format!("{}\n{}", FIND_LABEL, self.find),
            format!("{}\n{}", SOLUTION_LABEL, self.solution),
            format!("{}\n{}", ANSWER_LABEL, self.answer),
        ];
        if let Some(note) = &self.note {
            sections.push(format!("{}\n{}", NOTE_LABEL, note));
        }
        sections.join("\n\n")
    }
}

impl fmt::Display for ChemistrySolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Joins solution steps as a numbered list: "1) ...", "2) ..."
pub fn numbered_steps<S: AsRef<str>>(steps: &[S]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}) {}", i + 1, step.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_note() {
        let solution = ChemistrySolution::new("m = 10 g", "n - ?", "n = m / M", "n = 1 mol");
        assert_eq!(
            solution.format(),
            "Berilgan:\nm = 10 g\n\nTopish kerak:\nn - ?\n\nYechim:\nn = m / M\n\nJavob:\nn = 1 mol"
        );
        assert!(!solution.format().contains(NOTE_LABEL));
    }

    #[test]
    fn test_format_with_note_keeps_order() {
        let text = ChemistrySolution::new("a", "b", "c", "d")
            .with_note("e")
            .format();
        let positions: Vec<usize> = [GIVEN_LABEL, FIND_LABEL, SOLUTION_LABEL, ANSWER_LABEL, NOTE_LABEL]
            .iter()
            .map(|label| text.find(label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("Eslatma:\ne"));
    }

    #[test]
    fn test_display_matches_format() {
        let solution = ChemistrySolution::new("a", "b", "c", "d").with_note("e");
        assert_eq!(solution.to_string(), solution.format());
    }

    #[test]
    fn test_numbered_steps() {
        assert_eq!(numbered_steps(&["a", "b"]), "1) a\n2) b");
        assert_eq!(numbered_steps::<&str>(&[]), "");
    }
}
