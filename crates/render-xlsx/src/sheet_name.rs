use std::collections::HashSet;

/// Excel's hard limit on worksheet name length, in characters.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Hands out valid, unique worksheet names for one workbook.
///
/// Excel compares sheet names case-insensitively, so uniqueness is tracked on
/// the lower-cased form.
#[derive(Debug, Default)]
pub struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a usable name for the `position`-th sheet (1-based) derived from `raw`.
    pub fn assign(&mut self, raw: &str, position: usize) -> String {
        let mut base = sanitize(raw);
        if base.is_empty() {
            base = format!("Sheet{}", position);
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate.to_lowercase()) {
            let tail = format!("_{}", suffix);
            let keep = MAX_SHEET_NAME_CHARS - tail.chars().count();
            candidate = format!("{}{}", truncate(&base, keep), tail);
            suffix += 1;
        }

        if candidate != raw {
            log::warn!("Sheet name '{}' adjusted to '{}'", raw, candidate);
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}

/// Replaces characters Excel rejects, trims apostrophes and enforces the length cap.
fn sanitize(raw: &str) -> String {
    let replaced: String = raw.chars().map(|c| if FORBIDDEN.contains(&c) { '_' } else { c }).collect();
    let trimmed = replaced.trim_matches('\'');
    truncate(trimmed, MAX_SHEET_NAME_CHARS).trim_end_matches('\'').to_string()
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_keep_first_31_characters() {
        let mut names = SheetNames::new();
        let raw = "reservations_by_restaurant_and_day_2026";
        assert_eq!(raw.chars().count(), 39);
        assert_eq!(names.assign(raw, 1), "reservations_by_restaurant_and_");
    }

    #[test]
    fn forbidden_characters_are_replaced() {
        let mut names = SheetNames::new();
        assert_eq!(names.assign("sales/2026:q1", 1), "sales_2026_q1");
        assert_eq!(names.assign("'quoted'", 2), "quoted");
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut names = SheetNames::new();
        assert_eq!(names.assign("dishes", 1), "dishes");
        assert_eq!(names.assign("Dishes", 2), "Dishes_2");
        assert_eq!(names.assign("DISHES", 3), "DISHES_3");

        let long = "a".repeat(40);
        assert_eq!(names.assign(&long, 4), "a".repeat(31));
        let second = names.assign(&long, 5);
        assert_eq!(second, format!("{}_2", "a".repeat(29)));
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_CHARS);
    }

    #[test]
    fn blank_names_fall_back_to_position() {
        let mut names = SheetNames::new();
        assert_eq!(names.assign("", 3), "Sheet3");
        assert_eq!(names.assign("''", 4), "Sheet4");
    }
}
