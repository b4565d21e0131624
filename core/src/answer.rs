use alloc::string::String;

/// Canonical form every free-text answer is compared in.
pub fn normalize_answer(input: &str) -> String {
    input.trim().to_lowercase()
}

/// `true` when `input` equals `expected` or any of `alternates`, all normalized.
pub fn answer_matches(input: &str, expected: Option<&str>, alternates: &[String]) -> bool {
    let input = normalize_answer(input);
    expected.is_some_and(|expected| normalize_answer(expected) == input)
        || alternates
            .iter()
            .any(|alternate| normalize_answer(alternate) == input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn surrounding_space_and_case_are_ignored() {
        assert!(answer_matches(" Blue ", Some("blue"), &[]));
        assert!(answer_matches("BLUE", Some("blue"), &[]));
        assert!(!answer_matches("blu", Some("blue"), &[]));
    }

    #[test]
    fn expected_answer_is_normalized_too() {
        assert!(answer_matches("blue", Some("  BLUE"), &[]));
    }

    #[test]
    fn alternates_are_accepted() {
        let alternates = vec!["Navy".to_string(), " cyan ".to_string()];

        assert!(answer_matches("navy", Some("blue"), &alternates));
        assert!(answer_matches("CYAN", Some("blue"), &alternates));
        assert!(!answer_matches("teal", Some("blue"), &alternates));
    }

    #[test]
    fn missing_code_answer_only_accepts_alternates() {
        let alternates = vec!["door".to_string()];

        assert!(!answer_matches("", None, &[]));
        assert!(answer_matches("Door", None, &alternates));
    }
}
