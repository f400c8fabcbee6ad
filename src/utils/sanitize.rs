//! Filename sanitization for downloaded documents.

/// Maximum filename length before truncation kicks in.
const MAX_FILENAME_LEN: usize = 150;

/// Clean a title so it can be used as a filename.
///
/// Keeps only alphanumeric characters plus space, hyphen, underscore and
/// period, collapses whitespace runs into single spaces, and truncates
/// anything longer than 150 characters to 147 characters plus `"..."`.
///
/// The empty string maps to the empty string, and the function is idempotent.
pub fn sanitize_filename(title: &str) -> String {
    let filtered: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > MAX_FILENAME_LEN {
        let mut truncated: String = collapsed.chars().take(MAX_FILENAME_LEN - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_disallowed_characters() {
        assert_eq!(
            sanitize_filename("Graph Theory: A Survey (2nd ed.)"),
            "Graph Theory A Survey 2nd ed."
        );
        assert_eq!(sanitize_filename("a/b\\c*d?e"), "abcde");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize_filename("  too   many\t spaces \n"), "too many spaces");
    }

    #[test]
    fn test_allowed_characters_survive() {
        assert_eq!(sanitize_filename("keep-this_name.v2"), "keep-this_name.v2");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("???!!!"), "");
    }

    #[test]
    fn test_truncates_long_titles() {
        let long = "x".repeat(300);
        let out = sanitize_filename(&long);
        assert_eq!(out.chars().count(), 150);
        assert!(out.ends_with("..."));

        // Exactly at the limit: no truncation marker
        let exact = "y".repeat(150);
        assert_eq!(sanitize_filename(&exact), exact);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "A Normal Title",
            "  odd /\\ chars *** everywhere  ",
            &"very long title ".repeat(40),
            "",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn test_only_allowed_classes_in_output() {
        let out = sanitize_filename("Weird <chars> & ünïcode — ok?");
        assert!(out
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')));
    }
}
