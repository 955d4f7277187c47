pub const HACKER_NEWS_HEADER: &str = "--- HACKER NEWS ---";
pub const GITHUB_HEADER: &str = "--- GITHUB TRENDING ---";

/// Join the two source sections into the raw digest handed to the model.
pub fn assemble(hacker_news: &str, github: &str) -> String {
    format!(
        "{}\n{}\n\n{}\n{}",
        HACKER_NEWS_HEADER, hacker_news, GITHUB_HEADER, github
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_both_sections() {
        assert_eq!(
            assemble("A", "B"),
            "--- HACKER NEWS ---\nA\n\n--- GITHUB TRENDING ---\nB"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(assemble("A", "B"), assemble("A", "B"));
    }

    #[test]
    fn keeps_empty_sections() {
        let digest = assemble("", "");
        assert!(digest.contains(HACKER_NEWS_HEADER));
        assert!(digest.contains(GITHUB_HEADER));
    }
}
