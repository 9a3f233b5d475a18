/// Remove every ASCII punctuation character from `text`.
///
/// Case, whitespace and non-ASCII characters pass through untouched.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

    #[test]
    fn test_strips_all_ascii_punctuation() {
        assert_eq!(strip_punctuation(ASCII_PUNCTUATION), "");
        assert_eq!(ASCII_PUNCTUATION.chars().count(), 32);
    }

    #[test]
    fn test_preserves_case_order_and_whitespace() {
        assert_eq!(
            strip_punctuation("Hello, this is the IRS.  You owe\tback taxes!"),
            "Hello this is the IRS  You owe\tback taxes"
        );
    }

    #[test]
    fn test_keeps_non_ascii_characters() {
        // Typographic quotes and dashes are not ASCII punctuation.
        assert_eq!(strip_punctuation("“Ça va?” — très bien!"), "“Ça va” — très bien");
    }

    #[test]
    fn test_idempotent() {
        let once = strip_punctuation("You've won a free cruise!!! Call 1-800-SCAM.");
        assert_eq!(strip_punctuation(&once), once);
        assert_eq!(once, "Youve won a free cruise Call 1800SCAM");
    }

    #[test]
    fn test_only_punctuation_yields_empty() {
        assert_eq!(strip_punctuation("!!!???..."), "");
        assert_eq!(strip_punctuation(""), "");
    }
}
