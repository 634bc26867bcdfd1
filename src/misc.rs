fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
pub fn extract_prefix_token(src: &str) -> &str {
    match src.find(<char>::is_whitespace) {
        Some(i) => &src[..i],
        None => src,
    }
}
#[cfg(test)]
mod test {
    use crate::misc::{extract_prefix_token, strip_prefix_token};

    #[test]
    fn tokens() {
        assert_eq!(strip_prefix_token("level  4", "level"), Some("4"));
        assert_eq!(strip_prefix_token("levels 4", "level"), None);
        assert_eq!(strip_prefix_token("import", "import"), Some(""));
        assert_eq!(extract_prefix_token("moves please"), "moves");
        assert_eq!(extract_prefix_token("fen"), "fen");
    }
}
