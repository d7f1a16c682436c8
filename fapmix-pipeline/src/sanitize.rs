//! Filesystem-safe tokens from arbitrary text.

/// Length cap for run identifiers.
pub const IDENTIFIER_MAX_LEN: usize = 50;

/// Length cap for transcript-derived file names.
pub const FILE_NAME_MAX_LEN: usize = 128;

/// Replace every character outside `[A-Za-z0-9_]` with `_` and keep at most
/// `max_len` characters.
///
/// ```
/// use fapmix_pipeline::sanitize::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Hello, World!", 50), "Hello__World_");
/// ```
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(max_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_punctuation_and_spaces() {
        assert_eq!(sanitize_filename("Hello, World!", 50), "Hello__World_");
        assert_eq!(sanitize_filename("/tmp/out dir", 50), "_tmp_out_dir");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(sanitize_filename("take_2_final", 50), "take_2_final");
    }

    #[test]
    fn truncates_to_max_len() {
        assert_eq!(sanitize_filename("abcdefgh", 3), "abc");
        assert_eq!(sanitize_filename("abc", 0), "");
    }

    #[test]
    fn non_ascii_becomes_one_underscore_each() {
        let out = sanitize_filename("café über 日本", 128);

        assert_eq!(out, "caf___ber___");
        assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn output_charset_and_length_hold() {
        let inputs = ["", "a b\tc\n", "!!!", "ÅÄÖ-123", "x".repeat(300).as_str(), "😀 emoji"]
            .map(str::to_string);

        for input in &inputs {
            for max in [0, 1, 5, 50, 128] {
                let out = sanitize_filename(input, max);
                assert!(out.len() <= max, "{input:?} -> {out:?}");
                assert!(out.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
            }
        }
    }
}
