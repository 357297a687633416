/// Longest slug a role bead prefix may carry
pub const MAX_SLUG_LEN: usize = 30;

/// Lowercase, hyphen-separated slug of `input`, cut back to a word boundary
/// when longer than [`MAX_SLUG_LEN`] characters.
pub fn slugify(input: &str) -> String {
    let joined = input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    let mut out = String::with_capacity(joined.len());
    let mut last_hyphen = false;
    for c in joined.chars() {
        if c == '-' {
            if !last_hyphen {
                out.push('-');
                last_hyphen = true;
            }
        } else if c.is_alphanumeric() {
            out.push(c);
            last_hyphen = false;
        }
    }

    let slug = out.trim_matches('-');
    let chars: Vec<char> = slug.chars().collect();
    if chars.len() <= MAX_SLUG_LEN {
        return slug.to_string();
    }

    let head: String = chars[..MAX_SLUG_LEN].iter().collect();
    if chars[MAX_SLUG_LEN] == '-' {
        return head;
    }

    match head.rfind('-') {
        Some(cut) if cut > 0 => head[..cut].trim_matches('-').to_string(),
        // a single word longer than the limit gets a hard cut
        _ => head.trim_matches('-').to_string(),
    }
}

/// `{type prefix}-{slug of the role title}`
pub fn role_bead_prefix(type_prefix: &str, role_title: &str) -> String {
    format!("{}-{}", type_prefix.trim(), slugify(role_title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_truncates_at_word_boundary() {
        let slug = slugify("Senior Specialist for Ultra Complex Cross Functional Investigations");
        assert_eq!(slug, "senior-specialist-for-ultra");
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_short_titles_untouched() {
        assert_eq!(slugify("Senior performance specialist"), "senior-performance-specialist");
        assert_eq!(
            slugify("Staff application security engineer"),
            "staff-application-security"
        );
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify(" !!! ??? "), "");
    }

    #[test]
    fn test_slugify_drops_punctuation_and_collapses_hyphens() {
        assert_eq!(slugify("  Cross-browser -- QA / Lead "), "cross-browser-qa-lead");
        assert_eq!(slugify("C++ expert"), "c-expert");
    }

    #[test]
    fn test_slugify_keeps_exact_boundary() {
        // 30 characters followed by a word break: nothing to cut back
        let slug = slugify("abcdefghij abcdefghij abcdefgh more");
        assert_eq!(slug, "abcdefghij-abcdefghij-abcdefgh");
    }

    #[test]
    fn test_slugify_single_long_word_hard_cut() {
        let slug = slugify(&"x".repeat(45));
        assert_eq!(slug, "x".repeat(MAX_SLUG_LEN));
    }

    #[test]
    fn test_role_bead_prefix() {
        assert_eq!(
            role_bead_prefix("perf", "Staff performance engineer"),
            "perf-staff-performance-engineer"
        );
    }
}
