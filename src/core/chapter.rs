//! Chapter numbering embedded in story titles.
//!
//! The chapter is simply the first run of ASCII digits in the title. This is
//! a heuristic: digits that belong to something else ("Room 7") are taken
//! for the chapter when they come first.

/// Chapter assumed for titles without any digits.
pub const DEFAULT_CHAPTER: u64 = 1;

/// Return the first run of digits in `title` as a number, or
/// [`DEFAULT_CHAPTER`] when the title has none.
///
/// Runs too long for a `u64` saturate at `u64::MAX`.
pub fn extract_chapter(title: &str) -> u64 {
    match first_digit_run(title) {
        Some(run) => run.parse().unwrap_or(u64::MAX),
        None => DEFAULT_CHAPTER,
    }
}

/// Produce the title of the next chapter.
///
/// The first occurrence of the current chapter's decimal form is replaced by
/// the next number. Titles that do not contain it literally, such as titles
/// without digits, get a fresh `Chapter N: ` prefix instead.
pub fn increment_title(title: &str) -> String {
    let chapter = extract_chapter(title);
    let next = chapter.saturating_add(1);
    let current = chapter.to_string();

    if title.contains(&current) {
        title.replacen(&current, &next.to_string(), 1)
    } else {
        format!("Chapter {}: {}", next, title)
    }
}

fn first_digit_run(title: &str) -> Option<&str> {
    let start = title.find(|c: char| c.is_ascii_digit())?;
    let rest = &title[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_from_chapter_title() {
        assert_eq!(extract_chapter("Chapter 7: The Cave"), 7);
    }

    #[test]
    fn extract_defaults_without_digits() {
        assert_eq!(extract_chapter("The Beginning"), 1);
        assert_eq!(extract_chapter(""), 1);
    }

    #[test]
    fn extract_takes_first_run_only() {
        assert_eq!(extract_chapter("Part 12 of 40"), 12);
        assert_eq!(extract_chapter("abc123def456"), 123);
    }

    #[test]
    fn extract_zero_padded() {
        assert_eq!(extract_chapter("Chapter 007"), 7);
    }

    #[test]
    fn extract_huge_run_saturates() {
        assert_eq!(extract_chapter("Chapter 99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn increment_in_place() {
        assert_eq!(increment_title("Chapter 7: The Cave"), "Chapter 8: The Cave");
        assert_eq!(increment_title("Chapter 9"), "Chapter 10");
    }

    #[test]
    fn increment_adds_prefix_without_digits() {
        assert_eq!(
            increment_title("The Beginning"),
            "Chapter 2: The Beginning"
        );
    }

    #[test]
    fn increment_zero_padded_rewrites_inner_digit() {
        assert_eq!(increment_title("Chapter 07"), "Chapter 08");
        assert_eq!(increment_title("Chapter 09"), "Chapter 010");
    }

    #[test]
    fn increment_rewrites_first_occurrence_only() {
        assert_eq!(
            increment_title("Chapter 2: Room 2"),
            "Chapter 3: Room 2"
        );
    }

    #[test]
    fn increment_known_limitation_with_leading_digits() {
        // Digits that come before the real chapter number win.
        assert_eq!(
            increment_title("Room 7, Chapter 2"),
            "Room 8, Chapter 2"
        );
        // "00" parses as 0, and only the first "0" is rewritten.
        assert_eq!(increment_title("Chapter 00"), "Chapter 10");
        assert_eq!(extract_chapter(&increment_title("Chapter 00")), 10);
    }
}
