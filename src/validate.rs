//! Scalar validators for input fields

use std::path::Path;

/// Test the input to be an integer (optionally signed).
pub fn is_int(num: &str) -> bool {
    num.trim().parse::<i64>().is_ok()
}

/// Test the input to be an integer of at least 1.
pub fn is_positive_int(num: &str) -> bool {
    num.trim().parse::<i64>().is_ok_and(|n| n >= 1)
}

/// Test the input to be a finite real number. Integers count.
pub fn is_float(num: &str) -> bool {
    parse_float(num).is_some()
}

/// Parse a finite real number, tolerating surrounding whitespace.
pub fn parse_float(num: &str) -> Option<f64> {
    num.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a number wrapped in parentheses and spaces, e.g. a delta label `(-12.5)`.
pub fn clean_float(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '(' | ')') && !c.is_whitespace())
        .collect();
    parse_float(&cleaned)
}

/// Checks that every path names an existing file.
pub fn check_files_exist<P: AsRef<Path>>(paths: &[P]) -> bool {
    paths.iter().all(|p| p.as_ref().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_int_cases() {
        assert!(is_int("1"));
        assert!(is_int("-1"));
        assert!(is_int(" 7 "));
        assert!(!is_int("1.01"));
        assert!(!is_int("one"));
        assert!(!is_int(""));
    }

    #[test]
    fn is_positive_int_cases() {
        assert!(is_positive_int("1"));
        assert!(is_positive_int("12"));
        assert!(!is_positive_int("0"));
        assert!(!is_positive_int("-1"));
        assert!(!is_positive_int("one"));
    }

    #[test]
    fn is_float_cases() {
        assert!(is_float("1.01"));
        assert!(is_float("-1.01"));
        assert!(is_float("1"));
        assert!(is_float(" -100 "));
        assert!(!is_float("one"));
        assert!(!is_float("inf"));
        assert!(!is_float("NaN"));
    }

    #[test]
    fn clean_float_strips_parentheses() {
        assert_eq!(clean_float("(-12.5)"), Some(-12.5));
        assert_eq!(clean_float("( 3.0 )"), Some(3.0));
        assert_eq!(clean_float("\"TS2\""), None);
    }

    #[test]
    fn files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let one = dir.path().join("testfile1");
        let two = dir.path().join("testfile2");
        std::fs::write(&one, "testfile1\n").unwrap();
        std::fs::write(&two, "testfile2\n").unwrap();

        assert!(check_files_exist(&[&one, &two]));
        assert!(!check_files_exist(&[dir.path().join("testfile3")]));
        assert!(!check_files_exist(&[dir.path()]));
    }
}
