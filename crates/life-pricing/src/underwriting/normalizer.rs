use super::domain::NONE_LABEL;

/// Collapses missing, blank and `nan`-like categorical values to `"None"`.
pub fn normalize_category(value: Option<&str>) -> String {
    let cleaned = value
        .map(|raw| raw.replace(['\u{feff}', '\u{200b}'], ""))
        .unwrap_or_default();
    let trimmed = cleaned.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "" | "nan" | "none" | "null" | "n/a" => NONE_LABEL.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Number of `;`-separated entries in a condition list; `"None"` counts as zero.
pub fn condition_count(value: &str) -> usize {
    if value.trim() == NONE_LABEL {
        return 0;
    }

    value
        .split(';')
        .filter(|entry| !entry.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_missing_and_nan_like_values() {
        assert_eq!(normalize_category(None), "None");
        assert_eq!(normalize_category(Some("")), "None");
        assert_eq!(normalize_category(Some("  NaN ")), "None");
        assert_eq!(normalize_category(Some("none")), "None");
        assert_eq!(normalize_category(Some("\u{feff}Current")), "Current");
        assert_eq!(normalize_category(Some(" Skydiving ")), "Skydiving");
    }

    #[test]
    fn counts_conditions() {
        assert_eq!(condition_count("None"), 0);
        assert_eq!(condition_count("Diabetes"), 1);
        assert_eq!(condition_count("Diabetes;Hypertension"), 2);
        assert_eq!(condition_count("Asthma; ;Arthritis;"), 2);
    }
}
