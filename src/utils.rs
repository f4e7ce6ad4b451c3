//! Utility functions

use crate::constants::{APP_DIR_NAME, MODEL_FILE_NAME};
use std::path::{Path, PathBuf};

/// Get the app data directory (settings and logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Format dollars with thousands separators and no decimals: `$1,234,568`.
/// Negative values keep the sign after the dollar sign (`$-1,234`).
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && rounded != "0" { "-" } else { "" };
    format!("${}{}", sign, grouped)
}

/// Where to look for the model artifact, most specific first.
///
/// An explicit override is used as-is. Otherwise the fixed relative file name
/// is tried in the working directory, then under `assets/`, then next to the
/// executable.
pub fn model_path_candidates(override_path: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = override_path {
        return vec![path.to_path_buf()];
    }
    let mut candidates = vec![
        PathBuf::from(MODEL_FILE_NAME),
        Path::new("assets").join(MODEL_FILE_NAME),
    ];
    if let Some(dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        candidates.push(dir.join(MODEL_FILE_NAME));
    }
    candidates
}

/// First existing candidate, or the first candidate so the load error names it
pub fn resolve_model_path(override_path: Option<&Path>) -> PathBuf {
    let candidates = model_path_candidates(override_path);
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .unwrap_or_else(|| candidates[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(201_666.666), "$201,667");
        assert_eq!(format_currency(1_234_567.4), "$1,234,567");
        assert_eq!(format_currency(500_001.0), "$500,001");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(99_999.5), "$100,000");
        assert_eq!(format_currency(12.49), "$12");
    }

    #[test]
    fn currency_keeps_negative_sign_after_dollar() {
        assert_eq!(format_currency(-1234.4), "$-1,234");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn override_path_is_the_only_candidate() {
        let path = Path::new("/models/custom.json");
        assert_eq!(model_path_candidates(Some(path)), vec![path.to_path_buf()]);
        assert_eq!(resolve_model_path(Some(path)), path.to_path_buf());
    }

    #[test]
    fn default_candidates_start_with_the_fixed_file_name() {
        let candidates = model_path_candidates(None);
        assert_eq!(candidates[0], PathBuf::from(MODEL_FILE_NAME));
        assert_eq!(candidates[1], Path::new("assets").join(MODEL_FILE_NAME));
    }
}
