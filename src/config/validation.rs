//! Typo detection for config files, plus sanity checks on the loaded values.
//!
//! Unknown keys are found by walking the raw TOML before serde sees it, so
//! a misspelled key is reported instead of silently falling back to its
//! default. Findings here are warnings; only range errors reject a config.

use std::collections::HashSet;
use std::fmt;

/// Something odd in a config that still loads.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Dotted key path, e.g. `model.base_oil_bopd`
    pub field: String,
    pub message: String,
    /// Closest known key, when one is near enough
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suggestion {
            Some(s) => write!(f, "{} (did you mean '{s}'?)", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Maximum edit distance for a "did you mean" suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

// ----------------------------------------------------------------------------
// Key inventory
// ----------------------------------------------------------------------------

/// Every dotted key path `ProxyConfig` understands, section headers included.
///
/// Keep in sync with the structs in `model_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        "preset",
        "field",
        "field.name",
        "model",
        "model.base_oil_bopd",
        "model.rating_threshold",
        "model.favorable_label",
        "model.unfavorable_label",
        "controls",
        "controls.injection_min_bwpd",
        "controls.injection_max_bwpd",
        "controls.injection_default_bwpd",
        "controls.sweep_percent_min",
        "controls.sweep_percent_max",
        "controls.sweep_percent_default",
        "controls.lag_options_days",
        "controls.lag_default_days",
        "forecast",
        "forecast.domain_max_bwpd",
        "forecast.sample_count",
        "server",
        "server.addr",
    ]
    .into_iter()
    .collect()
}

/// Dotted paths of every key in a TOML document, parents before children.
///
/// `[model]\nbase_oil_bopd = 1.0` gives `["model", "model.base_oil_bopd"]`.
/// Arrays are leaves; keys inside arrays of tables are not visited.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut out = Vec::new();
    collect_keys(value, prefix, &mut out);
    out
}

fn collect_keys(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, child) in table {
        let path = match prefix {
            "" => key.clone(),
            p => format!("{p}.{key}"),
        };
        if child.is_table() {
            out.push(path.clone());
            collect_keys(child, &path, out);
        } else {
            out.push(path);
        }
    }
}

// ----------------------------------------------------------------------------
// Suggestions
// ----------------------------------------------------------------------------

/// Edit distance (insert, delete, substitute) over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Single row: row[j] holds the distance between a[..i] and b[..j].
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag
            } else {
                1 + diag.min(above).min(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Nearest known key within [`MAX_SUGGESTION_DISTANCE`] edits.
///
/// Equal distances resolve to the alphabetically first key.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .filter_map(|&candidate| {
            let distance = levenshtein(unknown, candidate);
            (distance <= MAX_SUGGESTION_DISTANCE).then_some((distance, candidate))
        })
        .min()
        .map(|(_, candidate)| candidate.to_owned())
}

/// Warnings for keys in `raw_toml` that `ProxyConfig` does not define.
///
/// Unparseable input yields no warnings; the deserializer reports it.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(document) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&document, "")
        .into_iter()
        .filter(|path| !known.contains(path.as_str()))
        .map(|path| ValidationWarning {
            message: format!("Unknown config key '{path}'"),
            suggestion: suggest_correction(&path, &known),
            field: path,
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Value checks
// ----------------------------------------------------------------------------

/// Check loaded values against physical limits.
///
/// The first list holds values no reservoir can have and rejects the
/// config; the second holds values that load but are probably mistakes.
pub fn validate_physical_ranges(config: &super::ProxyConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    let m = &config.model;
    let c = &config.controls;
    let f = &config.forecast;

    if !m.base_oil_bopd.is_finite() || m.base_oil_bopd < 0.0 {
        errors.push(format!(
            "model.base_oil_bopd = {} must be a finite, non-negative rate",
            m.base_oil_bopd
        ));
    }

    if !m.rating_threshold.is_finite() {
        errors.push("model.rating_threshold must be finite".to_string());
    } else if m.rating_threshold <= 0.0 {
        warnings.push(ValidationWarning {
            field: "model.rating_threshold".to_string(),
            message: format!(
                "model.rating_threshold = {} rates every non-zero injection as favorable",
                m.rating_threshold
            ),
            suggestion: None,
        });
    }

    if m.favorable_label.trim().is_empty() || m.unfavorable_label.trim().is_empty() {
        errors.push("model.favorable_label and model.unfavorable_label must not be blank".to_string());
    }

    // Injection cannot be negative
    if !c.injection_min_bwpd.is_finite() || !c.injection_max_bwpd.is_finite() {
        errors.push(format!(
            "controls.injection range {}-{} must be finite",
            c.injection_min_bwpd, c.injection_max_bwpd
        ));
    } else if c.injection_min_bwpd < 0.0 {
        errors.push(format!(
            "controls.injection_min_bwpd = {} cannot be negative",
            c.injection_min_bwpd
        ));
    }

    // Sweep is a percentage of displaced volume
    if !(c.sweep_percent_min >= 0.0 && c.sweep_percent_max <= 100.0) {
        errors.push(format!(
            "controls.sweep_percent range {}-{} is outside 0-100%",
            c.sweep_percent_min, c.sweep_percent_max
        ));
    }

    if !f.domain_max_bwpd.is_finite() || f.domain_max_bwpd <= 0.0 {
        errors.push(format!(
            "forecast.domain_max_bwpd = {} must be a finite, positive rate",
            f.domain_max_bwpd
        ));
    } else if f.domain_max_bwpd < c.injection_max_bwpd {
        warnings.push(ValidationWarning {
            field: "forecast.domain_max_bwpd".to_string(),
            message: format!(
                "forecast.domain_max_bwpd = {} does not cover the injection control (max {})",
                f.domain_max_bwpd, c.injection_max_bwpd
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("sample_cont", "sample_count"), 1);
        assert_eq!(levenshtein("bopd", "bpod"), 2);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn walk_lists_parents_first() {
        let value: toml::Value = "[model]\nbase_oil_bopd = 1.0\n".parse().unwrap();
        let keys = walk_toml_keys(&value, "");
        assert_eq!(keys, vec!["model".to_string(), "model.base_oil_bopd".to_string()]);
    }

    #[test]
    fn distant_key_gets_no_suggestion() {
        let known = known_config_keys();
        assert!(suggest_correction("completely.unrelated.key", &known).is_none());
    }

    #[test]
    fn serialized_defaults_use_only_known_keys() {
        let toml_str = crate::config::ProxyConfig::default().to_toml().unwrap();
        assert!(validate_unknown_keys(&toml_str).is_empty());
    }
}
