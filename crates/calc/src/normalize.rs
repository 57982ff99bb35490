//! Unit normalization: extracted entity names/values to formula arguments.

use finquery_core::{CalculationArgs, ExtractedEntities};

/// Rewrite extracted entities into the argument conventions of the
/// calculator functions.
///
/// Rules, applied per key (total and order-independent):
/// - `*_percent` -> suffix stripped, value divided by 100
/// - `time_years` -> `time`
/// - `term_months` -> `n_months`
/// - `compounding_frequency` -> `times_compounded_per_year`
/// - anything else passes through unchanged
pub fn normalize_args(entities: &ExtractedEntities) -> CalculationArgs {
    let mut args = CalculationArgs::with_capacity(entities.len());
    for (name, &value) in entities {
        match name.as_str() {
            "time_years" => {
                args.insert("time".to_string(), value);
            }
            "term_months" => {
                args.insert("n_months".to_string(), value);
            }
            "compounding_frequency" => {
                args.insert("times_compounded_per_year".to_string(), value);
            }
            other => {
                if let Some(stripped) = other.strip_suffix("_percent") {
                    args.insert(stripped.to_string(), value / 100.0);
                } else {
                    args.insert(other.to_string(), value);
                }
            }
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(pairs: &[(&str, f64)]) -> ExtractedEntities {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_percent_suffix_becomes_decimal() {
        let args = normalize_args(&entities(&[("rate_percent", 5.0)]));
        assert_eq!(args.len(), 1);
        assert!((args["rate"] - 0.05).abs() < 1e-12);

        let args = normalize_args(&entities(&[("annual_rate_percent", 12.0)]));
        assert!((args["annual_rate"] - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_renames() {
        let args = normalize_args(&entities(&[("time_years", 3.0)]));
        assert_eq!(args["time"], 3.0);

        let args = normalize_args(&entities(&[("term_months", 36.0)]));
        assert_eq!(args["n_months"], 36.0);

        let args = normalize_args(&entities(&[("compounding_frequency", 4.0)]));
        assert_eq!(args["times_compounded_per_year"], 4.0);
    }

    #[test]
    fn test_pass_through() {
        let args = normalize_args(&entities(&[
            ("present_value", 1000.0),
            ("principal", 5000.0),
            ("periods", 10.0),
            ("years", 2.0),
        ]));
        assert_eq!(args["present_value"], 1000.0);
        assert_eq!(args["principal"], 5000.0);
        assert_eq!(args["periods"], 10.0);
        assert_eq!(args["years"], 2.0);
    }

    #[test]
    fn test_unrecognized_keys_unchanged() {
        let args = normalize_args(&entities(&[("down_payment", 250.0)]));
        assert_eq!(args["down_payment"], 250.0);
    }

    #[test]
    fn test_full_future_value_set() {
        let args = normalize_args(&entities(&[
            ("present_value", 1000.0),
            ("rate_percent", 5.0),
            ("periods", 10.0),
        ]));
        assert_eq!(args.len(), 3);
        assert_eq!(args["present_value"], 1000.0);
        assert!((args["rate"] - 0.05).abs() < 1e-12);
        assert_eq!(args["periods"], 10.0);
    }
}
