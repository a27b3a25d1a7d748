use serde::Deserialize;
use serde_json::Value;

/// Default `p` used when the request omits it or sends a value that cannot
/// be coerced to an integer (S5: "invalid coverage defaults and the job
/// proceeds" — the same leniency applies to `p`).
pub const DEFAULT_P: i64 = 5;

/// Default coverage radius, in miles, under the same leniency.
pub const DEFAULT_COVERAGE_MILES: f64 = 5.0;

fn default_true() -> bool {
    true
}

/// The `POST /api/scenarios/run` request body. `p` and `coverage_miles` are
/// kept as raw JSON values rather than typed numbers: a non-numeric value
/// for either is coerced to its default rather than rejected, so the field
/// must survive deserialization even when it's the string `"abc"`.
#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    #[serde(rename = "scenarioName")]
    pub scenario_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "notifyEmail", default = "default_true")]
    pub notify_email: bool,
    #[serde(rename = "demandMetric")]
    pub demand_metric: String,
    #[serde(default)]
    pub p: Option<Value>,
    #[serde(rename = "coverageMiles", default)]
    pub coverage_miles: Option<Value>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(rename = "candidateSites", default)]
    pub candidate_sites: Option<Value>,
}

/// Coerces a JSON value to a positive facility count, defaulting on
/// anything that doesn't parse cleanly rather than rejecting the request.
pub fn coerce_p(value: &Option<Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p >= 1 => p,
        _ => DEFAULT_P,
    }
}

/// Coerces a JSON value to a coverage radius in miles, under the same
/// default-on-failure rule as [`coerce_p`].
pub fn coerce_coverage_miles(value: &Option<Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => DEFAULT_COVERAGE_MILES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_p_passes_through() {
        assert_eq!(coerce_p(&Some(Value::from(3))), 3);
    }

    #[test]
    fn non_numeric_p_defaults() {
        assert_eq!(coerce_p(&Some(Value::String("abc".to_string()))), DEFAULT_P);
    }

    #[test]
    fn non_numeric_coverage_defaults() {
        assert_eq!(coerce_coverage_miles(&Some(Value::String("abc".to_string()))), DEFAULT_COVERAGE_MILES);
    }

    #[test]
    fn numeric_string_coverage_parses() {
        assert_eq!(coerce_coverage_miles(&Some(Value::String("7.5".to_string()))), 7.5);
    }

    #[test]
    fn missing_value_defaults() {
        assert_eq!(coerce_p(&None), DEFAULT_P);
        assert_eq!(coerce_coverage_miles(&None), DEFAULT_COVERAGE_MILES);
    }
}
