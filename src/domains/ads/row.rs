//! Platform rows keyed by dotted field path.

use std::collections::BTreeMap;

use serde_json::Value;

/// One row returned by a search, e.g. `campaign.name` -> `"Spring Sale"`.
///
/// Google Ads omits zero-valued metrics from responses, so numeric reads of a
/// missing field return zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformRow {
    fields: BTreeMap<String, Value>,
}

impl PlatformRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Used by the platform implementations and by tests.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(path.into(), value.into());
        self
    }

    /// Flatten a nested JSON result (`{"campaign": {"name": ..}}`) into dotted
    /// paths. Object keys are converted from camelCase to snake_case; arrays are
    /// kept whole.
    pub fn from_json(value: &Value) -> Self {
        let mut row = Self::new();
        if let Value::Object(map) = value {
            for (key, child) in map {
                flatten_into(&mut row.fields, &to_snake_case(key), child);
            }
        }
        row
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String value of a field. Numbers are rendered as text.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.fields.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String value or a placeholder for display.
    pub fn text_or(&self, path: &str, fallback: &str) -> String {
        self.text(path)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Integer value; int64 fields arrive as JSON strings.
    pub fn int(&self, path: &str) -> i64 {
        match self.fields.get(path) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Floating point value (ratios, conversions).
    pub fn float(&self, path: &str) -> f64 {
        match self.fields.get(path) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Enum display name; absent enums are `UNSPECIFIED`.
    pub fn enum_name(&self, path: &str) -> String {
        self.text_or(path, "UNSPECIFIED")
    }

    /// `text` members of an array of text assets (ad headlines, descriptions).
    pub fn texts(&self, path: &str) -> Vec<String> {
        match self.fields.get(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("text").and_then(Value::as_str).map(str::to_string),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn flatten_into(fields: &mut BTreeMap<String, Value>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = format!("{}.{}", prefix, to_snake_case(key));
                flatten_into(fields, &path, child);
            }
        }
        other => {
            fields.insert(prefix.to_string(), other.clone());
        }
    }
}

/// `costMicros` -> `cost_micros`.
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_flattens_and_snake_cases() {
        let row = PlatformRow::from_json(&json!({
            "campaign": {
                "resourceName": "customers/1/campaigns/2",
                "id": "2",
                "name": "Spring Sale",
                "status": "ENABLED"
            },
            "campaignBudget": { "amountMicros": "50000000" },
            "adGroupCriterion": {
                "keyword": { "text": "rain jacket", "matchType": "PHRASE" }
            },
            "metrics": { "clicks": "12", "ctr": 0.05 }
        }));

        assert_eq!(row.text("campaign.name").as_deref(), Some("Spring Sale"));
        assert_eq!(row.int("campaign.id"), 2);
        assert_eq!(row.int("campaign_budget.amount_micros"), 50_000_000);
        assert_eq!(row.enum_name("ad_group_criterion.keyword.match_type"), "PHRASE");
        assert_eq!(row.int("metrics.clicks"), 12);
        assert_eq!(row.float("metrics.ctr"), 0.05);
    }

    #[test]
    fn test_missing_values_default() {
        let row = PlatformRow::new();
        assert_eq!(row.int("metrics.impressions"), 0);
        assert_eq!(row.float("metrics.conversions"), 0.0);
        assert_eq!(row.enum_name("campaign.status"), "UNSPECIFIED");
        assert_eq!(row.text_or("campaign.end_date", "Not set"), "Not set");
        assert!(row.texts("ad_group_ad.ad.responsive_search_ad.headlines").is_empty());
    }

    #[test]
    fn test_texts_reads_text_assets() {
        let row = PlatformRow::from_json(&json!({
            "adGroupAd": { "ad": { "responsiveSearchAd": { "headlines": [
                { "text": "Premium Rain Parkas" },
                { "text": "Vancouver-Made", "pinnedField": "HEADLINE_1" }
            ]}}}
        }));
        assert_eq!(
            row.texts("ad_group_ad.ad.responsive_search_ad.headlines"),
            vec!["Premium Rain Parkas", "Vancouver-Made"]
        );
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_snake_case("costMicros"), "cost_micros");
        assert_eq!(to_snake_case("path1"), "path1");
    }
}
