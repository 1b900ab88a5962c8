//! Rule Document JSON Codec
//!
//! Output uses two-space indentation, leaves non-ASCII text unescaped and has
//! no trailing newline.

use crate::SinkError;
use rule_engine::RuleDocument;

/// Encode a document for the arbiter
pub fn to_json(document: &RuleDocument) -> Result<String, SinkError> {
    serde_json::to_string_pretty(document)
        .map_err(|e| SinkError::SerializationError(e.to_string()))
}

/// Decode and validate a document
pub fn from_json(text: &str) -> Result<RuleDocument, SinkError> {
    let document: RuleDocument =
        serde_json::from_str(text).map_err(|e| SinkError::SerializationError(e.to_string()))?;
    document.validate()?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rule_engine::{build_rules, seed_rules};

    #[test]
    fn test_seed_layout() {
        let doc = seed_rules(DateTime::from_timestamp(1_714_557_600, 0).unwrap());
        let expected = r#"{
  "version": 1714557600,
  "individual": [
    {
      "sensor": "temp",
      "op": ">=",
      "value": 45
    },
    {
      "sensor": "humidity",
      "op": "<=",
      "value": 20
    },
    {
      "sensor": "ldr",
      "op": "<",
      "value": 120
    }
  ],
  "associated": [
    {
      "label": "hot_and_dry",
      "allOf": [
        {
          "sensor": "temp",
          "min": 38,
          "max": 42
        },
        {
          "sensor": "humidity",
          "min": 0,
          "max": 35
        }
      ]
    }
  ]
}"#;
        assert_eq!(to_json(&doc).unwrap(), expected);
    }

    #[test]
    fn test_derived_layout() {
        let temperature: Vec<f64> = (20..=40).map(f64::from).collect();
        let mut humidity = vec![30.0; 15];
        humidity.push(10.0);
        let doc = build_rules(
            &temperature,
            &humidity,
            &[],
            DateTime::from_timestamp(1_714_557_600, 0).unwrap(),
        );
        let expected = r#"{
  "version": 1714557600,
  "individual": [
    {
      "sensor": "temp",
      "op": ">=",
      "value": 40.0
    },
    {
      "sensor": "humidity",
      "op": "<=",
      "value": 25.0
    },
    {
      "sensor": "ldr",
      "op": "<",
      "value": 120.0
    }
  ],
  "associated": [
    {
      "label": "hot_and_dry",
      "allOf": [
        {
          "sensor": "temp",
          "min": 38.0,
          "max": 39.6
        },
        {
          "sensor": "humidity",
          "min": 0,
          "max": 30.0
        }
      ]
    }
  ]
}"#;
        assert_eq!(to_json(&doc).unwrap(), expected);
    }

    #[test]
    fn test_seed_round_trip_keeps_integers() {
        let doc = seed_rules(DateTime::from_timestamp(7, 0).unwrap());
        let json = to_json(&doc).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, doc);
        assert!(decoded.is_seed());
        assert_eq!(to_json(&decoded).unwrap(), json);
    }

    #[test]
    fn test_round_trip() {
        let temperature: Vec<f64> = (0..200).map(|i| 18.0 + (i % 37) as f64 * 0.61).collect();
        let humidity: Vec<f64> = (0..200).map(|i| 35.0 + (i % 23) as f64 * 1.7).collect();
        let light: Vec<f64> = (0..150).map(|i| 90.0 + (i % 11) as f64 * 40.0).collect();
        let doc = build_rules(
            &temperature,
            &humidity,
            &light,
            DateTime::from_timestamp(1_714_557_600, 0).unwrap(),
        );

        let decoded = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_integer_values_accepted() {
        let text = r#"{
            "version": 1,
            "individual": [{"sensor": "temp", "op": ">=", "value": 45}],
            "associated": [{
                "label": "hot_and_dry",
                "allOf": [{"sensor": "humidity", "min": 0, "max": 35}]
            }]
        }"#;
        let doc = from_json(text).unwrap();
        assert_eq!(doc.individual()[0].threshold(), 45.0);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let text = r#"{"version": 1, "individual": [], "associated": [], "extra": true}"#;
        assert!(matches!(from_json(text), Err(SinkError::SerializationError(_))));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let text = r#"{
            "version": 1,
            "individual": [],
            "associated": [{
                "label": "hot_and_dry",
                "allOf": [{"sensor": "temp", "min": 42, "max": 38}]
            }]
        }"#;
        assert!(matches!(from_json(text), Err(SinkError::InvalidDocument(_))));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let text = r#"{
            "version": 1,
            "individual": [{"sensor": "temp", "op": "==", "value": 1}],
            "associated": []
        }"#;
        assert!(from_json(text).is_err());
    }
}
