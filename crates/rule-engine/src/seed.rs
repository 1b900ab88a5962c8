//! Seed Rule Set
//!
//! Conservative defaults used until enough history exists to derive rules.

use crate::rules::{AssociatedRule, Condition, IndividualRule, Operator, RuleDocument, Sensor};
use chrono::{DateTime, Utc};

/// Label of the compound hot-and-dry rule
pub const HOT_AND_DRY: &str = "hot_and_dry";

// Written as JSON integers
const SEED_TEMPERATURE_HIGH: i64 = 45;
const SEED_HUMIDITY_LOW: i64 = 20;
const SEED_LIGHT_LOW: i64 = 120;
const SEED_HOT_BAND: (i64, i64) = (38, 42);
const SEED_DRY_BAND: (i64, i64) = (0, 35);

/// The fixed fallback document, stamped with `built_at`
pub fn seed_rules(built_at: DateTime<Utc>) -> RuleDocument {
    RuleDocument::new(
        built_at,
        vec![
            IndividualRule::new(
                Sensor::Temperature,
                Operator::GreaterOrEqual,
                SEED_TEMPERATURE_HIGH,
            ),
            IndividualRule::new(Sensor::Humidity, Operator::LessOrEqual, SEED_HUMIDITY_LOW),
            IndividualRule::new(Sensor::Light, Operator::Less, SEED_LIGHT_LOW),
        ],
        vec![AssociatedRule::new(
            HOT_AND_DRY,
            vec![
                Condition::new(Sensor::Temperature, SEED_HOT_BAND.0, SEED_HOT_BAND.1),
                Condition::new(Sensor::Humidity, SEED_DRY_BAND.0, SEED_DRY_BAND.1),
            ],
        )],
    )
}

impl RuleDocument {
    /// Whether this document carries the seed content
    pub fn is_seed(&self) -> bool {
        self.same_rules_as(&seed_rules(DateTime::UNIX_EPOCH))
    }
}
