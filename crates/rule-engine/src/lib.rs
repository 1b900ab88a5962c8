//! Rule Derivation Engine
//!
//! Turns recent temperature, humidity and light history into the threshold
//! rules consumed by the arbiter, falling back to a fixed seed rule set when
//! history is insufficient.

mod builder;
mod error;
mod rules;
mod seed;

pub use builder::{build_rules, DerivationConfig, RuleBuilder, SensorHistory};
pub use error::RuleError;
pub use rules::{
    AssociatedRule, Condition, IndividualRule, Number, Operator, RuleDocument, Sensor,
};
pub use seed::{seed_rules, HOT_AND_DRY};
