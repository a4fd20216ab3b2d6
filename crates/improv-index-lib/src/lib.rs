//! Improv Index core library.
//!
//! This crate exposes the building blocks shared by the Improv Index API
//! Lambdas: the static activity data model, a pagination-transparent facade
//! over the DynamoDB activities table, and the Secrets Manager loader for
//! process-wide configuration. Higher-level consumers (the Lambda handlers)
//! should only depend on the types exported here instead of talking to the
//! AWS SDKs directly.

#![deny(warnings)]

pub mod activity;
pub mod error;
pub mod secrets;
pub mod table;

pub use activity::{
    ActivityComplexity, ActivityField, ActivityLevel, ActivityRequirements, ActivitySkill,
    ActivitySkillCeiling, ActivityTag, ActivityTips, ActivityType, DurationRequirement,
    ImprovActivity, PhysicalityLevel, PhysicalityRequirement, PlayerRequirement,
    VocalityLevel, VocalityRequirement,
};
pub use error::{Error, Result};
pub use secrets::Secrets;
pub use table::{string_key, Expression, Item, Table};
