//! Static data model for improv activities.
//!
//! These types describe the taxonomy of improv exercises stored in the
//! activities table. They are pure data: closed enumerations plus immutable
//! value structs, with serde derives matching the snake_case wire format
//! used by the table rows and the website.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One improv activity as stored in the activities table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovActivity {
    pub id: String,
    pub updated_at: String,

    /// Known names for the activity, most common first.
    pub name: Vec<String>,
    pub brief: String,
    pub summary: String,
    pub description: String,

    pub tips: ActivityTips,
    pub requirements: ActivityRequirements,

    pub tags: BTreeSet<ActivityTag>,
    pub skills: BTreeSet<ActivitySkill>,

    pub field: ActivityField,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub level: ActivityLevel,
    pub complexity: ActivityComplexity,
    pub skill_ceiling: ActivitySkillCeiling,

    /// Activity this one is a variant of, if any.
    pub parent: Option<String>,
    /// Ids of known variants of this activity.
    pub variants: Vec<String>,

    pub credits: Vec<String>,
    pub sources: Vec<String>,
}

/// Free-form guidance split by audience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityTips {
    pub generic: Vec<String>,
    pub host: Vec<String>,
    pub player: Vec<String>,
}

/// What an activity needs from the room before it can run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRequirements {
    pub players: PlayerRequirement,
    pub duration: DurationRequirement,
    pub physicality: PhysicalityRequirement,
    pub vocality: VocalityRequirement,
}

/// Player counts required to run an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRequirement {
    pub minimum: u32,
    pub recommended: u32,
}

/// Duration in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationRequirement {
    pub minimum: u32,
    pub average: u32,
}

/// Physical movement needed to participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalityRequirement {
    pub minimum: PhysicalityLevel,
    pub recommended: PhysicalityLevel,
}

/// Vocal engagement needed to participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocalityRequirement {
    pub minimum: VocalityLevel,
    pub recommended: VocalityLevel,
}

/// Broad category of an activity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Very brief and simple with no skill to learn.
    Warmup,
    /// Very specific game used to teach a specific skill.
    Exercise,
    /// Repetitive game used to practice a specific skill.
    Drill,
    /// Full improv game with multiple potential skills.
    #[default]
    Game,
}

/// Improv tradition an activity belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityField {
    /// Games built around an already-established premise.
    #[default]
    ShortForm,
    /// Games built around finding the game asynchronously during play.
    LongForm,
}

/// Structural tags describing how an activity is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTag {
    /// Focused on creating a scene.
    Scene,
    /// Most players stay on the sidelines.
    Backline,
    /// A specific formation used for quick drills.
    Gauntlet,
    /// Players have the initiative to jump in.
    Jumpout,
    /// Has competitive elements.
    Competitive,
    /// Involves guessing elements.
    Guessing,
    /// Involves music or singing.
    Musical,
    /// Requires a host or moderator.
    Hosted,
    /// Requires assistance by other performers.
    Assisted,
    /// Focused on storytelling.
    Narrative,
    /// Requires significant physical movement.
    Physical,
}

/// Experience level an activity is pitched at.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Suitable for new improvisers.
    #[default]
    Beginner,
    /// Assumes foundational concepts like base reality and who/what/where.
    Intermediate,
    /// Assumes advanced concepts like game, heightening, and justification.
    Advanced,
    /// Assumes strong long form structure, character work, and theory.
    Expert,
}

/// How hard the rules are to explain and follow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityComplexity {
    /// One rule, no special instructions, purely reactive.
    #[default]
    VeryLow,
    /// One or two rules, rarely asked questions.
    Low,
    /// Two or three rules, timing or cue-based, requires an example.
    Medium,
    /// Rules affect each other, requires multiple examples.
    High,
    /// Many interacting rules, requires detailed explanation.
    VeryHigh,
}

/// How far practice can take a player within the activity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySkillCeiling {
    /// No skill development possible once the rule is understood.
    #[default]
    Low,
    /// Some skill development over time, theory can be applied.
    Medium,
    /// Practice leads to significant improvement of scene quality.
    High,
    /// No ceiling on mastery.
    Endless,
}

/// Improv skills an activity develops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySkill {
    /// Establishing context so a scene partner is aware of the game.
    Framing,
    /// Increasing the stakes of a scene through actions and dialogue.
    Heightening,
    /// Providing reasons or motivations for actions within a scene.
    Justification,
    /// Responding appropriately to scene partners and situations.
    Reaction,
    /// Actively hearing and understanding scene partners.
    Listening,
    /// Using the body effectively in a scene.
    Physicality,
    /// Fully engaging and dedicating to a scene or character.
    Commitment,
    /// Establishing and maintaining relationships between characters.
    Relationship,
    /// Creating a believable and consistent world within a scene.
    BaseReality,
}

/// Physical movement levels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalityLevel {
    /// No physical movement required.
    None,
    /// Requires upper body movement.
    #[default]
    HalfBody,
    /// Requires full body movement.
    FullBody,
}

/// Vocal engagement levels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VocalityLevel {
    /// No vocalization required.
    None,
    /// Can be done with text communication.
    Text,
    /// Requires voice communication.
    #[default]
    Vocal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActivityType::Warmup).unwrap(),
            r#""warmup""#
        );
        assert_eq!(
            serde_json::to_string(&ActivityField::ShortForm).unwrap(),
            r#""short_form""#
        );
        assert_eq!(
            serde_json::to_string(&ActivityComplexity::VeryHigh).unwrap(),
            r#""very_high""#
        );
        assert_eq!(
            serde_json::to_string(&ActivitySkill::BaseReality).unwrap(),
            r#""base_reality""#
        );
        assert_eq!(
            serde_json::to_string(&PhysicalityLevel::HalfBody).unwrap(),
            r#""half_body""#
        );
    }

    #[test]
    fn defaults_match_catalog_conventions() {
        let activity = ImprovActivity::default();
        assert_eq!(activity.activity_type, ActivityType::Game);
        assert_eq!(activity.field, ActivityField::ShortForm);
        assert_eq!(activity.level, ActivityLevel::Beginner);
        assert_eq!(activity.complexity, ActivityComplexity::VeryLow);
        assert_eq!(activity.skill_ceiling, ActivitySkillCeiling::Low);
        assert_eq!(
            activity.requirements.physicality.minimum,
            PhysicalityLevel::HalfBody
        );
        assert_eq!(activity.requirements.vocality.minimum, VocalityLevel::Vocal);
        assert!(activity.tags.is_empty());
        assert!(activity.parent.is_none());
    }

    #[test]
    fn activity_round_trips_through_json() {
        let mut activity = ImprovActivity {
            id: "freeze-tag".to_string(),
            updated_at: "2024-11-02T10:00:00Z".to_string(),
            name: vec!["Freeze Tag".to_string(), "Freeze".to_string()],
            brief: "Tap out and take over the scene".to_string(),
            ..ImprovActivity::default()
        };
        activity.tags.insert(ActivityTag::Jumpout);
        activity.tags.insert(ActivityTag::Scene);
        activity.skills.insert(ActivitySkill::Physicality);
        activity.requirements.players = PlayerRequirement {
            minimum: 4,
            recommended: 8,
        };

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "game");
        assert_eq!(json["tags"][0], "scene");

        let back: ImprovActivity = serde_json::from_value(json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = serde_json::json!({
            "id": "zip-zap-zop",
            "name": ["Zip Zap Zop"],
            "type": "warmup"
        });
        let activity: ImprovActivity = serde_json::from_value(json).unwrap();
        assert_eq!(activity.activity_type, ActivityType::Warmup);
        assert_eq!(activity.level, ActivityLevel::Beginner);
        assert!(activity.summary.is_empty());
    }
}
