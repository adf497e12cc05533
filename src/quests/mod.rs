pub mod config;
pub mod engine;
pub mod profile;
pub mod validation;

pub use config::{QuestConfig, QuestThresholds};
pub use engine::{generate_quests, Quest, QuestFeatures, QuestKind};
pub use profile::{
    discover_profiles, load_profile, save_profile, HolisticProfile, DEFAULT_HOLISTIC_PATTERN,
};
pub use validation::validate_quests;
