pub mod formatter;

pub use formatter::{
    format_factor_table, format_impact, format_json, format_quest_list, should_use_colors,
    QuestPayload,
};
