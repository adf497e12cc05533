use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::quests::Quest;
use crate::scoring::{FactorResult, ScoreResult};

/// Serialize a payload as a single compact JSON line.
pub fn format_json<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(payload).context("Failed to serialize output")
}

/// Quest payload in the shape the dashboard expects: `{"quests": [...]}`.
#[derive(Debug, Serialize)]
pub struct QuestPayload {
    pub quests: Vec<String>,
}

impl QuestPayload {
    pub fn new(quests: &[Quest]) -> Self {
        Self {
            quests: quests.iter().map(|q| q.title.clone()).collect(),
        }
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Signed impact: "+17", "-6", "0".
pub fn format_impact(impact: i64) -> String {
    if impact > 0 {
        format!("+{}", impact)
    } else {
        impact.to_string()
    }
}

/// Score summary line followed by one row per factor.
///
/// Row format: impact (right-aligned, 4 chars), name (20 chars),
/// percentage (4 chars), explanation truncated to the terminal.
pub fn format_factor_table(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(result.factors.len() + 2);

    let summary = format!(
        "Score: {}  FICO equivalent: {}  On-chain: {}  VCs: {}",
        result.score, result.fico_equivalent, result.on_chain_score, result.vc_count
    );
    lines.push(if use_colors {
        summary.bold().to_string()
    } else {
        summary
    });

    if let Some(error) = &result.error {
        let line = format!("Error: {}", error);
        lines.push(if use_colors {
            line.red().to_string()
        } else {
            line
        });
    }

    let term_width = get_terminal_width();
    for factor in &result.factors {
        lines.push(format_factor_row(factor, term_width, use_colors));
    }

    lines.join("\n")
}

fn format_factor_row(factor: &FactorResult, term_width: Option<usize>, use_colors: bool) -> String {
    let impact_width = 4;
    let name_width = 20;
    let percent_width = 4;
    let separator = "  ";

    let impact = format!("{:>width$}", format_impact(factor.impact), width = impact_width);
    let name = format!("{:<width$}", factor.name, width = name_width);
    let percent = format!("{:>width$}", format!("{}%", factor.percentage), width = percent_width);

    let fixed_width = impact_width + name_width + percent_width + separator.len() * 3;
    let explanation = match term_width {
        Some(width) if width > fixed_width + 10 => {
            truncate_text(&factor.explanation, width - fixed_width)
        }
        // Very narrow terminal
        Some(_) => truncate_text(&factor.explanation, 20),
        None => factor.explanation.clone(),
    };

    if use_colors {
        let impact = if factor.positive {
            impact.green().to_string()
        } else {
            impact.red().to_string()
        };
        format!(
            "{}{}{}{}{}{}{}",
            impact,
            separator,
            name.bold(),
            separator,
            percent.dimmed(),
            separator,
            explanation
        )
    } else {
        format!(
            "{}{}{}{}{}{}{}",
            impact, separator, name, separator, percent, separator, explanation
        )
    }
}

/// Format quests as "- title" lines
pub fn format_quest_list(quests: &[Quest]) -> String {
    if quests.is_empty() {
        return "No quests recommended.".to_string();
    }

    quests
        .iter()
        .map(|q| format!("- {}", q.title))
        .collect::<Vec<_>>()
        .join("\n")
}
