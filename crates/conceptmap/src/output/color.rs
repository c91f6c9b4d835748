//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Core concepts:        blue, bold
//!   - Supplementary:        green
//!   - Advanced:             magenta
//!   - Other section:        dimmed (external placeholders, cross-chapter edges)
//!   - Info/Reference:       cyan   (ids, section keys, arrows)
//!   - Warning:              yellow (load warnings, validation issues)
//!   - Emphasis:             bold   (section headers)

use crate::domain::Tier;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply dimmed style to text (for field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Tier marker, with ASCII fallback support.
pub(crate) fn tier_icon(tier: Tier, config: &OutputConfig) -> &'static str {
    if config.use_ascii {
        match tier {
            Tier::Core => "*",
            Tier::Supplementary => "+",
            Tier::Advanced => "-",
            Tier::External => ">",
        }
    } else {
        match tier {
            Tier::Core => "●",
            Tier::Supplementary => "◆",
            Tier::Advanced => "○",
            Tier::External => "↗",
        }
    }
}

/// Colored tier marker.
pub(crate) fn colored_tier_icon(tier: Tier, config: &OutputConfig) -> String {
    colorize_tier(tier_icon(tier, config), tier, config)
}

/// Color text in its tier's color.
pub(crate) fn colorize_tier(text: &str, tier: Tier, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    match tier {
        Tier::Core => text.blue().bold().to_string(),
        Tier::Supplementary => text.green().to_string(),
        Tier::Advanced => text.magenta().to_string(),
        Tier::External => text.dimmed().to_string(),
    }
}

/// Arrow used between related concepts, with ASCII fallback support.
pub(crate) fn arrow(outgoing: bool, config: &OutputConfig) -> String {
    let arrow = match (outgoing, config.use_ascii) {
        (true, false) => "→",
        (false, false) => "←",
        (true, true) => "->",
        (false, true) => "<-",
    };
    info(arrow, config)
}
