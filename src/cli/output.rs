use std::fmt;

use colored::Colorize;

use crate::insights::TrendDirection;
use crate::notifications::AlertKind;

/// Styling for CLI lines. With `plain` set, text is emitted without ANSI codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Styler {
    pub plain: bool,
}

impl Styler {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn section(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title.to_string().trim());
        if self.plain {
            text
        } else {
            text.bold().cyan().to_string()
        }
    }

    /// Left-aligned label followed by a value.
    pub fn field(&self, label: &str, value: impl fmt::Display) -> String {
        let label = format!("{:<11}", format!("{label}:"));
        if self.plain {
            format!("{label}{value}")
        } else {
            format!("{}{value}", label.dimmed())
        }
    }

    pub fn trend(&self, direction: TrendDirection, text: impl fmt::Display) -> String {
        let text = text.to_string();
        if self.plain {
            return text;
        }
        match direction {
            TrendDirection::Up => text.red().to_string(),
            TrendDirection::Down => text.green().to_string(),
            TrendDirection::Flat => text,
        }
    }

    pub fn alert(&self, kind: AlertKind, text: impl fmt::Display) -> String {
        let (label, icon) = match kind {
            AlertKind::BudgetOverrun => ("OVER", "[x]"),
            AlertKind::BudgetNearLimit => ("NEAR", "[!]"),
            AlertKind::GoalReached => ("GOAL", "[+]"),
        };
        let line = format!("{label} {icon} {text}");
        if self.plain {
            return line;
        }
        match kind {
            AlertKind::BudgetOverrun => line.red().bold().to_string(),
            AlertKind::BudgetNearLimit => line.yellow().to_string(),
            AlertKind::GoalReached => line.green().to_string(),
        }
    }

    pub fn success(&self, text: impl fmt::Display) -> String {
        let line = format!("[ok] {text}");
        if self.plain {
            line
        } else {
            line.green().to_string()
        }
    }
}

/// Text progress bar, `width` cells wide, for a percentage in `[0, 100]`.
pub fn progress_bar(pct: f64, width: usize) -> String {
    let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styler_emits_no_escape_codes() {
        let styler = Styler::new(true);
        assert_eq!(styler.section(" Summary "), "=== Summary ===");
        assert_eq!(styler.field("Spent", "$4.00"), "Spent:     $4.00");
        assert_eq!(
            styler.alert(AlertKind::BudgetNearLimit, "Fun"),
            "NEAR [!] Fun"
        );
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(140.0, 4), "[####]");
        assert_eq!(progress_bar(f64::NAN, 4), "[----]");
    }
}
