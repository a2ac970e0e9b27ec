use serde::{Deserialize, Serialize};

use crate::currency::MoneyFormat;
use crate::insights::aggregator::{InsightSummary, TrendDirection};

/// Allowance usage, in percent, at which advice switches to a hard warning.
pub const ALLOWANCE_WARNING_PCT: f64 = 90.0;
/// Month-over-month increase, in currency units, treated as rising spend.
pub const RISING_SPEND_THRESHOLD: f64 = 50.0;

/// Human-readable rendering of an [`InsightSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightText {
    pub status: String,
    pub advice: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuddyRole {
    Buddy,
    User,
}

/// One chat bubble in the buddy conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuddyMessage {
    pub id: usize,
    pub role: BuddyRole,
    pub text: String,
}

pub fn format_insights(summary: &InsightSummary, money: &MoneyFormat) -> InsightText {
    InsightText {
        status: status_sentences(summary, money).join(" "),
        advice: advice_line(summary),
    }
}

/// The four status sentences, in display order.
pub fn status_sentences(summary: &InsightSummary, money: &MoneyFormat) -> Vec<String> {
    let spent = format!("You've spent {} this month.", money.format(summary.total_expense));

    let top = match &summary.top_category_name {
        Some(name) => format!(
            "Your top category is {} at {}.",
            name,
            money.format(summary.top_category_amount)
        ),
        None => "No spending logged yet this month.".to_string(),
    };

    let allowance = format!(
        "That's {:.0}% of your monthly allowance.",
        summary.allowance_used_pct
    );

    let previous = money.format(summary.prev_expenses_total);
    let delta = money.format(summary.trend_diff.abs());
    let comparison = match summary.trend_direction {
        TrendDirection::Up => format!("That's {delta} higher than last month ({previous})."),
        TrendDirection::Down => format!("That's {delta} lower than last month ({previous})."),
        TrendDirection::Flat => format!("That's about the same as last month ({previous})."),
    };

    vec![spent, top, allowance, comparison]
}

/// Picks the single advice line; the first matching rule wins.
pub fn advice_line(summary: &InsightSummary) -> String {
    if summary.allowance_used_pct >= ALLOWANCE_WARNING_PCT {
        format!(
            "You've used {:.0}% of your allowance. Try a no-spend day to stay on track.",
            summary.allowance_used_pct
        )
    } else if summary.trend_direction == TrendDirection::Up
        && summary.trend_diff > RISING_SPEND_THRESHOLD
    {
        "Your spending is rising compared to last month. Review recent purchases for easy cuts."
            .to_string()
    } else {
        "Keep logging your transactions so your insights stay accurate.".to_string()
    }
}

/// Renders the summary as buddy chat bubbles: one per status sentence, then
/// the advice.
pub fn buddy_messages(summary: &InsightSummary, money: &MoneyFormat) -> Vec<BuddyMessage> {
    status_sentences(summary, money)
        .into_iter()
        .chain(std::iter::once(advice_line(summary)))
        .enumerate()
        .map(|(id, text)| BuddyMessage {
            id: id + 1,
            role: BuddyRole::Buddy,
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> InsightSummary {
        InsightSummary {
            total_expense: 40.0,
            total_income: 1000.0,
            allowance_used_pct: 20.0,
            top_category_name: Some("Food".into()),
            top_category_amount: 40.0,
            prev_expenses_total: 0.0,
            trend_diff: 40.0,
            trend_direction: TrendDirection::Up,
            category_breakdown: Vec::new(),
        }
    }

    #[test]
    fn status_reads_as_one_paragraph() {
        let text = format_insights(&summary(), &MoneyFormat::default());
        insta::assert_snapshot!(text.status, @"You've spent $40.00 this month. Your top category is Food at $40.00. That's 20% of your monthly allowance. That's $40.00 higher than last month ($0.00).");
        assert_eq!(
            text.advice,
            "Keep logging your transactions so your insights stay accurate."
        );
    }

    #[test]
    fn empty_month_uses_fallback_sentence() {
        let mut empty = summary();
        empty.total_expense = 0.0;
        empty.top_category_name = None;
        empty.top_category_amount = 0.0;
        empty.allowance_used_pct = 0.0;
        empty.prev_expenses_total = 30.0;
        empty.trend_diff = -30.0;
        empty.trend_direction = TrendDirection::Down;
        let sentences = status_sentences(&empty, &MoneyFormat::default());
        assert_eq!(sentences[1], "No spending logged yet this month.");
        assert_eq!(sentences[3], "That's $30.00 lower than last month ($30.00).");
    }

    #[test]
    fn flat_trend_wording() {
        let mut flat = summary();
        flat.prev_expenses_total = 40.0;
        flat.trend_diff = 0.0;
        flat.trend_direction = TrendDirection::Flat;
        let sentences = status_sentences(&flat, &MoneyFormat::default());
        assert_eq!(sentences[3], "That's about the same as last month ($40.00).");
    }

    #[test]
    fn allowance_warning_takes_priority() {
        let mut heavy = summary();
        heavy.allowance_used_pct = 90.0;
        heavy.trend_diff = 500.0;
        assert!(advice_line(&heavy).contains("no-spend day"));
    }

    #[test]
    fn rising_spend_needs_more_than_threshold() {
        let mut rising = summary();
        rising.trend_diff = 50.0;
        assert!(advice_line(&rising).starts_with("Keep logging"));
        rising.trend_diff = 50.01;
        assert!(advice_line(&rising).starts_with("Your spending is rising"));
    }

    #[test]
    fn buddy_messages_end_with_advice() {
        let messages = buddy_messages(&summary(), &MoneyFormat::default());
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].id, 1);
        assert!(messages.iter().all(|msg| msg.role == BuddyRole::Buddy));
        assert_eq!(messages[4].text, advice_line(&summary()));
    }
}
