use std::fmt::Write as _;

use crate::currency::MoneyFormat;
use crate::domain::{Budget, Goal};
use crate::insights::ratios::{budget_overrun, goal_delta, percent_remaining};
use crate::insights::InsightText;

const PERSONA: &str = "You are Budget Buddy, a friendly personal finance assistant. \
Answer in a few short sentences, refer to the user's numbers below, and never invent figures.";

/// Collects the user's question and financial context into one prompt.
#[derive(Debug, Clone)]
pub struct AdvisorPrompt<'a> {
    question: String,
    insights: Option<&'a InsightText>,
    budgets: &'a [Budget],
    goals: &'a [Goal],
    money: MoneyFormat,
}

impl<'a> AdvisorPrompt<'a> {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            insights: None,
            budgets: &[],
            goals: &[],
            money: MoneyFormat::default(),
        }
    }

    pub fn with_insights(mut self, insights: &'a InsightText) -> Self {
        self.insights = Some(insights);
        self
    }

    pub fn with_budgets(mut self, budgets: &'a [Budget]) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_goals(mut self, goals: &'a [Goal]) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_money_format(mut self, money: MoneyFormat) -> Self {
        self.money = money;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(PERSONA);
        out.push_str("\n\n");

        if let Some(insights) = self.insights {
            let _ = writeln!(out, "## This month");
            let _ = writeln!(out, "{}", insights.status);
            let _ = writeln!(out, "Suggested focus: {}", insights.advice);
            out.push('\n');
        }

        let _ = writeln!(out, "## Budgets");
        if self.budgets.is_empty() {
            let _ = writeln!(out, "- none set");
        }
        for budget in self.budgets {
            let _ = writeln!(
                out,
                "- {}: spent {} of {} ({:.0}% left){}",
                budget.category,
                self.money.format(budget.spent),
                self.money.format(budget.total),
                percent_remaining(budget),
                if budget_overrun(budget) { ", over budget" } else { "" }
            );
        }
        out.push('\n');

        let _ = writeln!(out, "## Savings goals");
        if self.goals.is_empty() {
            let _ = writeln!(out, "- none set");
        }
        for goal in self.goals {
            let delta = goal_delta(goal);
            let _ = writeln!(
                out,
                "- {}: saved {} of {} ({:.0}%, {} to go)",
                goal.name,
                self.money.format(goal.saved),
                self.money.format(goal.target),
                delta.pct,
                self.money.format(delta.remaining)
            );
        }
        out.push('\n');

        let _ = writeln!(out, "## Question");
        out.push_str(self.question.trim());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{Advisor, TextGenerator};
    use crate::errors::{BuddyError, Result};

    struct Canned(&'static str);

    impl TextGenerator for Canned {
        fn generate(&self, prompt: &str) -> Result<String> {
            assert!(prompt.contains("## Question"));
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn prompt_lists_context_sections() {
        let insights = InsightText {
            status: "You've spent $40.00 this month.".into(),
            advice: "Keep logging your transactions so your insights stay accurate.".into(),
        };
        let budgets = vec![Budget::new("Food", 100.0, 120.0)];
        let goals = vec![Goal::new("Trip", 500.0, 250.0)];
        let rendered = AdvisorPrompt::new("  Can I afford a concert?  ")
            .with_insights(&insights)
            .with_budgets(&budgets)
            .with_goals(&goals)
            .render();

        assert!(rendered.starts_with("You are Budget Buddy"));
        assert!(rendered.contains("You've spent $40.00 this month."));
        assert!(rendered.contains("- Food: spent $120.00 of $100.00 (0% left), over budget"));
        assert!(rendered.contains("- Trip: saved $250.00 of $500.00 (50%, $250.00 to go)"));
        assert!(rendered.ends_with("## Question\nCan I afford a concert?"));
    }

    #[test]
    fn empty_context_is_explicit() {
        let rendered = AdvisorPrompt::new("hi").render();
        assert!(!rendered.contains("## This month"));
        assert_eq!(rendered.matches("- none set").count(), 2);
    }

    #[test]
    fn advisor_trims_and_rejects_blank_replies() {
        let prompt = AdvisorPrompt::new("hello");
        let reply = Advisor::new(Canned("  Save a little each week.\n"))
            .ask(&prompt)
            .unwrap();
        assert_eq!(reply, "Save a little each week.");

        let err = Advisor::new(Canned("   ")).ask(&prompt).unwrap_err();
        assert!(matches!(err, BuddyError::Advisor(_)));
    }
}
