//! Non-interactive command-line surface over the data directory.

pub mod output;

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::advisor::AdvisorPrompt;
use crate::config::{FileKeyValueStore, Settings, SettingsManager};
use crate::domain::transaction::parse_timestamp;
use crate::domain::{Displayable, Transaction, TransactionKind};
use crate::errors::{BuddyError, Result};
use crate::insights::periods::days_in_month;
use crate::insights::{goal_delta, percent_remaining, InsightSummary};
use crate::notifications::{collect_alerts, weekly_digest};
use crate::services::InsightService;
use crate::storage::{JsonStore, TransactionSource};
use crate::time::{Clock, FixedClock, SystemClock};
use crate::utils::{build_info, paths};

use output::{progress_bar, Styler};

/// Owner recorded for transactions entered locally.
pub const DEFAULT_OWNER: &str = "local";

#[derive(Debug, Parser)]
#[command(name = "budget_buddy_cli", about = "Spending insights for Budget Buddy data")]
pub struct Cli {
    /// Base directory holding `data/` and `settings/`.
    #[arg(long, global = true, env = "BUDGET_BUDDY_HOME")]
    pub home: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub plain: bool,

    /// Owner whose transactions are read and written.
    #[arg(long, global = true, default_value = DEFAULT_OWNER)]
    pub owner: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current-month spending summary with advice.
    Summary(SummaryArgs),
    /// Budget progress.
    Budgets,
    /// Savings goal progress.
    Goals,
    /// Average daily spending over a trailing window.
    BurnRate {
        #[arg(long)]
        days: Option<i64>,
    },
    /// Largest expense categories for a month.
    Top {
        #[arg(short, long)]
        k: Option<usize>,
        /// Month as `YYYY-MM`; defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },
    /// Budget and goal alerts.
    Alerts,
    /// Print the advisor prompt for a question.
    Prompt {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Record a transaction.
    AddTransaction(AddTransactionArgs),
    /// Store the monthly allowance in settings.
    SetAllowance { amount: f64 },
    /// Build metadata.
    Version,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Overrides the allowance stored in settings.
    #[arg(long)]
    pub allowance: Option<f64>,
    /// Month as `YYYY-MM`; defaults to the current month.
    #[arg(long)]
    pub month: Option<String>,
    /// Emit the full snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

#[derive(Debug, Args)]
pub struct AddTransactionArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub amount: f64,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

/// Parses arguments from the process and runs the command against stdout.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let styler = Styler::new(cli.plain || std::env::var_os("NO_COLOR").is_some());
    if styler.plain {
        colored::control::set_override(false);
    }
    let home = cli.home.clone().unwrap_or_else(paths::app_data_dir);
    let ctx = Context::open(home, cli.owner.clone(), styler)?;

    match cli.command {
        Command::Summary(args) => ctx.summary(args, out),
        Command::Budgets => ctx.budgets(out),
        Command::Goals => ctx.goals(out),
        Command::BurnRate { days } => ctx.burn_rate(days, out),
        Command::Top { k, month } => ctx.top(k, month, out),
        Command::Alerts => ctx.alerts(out),
        Command::Prompt { question } => ctx.prompt(&question.join(" "), out),
        Command::AddTransaction(args) => ctx.add_transaction(args, out),
        Command::SetAllowance { amount } => ctx.set_allowance(amount, out),
        Command::Version => {
            writeln!(out, "{}", build_info::current().summary())?;
            Ok(())
        }
    }
}

struct Context {
    store: JsonStore,
    settings: SettingsManager<FileKeyValueStore>,
    owner: String,
    styler: Styler,
}

impl Context {
    fn open(home: PathBuf, owner: String, styler: Styler) -> Result<Self> {
        let store = JsonStore::new(paths::data_dir_in(&home))?;
        let settings =
            SettingsManager::new(FileKeyValueStore::new(paths::settings_dir_in(&home))?);
        tracing::debug!(home = %home.display(), owner = %owner, "opened data directory");
        Ok(Self {
            store,
            settings,
            owner,
            styler,
        })
    }

    fn transactions(&self) -> Result<Vec<Transaction>> {
        self.store.list_for_owner(&self.owner)
    }

    fn summary<W: Write>(&self, args: SummaryArgs, out: &mut W) -> Result<()> {
        let settings = self.settings.load()?;
        let allowance = args.allowance.unwrap_or(settings.monthly_allowance);
        let clock = month_clock(args.month.as_deref())?;
        let label = clock.now().format("%Y-%m").to_string();
        let service = InsightService::new(clock);
        let transactions = self.transactions()?;
        let snapshot = service.snapshot(
            &transactions,
            allowance,
            settings.burn_window_days,
            settings.top_k,
            &settings.money_format(),
        );

        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            return Ok(());
        }

        let money = settings.money_format();
        let summary = &snapshot.summary;
        writeln!(out, "{}", self.styler.section(format!("Summary {label}")))?;
        writeln!(out, "{}", self.styler.field("Spent", money.format(summary.total_expense)))?;
        writeln!(out, "{}", self.styler.field("Income", money.format(summary.total_income)))?;
        writeln!(
            out,
            "{}",
            self.styler.field(
                "Allowance",
                format!(
                    "{} {:.0}% used",
                    progress_bar(summary.allowance_used_pct, 20),
                    summary.allowance_used_pct
                )
            )
        )?;
        writeln!(out, "{}", self.styler.field("Top", top_label(summary, &money)))?;
        writeln!(
            out,
            "{}",
            self.styler.field(
                "Trend",
                self.styler.trend(
                    summary.trend_direction,
                    format!(
                        "{:?} {} vs {}",
                        summary.trend_direction,
                        money.format(summary.trend_diff.abs()),
                        money.format(summary.prev_expenses_total)
                    )
                    .to_lowercase()
                )
            )
        )?;
        writeln!(out)?;
        writeln!(out, "{}", snapshot.text.status)?;
        writeln!(out, "Advice: {}", snapshot.text.advice)?;
        Ok(())
    }

    fn budgets<W: Write>(&self, out: &mut W) -> Result<()> {
        let money = self.settings.load()?.money_format();
        let budgets = self.store.load_budgets()?;
        writeln!(out, "{}", self.styler.section("Budgets"))?;
        if budgets.is_empty() {
            writeln!(out, "No budgets yet.")?;
        }
        for budget in &budgets {
            let remaining = percent_remaining(budget);
            writeln!(
                out,
                "{} {:<16} {} of {} ({:.0}% left)",
                progress_bar(100.0 - remaining, 20),
                budget.category,
                money.format(budget.spent),
                money.format(budget.total),
                remaining
            )?;
        }
        Ok(())
    }

    fn goals<W: Write>(&self, out: &mut W) -> Result<()> {
        let money = self.settings.load()?.money_format();
        let goals = self.store.load_goals()?;
        writeln!(out, "{}", self.styler.section("Goals"))?;
        if goals.is_empty() {
            writeln!(out, "No goals yet.")?;
        }
        for goal in &goals {
            let delta = goal_delta(goal);
            writeln!(
                out,
                "{} {:<16} {:.0}% ({} to go)",
                progress_bar(delta.pct, 20),
                goal.name,
                delta.pct,
                money.format(delta.remaining)
            )?;
        }
        Ok(())
    }

    fn burn_rate<W: Write>(&self, days: Option<i64>, out: &mut W) -> Result<()> {
        let settings = self.settings.load()?;
        let days = days.unwrap_or(settings.burn_window_days);
        let rate = InsightService::new(SystemClock)
            .burn_rate(&self.transactions()?, days);
        let money = settings.money_format();
        writeln!(
            out,
            "{}",
            self.styler
                .field("Burn rate", format!("{} per day over {days} days", money.format(rate)))
        )?;
        Ok(())
    }

    fn top<W: Write>(&self, k: Option<usize>, month: Option<String>, out: &mut W) -> Result<()> {
        let settings = self.settings.load()?;
        let service = InsightService::new(month_clock(month.as_deref())?);
        let rows =
            service.top_categories(&self.transactions()?, k.unwrap_or(settings.top_k));
        let money = settings.money_format();
        writeln!(out, "{}", self.styler.section("Top categories"))?;
        if rows.is_empty() {
            writeln!(out, "No expenses logged for this month.")?;
        }
        for (rank, row) in rows.iter().enumerate() {
            writeln!(out, "{}. {} {}", rank + 1, row.category, money.format(row.amount))?;
        }
        Ok(())
    }

    fn alerts<W: Write>(&self, out: &mut W) -> Result<()> {
        let settings = self.settings.load()?;
        let alerts = collect_alerts(
            &self.store.load_budgets()?,
            &self.store.load_goals()?,
            &settings.notifications,
        );
        if alerts.is_empty() {
            writeln!(out, "No alerts.")?;
        }
        for alert in &alerts {
            writeln!(
                out,
                "{}",
                self.styler
                    .alert(alert.kind, format!("{}: {}", alert.title, alert.message))
            )?;
        }
        let digest = weekly_digest(
            &self.transactions()?,
            SystemClock.now(),
            &settings.money_format(),
            &settings.notifications,
        );
        if let Some(digest) = digest {
            writeln!(out, "{digest}")?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, question: &str, out: &mut W) -> Result<()> {
        let settings = self.settings.load()?;
        let money = settings.money_format();
        let text = InsightService::new(SystemClock).text(
            &self.transactions()?,
            settings.monthly_allowance,
            &money,
        );
        let budgets = self.store.load_budgets()?;
        let goals = self.store.load_goals()?;
        let prompt = AdvisorPrompt::new(question)
            .with_insights(&text)
            .with_budgets(&budgets)
            .with_goals(&goals)
            .with_money_format(money);
        writeln!(out, "{}", prompt.render())?;
        Ok(())
    }

    fn add_transaction<W: Write>(&self, args: AddTransactionArgs, out: &mut W) -> Result<()> {
        if !args.amount.is_finite() || args.amount < 0.0 {
            return Err(BuddyError::Invalid("amount must be a non-negative number".into()));
        }
        let date = match args.date.as_deref() {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| BuddyError::Invalid(format!("unrecognised date `{raw}`")))?,
            None => Utc::now(),
        };
        let kind = match args.kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        };
        let mut txn =
            Transaction::new(self.owner.clone(), kind, args.category, args.amount, date);
        if let Some(description) = args.description {
            txn = txn.with_description(description);
        }
        let saved = self.store.add_transaction(txn)?;
        writeln!(out, "{}", self.styler.success(format!("Added {}", saved.display_label())))?;
        Ok(())
    }

    fn set_allowance<W: Write>(&self, amount: f64, out: &mut W) -> Result<()> {
        let updated: Settings = self
            .settings
            .update(|settings| settings.monthly_allowance = amount)?;
        writeln!(
            out,
            "{}",
            self.styler.success(format!(
                "Monthly allowance set to {}",
                updated.money_format().format(updated.monthly_allowance)
            ))
        )?;
        Ok(())
    }
}

fn top_label(summary: &InsightSummary, money: &crate::currency::MoneyFormat) -> String {
    match &summary.top_category_name {
        Some(name) => format!("{name} ({})", money.format(summary.top_category_amount)),
        None => "none".to_string(),
    }
}

/// Clock pinned to the last second of the requested month, or the system time.
///
/// Pinning to the month's end keeps trailing windows such as the burn rate
/// inside that month.
fn month_clock(month: Option<&str>) -> Result<FixedClock> {
    let Some(month) = month else {
        return Ok(FixedClock(SystemClock.now()));
    };
    let invalid = || BuddyError::Invalid(format!("month must look like YYYY-MM, got `{month}`"));
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| invalid())?;
    let last_day = days_in_month(first.year(), first.month());
    let reference: DateTime<Utc> = first
        .with_day(last_day)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)?;
    Ok(FixedClock(reference))
}
