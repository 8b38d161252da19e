use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::Config;
use crate::dates;
use crate::models::{Category, NewExpense};
use crate::service::Tracker;

/// Field-level validation lives here at the binary edge; the core assumes
/// its callers have already checked their inputs.
pub(crate) fn as_cli(args: &[String], tracker: &Tracker, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], tracker),
        "expenses" => cli_expenses(&args[2..], tracker),
        "dashboard" | "d" => cli_dashboard(&args[2..], tracker),
        "budget" => cli_budget(&args[2..], tracker),
        "status" => cli_status(config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("famledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("famledger — shared household expense tracker");
    println!();
    println!("Usage: famledger <command>");
    println!();
    println!("Commands:");
    println!("  add <DD/MM/YYYY> <member> <category> <amount> [description]");
    println!("                                Record an expense");
    println!("  expenses <YYYY-MM>            List a month's expenses");
    println!("  dashboard [YYYY-MM]           Month summary with breakdowns (default: current)");
    println!("  budget <YYYY-MM>              Show a month's budget");
    println!("  budget <YYYY-MM> <amount>     Set a month's budget");
    println!("  status                        Show effective configuration");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!(
        "Categories: {}",
        Category::all()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn cli_add(args: &[String], tracker: &Tracker) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!("Usage: famledger add <DD/MM/YYYY> <member> <category> <amount> [description]");
    }

    let date = args[0].clone();
    if !dates::is_valid_date(&date) {
        anyhow::bail!("Invalid or missing date (Expected DD/MM/YYYY)");
    }

    let member_name = args[1].trim().to_string();
    if member_name.is_empty() {
        anyhow::bail!("Missing or empty member name");
    }

    let category_raw = args[2].as_str();
    if !Category::is_known(category_raw) {
        anyhow::bail!(
            "Invalid category. Allowed: {}",
            Category::all()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let amount = Decimal::from_str(&args[3])
        .map_err(|_| anyhow::anyhow!("Amount must be a positive number"))?;
    if amount <= Decimal::ZERO {
        anyhow::bail!("Amount must be a positive number");
    }

    let description = args.get(4..).map(|rest| rest.join(" ")).unwrap_or_default();

    let expense = tracker.add_expense(NewExpense {
        date,
        member_name,
        category: Category::parse(category_raw),
        description,
        amount,
    })?;

    println!(
        "Recorded {:.2} for {} on {} ({})",
        expense.amount, expense.member_name, expense.date, expense.id
    );

    let summary = tracker.get_budget_summary(&expense.month)?;
    println!(
        "{}: spent {:.2} of {:.2}, remaining {:.2}",
        summary.month, summary.total_spent, summary.total_budget, summary.remaining_budget
    );
    Ok(())
}

fn cli_expenses(args: &[String], tracker: &Tracker) -> Result<()> {
    let month = require_month(args.first())?;

    let expenses = tracker.list_expenses(&month)?;
    if expenses.is_empty() {
        println!("No expenses for {month}");
        return Ok(());
    }

    println!(
        "{:<12} {:<16} {:<14} {:>12}  Description",
        "Date", "Member", "Category", "Amount"
    );
    println!("{}", "─".repeat(70));
    for e in &expenses {
        println!(
            "{:<12} {:<16} {:<14} {:>12.2}  {}",
            e.date,
            e.member_name,
            e.category.as_str(),
            e.amount,
            e.description
        );
    }
    println!("{}", "─".repeat(70));
    println!("{} expense(s)", expenses.len());
    Ok(())
}

fn cli_dashboard(args: &[String], tracker: &Tracker) -> Result<()> {
    let month = match args.first().filter(|a| !a.starts_with('-')) {
        Some(m) => require_month(Some(m))?,
        None => chrono::Local::now().format("%Y-%m").to_string(),
    };

    let dash = tracker.get_dashboard(&month)?;

    println!("famledger — {}", dash.month);
    println!("{}", "─".repeat(40));
    println!("  Budget:     {:.2}", dash.total_budget);
    println!("  Spent:      {:.2}", dash.total_spent);
    println!("  Remaining:  {:.2}", dash.remaining_budget);

    if !dash.category_breakdown.is_empty() {
        println!();
        println!("By category:");
        for (name, amount) in &dash.category_breakdown {
            println!("  {name:<16} {amount:>12.2}");
        }
    }

    if !dash.member_breakdown.is_empty() {
        println!();
        println!("By member:");
        for (name, amount) in &dash.member_breakdown {
            println!("  {name:<16} {amount:>12.2}");
        }
    }

    if !dash.daily_totals.is_empty() {
        println!();
        println!("By day:");
        for day in &dash.daily_totals {
            println!("  {:<12} {:>12.2}", day.date, day.amount);
        }
    }

    Ok(())
}

fn cli_budget(args: &[String], tracker: &Tracker) -> Result<()> {
    let month = require_month(args.first())?;

    match args.get(1) {
        None => {
            let summary = tracker.get_budget_summary(&month)?;
            print_budget_line(&summary);
        }
        Some(raw) => {
            let amount = Decimal::from_str(raw)
                .map_err(|_| anyhow::anyhow!("Total Budget must be a non-negative number"))?;
            if amount < Decimal::ZERO {
                anyhow::bail!("Total Budget must be a non-negative number");
            }
            let updated = tracker.set_budget(&month, amount)?;
            println!("Budget updated");
            print_budget_line(&updated);
        }
    }
    Ok(())
}

fn print_budget_line(b: &crate::models::BudgetRow) {
    println!(
        "{}: budget {:.2}, spent {:.2}, remaining {:.2}",
        b.month, b.total_budget, b.total_spent, b.remaining_budget
    );
    if !b.last_updated.is_empty() {
        println!("  last updated {}", b.last_updated);
    }
}

fn cli_status(config: &Config) -> Result<()> {
    println!("Workbook:       {}", config.workbook_path.display());
    println!("Archive dir:    {}", config.archive.dir.display());
    println!("Max live rows:  {}", config.archive.max_rows);
    println!("Archive chunk:  {}", config.archive.archive_chunk);
    println!(
        "Family PIN:     {}",
        if config.family_pin.is_some() { "configured" } else { "not set" }
    );
    println!(
        "Admin PIN:      {}",
        if config.admin_pin.is_some() { "configured" } else { "not set" }
    );
    Ok(())
}

fn require_month(arg: Option<&String>) -> Result<String> {
    match arg {
        Some(m) if dates::is_valid_month(m) => Ok(m.clone()),
        _ => anyhow::bail!("Invalid or missing month parameter (YYYY-MM)"),
    }
}
