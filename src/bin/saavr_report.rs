use std::{env, fs, path::PathBuf};

use colored::Colorize;
use saavr_core::{
    chart::{render_donut, DonutChart, DonutLayout},
    config::{ConfigError, ConfigManager},
    core::{
        services::{BudgetStatus, SummaryService},
        LedgerStore,
    },
    currency::format_currency,
    errors::LedgerError,
    init,
    ledger::{clamp_to_ceiling, SystemClock, YearMonth},
    storage::JsonFileStore,
    utils::color::{Rgb, RING_BACKGROUND},
};
use thiserror::Error;

const USAGE: &str = "usage: saavr_report [--month YYYY-MM] [--svg PATH]";

#[derive(Debug, Error)]
enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}\n{}", USAGE)]
    Usage(String),
}

#[derive(Debug, Default)]
struct Options {
    month: Option<YearMonth>,
    svg: Option<PathBuf>,
    help: bool,
}

fn main() {
    init();

    if let Err(err) = run(env::args().skip(1).collect()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn parse_args(args: Vec<String>) -> Result<Options, ReportError> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--month" => {
                let raw = args
                    .next()
                    .ok_or_else(|| ReportError::Usage("--month needs a value".into()))?;
                let month = raw
                    .parse::<YearMonth>()
                    .map_err(|err| ReportError::Usage(err.to_string()))?;
                options.month = Some(month);
            }
            "--svg" => {
                let path = args
                    .next()
                    .ok_or_else(|| ReportError::Usage("--svg needs a path".into()))?;
                options.svg = Some(PathBuf::from(path));
            }
            "-h" | "--help" => options.help = true,
            other => return Err(ReportError::Usage(format!("unknown argument `{other}`"))),
        }
    }
    Ok(options)
}

fn run(args: Vec<String>) -> Result<(), ReportError> {
    let options = parse_args(args)?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = ConfigManager::new()?.load()?;
    let backend = JsonFileStore::new(config.resolve_data_dir())?;
    let (store, report) = LedgerStore::open(Box::new(backend), Box::new(SystemClock))?;
    for warning in &report.warnings {
        println!("{}", format!("WARNING: [!] {warning}").bright_yellow());
    }

    let month = match options.month {
        Some(month) => clamp_to_ceiling(month, &SystemClock),
        None => store.selected_month(),
    };
    let symbol = config.currency_symbol.as_str();
    let money = |amount: f64| format_currency(amount, symbol);
    let summary = store.summary_for(month);

    println!(
        "{}",
        format!("=== {} ===", month.label_localized(config.chrono_locale())).bold()
    );
    println!("Income      {}", money(summary.income));
    println!("Budgeted    {}", money(summary.total_budgeted));
    println!("Spent       {}", money(summary.total_spent));
    let remaining = format!("Remaining   {}", money(summary.remaining));
    if summary.remaining < 0.0 {
        println!("{}", remaining.bright_red());
    } else {
        println!("{}", remaining.bright_green());
    }
    if summary.uncategorized_spent > 0.0 {
        println!("Uncategorized {}", money(summary.uncategorized_spent));
    }

    if !summary.categories.is_empty() {
        println!("\n{}", "=== Categories ===".bold());
    }
    for row in &summary.categories {
        let line = format!(
            "{:<20} {:>10} / {:<10} {}",
            row.name,
            money(row.spent),
            money(row.budget),
            money(row.remaining)
        );
        if row.is_over() {
            println!("{}", line.bright_red());
        } else if row.status == BudgetStatus::OnTrack {
            println!("{}", line.bright_yellow());
        } else {
            println!("{line}");
        }
    }

    let ledger = store.ledger();
    let transactions = SummaryService::transactions_in_month(ledger, month);
    if !transactions.is_empty() {
        println!("\n{}", "=== Transactions ===".bold());
    }
    for txn in transactions {
        let swatch = Rgb::from_hex(ledger.swatch(&txn.kind)).unwrap_or(RING_BACKGROUND);
        println!(
            "{} {}  {:<20} {:>10}  {}",
            "●".truecolor(swatch.r, swatch.g, swatch.b),
            txn.date,
            txn.name,
            money(txn.amount),
            ledger.kind_label(&txn.kind)
        );
    }

    println!();
    match &summary.income_progress {
        Some(progress) => println!("{}", progress.label(symbol)),
        None => println!("Set your monthly income to track progress"),
    }
    let spend = summary.spend_progress.label(symbol);
    if summary.spend_progress.danger {
        println!("{}", spend.bright_red());
    } else {
        println!("{spend}");
    }

    if let Some(path) = options.svg {
        let chart = DonutChart::for_month(store.ledger(), month, DonutLayout::default())
            .with_currency(symbol);
        fs::write(&path, render_donut(&chart)).map_err(LedgerError::from)?;
        println!("Chart written to {}", path.display());
    }
    Ok(())
}
