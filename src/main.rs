use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, LevelFilter};
use miette::{IntoDiagnostic, Result};
use payoff::labels::{label, Field, Locale};
use payoff::loan::{amortize, LoanState, Period, Summary};
use payoff::series::{
    balance_series, cumulative_payments, milestones, payment_series, PaidVsRemaining,
};
use rust_decimal::Decimal;
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Balance outstanding at the start date
    #[arg(long, default_value = "168000")]
    principal: Decimal,

    /// Fixed monthly payment
    #[arg(long, default_value = "1667")]
    payment: Decimal,

    /// Month of the first payment (YYYY-MM-DD)
    #[arg(long, default_value = "2025-01-01")]
    start: NaiveDate,

    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output language: en or ar
    #[arg(long, default_value = "en")]
    lang: Locale,

    /// Log every schedule row
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .into_diagnostic()?;

    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let loan = LoanState::new(cli.principal, cli.payment, cli.start).into_diagnostic()?;
    info!("projecting {:?} as of {}", loan, as_of);

    let (schedule, summary) = amortize(&loan, as_of).into_diagnostic()?;

    show_summary(&summary, cli.lang);
    println!();
    show_schedule(&schedule, cli.lang);
    println!();
    show_charts(&schedule, &summary, cli.lang);

    Ok(())
}

fn show_summary(summary: &Summary, lang: Locale) {
    let split = PaidVsRemaining::from(summary);

    println!("{}", label(Field::Title, lang));
    println!("{}: {}", label(Field::ElapsedPeriods, lang), summary.elapsed_periods);
    println!("{}: {}", label(Field::RemainingPeriods, lang), summary.remaining_periods);
    println!("{}: {:.2}", label(Field::CurrentBalance, lang), split.remaining);
    println!("{}: {:.2}", label(Field::PaidAmount, lang), split.paid);
    println!("{}: {}", label(Field::PayoffDate, lang), summary.payoff_date);
    println!("{}: {:.1}", label(Field::Completion, lang), summary.completion_pct);
}

fn show_schedule(schedule: &[Period], lang: Locale) {
    let header = [
        label(Field::Period, lang).to_string(),
        label(Field::Month, lang).to_string(),
        label(Field::Payment, lang).to_string(),
        label(Field::RemainingBalance, lang).to_string(),
        label(Field::CumulativePayments, lang).to_string(),
    ];
    print_row(header, lang);

    for (period, (_, paid_so_far)) in schedule.iter().zip(cumulative_payments(schedule)) {
        print_row(
            [
                period.index.to_string(),
                period.period_date.format("%Y-%m").to_string(),
                format!("{:.2}", period.payment_amount),
                format!("{:.2}", period.remaining_balance),
                format!("{:.2}", paid_so_far),
            ],
            lang,
        );
    }
}

// yearly points of each chart the dashboard draws
fn show_charts(schedule: &[Period], summary: &Summary, lang: Locale) {
    let charts = [
        (Field::BalanceOverTime, balance_series(schedule)),
        (Field::PaymentProgress, payment_series(schedule)),
        (Field::CumulativeProgress, cumulative_payments(schedule)),
    ];
    for (title, series) in charts {
        println!("{}", label(title, lang));
        for (period_date, value) in milestones(&series) {
            print_row(
                [
                    period_date.format("%Y-%m").to_string(),
                    format!("{:.2}", value),
                ],
                lang,
            );
        }
        println!();
    }

    let split = PaidVsRemaining::from(summary);
    println!("{}", label(Field::PaidVsRemaining, lang));
    print_row(
        [label(Field::Paid, lang).to_string(), format!("{:.2}", split.paid)],
        lang,
    );
    print_row(
        [
            label(Field::Remaining, lang).to_string(),
            format!("{:.2}", split.remaining),
        ],
        lang,
    );
    println!();

    println!("{}", label(Field::CompletionProgress, lang));
    println!("{:.1}%", summary.completion_pct);
}

fn print_row<const N: usize>(mut cells: [String; N], lang: Locale) {
    if lang.is_right_to_left() {
        cells.reverse();
    }
    println!("{}", cells.join(" | "));
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<LoanState>();
    is_normal::<Period>();
    is_normal::<Summary>();
    is_normal::<payoff::loan::ScheduleIter>();
}
