use crate::error::LoanError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

impl Locale {
    pub fn is_right_to_left(self) -> bool {
        self == Locale::Arabic
    }
}

impl FromStr for Locale {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ar" | "arabic" => Ok(Locale::Arabic),
            other => Err(LoanError::InvalidInput(format!(
                "unsupported language '{}', expected en or ar",
                other
            ))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Arabic => write!(f, "ar"),
        }
    }
}

/// Every piece of text the dashboard shows next to a computed value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Title,
    Period,
    Month,
    Payment,
    RemainingBalance,
    CumulativePayments,
    ElapsedPeriods,
    RemainingPeriods,
    CurrentBalance,
    PaidAmount,
    PayoffDate,
    Completion,
    Paid,
    Remaining,
    BalanceOverTime,
    PaymentProgress,
    PaidVsRemaining,
    CumulativeProgress,
    CompletionProgress,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Title,
        Field::Period,
        Field::Month,
        Field::Payment,
        Field::RemainingBalance,
        Field::CumulativePayments,
        Field::ElapsedPeriods,
        Field::RemainingPeriods,
        Field::CurrentBalance,
        Field::PaidAmount,
        Field::PayoffDate,
        Field::Completion,
        Field::Paid,
        Field::Remaining,
        Field::BalanceOverTime,
        Field::PaymentProgress,
        Field::PaidVsRemaining,
        Field::CumulativeProgress,
        Field::CompletionProgress,
    ];

    // [english, arabic]
    fn texts(self) -> [&'static str; 2] {
        match self {
            Field::Title => ["Mortgage Payoff Schedule", "جدول سداد الرهن العقاري"],
            Field::Period => ["#", "#"],
            Field::Month => ["Month", "الشهر"],
            Field::Payment => ["Monthly Payment (Riyals)", "الدفعة الشهرية (ريال)"],
            Field::RemainingBalance => ["Remaining Balance (Riyals)", "الرصيد المتبقي (ريال)"],
            Field::CumulativePayments => ["Cumulative Payments", "المدفوعات التراكمية"],
            Field::ElapsedPeriods => ["Months Paid", "الأشهر المدفوعة"],
            Field::RemainingPeriods => ["Months Remaining", "الأشهر المتبقية"],
            Field::CurrentBalance => ["Current Balance", "الرصيد الحالي"],
            Field::PaidAmount => ["Amount Paid", "المبلغ المدفوع"],
            Field::PayoffDate => ["Expected Payoff Date", "تاريخ السداد المتوقع"],
            Field::Completion => ["Mortgage Completion (%)", "نسبة إنجاز السداد (%)"],
            Field::Paid => ["Paid", "المدفوع"],
            Field::Remaining => ["Remaining", "المتبقي"],
            Field::BalanceOverTime => ["Remaining Balance Over Time", "الرصيد المتبقي عبر الزمن"],
            Field::PaymentProgress => ["Monthly Payment Progress", "تقدم الدفعات الشهرية"],
            Field::PaidVsRemaining => ["Paid vs. Remaining Balance", "المدفوع مقابل الرصيد المتبقي"],
            Field::CumulativeProgress => ["Cumulative Payment Progress", "تقدم المدفوعات التراكمية"],
            Field::CompletionProgress => ["Mortgage Completion Progress", "تقدم إنجاز السداد"],
        }
    }
}

pub fn label(field: Field, locale: Locale) -> &'static str {
    let [english, arabic] = field.texts();
    match locale {
        Locale::English => english,
        Locale::Arabic => arabic,
    }
}
