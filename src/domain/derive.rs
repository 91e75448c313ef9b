//! Fundamentals deriver: normalized ratios, growth rates, moat commentary.

use serde::Serialize;

use super::fundamentals::{self, parse_field, RawFundamentals, StatementYear};
use super::settings::RatioScale;

pub const MOAT_POSSIBLE: &str = "Consistently profitable with good growth – possible moat.";
pub const MOAT_LOW_ROE: &str = "Low ROE – weak capital efficiency.";
pub const MOAT_TOO_EARLY: &str = "Too early to judge moat.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundamentalsReport {
    pub symbol: String,
    pub name: String,
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub peg: Option<f64>,
    pub pb: Option<f64>,
    pub roe: Option<f64>,
    pub roce: Option<f64>,
    pub profit_margin: Option<f64>,
    pub revenue_cagr_5y: Option<f64>,
    pub net_income_cagr_5y: Option<f64>,
    pub moat_comment: String,
}

/// Derive the fundamentals report.
///
/// `balance` must be sorted newest-first: the ROCE approximation reads the
/// first element as the latest fiscal year (see
/// [`fundamentals::sort_newest_first`]). The cash-flow history is accepted
/// for interface parity but no derivation uses it. `income` may arrive in
/// any order; the growth math sorts it itself.
pub fn derive(
    raw: &RawFundamentals,
    income: &[StatementYear],
    balance: &[StatementYear],
    _cash: &[StatementYear],
    scale: RatioScale,
) -> FundamentalsReport {
    let market_cap = parse_field(raw.market_capitalization.as_deref());
    let pe = parse_field(raw.pe_ratio.as_deref());
    let peg = parse_field(raw.peg_ratio.as_deref());
    let pb = parse_field(raw.price_to_book_ratio.as_deref());
    let roe = rescale(parse_field(raw.return_on_equity_ttm.as_deref()), scale);
    let profit_margin = rescale(parse_field(raw.profit_margin.as_deref()), scale);

    let roce = roce_approx(parse_field(raw.ebitda.as_deref()), balance.first());

    let income_sorted = fundamentals::sort_ascending(income.to_vec());
    let revenue_cagr_5y = five_year_cagr(&income_sorted, |y| y.total_revenue);
    let net_income_cagr_5y = five_year_cagr(&income_sorted, |y| y.net_income);

    let moat_comment =
        moat_commentary(revenue_cagr_5y, roe, profit_margin).to_string();

    FundamentalsReport {
        symbol: raw.symbol.clone(),
        name: raw.name.clone().unwrap_or_else(|| raw.symbol.clone()),
        market_cap,
        pe,
        peg,
        pb,
        roe,
        roce,
        profit_margin,
        revenue_cagr_5y,
        net_income_cagr_5y,
        moat_comment,
    }
}

/// Percentage-like ratios arrive inconsistently scaled (0.18 vs 18).
/// `Fraction` passes through untouched; `Percent` divides by 100.
fn rescale(value: Option<f64>, scale: RatioScale) -> Option<f64> {
    match scale {
        RatioScale::Fraction => value,
        RatioScale::Percent => value.map(|v| v / 100.0),
    }
}

/// EBITDA over capital employed, where capital employed is approximated as
/// total assets minus total liabilities (shareholder equity, not the
/// conventional assets-minus-current-liabilities). Kept as-is for
/// compatibility with the upstream definition. Missing balance figures count
/// as 0 inside the subtraction only; a non-positive capital employed makes
/// the whole ratio undefined.
fn roce_approx(ebitda: Option<f64>, latest_balance: Option<&StatementYear>) -> Option<f64> {
    let ebitda = ebitda?;
    let latest = latest_balance?;
    let capital_employed =
        latest.total_assets.unwrap_or(0.0) - latest.total_liabilities.unwrap_or(0.0);
    if capital_employed > 0.0 {
        Some(ebitda / capital_employed)
    } else {
        None
    }
}

/// `(last/first)^(1/5) - 1` between the most recent year and the year five
/// positions earlier in an ascending history. Undefined with fewer than 5
/// years or when either endpoint is missing or non-positive: negative bases
/// are meaningless under this formula and are never coerced.
fn five_year_cagr(
    ascending: &[StatementYear],
    field: fn(&StatementYear) -> Option<f64>,
) -> Option<f64> {
    if ascending.len() < 5 {
        return None;
    }
    let first = field(&ascending[ascending.len() - 5])?;
    let last = field(&ascending[ascending.len() - 1])?;
    if first > 0.0 && last > 0.0 {
        Some((last / first).powf(1.0 / 5.0) - 1.0)
    } else {
        None
    }
}

/// First match wins. The growth rule treats missing inputs as 0 for its
/// threshold comparisons only; the low-ROE rule requires ROE to actually be
/// present, so an all-missing record falls through to the default message.
fn moat_commentary(
    revenue_cagr_5y: Option<f64>,
    roe: Option<f64>,
    profit_margin: Option<f64>,
) -> &'static str {
    let growth = revenue_cagr_5y.unwrap_or(0.0);
    let roe_level = roe.unwrap_or(0.0);
    let margin = profit_margin.unwrap_or(0.0);

    if growth > 0.10 && roe_level > 0.15 && margin > 0.10 {
        MOAT_POSSIBLE
    } else if matches!(roe, Some(r) if r < 0.10) {
        MOAT_LOW_ROE
    } else {
        MOAT_TOO_EARLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(symbol: &str) -> RawFundamentals {
        RawFundamentals {
            symbol: symbol.to_string(),
            ..RawFundamentals::default()
        }
    }

    fn year(date: &str, revenue: Option<f64>, net_income: Option<f64>) -> StatementYear {
        StatementYear {
            fiscal_date_ending: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total_revenue: revenue,
            net_income,
            total_assets: None,
            total_liabilities: None,
            total_shareholder_equity: None,
            operating_cashflow: None,
        }
    }

    fn balance_year(date: &str, assets: Option<f64>, liabilities: Option<f64>) -> StatementYear {
        StatementYear {
            fiscal_date_ending: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            total_revenue: None,
            net_income: None,
            total_assets: assets,
            total_liabilities: liabilities,
            total_shareholder_equity: None,
            operating_cashflow: None,
        }
    }

    #[test]
    fn passthrough_ratios_parse_or_stay_absent() {
        let mut input = raw("ACME");
        input.market_capitalization = Some("1000000".into());
        input.pe_ratio = Some("15.5".into());
        input.peg_ratio = Some("None".into());
        input.price_to_book_ratio = Some("-".into());
        input.return_on_equity_ttm = Some("0.18".into());
        input.profit_margin = Some("bogus".into());

        let report = derive(&input, &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.market_cap, Some(1_000_000.0));
        assert_eq!(report.pe, Some(15.5));
        assert_eq!(report.peg, None);
        assert_eq!(report.pb, None);
        assert_eq!(report.roe, Some(0.18));
        assert_eq!(report.profit_margin, None);
    }

    #[test]
    fn name_falls_back_to_symbol() {
        let report = derive(&raw("ACME"), &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.name, "ACME");

        let mut named = raw("ACME");
        named.name = Some("Acme Corp".into());
        let report = derive(&named, &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.name, "Acme Corp");
    }

    #[test]
    fn percent_scale_divides_percentage_like_ratios() {
        let mut input = raw("ACME");
        input.return_on_equity_ttm = Some("18".into());
        input.profit_margin = Some("12".into());
        input.pe_ratio = Some("20".into());

        let report = derive(&input, &[], &[], &[], RatioScale::Percent);
        assert!((report.roe.unwrap() - 0.18).abs() < 1e-12);
        assert!((report.profit_margin.unwrap() - 0.12).abs() < 1e-12);
        // P/E is not percentage-like and is never rescaled.
        assert_eq!(report.pe, Some(20.0));
    }

    #[test]
    fn roce_from_latest_balance_year() {
        let mut input = raw("ACME");
        input.ebitda = Some("50".into());
        let balance = vec![
            balance_year("2023-12-31", Some(1000.0), Some(600.0)),
            balance_year("2022-12-31", Some(900.0), Some(500.0)),
        ];
        let report = derive(&input, &[], &balance, &[], RatioScale::Fraction);
        // 50 / (1000 - 600)
        assert!((report.roce.unwrap() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn roce_undefined_when_capital_employed_non_positive() {
        let mut input = raw("ACME");
        input.ebitda = Some("500".into());
        let balance = vec![balance_year("2023-12-31", Some(600.0), Some(800.0))];
        let report = derive(&input, &[], &balance, &[], RatioScale::Fraction);
        assert_eq!(report.roce, None);
    }

    #[test]
    fn roce_undefined_without_ebitda_or_balance() {
        let report = derive(&raw("ACME"), &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.roce, None);

        let mut input = raw("ACME");
        input.ebitda = Some("50".into());
        let report = derive(&input, &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.roce, None);
    }

    #[test]
    fn five_year_cagr_doubling_revenue() {
        // 100 → 200 over the 5-year span: (2)^(1/5) - 1 ≈ 0.1487.
        let income = vec![
            year("2019-12-31", Some(100.0), None),
            year("2020-12-31", Some(120.0), None),
            year("2021-12-31", Some(140.0), None),
            year("2022-12-31", Some(170.0), None),
            year("2023-12-31", Some(200.0), None),
        ];
        let report = derive(&raw("ACME"), &income, &[], &[], RatioScale::Fraction);
        assert!((report.revenue_cagr_5y.unwrap() - 0.148698).abs() < 1e-5);
        assert_eq!(report.net_income_cagr_5y, None);
    }

    #[test]
    fn five_year_cagr_sorts_unordered_history() {
        let income = vec![
            year("2022-12-31", Some(170.0), None),
            year("2019-12-31", Some(100.0), None),
            year("2023-12-31", Some(200.0), None),
            year("2020-12-31", Some(120.0), None),
            year("2021-12-31", Some(140.0), None),
        ];
        let report = derive(&raw("ACME"), &income, &[], &[], RatioScale::Fraction);
        assert!((report.revenue_cagr_5y.unwrap() - 0.148698).abs() < 1e-5);
    }

    #[test]
    fn five_year_cagr_requires_five_years() {
        let income = vec![
            year("2020-12-31", Some(100.0), None),
            year("2021-12-31", Some(120.0), None),
            year("2022-12-31", Some(140.0), None),
            year("2023-12-31", Some(200.0), None),
        ];
        let report = derive(&raw("ACME"), &income, &[], &[], RatioScale::Fraction);
        assert_eq!(report.revenue_cagr_5y, None);
    }

    #[test]
    fn five_year_cagr_undefined_on_non_positive_base() {
        let income = vec![
            year("2019-12-31", Some(-50.0), Some(-50.0)),
            year("2020-12-31", Some(120.0), Some(10.0)),
            year("2021-12-31", Some(140.0), Some(20.0)),
            year("2022-12-31", Some(170.0), Some(30.0)),
            year("2023-12-31", Some(200.0), Some(40.0)),
        ];
        let report = derive(&raw("ACME"), &income, &[], &[], RatioScale::Fraction);
        // Negative-to-positive is not meaningful and must not be coerced.
        assert_eq!(report.revenue_cagr_5y, None);
        assert_eq!(report.net_income_cagr_5y, None);
    }

    #[test]
    fn moat_possible_on_growth_and_profitability() {
        let mut input = raw("ACME");
        input.return_on_equity_ttm = Some("0.20".into());
        input.profit_margin = Some("0.15".into());
        let income = vec![
            year("2019-12-31", Some(100.0), None),
            year("2020-12-31", Some(120.0), None),
            year("2021-12-31", Some(140.0), None),
            year("2022-12-31", Some(170.0), None),
            year("2023-12-31", Some(200.0), None),
        ];
        let report = derive(&input, &income, &[], &[], RatioScale::Fraction);
        assert!(report.revenue_cagr_5y.unwrap() > 0.10);
        assert_eq!(report.moat_comment, MOAT_POSSIBLE);
    }

    #[test]
    fn moat_low_roe_when_roe_present_and_weak() {
        let mut input = raw("ACME");
        input.return_on_equity_ttm = Some("0.05".into());
        let report = derive(&input, &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.moat_comment, MOAT_LOW_ROE);
    }

    #[test]
    fn moat_default_on_all_missing_inputs() {
        let report = derive(&raw("ACME"), &[], &[], &[], RatioScale::Fraction);
        assert_eq!(report.moat_comment, MOAT_TOO_EARLY);
    }

    #[test]
    fn idempotent_on_identical_input() {
        let mut input = raw("ACME");
        input.return_on_equity_ttm = Some("0.12".into());
        input.ebitda = Some("50".into());
        let balance = vec![balance_year("2023-12-31", Some(1000.0), Some(600.0))];
        let a = derive(&input, &[], &balance, &[], RatioScale::Fraction);
        let b = derive(&input, &[], &balance, &[], RatioScale::Fraction);
        assert_eq!(a, b);
    }
}
