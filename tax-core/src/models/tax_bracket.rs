use rust_decimal::Decimal;

/// Number of brackets in the progressive schedule.
pub const BRACKET_COUNT: usize = 5;

/// One tier of the progressive income tax schedule.
///
/// A bracket spans `(min_income, max_income]`; the top bracket has no upper
/// bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBracket {
    pub label: &'static str,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    fn new(
        label: &'static str,
        min_income: i64,
        max_income: Option<i64>,
        rate_percent: i64,
    ) -> Self {
        Self {
            label,
            min_income: Decimal::from(min_income),
            max_income: max_income.map(Decimal::from),
            tax_rate: Decimal::new(rate_percent, 2),
        }
    }
}

/// The fixed five-tier schedule, lowest bracket first.
///
/// | Bracket | Taxable income | Rate |
/// |---------|----------------|------|
/// | 1 | 0 – 150,000 | 0% |
/// | 2 | 150,001 – 500,000 | 10% |
/// | 3 | 500,001 – 1,000,000 | 15% |
/// | 4 | 1,000,001 – 2,000,000 | 20% |
/// | 5 | 2,000,001 and above | 35% |
pub fn standard_schedule() -> [TaxBracket; BRACKET_COUNT] {
    [
        TaxBracket::new("0-150,000", 0, Some(150_000), 0),
        TaxBracket::new("150,001-500,000", 150_000, Some(500_000), 10),
        TaxBracket::new("500,001-1,000,000", 500_000, Some(1_000_000), 15),
        TaxBracket::new("1,000,001-2,000,000", 1_000_000, Some(2_000_000), 20),
        TaxBracket::new("2,000,001 ขึ้นไป", 2_000_000, None, 35),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn schedule_is_contiguous() {
        let schedule = standard_schedule();

        for pair in schedule.windows(2) {
            assert_eq!(pair[0].max_income, Some(pair[1].min_income));
        }
        assert_eq!(schedule[0].min_income, dec!(0));
        assert_eq!(schedule[4].max_income, None);
    }

    #[test]
    fn schedule_rates() {
        let rates: Vec<Decimal> = standard_schedule().iter().map(|b| b.tax_rate).collect();

        assert_eq!(
            rates,
            vec![dec!(0), dec!(0.10), dec!(0.15), dec!(0.20), dec!(0.35)]
        );
    }
}
