use rust_decimal::Decimal;

use crate::error::{BidError, Result};
use crate::models::{BidLine, Category, Position, RawRow};
use crate::settings::Rates;

fn validate(row: &RawRow) -> Result<()> {
    if row.credit.is_sign_negative() && !row.credit.is_zero() {
        return Err(BidError::invalid(row.line_number, "credit", format!(
            "must not be negative, got {} (row {})",
            row.credit, row.row
        )));
    }
    if row.tafb.is_sign_negative() && !row.tafb.is_zero() {
        return Err(BidError::invalid(row.line_number, "tafb", format!(
            "must not be negative, got {} (row {})",
            row.tafb, row.row
        )));
    }
    if row.crew <= 0 {
        return Err(BidError::invalid(row.line_number, "crew", format!(
            "must be at least 1, got {} (row {})",
            row.crew, row.row
        )));
    }
    Ok(())
}

fn overflow(row: &RawRow, field: &str) -> BidError {
    BidError::invalid(row.line_number, field, format!("pay overflows (row {})", row.row))
}

/// Price one row for the given seat. Nothing is rounded here.
pub fn compute_line(row: &RawRow, category: Category, rates: &Rates) -> Result<BidLine> {
    validate(row)?;

    let pay_hours = row.credit.max(rates.guarantee_hours);
    let mut pay_credit = pay_hours
        .checked_mul(rates.hourly_rate)
        .ok_or_else(|| overflow(row, "credit"))?;
    if category.position == Position::Fmp {
        pay_credit = row
            .credit
            .checked_mul(rates.purser_hourly_rate)
            .and_then(|p| p.checked_add(rates.purser_premium))
            .and_then(|p| p.checked_add(pay_credit))
            .ok_or_else(|| overflow(row, "credit"))?;
    }
    if category.international {
        pay_credit = pay_credit
            .checked_add(rates.international_premium)
            .ok_or_else(|| overflow(row, "credit"))?;
    }
    let per_diem: Decimal = row
        .tafb
        .checked_mul(rates.per_diem_rate)
        .ok_or_else(|| overflow(row, "tafb"))?;

    BidLine::new(
        row.line_number,
        row.credit,
        row.tafb,
        row.crew,
        category.position,
        category.international,
        pay_credit,
        per_diem,
    )
    .ok_or_else(|| overflow(row, "tafb"))
}

fn parse_category(row: &RawRow) -> Result<Category> {
    Category::parse(&row.category)
        .map_err(|msg| BidError::invalid(row.line_number, "category", format!("{msg} (row {})", row.row)))
}

/// Price every row in source order.
///
/// With `split_crew`, a row with more than one crew position is priced twice,
/// once per seat, since it can be bid as either FMP or Any FA.
pub fn compute_lines(rows: &[RawRow], rates: &Rates, split_crew: bool) -> Result<Vec<BidLine>> {
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let category = parse_category(row)?;
        if split_crew && row.crew > 1 {
            for position in [Position::Fmp, Position::AnyFa] {
                let seat = Category { position, ..category };
                lines.push(compute_line(row, seat, rates)?);
            }
        } else {
            lines.push(compute_line(row, category, rates)?);
        }
    }
    tracing::info!("computed pay for {} lines", lines.len());
    Ok(lines)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn cents() -> impl Strategy<Value = Decimal> {
        (0i64..2_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #[test]
        fn pay_total_is_sum_of_parts(
            credit in cents(),
            tafb in cents(),
            crew in 1i64..6,
            purser in any::<bool>(),
            intl in any::<bool>(),
        ) {
            let row = RawRow {
                row: 2,
                line_number: 1,
                credit,
                tafb,
                crew,
                category: String::new(),
            };
            let category = Category {
                position: if purser { Position::Fmp } else { Position::AnyFa },
                international: intl,
            };
            let line = compute_line(&row, category, &Rates::default()).unwrap();
            prop_assert_eq!(line.pay_total(), line.pay_credit() + line.per_diem());
            prop_assert_eq!(line.position() == Position::Fmp, purser);
        }
    }
}
