use std::io::Write;

use colored::Colorize;

use crate::errors::Result;
use crate::ledger::{BalanceRow, GroupedBalancePoint, Money};
use crate::projector::Report;

const DATE_WIDTH: usize = 10;
const AMOUNT_WIDTH: usize = 12;

fn colored_amount(amount: Money) -> String {
    let text = format!("{:>width$}", amount.to_string(), width = AMOUNT_WIDTH);
    if amount.is_negative() {
        text.as_str().red().to_string()
    } else {
        text.as_str().green().to_string()
    }
}

fn section(out: &mut impl Write, title: &str) -> Result<()> {
    let heading = format!("=== {} ===", title.trim());
    writeln!(out, "{}", heading.as_str().bold())?;
    Ok(())
}

pub fn write_rows(out: &mut impl Write, title: &str, rows: &[BalanceRow]) -> Result<()> {
    section(out, title)?;
    writeln!(
        out,
        "{:<dw$}  {:>aw$}  {:>aw$}  {}",
        "date",
        "amount",
        "balance",
        "name",
        dw = DATE_WIDTH,
        aw = AMOUNT_WIDTH
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<dw$}  {}  {:>aw$}  {}",
            row.date.format("%Y-%m-%d"),
            colored_amount(row.amount),
            row.balance.to_string(),
            row.name,
            dw = DATE_WIDTH,
            aw = AMOUNT_WIDTH
        )?;
    }
    Ok(())
}

pub fn write_grouped(out: &mut impl Write, title: &str, points: &[GroupedBalancePoint]) -> Result<()> {
    section(out, title)?;
    writeln!(
        out,
        "{:<dw$}  {:>aw$}  {:>aw$}  {}",
        "date",
        "amount",
        "balance",
        "description",
        dw = DATE_WIDTH,
        aw = AMOUNT_WIDTH
    )?;
    for point in points {
        writeln!(
            out,
            "{:<dw$}  {}  {:>aw$}  {}",
            point.date.format("%Y-%m-%d"),
            colored_amount(point.amount),
            point.balance.to_string(),
            point.description,
            dw = DATE_WIDTH,
            aw = AMOUNT_WIDTH
        )?;
    }
    Ok(())
}

pub fn write_report(out: &mut impl Write, report: &Report) -> Result<()> {
    section(out, &format!("{} ({:?})", report.name, report.kind))?;
    for series in &report.series {
        let closing = series.points.last().map(|point| point.balance);
        match closing {
            Some(balance) => writeln!(
                out,
                "{}: {} points, closing balance {}",
                series.display_name,
                series.points.len(),
                balance
            )?,
            None => writeln!(out, "{}: no activity", series.display_name)?,
        }
    }
    Ok(())
}
