use serde::Serialize;

use super::Projection;
use crate::config::{ChartKind, ChartSpec};
use crate::errors::Result;
use crate::ledger::GroupedBalancePoint;

/// Balance series for one account inside a report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSeries {
    pub account_id: String,
    pub display_name: String,
    pub points: Vec<GroupedBalancePoint>,
}

/// Chart descriptor resolved against a projection. Rendering is left to the
/// consumer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub kind: ChartKind,
    pub series: Vec<ReportSeries>,
}

impl Projection {
    pub fn reports(&self, charts: &[ChartSpec]) -> Result<Vec<Report>> {
        charts.iter().map(|chart| self.report(chart)).collect()
    }

    pub fn report(&self, chart: &ChartSpec) -> Result<Report> {
        let series = chart
            .accounts
            .iter()
            .map(|account_id| {
                let account = self.account(account_id)?;
                Ok(ReportSeries {
                    account_id: account.account_id.clone(),
                    display_name: account.display_name.clone(),
                    points: account.running_balance_grouped(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Report {
            name: chart.name.clone(),
            kind: chart.kind,
            series,
        })
    }
}
