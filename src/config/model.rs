use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{ProjectionError, Result};
use crate::ledger::{
    Amount, DeferredAmountRef, Frequency, Money, RecurrenceSpec, RecurringTransactionDef,
    TransactionKind, Transfer, TransferDirection,
};

/// Declarative description of accounts, their recurring transactions, and
/// the charts built from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectionSpec {
    pub accounts: BTreeMap<String, AccountSpec>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSpec {
    pub name: String,
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_transactions: Option<BTreeMap<String, ScheduledTransactionSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledTransactionSpec {
    pub name: String,
    pub amount: AmountSpec,
    #[serde(rename = "type")]
    pub kind: KindSpec,
    pub date_spec: DateSpec,
    #[serde(default)]
    pub transfer: Option<TransferSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AmountSpec {
    Literal(Money),
    CcBalance { cc_balance: DeferredAmountRef },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindSpec {
    Income,
    Expense,
    Transfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateSpec {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    #[serde(default = "DateSpec::default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub day_of_month: Option<u32>,
}

/// Direction is kept as raw text; it is checked when the definition is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferSpec {
    pub direction: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Table,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub accounts: Vec<String>,
}

impl ProjectionSpec {
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Every recurring definition under every account, in account then
    /// definition id order.
    pub fn definitions(&self) -> Result<Vec<RecurringTransactionDef>> {
        let mut definitions = Vec::new();
        for (account_id, account) in &self.accounts {
            for (definition_id, scheduled) in account.scheduled_transactions.iter().flatten() {
                definitions.push(scheduled.to_definition(account_id, definition_id)?);
            }
        }
        Ok(definitions)
    }
}

impl ScheduledTransactionSpec {
    pub fn to_definition(&self, account_id: &str, definition_id: &str) -> Result<RecurringTransactionDef> {
        let kind = match (self.kind, &self.transfer) {
            (KindSpec::Transfer, Some(transfer)) => TransactionKind::Transfer(Transfer {
                direction: TransferDirection::parse(&transfer.direction, definition_id)?,
                counterparty_account_id: transfer.account_id.clone(),
            }),
            (KindSpec::Transfer, None) => {
                return Err(ProjectionError::InvalidSpec(format!(
                    "transfer `{definition_id}` has no transfer block"
                )))
            }
            (_, Some(_)) => {
                return Err(ProjectionError::InvalidSpec(format!(
                    "`{definition_id}` carries a transfer block but is not a transfer"
                )))
            }
            (KindSpec::Income, None) => TransactionKind::Income,
            (KindSpec::Expense, None) => TransactionKind::Expense,
        };
        let amount = match &self.amount {
            AmountSpec::Literal(money) => Amount::Fixed(*money),
            AmountSpec::CcBalance { cc_balance } => Amount::Deferred(cc_balance.clone()),
        };
        Ok(RecurringTransactionDef::new(
            definition_id,
            account_id,
            &self.name,
            amount,
            kind,
            self.date_spec.to_recurrence()?,
        ))
    }
}

impl DateSpec {
    fn default_interval() -> u32 {
        1
    }

    pub fn to_recurrence(&self) -> Result<RecurrenceSpec> {
        let day_of_week = self
            .day_of_week
            .as_deref()
            .map(|raw| {
                raw.parse::<Weekday>()
                    .map_err(|_| ProjectionError::InvalidSpec(format!("unknown day_of_week `{raw}`")))
            })
            .transpose()?;
        let recurrence = RecurrenceSpec {
            start_date: self.start_date,
            end_date: self.end_date,
            frequency: self.frequency,
            interval: self.interval,
            day_of_week,
            day_of_month: self.day_of_month,
        };
        recurrence.validate()?;
        Ok(recurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULED: &str = r#"{
        "name": "Credit Card",
        "amount": {"cc_balance": {"account_id": "visa"}},
        "type": "expense",
        "date_spec": {"start_date": "2022-01-07", "frequency": "monthly", "day_of_month": 31},
        "transfer": null
    }"#;

    #[test]
    fn deferred_amount_parses_into_reference() {
        let spec: ScheduledTransactionSpec = serde_json::from_str(SCHEDULED).unwrap();
        let def = spec.to_definition("checking", "cc_payoff").unwrap();
        assert_eq!(
            def.amount,
            Amount::Deferred(DeferredAmountRef {
                account_id: "visa".into()
            })
        );
        assert_eq!(def.recurrence.interval, 1);
        assert_eq!(def.recurrence.end_date, None);
    }

    #[test]
    fn weekday_names_are_parsed() {
        let date_spec: DateSpec = serde_json::from_str(
            r#"{"start_date": "2022-01-07", "frequency": "weekly", "interval": 2, "day_of_week": "fri"}"#,
        )
        .unwrap();
        assert_eq!(date_spec.to_recurrence().unwrap().day_of_week, Some(Weekday::Fri));
    }

    #[test]
    fn unknown_weekday_is_invalid_spec() {
        let date_spec: DateSpec = serde_json::from_str(
            r#"{"start_date": "2022-01-07", "frequency": "weekly", "day_of_week": "someday"}"#,
        )
        .unwrap();
        assert!(matches!(date_spec.to_recurrence(), Err(ProjectionError::InvalidSpec(_))));
    }

    #[test]
    fn transfer_kind_requires_transfer_block() {
        let mut spec: ScheduledTransactionSpec = serde_json::from_str(SCHEDULED).unwrap();
        spec.kind = KindSpec::Transfer;
        assert!(matches!(
            spec.to_definition("checking", "cc_payoff"),
            Err(ProjectionError::InvalidSpec(_))
        ));
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let json = SCHEDULED.replace(r#"{"cc_balance": {"account_id": "visa"}}"#, "1e300");
        assert!(serde_json::from_str::<ScheduledTransactionSpec>(&json).is_err());
    }
}
