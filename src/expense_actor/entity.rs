//! [`StoreRecord`] implementation for [`ExpenseRecord`].

use super::error::ExpenseError;
use crate::framework::{Collection, StoreRecord};
use crate::model::{
    check_amount, check_text, ExpenseCreate, ExpenseId, ExpenseRecord, ExpenseUpdate,
    MAX_DESCRIPTION_LEN, MIN_EXPENSE_AMOUNT,
};
use async_trait::async_trait;
use chrono::Local;
use std::convert::Infallible;

fn validate(expense: &ExpenseRecord) -> Result<(), ExpenseError> {
    check_text("description", &expense.description, MAX_DESCRIPTION_LEN)
        .map_err(ExpenseError::Validation)?;
    check_amount("amount", expense.amount, MIN_EXPENSE_AMOUNT).map_err(ExpenseError::Validation)
}

#[async_trait]
impl StoreRecord for ExpenseRecord {
    const COLLECTION: Collection = Collection::ExpenseRecords;
    type Id = ExpenseId;
    type Create = ExpenseCreate;
    type Update = ExpenseUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ExpenseError;

    fn from_create_params(id: ExpenseId, params: ExpenseCreate) -> Result<Self, ExpenseError> {
        let expense = Self {
            id,
            description: params.description.trim().to_string(),
            amount: params.amount,
            expense_date: params
                .expense_date
                .unwrap_or_else(|| Local::now().date_naive()),
            category: params.category,
        };
        validate(&expense)?;
        Ok(expense)
    }

    async fn on_update(&mut self, update: ExpenseUpdate, _ctx: &()) -> Result<(), ExpenseError> {
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.expense_date {
            self.expense_date = date;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        validate(self)
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), ExpenseError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseCategory;
    use chrono::NaiveDate;

    fn params(amount: f64) -> ExpenseCreate {
        ExpenseCreate {
            description: "Delivery".into(),
            amount,
            expense_date: None,
            category: ExpenseCategory::Transport,
        }
    }

    #[test]
    fn test_date_defaults_to_today() {
        let expense = ExpenseRecord::from_create_params(ExpenseId(1), params(12.0)).unwrap();
        let today = Local::now().date_naive();
        // Tolerate a run that straddles midnight.
        assert!(expense.expense_date == today || expense.expense_date.succ_opt() == Some(today));
    }

    #[test]
    fn test_amount_below_minimum_is_rejected() {
        assert_eq!(
            ExpenseRecord::from_create_params(ExpenseId(1), params(0.0)),
            Err(ExpenseError::Validation("amount must be at least 0.01".into()))
        );
    }

    #[tokio::test]
    async fn test_update_is_validated() {
        let mut expense = ExpenseRecord::from_create_params(
            ExpenseId(1),
            ExpenseCreate {
                expense_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                ..params(5.0)
            },
        )
        .unwrap();

        let rejected = expense
            .clone()
            .on_update(
                ExpenseUpdate {
                    description: Some("   ".into()),
                    ..Default::default()
                },
                &(),
            )
            .await;
        assert!(matches!(rejected, Err(ExpenseError::Validation(_))));

        expense
            .on_update(
                ExpenseUpdate {
                    amount: Some(7.5),
                    ..Default::default()
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(expense.amount, 7.5);
    }
}
