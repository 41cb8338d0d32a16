use crate::model::{non_empty, NumericText, Owner, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub(crate) id: String,
    #[serde(rename = "user_id")]
    pub(crate) owner: Owner,
    /// Usually one of the `KnownCategory` names, but any text is allowed.
    pub(crate) category: String,
    pub(crate) amount: NumericText,
    #[serde(default)]
    pub(crate) description: Option<String>,
    pub(crate) date: NaiveDate,
}

impl Expense {
    /// Builds the server-confirmed record from a create payload.
    pub(crate) fn from_new(id: impl Into<String>, owner: &Owner, new: NewExpense) -> Self {
        Self {
            id: id.into(),
            owner: owner.clone(),
            category: new.category,
            amount: new.amount,
            description: new.description.as_deref().and_then(non_empty),
            date: new.date,
        }
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> &NumericText {
        &self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for Expense {
    type Updates = ExpenseUpdates;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, updates: &ExpenseUpdates) {
        if let Some(category) = &updates.category {
            self.category = category.clone();
        }
        if let Some(amount) = &updates.amount {
            self.amount = amount.clone();
        }
        if let Some(description) = &updates.description {
            self.description = non_empty(description);
        }
        if let Some(date) = updates.date {
            self.date = date;
        }
    }
}

/// The fields needed to create an expense. The store assigns the id and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub amount: NumericText,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// A partial edit of an expense. `None` fields are left unchanged; an empty `description` clears
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseUpdates {
    pub category: Option<String>,
    pub amount: Option<NumericText>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdates {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}
