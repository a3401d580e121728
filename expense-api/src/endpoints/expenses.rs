use super::{ExpenseId, iso_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tower_api_client::{Method, Request, RequestData};

// Common

/// An expense as stored remotely, without its key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub description: String,
}

impl ExpenseData {
    pub fn new(amount: f64, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub description: String,
}

impl Expense {
    pub fn new(id: ExpenseId, data: ExpenseData) -> Self {
        Self {
            id,
            amount: data.amount,
            date: data.date,
            description: data.description,
        }
    }

    pub fn data(&self) -> ExpenseData {
        ExpenseData {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
        }
    }

    /// Overwrite every field except the id
    pub fn apply(&mut self, patch: ExpenseData) {
        self.amount = patch.amount;
        self.date = patch.date;
        self.description = patch.description;
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListExpenses;

impl ListExpenses {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListExpenses {
    type Data = ();
    type Response = ExpensesResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expenses.json".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateExpense {
    expense: ExpenseData,
}

impl CreateExpense {
    pub fn new(expense: ExpenseData) -> Self {
        Self { expense }
    }
}

impl Request for CreateExpense {
    type Data = ExpenseData;
    type Response = CreateExpenseResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/expenses.json".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.expense)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateExpense {
    #[serde(skip)]
    expense_id: ExpenseId,
    expense: ExpenseData,
}

impl UpdateExpense {
    pub fn new(expense_id: ExpenseId, expense: ExpenseData) -> Self {
        Self {
            expense_id,
            expense,
        }
    }
}

impl Request for UpdateExpense {
    type Data = ExpenseData;
    type Response = ExpenseData;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}.json", self.expense_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.expense)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExpense {
    pub expense_id: ExpenseId,
}

impl DeleteExpense {
    pub fn new(expense_id: ExpenseId) -> Self {
        Self { expense_id }
    }
}

impl Request for DeleteExpense {
    type Data = ();
    // Firebase answers a delete with a `null` body
    type Response = ();
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/expenses/{}.json", self.expense_id).into()
    }
}

// Responses

/// Body of `GET /expenses.json`.
///
/// The database answers `null` when the collection has never been written,
/// which decodes as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpensesResponse(pub Option<BTreeMap<ExpenseId, ExpenseData>>);

impl ExpensesResponse {
    pub fn into_expenses(self) -> Vec<Expense> {
        self.0
            .unwrap_or_default()
            .into_iter()
            .map(|(id, data)| Expense::new(id, data))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    /// Key of the newly pushed child
    pub name: ExpenseId,
}
