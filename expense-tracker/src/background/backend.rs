use anyhow::Result;
use async_trait::async_trait;
use expense_api::{
    endpoints::{
        expenses::{Expense, ExpenseData},
        ExpenseId,
    },
    Client, Request,
};

/// Remote persistence for expenses
#[async_trait]
pub trait ExpenseBackend: Send + Sync {
    /// Store a new expense and return the id the backend assigned
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId>;

    async fn list(&self) -> Result<Vec<Expense>>;

    async fn update(&self, id: &ExpenseId, data: &ExpenseData) -> Result<()>;

    async fn delete(&self, id: &ExpenseId) -> Result<()>;
}

#[async_trait]
impl ExpenseBackend for Client {
    async fn create(&self, data: &ExpenseData) -> Result<ExpenseId> {
        let response = self.send(Request::expenses().create(data.clone())).await?;
        Ok(response.name)
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let response = self.send(Request::expenses().list()).await?;
        Ok(response.into_expenses())
    }

    async fn update(&self, id: &ExpenseId, data: &ExpenseData) -> Result<()> {
        self.send(Request::expenses().update(id.clone(), data.clone()))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &ExpenseId) -> Result<()> {
        self.send(Request::expenses().delete(id.clone())).await?;
        Ok(())
    }
}
