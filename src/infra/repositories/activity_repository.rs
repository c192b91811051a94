//! Append-only activity log writes.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, Set};

use super::entities::activity;
use crate::domain::NewActivity;
use crate::errors::AppResult;

pub struct TxActivityRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxActivityRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Append an entry stamped with the current time.
    pub async fn record(&self, entry: NewActivity) -> AppResult<i32> {
        let model = activity::ActiveModel {
            student_id: Set(entry.student_id),
            action: Set(entry.action),
            course: Set(entry.course),
            kind: Set(entry.kind.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;

        Ok(model.id)
    }
}
