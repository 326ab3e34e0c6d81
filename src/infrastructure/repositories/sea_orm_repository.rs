//! Generic SeaORM implementation of Repository
//!
//! One instance is one unit of work: mutations are buffered in memory and
//! applied inside a single transaction by `save_changes`.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait,
};

use crate::domain::{Committed, DomainError, KeyKind, Repository};
use crate::models::Record;

enum Change<M> {
    Insert(M),
    Update(M),
    Delete(M),
}

/// SeaORM-based implementation of Repository for any `Record`
pub struct SeaOrmRepository<M: Record> {
    db: DatabaseConnection,
    staged: Mutex<Vec<Change<M>>>,
}

impl<M: Record> SeaOrmRepository<M> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn stage(&self, change: Change<M>) {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change);
    }

    fn take_staged(&self) -> Vec<Change<M>> {
        std::mem::take(&mut *self.staged.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn require_key(record: &M, operation: &str) -> Result<(), DomainError> {
        if record.has_key() {
            Ok(())
        } else {
            Err(DomainError::InvalidArgument(format!(
                "cannot {} a {} without a key",
                operation,
                M::NAME
            )))
        }
    }
}

#[async_trait]
impl<M> Repository<M> for SeaOrmRepository<M>
where
    M: Record + IntoActiveModel<M::ActiveModel>,
{
    async fn find_by_id(&self, key: M::Key) -> Result<Option<M>, DomainError> {
        let record = <M::Entity as EntityTrait>::find_by_id(M::primary_key(key))
            .one(&self.db)
            .await?;
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<M>, DomainError> {
        let records = <M::Entity as EntityTrait>::find().all(&self.db).await?;
        Ok(records)
    }

    fn add(&self, record: M) -> Result<(), DomainError> {
        match M::KIND {
            KeyKind::Surrogate if record.has_key() => {
                return Err(DomainError::InvalidArgument(format!(
                    "{} {} already has a key; surrogate keys are assigned by the store",
                    M::NAME,
                    record.key()
                )));
            }
            KeyKind::Natural if !record.has_key() => {
                return Err(DomainError::InvalidArgument(format!(
                    "{} requires a natural key",
                    M::NAME
                )));
            }
            _ => {}
        }

        tracing::debug!(entity = M::NAME, "staged insert");
        self.stage(Change::Insert(record));
        Ok(())
    }

    fn update(&self, record: M) -> Result<(), DomainError> {
        Self::require_key(&record, "update")?;
        tracing::debug!(entity = M::NAME, key = %record.key(), "staged update");
        self.stage(Change::Update(record));
        Ok(())
    }

    fn delete(&self, record: M) -> Result<(), DomainError> {
        Self::require_key(&record, "delete")?;
        tracing::debug!(entity = M::NAME, key = %record.key(), "staged delete");
        self.stage(Change::Delete(record));
        Ok(())
    }

    fn pending_changes(&self) -> usize {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn discard_changes(&self) {
        let dropped = self.take_staged().len();
        if dropped > 0 {
            tracing::debug!(entity = M::NAME, dropped, "discarded staged changes");
        }
    }

    async fn save_changes(&self) -> Result<Committed<M>, DomainError> {
        let changes = self.take_staged();
        if changes.is_empty() {
            return Ok(Committed::default());
        }

        // Dropping the transaction without commit rolls the batch back
        let txn = self.db.begin().await?;
        let mut committed = Committed::default();

        for change in changes {
            let applied = match change {
                Change::Insert(record) => record
                    .into_insert()
                    .insert(&txn)
                    .await
                    .map(|model| committed.inserted.push(model)),
                Change::Update(record) => record
                    .into_update()
                    .update(&txn)
                    .await
                    .map(|model| committed.updated.push(model)),
                Change::Delete(record) => {
                    let key = record.key();
                    match record.into_update().delete(&txn).await {
                        Ok(result) if result.rows_affected == 0 => {
                            tracing::warn!(entity = M::NAME, %key, "delete target vanished");
                            return Err(DomainError::NotFound);
                        }
                        Ok(result) => {
                            committed.deleted += result.rows_affected;
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
            };

            if let Err(e) = applied {
                let err = DomainError::from(e);
                tracing::warn!(entity = M::NAME, "unit of work rejected: {}", err);
                return Err(err);
            }
        }

        txn.commit().await?;

        tracing::info!(
            entity = M::NAME,
            inserted = committed.inserted.len(),
            updated = committed.updated.len(),
            deleted = committed.deleted,
            "committed unit of work"
        );
        Ok(committed)
    }
}
