//! Generic tenant-scoped repository
//!
//! Every read and write funnels through [`ScopedRepository`], which ANDs
//! two independent predicates onto each statement: the soft-delete clause
//! (`is_deleted = false`, dropped when `include_deleted` is requested) and
//! the organization clause (`organization_id = ctx.organization_id`,
//! dropped for system admins). A row that exists but belongs to another
//! organization is indistinguishable from an absent row.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait, Value,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::ScopedEntity;
use crate::tenant::TenantContext;

/// Repository applying tenant scoping and soft-delete filtering uniformly
/// over any [`ScopedEntity`].
pub struct ScopedRepository<'a, C, E> {
    conn: &'a C,
    scope: &'a TenantContext,
    entity: &'static str,
    writes: Option<&'a AtomicU64>,
    _marker: PhantomData<E>,
}

impl<'a, C, E> ScopedRepository<'a, C, E>
where
    C: ConnectionTrait,
    E: ScopedEntity,
{
    /// Creates a repository bound to a connection and a tenant context.
    /// `entity` is the label used in NotFound/Conflict messages.
    pub fn new(conn: &'a C, scope: &'a TenantContext, entity: &'static str) -> Self {
        Self {
            conn,
            scope,
            entity,
            writes: None,
            _marker: PhantomData,
        }
    }

    fn with_write_counter(mut self, writes: &'a AtomicU64) -> Self {
        self.writes = Some(writes);
        self
    }

    fn record_writes(&self, rows: u64) {
        if let Some(counter) = self.writes {
            counter.fetch_add(rows, Ordering::Relaxed);
        }
    }

    fn db_err(&self, error: sea_orm::DbErr) -> RepositoryError {
        RepositoryError::from_db(self.entity, error)
    }

    fn not_found(&self) -> RepositoryError {
        RepositoryError::NotFound(self.entity)
    }

    /// The organization clause on its own; empty for system admins and
    /// org-less contexts.
    fn tenant_clause(&self) -> Condition {
        let mut cond = Condition::all();
        if self.scope.applies_tenant_filter()
            && let Some(org) = self.scope.organization_id
        {
            cond = cond.add(E::organization_column().eq(org));
        }
        cond
    }

    /// The full implicit predicate: soft-delete clause (unless
    /// `include_deleted`) AND organization clause.
    fn scope_filter(&self, include_deleted: bool) -> Condition {
        let mut cond = self.tenant_clause();
        if !include_deleted {
            cond = cond.add(E::deleted_column().eq(false));
        }
        cond
    }

    /// Fetches an entity by id within tenant scope. Soft-deleted rows are
    /// invisible unless `include_deleted` is set.
    pub async fn get_by_id(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<E::Model>, RepositoryError> {
        E::find()
            .filter(E::id_column().eq(id))
            .filter(self.scope_filter(include_deleted))
            .one(self.conn)
            .await
            .map_err(|e| self.db_err(e))
    }

    /// Like [`get_by_id`](Self::get_by_id) but turns absence into
    /// [`RepositoryError::NotFound`].
    pub async fn require(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<E::Model, RepositoryError> {
        self.get_by_id(id, include_deleted)
            .await?
            .ok_or_else(|| self.not_found())
    }

    /// Lists every entity in tenant scope, optionally ordered.
    pub async fn get_all(
        &self,
        order_by: Option<E::Column>,
        descending: bool,
        include_deleted: bool,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        let mut query = E::find().filter(self.scope_filter(include_deleted));
        if let Some(column) = order_by {
            query = if descending {
                query.order_by_desc(column)
            } else {
                query.order_by_asc(column)
            };
        }
        query.all(self.conn).await.map_err(|e| self.db_err(e))
    }

    /// Runs a caller-supplied predicate ANDed with the implicit
    /// scope/soft-delete predicate.
    pub async fn find(
        &self,
        predicate: Condition,
        order_by: Option<E::Column>,
        include_deleted: bool,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        let mut query = E::find()
            .filter(self.scope_filter(include_deleted))
            .filter(predicate);
        if let Some(column) = order_by {
            query = query.order_by_asc(column);
        }
        query.all(self.conn).await.map_err(|e| self.db_err(e))
    }

    /// Single-row variant of [`find`](Self::find).
    pub async fn find_one(
        &self,
        predicate: Condition,
        include_deleted: bool,
    ) -> Result<Option<E::Model>, RepositoryError> {
        E::find()
            .filter(self.scope_filter(include_deleted))
            .filter(predicate)
            .one(self.conn)
            .await
            .map_err(|e| self.db_err(e))
    }

    /// Inserts a new entity. Stamps the id when unset, both timestamps,
    /// the live soft-delete flag, and the owning organization from the
    /// context when the caller left it unset and the context is a regular
    /// member.
    pub async fn insert(&self, mut model: E::Active) -> Result<E::Model, RepositoryError>
    where
        E::Model: IntoActiveModel<E::Active>,
    {
        if uuid_is_unset(model.get(E::id_column())) {
            model.set(E::id_column(), Uuid::new_v4().into());
        }
        let now: DateTimeWithTimeZone = Utc::now().into();
        model.set(E::created_at_column(), now.into());
        model.set(E::updated_at_column(), now.into());
        model.set(E::deleted_column(), false.into());

        if uuid_is_unset(model.get(E::organization_column()))
            && !self.scope.is_system_admin
            && let Some(org) = self.scope.organization_id
        {
            model.set(E::organization_column(), org.into());
        }

        let inserted = model.insert(self.conn).await.map_err(|e| self.db_err(e))?;
        self.record_writes(1);
        Ok(inserted)
    }

    /// Partial update: only the fields the caller `Set` are persisted,
    /// plus a refreshed `updated_at`. The id, owning organization and
    /// soft-delete flag cannot be changed through this path. Matching
    /// zero rows (absent, soft-deleted, or out of scope) is NotFound.
    pub async fn update(&self, id: Uuid, mut patch: E::Active) -> Result<E::Model, RepositoryError> {
        patch.not_set(E::id_column());
        patch.not_set(E::organization_column());
        patch.not_set(E::deleted_column());
        patch.not_set(E::created_at_column());
        let now: DateTimeWithTimeZone = Utc::now().into();
        patch.set(E::updated_at_column(), now.into());

        let result = E::update_many()
            .set(patch)
            .filter(E::id_column().eq(id))
            .filter(self.scope_filter(false))
            .exec(self.conn)
            .await
            .map_err(|e| self.db_err(e))?;

        if result.rows_affected == 0 {
            return Err(self.not_found());
        }
        self.record_writes(result.rows_affected);
        self.require(id, false).await
    }

    /// Soft delete: flips `is_deleted` on and refreshes `updated_at`.
    /// Never erases data.
    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut patch = E::Active::default();
        patch.set(E::deleted_column(), true.into());
        let now: DateTimeWithTimeZone = Utc::now().into();
        patch.set(E::updated_at_column(), now.into());

        let result = E::update_many()
            .set(patch)
            .filter(E::id_column().eq(id))
            .filter(self.scope_filter(false))
            .exec(self.conn)
            .await
            .map_err(|e| self.db_err(e))?;

        if result.rows_affected == 0 {
            return Err(self.not_found());
        }
        self.record_writes(result.rows_affected);
        Ok(())
    }

    /// Restores a soft-deleted entity within tenant scope.
    pub async fn restore(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut patch = E::Active::default();
        patch.set(E::deleted_column(), false.into());
        let now: DateTimeWithTimeZone = Utc::now().into();
        patch.set(E::updated_at_column(), now.into());

        let result = E::update_many()
            .set(patch)
            .filter(E::id_column().eq(id))
            .filter(E::deleted_column().eq(true))
            .filter(self.tenant_clause())
            .exec(self.conn)
            .await
            .map_err(|e| self.db_err(e))?;

        if result.rows_affected == 0 {
            return Err(self.not_found());
        }
        self.record_writes(result.rows_affected);
        Ok(())
    }
}

fn uuid_is_unset(value: ActiveValue<Value>) -> bool {
    match value {
        ActiveValue::NotSet => true,
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => matches!(v, Value::Uuid(None)),
    }
}

/// Unit of work: a transaction plus a counter of rows its repositories
/// touched. All repository mutations made through [`UnitOfWork::scoped`]
/// become visible together on [`save_changes`](UnitOfWork::save_changes).
pub struct UnitOfWork {
    txn: DatabaseTransaction,
    writes: AtomicU64,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, RepositoryError> {
        let txn = db.begin().await?;
        Ok(Self {
            txn,
            writes: AtomicU64::new(0),
        })
    }

    /// A scoped repository running inside this unit of work.
    pub fn scoped<'a, E: ScopedEntity>(
        &'a self,
        scope: &'a TenantContext,
        entity: &'static str,
    ) -> ScopedRepository<'a, DatabaseTransaction, E> {
        ScopedRepository::new(&self.txn, scope, entity).with_write_counter(&self.writes)
    }

    /// Commits the accumulated changes; returns the number of affected
    /// rows across the unit of work.
    pub async fn save_changes(self) -> Result<u64, RepositoryError> {
        self.txn.commit().await?;
        Ok(self.writes.into_inner())
    }

    /// Rolls the unit of work back, discarding every pending change.
    pub async fn discard(self) -> Result<(), RepositoryError> {
        self.txn.rollback().await?;
        Ok(())
    }
}
