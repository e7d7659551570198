//! PostgreSQL-backed `MatchRequestRepository` implementation using Diesel ORM.
//!
//! Every mutation runs in a single transaction. Concurrency is handled with
//! row locks rather than application-level mutexes:
//!
//! - `create` locks the mentee's user row, so two submissions from the same
//!   mentee serialise and the second one sees the first one's pending row.
//!   The partial unique index on pending rows backs this up.
//! - `accept` locks all of the mentor's pending rows in id order before
//!   touching any of them, so concurrent accepts by one mentor queue up
//!   instead of deadlocking. A mentor never holds two accepted rows.
//! - `reject` and `cancel` are single conditional updates guarded by
//!   `status = 'pending'`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::info;

use crate::domain::ports::{MatchRequestRepository, MatchRequestRepositoryError};
use crate::domain::{MatchRequest, MatchRequestId, MatchRequestStatus, NewMatchRequest, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{MatchRequestRow, NewMatchRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{match_requests, users};

/// Partial unique index allowing one pending request per mentee.
const ONE_PENDING_PER_MENTEE: &str = "match_requests_one_pending_per_mentee";

const PENDING: &str = MatchRequestStatus::Pending.as_str();

/// Diesel-backed implementation of the `MatchRequestRepository` port.
#[derive(Clone)]
pub struct DieselMatchRequestRepository {
    pool: DbPool,
}

impl DieselMatchRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure raised inside a transaction body.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    DuplicatePending,
    MentorAlreadyMatched,
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<TxError> for MatchRequestRepositoryError {
    fn from(error: TxError) -> Self {
        match error {
            TxError::Diesel(error) => map_diesel_error(error),
            TxError::DuplicatePending => Self::duplicate_pending(),
            TxError::MentorAlreadyMatched => Self::mentor_already_matched(),
        }
    }
}

fn map_pool_error(error: PoolError) -> MatchRequestRepositoryError {
    MatchRequestRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> MatchRequestRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_failure(failure: DieselFailure) -> MatchRequestRepositoryError {
    if failure.violates(ONE_PENDING_PER_MENTEE) {
        return MatchRequestRepositoryError::duplicate_pending();
    }
    failure.into_error(
        MatchRequestRepositoryError::query,
        MatchRequestRepositoryError::connection,
    )
}

fn row_to_request(row: MatchRequestRow) -> Result<MatchRequest, MatchRequestRepositoryError> {
    let id = row.id;
    MatchRequest::try_from(row).map_err(|reason| {
        MatchRequestRepositoryError::query(format!("corrupt match request row {id}: {reason}"))
    })
}

fn rows_to_requests(
    rows: Vec<MatchRequestRow>,
) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
    rows.into_iter().map(row_to_request).collect()
}

#[async_trait]
impl MatchRequestRepository for DieselMatchRequestRepository {
    async fn create(
        &self,
        request: &NewMatchRequest,
    ) -> Result<MatchRequest, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mentee_id = request.mentee_id.get();
        let new_row = NewMatchRequestRow {
            mentor_id: request.mentor_id.get(),
            mentee_id,
            message: request.message.as_ref(),
            status: PENDING,
        };

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    users::table
                        .find(mentee_id)
                        .select(users::id)
                        .for_update()
                        .first::<i64>(conn)
                        .await
                        .optional()?;

                    let pending: Option<i64> = match_requests::table
                        .filter(match_requests::mentee_id.eq(mentee_id))
                        .filter(match_requests::status.eq(PENDING))
                        .select(match_requests::id)
                        .first(conn)
                        .await
                        .optional()?;
                    if pending.is_some() {
                        return Err(TxError::DuplicatePending);
                    }

                    let row = diesel::insert_into(match_requests::table)
                        .values(&new_row)
                        .returning(MatchRequestRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        row_to_request(row)
    }

    async fn find_incoming(
        &self,
        mentor_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = match_requests::table
            .filter(match_requests::mentor_id.eq(mentor_id.get()))
            .order(match_requests::id.asc())
            .select(MatchRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_requests(rows)
    }

    async fn find_outgoing(
        &self,
        mentee_id: UserId,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = match_requests::table
            .filter(match_requests::mentee_id.eq(mentee_id.get()))
            .order(match_requests::id.asc())
            .select(MatchRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_requests(rows)
    }

    async fn accept(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let request_id = id.get();
        let mentor_id = mentor_id.get();

        let outcome = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    match_requests::table
                        .filter(match_requests::mentor_id.eq(mentor_id))
                        .filter(match_requests::status.eq(PENDING))
                        .order(match_requests::id.asc())
                        .select(match_requests::id)
                        .for_update()
                        .load::<i64>(conn)
                        .await?;

                    let target: Option<MatchRequestRow> = match_requests::table
                        .filter(match_requests::id.eq(request_id))
                        .filter(match_requests::mentor_id.eq(mentor_id))
                        .select(MatchRequestRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(target) = target else {
                        return Ok(None);
                    };
                    if target.status != PENDING {
                        return Ok(Some((target, 0)));
                    }

                    let matched: Option<i64> = match_requests::table
                        .filter(match_requests::mentor_id.eq(mentor_id))
                        .filter(
                            match_requests::status.eq(MatchRequestStatus::Accepted.as_str()),
                        )
                        .select(match_requests::id)
                        .first(conn)
                        .await
                        .optional()?;
                    if matched.is_some() {
                        return Err(TxError::MentorAlreadyMatched);
                    }

                    let rejected = diesel::update(
                        match_requests::table
                            .filter(match_requests::mentor_id.eq(mentor_id))
                            .filter(match_requests::id.ne(request_id))
                            .filter(match_requests::status.eq(PENDING)),
                    )
                    .set(match_requests::status.eq(MatchRequestStatus::Rejected.as_str()))
                    .execute(conn)
                    .await?;

                    let accepted = diesel::update(match_requests::table.find(request_id))
                        .set(match_requests::status.eq(MatchRequestStatus::Accepted.as_str()))
                        .returning(MatchRequestRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(Some((accepted, rejected)))
                }
                .scope_boxed()
            })
            .await?;

        let Some((row, rejected)) = outcome else {
            return Ok(None);
        };
        if rejected > 0 {
            info!(
                request_id,
                mentor_id, rejected, "rejected sibling requests on accept"
            );
        }
        row_to_request(row).map(Some)
    }

    async fn reject(
        &self,
        id: MatchRequestId,
        mentor_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let request_id = id.get();
        let mentor_id = mentor_id.get();

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let updated: Option<MatchRequestRow> = diesel::update(
                        match_requests::table
                            .filter(match_requests::id.eq(request_id))
                            .filter(match_requests::mentor_id.eq(mentor_id))
                            .filter(match_requests::status.eq(PENDING)),
                    )
                    .set(match_requests::status.eq(MatchRequestStatus::Rejected.as_str()))
                    .returning(MatchRequestRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                    if updated.is_some() {
                        return Ok(updated);
                    }

                    let current = match_requests::table
                        .filter(match_requests::id.eq(request_id))
                        .filter(match_requests::mentor_id.eq(mentor_id))
                        .select(MatchRequestRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    Ok(current)
                }
                .scope_boxed()
            })
            .await?;

        row.map(row_to_request).transpose()
    }

    async fn cancel(
        &self,
        id: MatchRequestId,
        mentee_id: UserId,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let request_id = id.get();
        let mentee_id = mentee_id.get();

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let updated: Option<MatchRequestRow> = diesel::update(
                        match_requests::table
                            .filter(match_requests::id.eq(request_id))
                            .filter(match_requests::mentee_id.eq(mentee_id))
                            .filter(match_requests::status.eq(PENDING)),
                    )
                    .set(match_requests::status.eq(MatchRequestStatus::Cancelled.as_str()))
                    .returning(MatchRequestRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                    if updated.is_some() {
                        return Ok(updated);
                    }

                    let current = match_requests::table
                        .filter(match_requests::id.eq(request_id))
                        .filter(match_requests::mentee_id.eq(mentee_id))
                        .select(MatchRequestRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    Ok(current)
                }
                .scope_boxed()
            })
            .await?;

        row.map(row_to_request).transpose()
    }
}
