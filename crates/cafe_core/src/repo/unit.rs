//! Atomic unit: the explicit transaction context for one mutation request.
//!
//! # Responsibility
//! - Open one `BEGIN IMMEDIATE` transaction per request.
//! - Track the request through `Started -> DuplicateChecked -> Located ->
//!   Written -> Committed`, or `Aborted`.
//! - Commit on success and roll back on every failure path.
//!
//! # Invariants
//! - The transaction handle is released on every exit path; dropping an
//!   uncommitted unit rolls it back.
//! - A rollback failure is logged and never replaces the error that caused
//!   the abort.
//! - Reads issued through the unit observe its own uncommitted writes.

use crate::repo::{RepoError, RepoResult};
use log::{debug, error, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::time::Instant;

/// Progress of a mutation request inside its unit.
///
/// `Committed` and `Aborted` are outcomes, not live stages: a unit reports
/// them from [`AtomicUnit::commit`] and in its outcome log event, and
/// [`AtomicUnit::advance`] never moves a live unit onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnitStage {
    Started,
    DuplicateChecked,
    Located,
    Written,
    Committed,
    Aborted,
}

impl UnitStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::DuplicateChecked => "duplicate_checked",
            Self::Located => "located",
            Self::Written => "written",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }
}

impl Display for UnitStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-flight atomic unit.
///
/// Derefs to the transaction's [`Connection`], so any helper taking
/// `&Connection` runs inside the unit when handed `&unit`.
pub struct AtomicUnit<'conn> {
    tx: Transaction<'conn>,
    operation: &'static str,
    stage: UnitStage,
    started_at: Instant,
}

impl<'conn> AtomicUnit<'conn> {
    /// Starts a unit; takes the store's write lock immediately.
    pub fn begin(conn: &'conn Connection, operation: &'static str) -> RepoResult<Self> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        debug!("event=unit_stage module=repo op={operation} stage=started");
        Ok(Self {
            tx,
            operation,
            stage: UnitStage::Started,
            started_at: Instant::now(),
        })
    }

    /// Runs `body` inside a fresh unit.
    ///
    /// `Ok` commits; `Err` aborts and returns the body's error unchanged.
    pub fn run<T>(
        conn: &'conn Connection,
        operation: &'static str,
        body: impl FnOnce(&mut AtomicUnit<'conn>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut unit = Self::begin(conn, operation)?;
        match body(&mut unit) {
            Ok(value) => {
                unit.commit()?;
                Ok(value)
            }
            Err(err) => Err(unit.abort(err)),
        }
    }

    pub fn stage(&self) -> UnitStage {
        self.stage
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Records progress. Stages only move forward.
    pub fn advance(&mut self, next: UnitStage) {
        if next <= self.stage || next.is_terminal() {
            warn!(
                "event=unit_stage module=repo op={} status=ignored from={} to={}",
                self.operation, self.stage, next
            );
            return;
        }
        debug!(
            "event=unit_stage module=repo op={} from={} to={}",
            self.operation, self.stage, next
        );
        self.stage = next;
    }

    /// Commits every write of the unit.
    ///
    /// Deferred constraints (the employee -> café reference) are checked
    /// here; a violation rolls the unit back and surfaces as `Db`.
    pub fn commit(self) -> RepoResult<UnitStage> {
        let Self {
            tx,
            operation,
            stage,
            started_at,
        } = self;
        match tx.commit() {
            Ok(()) => {
                info!(
                    "event=unit_commit module=repo op={operation} status=ok last_stage={stage} stage={} duration_ms={}",
                    UnitStage::Committed,
                    started_at.elapsed().as_millis()
                );
                Ok(UnitStage::Committed)
            }
            Err(err) => {
                error!(
                    "event=unit_commit module=repo op={operation} status=error last_stage={stage} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Rolls the unit back and hands `cause` back to the caller.
    pub fn abort(self, cause: RepoError) -> RepoError {
        let Self {
            tx,
            operation,
            stage,
            started_at,
        } = self;
        if let Err(rollback_err) = tx.rollback() {
            error!(
                "event=unit_rollback module=repo op={operation} status=error last_stage={stage} error={rollback_err}"
            );
        }
        warn!(
            "event=unit_abort module=repo op={operation} status=aborted last_stage={stage} stage={} duration_ms={} error_code={}",
            UnitStage::Aborted,
            started_at.elapsed().as_millis(),
            cause.code()
        );
        cause
    }
}

impl Deref for AtomicUnit<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.tx
    }
}
