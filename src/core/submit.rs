//! Batch submission: group shifts by need id and send one request per group.
//!
//! A group that fails (after retries, for transient faults) is recorded and
//! the remaining groups are still sent. Nothing here aborts a run.

use crate::api::{CreatedShifts, ShiftApi, ShiftBatch, ShiftPayload, ShiftsBody};
use crate::core::retry::RetryPolicy;
use crate::core::validate::{validate, validate_row};
use crate::errors::{SubmitError, ValidationError};
use crate::export::ShiftRow;
use crate::models::ShiftRecord;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// A record left out of submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Record index, or file line number when read from a review file.
    pub position: usize,
    pub label: String,
    pub error: ValidationError,
}

/// Records split into what can be sent and what cannot.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub records: Vec<ShiftRecord>,
    pub rejected: Vec<Rejected>,
    /// Records with no need id (placeholders from `default` templates).
    pub unmapped: usize,
}

impl Prepared {
    pub fn from_records(records: impl IntoIterator<Item = ShiftRecord>) -> Self {
        let mut prepared = Prepared::default();

        for (position, record) in records.into_iter().enumerate() {
            if record.is_unmapped() {
                prepared.unmapped += 1;
                continue;
            }
            if let Err(error) = validate(&record) {
                warn!(position, need_id = %record.need_id, %error, "shift rejected");
                prepared.rejected.push(Rejected {
                    position,
                    label: record.need_id.clone(),
                    error,
                });
                continue;
            }
            prepared.records.push(record);
        }

        prepared
    }

    /// Rows of a review file; positions are file line numbers (header = line 1).
    pub fn from_rows(rows: &[ShiftRow]) -> Self {
        let mut prepared = Prepared::default();

        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 2;
            if row.is_unmapped() {
                prepared.unmapped += 1;
                continue;
            }
            match validate_row(row) {
                Ok(record) => prepared.records.push(record),
                Err(error) => {
                    warn!(line, need_name = %row.need_name, %error, "shift rejected");
                    prepared.rejected.push(Rejected {
                        position: line,
                        label: row.need_name.clone(),
                        error,
                    });
                }
            }
        }

        prepared
    }
}

/// Keep the first of any rows describing the same shift.
pub fn remove_duplicates(rows: Vec<ShiftRow>) -> Vec<ShiftRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|r| seen.insert(r.shift_key()))
        .collect()
}

/// Group records by need id, groups ordered by first appearance.
pub fn group_records(records: &[ShiftRecord]) -> Vec<ShiftBatch> {
    let mut batches: Vec<ShiftBatch> = Vec::new();

    for record in records {
        let payload = ShiftPayload::from(record);
        match batches.iter_mut().find(|b| b.need_id == record.need_id) {
            Some(batch) => batch.body.shifts.push(payload),
            None => batches.push(ShiftBatch {
                need_id: record.need_id.clone(),
                body: ShiftsBody {
                    shifts: vec![payload],
                },
            }),
        }
    }

    batches
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    Submitted(CreatedShifts),
    /// Check mode: built but not sent.
    DryRun,
    Failed(SubmitError),
}

#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub batch: ShiftBatch,
    pub title: Option<String>,
    pub attempts: u32,
    pub status: GroupStatus,
}

impl GroupOutcome {
    pub fn need_id(&self) -> &str {
        &self.batch.need_id
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, GroupStatus::Failed(_))
    }
}

/// Fate of every record handed to the submitter.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    pub dry_run: bool,
    pub groups: Vec<GroupOutcome>,
    pub rejected: Vec<Rejected>,
    pub unmapped: usize,
}

impl SubmissionReport {
    pub fn failed(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.groups.iter().filter(|g| g.is_failed())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    pub fn created_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| match &g.status {
                GroupStatus::Submitted(c) => c.created,
                _ => 0,
            })
            .sum()
    }

    pub fn batches(&self) -> Vec<ShiftBatch> {
        self.groups.iter().map(|g| g.batch.clone()).collect()
    }
}

pub struct BatchSubmitter<'a> {
    api: Option<&'a dyn ShiftApi>,
    retry: RetryPolicy,
}

impl<'a> BatchSubmitter<'a> {
    pub fn new(api: &'a dyn ShiftApi, retry: RetryPolicy) -> Self {
        Self {
            api: Some(api),
            retry,
        }
    }

    /// Groups and builds requests without calling the platform.
    pub fn dry_run() -> Self {
        Self {
            api: None,
            retry: RetryPolicy::no_retry(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.api.is_none()
    }

    /// Validate, group and submit `records`.
    pub fn submit(&self, records: Vec<ShiftRecord>) -> SubmissionReport {
        self.submit_prepared(Prepared::from_records(records))
    }

    pub fn submit_prepared(&self, prepared: Prepared) -> SubmissionReport {
        let groups = group_records(&prepared.records)
            .into_iter()
            .map(|batch| self.submit_group(batch))
            .collect();

        SubmissionReport {
            dry_run: self.is_dry_run(),
            groups,
            rejected: prepared.rejected,
            unmapped: prepared.unmapped,
        }
    }

    fn submit_group(&self, batch: ShiftBatch) -> GroupOutcome {
        let Some(api) = self.api else {
            return GroupOutcome {
                batch,
                title: None,
                attempts: 0,
                status: GroupStatus::DryRun,
            };
        };

        let outcome = self.retry.run(|_| api.create_shifts(&batch));

        let (status, title) = match outcome.result {
            Ok(created) => {
                info!(
                    need_id = %batch.need_id,
                    created = created.created,
                    attempts = outcome.attempts,
                    "group submitted"
                );
                let title = api
                    .need_title(&batch.need_id)
                    .inspect_err(|e| warn!(need_id = %batch.need_id, error = %e, "title lookup failed"))
                    .ok();
                (GroupStatus::Submitted(created), title)
            }
            Err(err) => {
                error!(
                    need_id = %batch.need_id,
                    attempts = outcome.attempts,
                    error = %err,
                    "group failed"
                );
                (GroupStatus::Failed(err), None)
            }
        };

        GroupOutcome {
            batch,
            title,
            attempts: outcome.attempts,
            status,
        }
    }
}
