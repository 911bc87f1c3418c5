//! Read-only lead and lead-status views used by automation selection.

use super::{LeadId, LeadStatusId, StageId};
use chrono::NaiveDate;

/// Lead-status lookup row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadStatus {
    /// Status identifier.
    pub id: LeadStatusId,
    /// Display name, for example `Do Not Contact`.
    pub name: String,
}

/// Lead fields relevant to automation selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// Lead identifier.
    pub id: LeadId,
    /// Stage the lead currently sits in.
    pub stage_id: StageId,
    /// Current status, if one has been assigned.
    pub status: Option<LeadStatusId>,
    /// Date from which the lead is due for follow-up.
    pub followup_date: Option<NaiveDate>,
}

impl Lead {
    /// Returns whether the lead should be picked up by a run on `today`.
    ///
    /// A lead qualifies when its follow-up date is on or before `today` and
    /// its status is not in `excluded`. Leads without a follow-up date never
    /// qualify; leads without a status are never excluded.
    #[must_use]
    pub fn is_due(&self, today: NaiveDate, excluded: &[LeadStatusId]) -> bool {
        let date_reached = self.followup_date.is_some_and(|date| date <= today);
        let excluded_status = self.status.is_some_and(|status| excluded.contains(&status));
        date_reached && !excluded_status
    }
}
