//! The visibility policy.
//!
//! Pure decision logic: given a caller's privilege, the caller's requested
//! visibility, and a record's soft-delete flag, decide whether the record is
//! exposed, hidden, or exposed with the flag stripped.
//!
//! | Record state | Caller | Outcome |
//! |---|---|---|
//! | soft-deleted | admin + `includeSoftDeleted` | Visible, flag retained |
//! | soft-deleted | anyone else | Hidden |
//! | live | admin + `includeSoftDeleted` | Visible, flag retained as stored |
//! | live | anyone else | Visible, flag stripped |
//!
//! A non-administrator requesting `includeSoftDeleted` is rejected upstream
//! with a permission failure; that combination never reaches this policy.

use crate::caller::CallerContext;
use crate::types::LookupRecord;

/// The outcome of a visibility decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Visibility {
    /// The record may be returned, shaped for this caller.
    Visible(LookupRecord),
    /// The record must be reported as not found.
    Hidden,
}

impl Visibility {
    /// Returns the shaped record, or `None` when hidden.
    pub fn into_record(self) -> Option<LookupRecord> {
        match self {
            Visibility::Visible(record) => Some(record),
            Visibility::Hidden => None,
        }
    }
}

/// Decides whether `record` may be shown to `caller`, shaping the
/// soft-delete flag accordingly.
pub fn resolve(record: LookupRecord, caller: &CallerContext) -> Visibility {
    if record.is_deleted() {
        if caller.sees_soft_deleted() {
            Visibility::Visible(record)
        } else {
            Visibility::Hidden
        }
    } else if caller.sees_soft_deleted() {
        Visibility::Visible(record)
    } else {
        Visibility::Visible(record.without_deleted_flag())
    }
}
