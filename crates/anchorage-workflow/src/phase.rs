//! Translation from submission outcomes to addon-visible phases

use crate::error::Result;
use anchorage_crd::Phase;

/// Map an install outcome to the addon-visible phase.
///
/// A successful submission is `Pending`: the workflow exists but its
/// execution has not been observed. Any render or submission failure is
/// `Failed`. `Running` and `Succeeded` are produced later by the
/// reconciler watching the submitted workflow, never here.
pub fn install_phase<T>(outcome: &Result<T>) -> Phase {
    match outcome {
        Ok(_) => Phase::Pending,
        Err(_) => Phase::Failed,
    }
}
