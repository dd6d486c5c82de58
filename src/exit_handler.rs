//! Exit code logic for the manga-dl process.
//!
//! Single responsibility: map saved/failed image counts to the process exit outcome.

use crate::ProcessExit;

/// Determines the process exit outcome from saved and failed image counts.
pub(crate) fn determine_exit_outcome(saved: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if saved > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
