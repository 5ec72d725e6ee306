// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run-loop fault type.

use thiserror::Error;

/// Why [`App::run`](crate::App::run) aborted.
///
/// `E` is the application's own error type, shared by its tasks and
/// handlers. Faults are fatal to the loop; a caller that wants to survive
/// them wraps `run` and decides for itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError<E> {
    /// A task's poll failed.
    #[error("task failed: {0}")]
    Task(E),
    /// An event handler failed during dispatch.
    #[error("event handler failed: {0}")]
    Handler(E),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn display_names_the_failing_side() {
        let e: RunError<&str> = RunError::Task("sd card gone");
        assert_eq!(format!("{e}"), "task failed: sd card gone");
        let e: RunError<&str> = RunError::Handler("bad row index");
        assert_eq!(format!("{e}"), "event handler failed: bad row index");
    }
}
