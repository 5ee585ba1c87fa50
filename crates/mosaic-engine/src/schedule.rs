//! Line scheduling: sequential, or a scoped worker pool.
//!
//! ```text
//!   coordinator                       workers (mosaic-line-{i})
//!     |--row-->[task: bounded(2N)]-->  task_rx.recv()
//!     |                                line(row)
//!     |<--(row, line)--[reply: bounded(4N)]--|
//!     | reorder, emit rows in order
//! ```
//!
//! At most `N` lines run at once, and at most `4N` are outstanding (running
//! or waiting to be emitted), so the reply channel never blocks a worker.
//! Once any line fails no further row is handed out; only the lines below
//! the lowest known failure are drained. The error returned is therefore the
//! one from the lowest failing line, whatever order workers finish in.

use crate::config::ConfigError;
use crate::error::ComputeError;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Run `line` for every row in `0..rows`, handing finished lines to `emit`
/// in row order. Returns the number of workers used.
pub(crate) fn traverse<L, F, E>(
    rows: usize,
    workers: usize,
    line: F,
    mut emit: E,
) -> Result<usize, ComputeError>
where
    L: Send,
    F: Fn(usize) -> Result<L, ComputeError> + Sync,
    E: FnMut(L) -> Result<(), ComputeError>,
{
    let workers = workers.min(rows).max(1);
    if workers == 1 {
        for row in 0..rows {
            emit(line(row)?)?;
        }
        return Ok(1);
    }
    parallel(rows, workers, &line, emit)?;
    Ok(workers)
}

fn parallel<L, F, E>(rows: usize, workers: usize, line: &F, mut emit: E) -> Result<(), ComputeError>
where
    L: Send,
    F: Fn(usize) -> Result<L, ComputeError> + Sync,
    E: FnMut(L) -> Result<(), ComputeError>,
{
    let capacity = workers * 4;
    thread::scope(|s| {
        // Channels live inside the scope: returning early drops the task
        // sender, which lets every worker exit before the scope joins.
        let (task_tx, task_rx) = crossbeam_channel::bounded::<usize>(workers * 2);
        let (reply_tx, reply_rx) =
            crossbeam_channel::bounded::<(usize, Result<L, ComputeError>)>(capacity);

        for i in 0..workers {
            let task_rx = task_rx.clone();
            let reply_tx = reply_tx.clone();
            thread::Builder::new()
                .name(format!("mosaic-line-{i}"))
                .spawn_scoped(s, move || {
                    while let Ok(row) = task_rx.recv() {
                        let result = panic::catch_unwind(AssertUnwindSafe(|| line(row)))
                            .unwrap_or(Err(ComputeError::WorkerPanicked { line: row }));
                        if reply_tx.send((row, result)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: e.to_string(),
                })?;
        }
        drop(task_rx);
        drop(reply_tx);

        let mut next = 0;
        let mut in_flight = 0;
        let mut flushed = 0;
        let mut failed: Option<usize> = None;
        let mut pending: BTreeMap<usize, Result<L, ComputeError>> = BTreeMap::new();

        while flushed < rows {
            while failed.is_none()
                && next < rows
                && in_flight < workers
                && in_flight + pending.len() < capacity
            {
                task_tx
                    .send(next)
                    .map_err(|_| ComputeError::WorkerPanicked { line: next })?;
                next += 1;
                in_flight += 1;
            }
            let Ok((row, result)) = reply_rx.recv() else {
                return Err(ComputeError::WorkerPanicked { line: flushed });
            };
            in_flight -= 1;
            if result.is_err() && failed.is_none_or(|f| row < f) {
                failed = Some(row);
            }
            if failed.is_some_and(|f| row > f) {
                // Above a known failure: never emitted.
                continue;
            }
            pending.insert(row, result);
            while let Some(result) = pending.remove(&flushed) {
                emit(result?)?;
                flushed += 1;
            }
        }
        Ok(())
    })
}
