use crate::converter::Converter;
use crate::encoder::TranscodeEngine;
use crate::error::AppError;
use crate::queue::JobQueue;
use crate::store::WorkStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Drain the queue with a fixed set of worker threads, blocking until every
/// enqueued job has been processed and every worker has exited.
pub fn run_pool<E>(
    queue: Arc<JobQueue<PathBuf>>,
    store: Arc<WorkStore>,
    converter: Arc<Converter<E>>,
    workers: usize,
    idle_timeout: Duration,
) where
    E: TranscodeEngine + 'static,
{
    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let queue = Arc::clone(&queue);
            let store = Arc::clone(&store);
            let converter = Arc::clone(&converter);
            thread::Builder::new()
                .name(format!("convert-{id}"))
                .spawn(move || run_worker(id, &queue, &store, &converter, idle_timeout))
                .expect("spawn worker thread")
        })
        .collect();

    queue.join();
    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread panicked");
        }
    }
}

/// Worker loop: dequeue with a timeout, convert, record the completion.
/// A timeout means no more work will arrive; the queue is never refilled
/// mid-run.
fn run_worker<E: TranscodeEngine>(
    id: usize,
    queue: &JobQueue<PathBuf>,
    store: &WorkStore,
    converter: &Converter<E>,
    idle_timeout: Duration,
) {
    loop {
        let Some(path) = queue.pop_timeout(idle_timeout) else {
            debug!("worker {id} idle, exiting");
            break;
        };
        process_job(store, converter, &path);
        queue.task_done();
    }
}

fn process_job<E: TranscodeEngine>(store: &WorkStore, converter: &Converter<E>, path: &Path) {
    match converter.convert(path) {
        Ok(converted) => match store.mark_done(path, &converted) {
            Ok(()) => info!("converted {}", converted.display()),
            // A refused completion is a caller bug, never expected in
            // normal operation.
            Err(e @ AppError::InvariantViolation { .. }) => {
                error!("completion refused for {}: {}", path.display(), e);
            }
            Err(e) => error!("failed to record completion of {}: {}", path.display(), e),
        },
        // The item simply stays pending and is retried on a future run.
        Err(e) => warn!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncodeProfile;
    use crate::encoder::testing::StubEngine;
    use std::fs;

    fn allow_list() -> Vec<String> {
        vec![".mp4".to_string(), ".avi".to_string(), ".mkv".to_string()]
    }

    fn idle() -> Duration {
        Duration::from_millis(100)
    }

    fn setup(names: &[&str]) -> (tempfile::TempDir, Arc<WorkStore>) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"media").unwrap();
        }
        let store = WorkStore::open(&dir.path().join("state.json"), dir.path(), &allow_list())
            .unwrap();
        (dir, Arc::new(store))
    }

    #[test]
    fn pool_drains_the_queue_and_records_completions() {
        let (dir, store) = setup(&["a.mp4", "b.avi", "c.mkv"]);
        let queue = Arc::new(JobQueue::new());
        for path in store.pending_files() {
            queue.push(path);
        }
        let converter = Arc::new(Converter::new(
            StubEngine::succeeding(),
            EncodeProfile::default(),
        ));

        run_pool(Arc::clone(&queue), Arc::clone(&store), converter, 4, idle());

        assert!(queue.is_empty());
        assert_eq!(store.counts(), (0, 3));
        // The avi and mkv inputs were installed under the canonical extension.
        assert!(dir.path().join("b.mp4").exists());
        assert!(dir.path().join("c.mp4").exists());
    }

    #[test]
    fn failed_jobs_stay_pending() {
        let (_dir, store) = setup(&["a.mp4", "b.avi"]);
        let queue = Arc::new(JobQueue::new());
        for path in store.pending_files() {
            queue.push(path);
        }
        let converter = Arc::new(Converter::new(
            StubEngine::failing("engine exploded"),
            EncodeProfile::default(),
        ));

        run_pool(Arc::clone(&queue), Arc::clone(&store), converter, 2, idle());

        assert!(queue.is_empty());
        assert_eq!(store.counts(), (2, 0));
    }

    #[test]
    fn single_worker_still_drains_everything() {
        let (_dir, store) = setup(&["a.mp4", "b.mp4", "c.mp4"]);
        let queue = Arc::new(JobQueue::new());
        for path in store.pending_files() {
            queue.push(path);
        }
        let converter = Arc::new(Converter::new(
            StubEngine::succeeding(),
            EncodeProfile::default(),
        ));

        run_pool(Arc::clone(&queue), Arc::clone(&store), converter, 1, idle());

        assert_eq!(store.counts(), (0, 3));
    }
}
