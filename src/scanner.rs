use crate::observer::{ScanObserver, TracingObserver};
use crate::probe::{self, DEFAULT_TIMEOUT};
use crate::sink::ResultSink;
use crate::types::{PortTask, ProbeOutcome, ScanReport, ScanResult};
use ::time::{format_description::well_known, OffsetDateTime};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_WORKERS: usize = 50;
pub const MAX_WORKERS: usize = 5_000;

/// Knobs for a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Upper bound on one connect attempt.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub workers: usize,
    /// Surface closed ports to the observer as well as open ones.
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            verbose: false,
        }
    }
}

impl ScanConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Worker count actually used: at least one, at most `MAX_WORKERS`.
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}

/// Runs a bounded pool of connect probes against one target.
///
/// - Caps in-flight probes with a `Semaphore`; the dispatcher waits for a
///   permit before spawning, so queued work never outruns the pool.
/// - Joins every spawned task before reading results.
/// - On cancellation, stops dispatching, refuses further results, lets
///   in-flight probes run out their timeout and returns an empty report.
pub struct ScanEngine {
    config: ScanConfig,
    observer: Arc<dyn ScanObserver>,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Scan `ports` on `target` to completion.
    pub async fn scan<I>(&self, target: IpAddr, ports: I) -> ScanReport
    where
        I: IntoIterator<Item = u16>,
    {
        self.scan_with_cancel(target, ports, CancellationToken::new())
            .await
    }

    /// Variant that accepts a `CancellationToken` to allow external cancellation.
    pub async fn scan_with_cancel<I>(
        &self,
        target: IpAddr,
        ports: I,
        cancel: CancellationToken,
    ) -> ScanReport
    where
        I: IntoIterator<Item = u16>,
    {
        self.scan_with_probe(target, ports, cancel, probe::probe).await
    }

    /// Variant with a caller-supplied probe in place of the TCP connect.
    pub async fn scan_with_probe<I, P, Fut>(
        &self,
        target: IpAddr,
        ports: I,
        cancel: CancellationToken,
        prober: P,
    ) -> ScanReport
    where
        I: IntoIterator<Item = u16>,
        P: Fn(IpAddr, u16, Duration) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProbeOutcome> + Send + 'static,
    {
        let started_at = now_rfc3339();
        let unique: BTreeSet<u16> = ports.into_iter().collect();
        let tasks: Vec<PortTask> = unique
            .into_iter()
            .map(|port| PortTask { target, port })
            .collect();
        let workers = self.config.effective_workers();
        let timeout = self.config.timeout;

        self.observer.scan_started(target, tasks.len(), workers);

        let sink = Arc::new(ResultSink::new());
        let sem = Arc::new(Semaphore::new(workers));
        let prober = Arc::new(prober);
        let mut set = JoinSet::new();
        let mut task_ports = HashMap::with_capacity(tasks.len());

        for task in tasks.iter().copied() {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                permit = Arc::clone(&sem).acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                sink.cancel();
                break;
            };

            let sink = Arc::clone(&sink);
            let cancel = cancel.clone();
            let prober = Arc::clone(&prober);

            let handle = set.spawn(async move {
                let _permit = permit; // keep permit until task completes

                if cancel.is_cancelled() {
                    return;
                }

                let outcome = (*prober)(task.target, task.port, timeout).await;
                let result = ScanResult::from_outcome(task.target, outcome);
                if !sink.record(result) {
                    debug!(port = task.port, "result dropped after cancellation");
                }
            });
            task_ports.insert(handle.id(), task.port);
        }

        // Join barrier: nothing is read from the sink until every task is done.
        loop {
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled(), if !sink.is_cancelled() => {
                    sink.cancel();
                    continue;
                }
                joined = set.join_next_with_id() => joined,
            };
            match joined {
                None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    let port = task_ports.get(&err.id()).copied();
                    if !sink.is_cancelled() {
                        self.observer.task_failed(port, &describe_join_error(err));
                    }
                }
            }
        }

        if cancel.is_cancelled() || sink.is_cancelled() {
            sink.cancel();
            self.observer.interrupted();
            return ScanReport {
                target: target.to_string(),
                started_at,
                ports_requested: tasks.len(),
                open_count: 0,
                interrupted: true,
                results: Vec::new(),
            };
        }

        let results = sink.drain();
        let open_count = sink.open_count();
        for result in &results {
            if self.config.verbose || result.is_open {
                self.observer.port_result(result);
            }
        }
        self.observer.summary(open_count, results.len());

        ScanReport {
            target: target.to_string(),
            started_at,
            ports_requested: tasks.len(),
            open_count,
            interrupted: false,
            results,
        }
    }
}

/// Cancel `cancel` when the process receives Ctrl-C.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    })
}

fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_is_clamped() {
        assert_eq!(ScanConfig::default().with_workers(0).effective_workers(), 1);
        assert_eq!(ScanConfig::default().effective_workers(), DEFAULT_WORKERS);
        assert_eq!(
            ScanConfig::default().with_workers(1_000_000).effective_workers(),
            MAX_WORKERS
        );
    }

    #[test]
    fn defaults() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(1));
        assert_eq!(cfg.workers, 50);
        assert!(!cfg.verbose);
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T') && ts.ends_with('Z'), "{ts}");
    }
}
