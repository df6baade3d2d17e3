// Device coordinator
//
// One coordinator owns one switch: the HTTP client, the published
// snapshot, and the background poll task. Consumers are handed a
// coordinator (cheaply cloneable) rather than looking one up from any
// ambient registry.
//
// A sync cycle fetches the five management pages in a fixed order —
// identity sources first, then PoE, settings, stats — merging each
// fragment into a fresh snapshot. The cycle commits atomically: the
// published snapshot is only replaced when every fetch and merge
// succeeded within the cycle deadline, so a failed cycle leaves the
// previous state authoritative.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use keeplink_api::{Endpoint, SwitchClient, TransportConfig, pages};

use crate::config::SwitchConfig;
use crate::error::CoreError;
use crate::model::{DeviceIdentity, Snapshot};

/// Coordinator for one switch.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: SwitchConfig,
    client: SwitchClient,
    /// Published snapshot; replaced wholesale on successful cycles only.
    snapshot: ArcSwap<Snapshot>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
    /// Serializes sync cycles and carries the latest outcome for callers
    /// that coalesced onto an in-flight cycle.
    gate: Mutex<CycleGate>,
    /// Mirror of `gate.seq`, readable without the lock.
    cycle_seq: AtomicU64,
    cancel: CancellationToken,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

struct CycleGate {
    /// Count of completed cycles (successful or not).
    seq: u64,
    /// Outcome of the most recent cycle.
    last: Result<(), CoreError>,
}

impl Coordinator {
    /// Create a coordinator from configuration. Performs no I/O — call
    /// [`refresh()`](Self::refresh) for the first sync.
    pub fn new(config: SwitchConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: Duration::from_secs(config.request_timeout_secs),
            ..TransportConfig::default()
        };
        let client = SwitchClient::new(
            &config.host,
            &config.username,
            config.password.expose_secret(),
            &transport,
        )?;
        let (last_refresh, _) = watch::channel(None);

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                client,
                snapshot: ArcSwap::from_pointee(Snapshot::default()),
                last_refresh,
                gate: Mutex::new(CycleGate {
                    seq: 0,
                    last: Ok(()),
                }),
                cycle_seq: AtomicU64::new(0),
                cancel: CancellationToken::new(),
                poll_handle: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.inner.config
    }

    pub(crate) fn client(&self) -> &SwitchClient {
        &self.inner.client
    }

    // ── State accessors ──────────────────────────────────────────

    /// The last successfully synced snapshot. Empty until the first
    /// cycle completes.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.load_full()
    }

    /// Device identity, once a sync has learned the MAC address.
    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.snapshot().identity()
    }

    /// Subscribe to successful-refresh timestamps.
    pub fn last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.inner.last_refresh.subscribe()
    }

    // ── Sync engine ──────────────────────────────────────────────

    /// Run one sync cycle, or coalesce onto the cycle already in flight.
    ///
    /// A caller that arrives while another cycle is running waits for it
    /// and shares its outcome instead of starting a second cycle — two
    /// interleaved cycles would race on replacing the snapshot.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let observed = self.inner.cycle_seq.load(Ordering::Acquire);
        let mut gate = self.inner.gate.lock().await;
        if gate.seq > observed {
            // A full cycle completed while we waited for the lock.
            return gate.last.clone();
        }

        let result = self.run_cycle().await;
        gate.seq += 1;
        gate.last = result.clone();
        self.inner.cycle_seq.store(gate.seq, Ordering::Release);
        result
    }

    async fn run_cycle(&self) -> Result<(), CoreError> {
        let deadline = Duration::from_secs(self.inner.config.cycle_timeout_secs);
        match tokio::time::timeout(deadline, self.fetch_cycle()).await {
            Ok(Ok(snapshot)) => {
                debug!(
                    host = %self.inner.config.host,
                    ports = snapshot.ports.len(),
                    "sync cycle complete"
                );
                self.inner.snapshot.store(Arc::new(snapshot));
                let _ = self.inner.last_refresh.send(Some(Utc::now()));
                Ok(())
            }
            Ok(Err(err)) => {
                warn!(host = %self.inner.config.host, error = %err, "sync cycle failed");
                Err(err.into())
            }
            Err(_) => {
                warn!(host = %self.inner.config.host, "sync cycle timed out");
                Err(CoreError::Timeout {
                    timeout_secs: self.inner.config.cycle_timeout_secs,
                })
            }
        }
    }

    /// The ordered fetch sequence. Builds a fresh snapshot; the caller
    /// decides whether it becomes authoritative.
    async fn fetch_cycle(&self) -> Result<Snapshot, keeplink_api::Error> {
        let client = &self.inner.client;
        let mut snapshot = Snapshot::default();

        // Identity sources first.
        let html = client.get_page(Endpoint::Info).await?;
        snapshot.apply_info(pages::parse_info(&html)?);

        let html = client.get_page(Endpoint::PseSystem).await?;
        snapshot.apply_poe_system(pages::parse_poe_system(&html));

        // Port sources: PoE, then settings, then stats.
        let html = client.get_page(Endpoint::PsePort).await?;
        snapshot.apply_poe_ports(pages::parse_poe_ports(&html)?);

        let html = client.get_page(Endpoint::PortSettings).await?;
        snapshot.apply_port_settings(pages::parse_port_settings(&html)?);

        let html = client.get_page(Endpoint::PortStats).await?;
        snapshot.apply_port_stats(pages::parse_port_stats(&html)?);

        Ok(snapshot)
    }

    /// Refresh requested after a command: failures are logged, not
    /// surfaced — the command itself already went out, and the next
    /// scheduled poll will catch up.
    pub(crate) async fn request_refresh(&self) {
        if let Err(err) = self.refresh().await {
            warn!(host = %self.inner.config.host, error = %err, "post-command refresh failed");
        }
    }

    // ── Background polling ───────────────────────────────────────

    /// Start the background poll task, if a poll interval is configured.
    pub async fn start_polling(&self) {
        if self.inner.config.poll_interval_secs == 0 {
            return;
        }
        let mut handle = self.inner.poll_handle.lock().await;
        if handle.is_some() {
            return;
        }
        let coordinator = self.clone();
        let interval_secs = self.inner.config.poll_interval_secs;
        let cancel = self.inner.cancel.clone();
        *handle = Some(tokio::spawn(poll_task(coordinator, interval_secs, cancel)));
    }

    /// Stop background polling and wait for the task to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.poll_handle.lock().await.take() {
            let _ = handle.await;
        }
        debug!(host = %self.inner.config.host, "coordinator shut down");
    }
}

/// Periodic refresh loop. Retryable failures are logged and retried on
/// the next tick; an authentication failure stops the loop, because no
/// amount of polling fixes bad credentials.
async fn poll_task(coordinator: Coordinator, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                match coordinator.refresh().await {
                    Ok(()) => {}
                    Err(err) if err.is_retryable() => {
                        warn!(error = %err, "periodic refresh failed");
                    }
                    Err(err) => {
                        warn!(error = %err, "stopping periodic refresh");
                        break;
                    }
                }
            }
        }
    }
    info!("poll task stopped");
}
