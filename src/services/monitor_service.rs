//! Monitor service
//!
//! Runs one check cycle end to end: fetch treatments, extract the bolus
//! window, diff it against the stored window, and alert on a qualifying
//! new bolus. Side effects per cycle happen in a strict order: the last
//! check time is persisted once a usable window was extracted, and the
//! window itself is persisted only once a new first entry has parsed.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::TreatmentSource;
use crate::domain::Iob;
use crate::error::Result;
use crate::monitor::types::{BolusAlert, CheckOutcome, Detection, RetryReason};
use crate::monitor::{detect, AlertChannel};
use crate::scan::{IobScanner, TreatmentScanner};
use crate::store::StateStore;

/// Longest response prefix echoed into the debug log
const BODY_PREVIEW_LEN: usize = 200;

/// Orchestrates check cycles over an API source and a state store
pub struct MonitorService<A: TreatmentSource, S: StateStore> {
    api: A,
    store: S,
    channel: AlertChannel,
    treatments: TreatmentScanner,
    iob: IobScanner,
    threshold_units: f64,
}

impl<A: TreatmentSource, S: StateStore> MonitorService<A, S> {
    /// Create a service with the given collaborators
    pub fn new(api: A, store: S, channel: AlertChannel, threshold_units: f64) -> Self {
        Self {
            api,
            store,
            channel,
            treatments: TreatmentScanner::new(),
            iob: IobScanner::new(),
            threshold_units,
        }
    }

    /// Run a single check cycle.
    ///
    /// API failures never escape: they resolve to a `Retry` outcome with
    /// a reason code. Only state-store failures propagate as errors.
    pub fn run_cycle(&mut self) -> Result<CheckOutcome> {
        let body = match self.api.fetch_treatments() {
            Ok(body) => body,
            Err(e) => {
                log::warn!("treatments fetch failed: {}", e);
                return Ok(CheckOutcome::Retry(RetryReason::FetchFailed));
            }
        };

        if body.is_empty() {
            log::warn!("empty response from treatments API");
            return Ok(CheckOutcome::Retry(RetryReason::EmptyBody));
        }

        log::debug!("treatments response: {}", body_preview(&body));

        let new_window = self.treatments.extract_window(&body);
        if new_window.is_empty() {
            log::warn!("no boluses found in response");
            return Ok(CheckOutcome::Retry(RetryReason::NoRecords));
        }

        log::debug!("extracted window: {}", new_window);

        let saved_window = self.store.window()?;
        self.store.set_last_check_ms(now_ms())?;

        match detect(&new_window, &saved_window) {
            Detection::Unusable => {
                log::warn!("no usable data in extracted window");
                Ok(CheckOutcome::Retry(RetryReason::NoRecords))
            }
            Detection::Unchanged => {
                log::debug!("no new bolus (same as saved)");
                Ok(CheckOutcome::Success)
            }
            Detection::TailChanged => {
                log::debug!("window tail changed, most recent bolus unchanged");
                Ok(CheckOutcome::Success)
            }
            Detection::Malformed => {
                log::warn!("most recent entry is malformed, skipping this cycle");
                Ok(CheckOutcome::Success)
            }
            Detection::NewBolus(record) => {
                log::info!(
                    "new bolus detected: timestamp={} units={}",
                    record.timestamp_ms,
                    record.units
                );

                if record.units >= self.threshold_units {
                    let iob = self.current_iob();
                    self.channel.publish(BolusAlert::new(record, iob));
                } else {
                    log::debug!(
                        "bolus below threshold ({} < {}), no notification",
                        record.units,
                        self.threshold_units
                    );
                }

                // Persisted whether or not the threshold fired.
                self.store.set_window(&new_window)?;
                Ok(CheckOutcome::Success)
            }
        }
    }

    /// Best-effort IOB lookup; any failure degrades to zero
    fn current_iob(&self) -> Iob {
        match self.api.fetch_iob() {
            Ok(body) if !body.is_empty() => self.iob.extract(&body),
            Ok(_) => {
                log::warn!("empty response from IOB API");
                Iob::ZERO
            }
            Err(e) => {
                log::warn!("IOB fetch failed: {}", e);
                Iob::ZERO
            }
        }
    }

    /// The alert channel (latest published alert included)
    pub fn channel(&self) -> &AlertChannel {
        &self.channel
    }

    /// The underlying state store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying state store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::mock::{MemoryStore, MockSource, RecordingNotifier};

    fn build_service(
        api: MockSource,
        store: MemoryStore,
    ) -> (
        MonitorService<MockSource, MemoryStore>,
        std::sync::Arc<std::sync::Mutex<Vec<BolusAlert>>>,
    ) {
        let notifier = RecordingNotifier::new();
        let delivered = notifier.delivered();
        let mut channel = AlertChannel::new();
        channel.add_notifier(Box::new(notifier));
        (MonitorService::new(api, store, channel, 2.0), delivered)
    }

    #[test]
    fn test_scenario_a_new_bolus_above_threshold() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":3.5},{\"created_at\":900,\"insulin\":1.0}]")
            .with_iob("{\"iob\":{\"iob\":2.5}}");
        let (mut service, delivered) = build_service(api, MemoryStore::new());

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Success);
        assert_eq!(
            service.store().window().unwrap().as_str(),
            "1000,3.5|900,1.0"
        );
        let alerts = delivered.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].record.timestamp_ms, 1000);
        assert_eq!(alerts[0].record.units, 3.5);
        assert_eq!(alerts[0].iob.as_units(), 2.5);
    }

    #[test]
    fn test_scenario_b_unchanged_window_no_write() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":3.5},{\"created_at\":900,\"insulin\":1.0}]");
        let store = MemoryStore::new()
            .with_window("1000,3.5|900,1.0");
        let (mut service, delivered) = build_service(api, store);

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Success);
        assert!(delivered.lock().unwrap().is_empty());
        // lastCheckTime still advanced.
        assert!(service.store().last_check_ms().unwrap() > 0);
        assert_eq!(service.store().window_writes(), 0);
    }

    #[test]
    fn test_scenario_c_below_threshold_persists_without_alert() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1100,\"insulin\":1.5},{\"created_at\":1000,\"insulin\":3.5}]");
        let store = MemoryStore::new().with_window("1000,3.5");
        let (mut service, delivered) = build_service(api, store);

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Success);
        assert!(delivered.lock().unwrap().is_empty());
        assert_eq!(
            service.store().window().unwrap().as_str(),
            "1100,1.5|1000,3.5"
        );
    }

    #[test]
    fn test_scenario_d_http_error_touches_no_state() {
        let api = MockSource::new().with_treatments_error(|| ApiError::Status {
            url: "http://127.0.0.1:17580/treatments.json?count=5".to_string(),
            status: 500,
        });
        let (mut service, delivered) = build_service(api, MemoryStore::new());

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Retry(RetryReason::FetchFailed));
        assert!(delivered.lock().unwrap().is_empty());
        assert_eq!(service.store().last_check_ms().unwrap(), 0);
        assert_eq!(service.store().write_count(), 0);
    }

    #[test]
    fn test_scenario_e_unparsable_body_is_retry() {
        let api = MockSource::new().with_treatments("[]");
        let (mut service, _delivered) = build_service(api, MemoryStore::new());

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Retry(RetryReason::NoRecords));
        assert_eq!(service.store().write_count(), 0);
    }

    #[test]
    fn test_empty_body_is_retry() {
        let api = MockSource::new().with_treatments("");
        let (mut service, _delivered) = build_service(api, MemoryStore::new());

        let outcome = service.run_cycle().unwrap();
        assert_eq!(outcome, CheckOutcome::Retry(RetryReason::EmptyBody));
    }

    #[test]
    fn test_threshold_boundary_fires_at_exactly_two_units() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":2.0}]")
            .with_iob("{\"iob\":{\"iob\":0.5}}");
        let (mut service, delivered) = build_service(api, MemoryStore::new());

        service.run_cycle().unwrap();
        assert_eq!(delivered.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_threshold_boundary_does_not_fire_below_two_units() {
        let api = MockSource::new().with_treatments("[{\"created_at\":1000,\"insulin\":1.9999}]");
        let (mut service, delivered) = build_service(api, MemoryStore::new());

        service.run_cycle().unwrap();
        assert!(delivered.lock().unwrap().is_empty());
        // The window still persisted.
        assert_eq!(service.store().window().unwrap().as_str(), "1000,1.9999");
    }

    #[test]
    fn test_iob_failure_degrades_to_zero() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":3.0}]")
            .with_iob_error(|| ApiError::Status {
                url: "http://127.0.0.1:17580/pebble".to_string(),
                status: 503,
            });
        let (mut service, delivered) = build_service(api, MemoryStore::new());

        service.run_cycle().unwrap();

        let alerts = delivered.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].iob, Iob::ZERO);
    }

    #[test]
    fn test_malformed_first_entry_swallowed() {
        // First object has a units field that captures as "1.2.3" and
        // fails to parse; cycle succeeds with no alert and no write.
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1100,\"insulin\":1.2.3},{\"created_at\":1000,\"insulin\":3.5}]");
        let store = MemoryStore::new().with_window("1000,3.5");
        let (mut service, delivered) = build_service(api, store);

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Success);
        assert!(delivered.lock().unwrap().is_empty());
        assert_eq!(service.store().window().unwrap().as_str(), "1000,3.5");
        assert_eq!(service.store().window_writes(), 0);
    }

    #[test]
    fn test_tail_change_does_not_persist() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":3.5}]");
        let store = MemoryStore::new().with_window("1000,3.5|900,1.0");
        let (mut service, delivered) = build_service(api, store);

        let outcome = service.run_cycle().unwrap();

        assert_eq!(outcome, CheckOutcome::Success);
        assert!(delivered.lock().unwrap().is_empty());
        assert_eq!(
            service.store().window().unwrap().as_str(),
            "1000,3.5|900,1.0"
        );
    }

    #[test]
    fn test_iob_fetched_only_for_qualifying_bolus() {
        let api = MockSource::new().with_treatments("[{\"created_at\":1000,\"insulin\":1.0}]");
        let (mut service, _delivered) = build_service(api, MemoryStore::new());

        service.run_cycle().unwrap();
        assert_eq!(service.api.iob_fetches(), 0);
    }

    #[test]
    fn test_replaces_prior_alert_on_channel() {
        let api = MockSource::new()
            .with_treatments("[{\"created_at\":1000,\"insulin\":3.5}]")
            .with_iob("{\"iob\":{\"iob\":1.0}}");
        let (mut service, _delivered) = build_service(api, MemoryStore::new());
        service.run_cycle().unwrap();

        service.api.set_treatments("[{\"created_at\":2000,\"insulin\":4.5},{\"created_at\":1000,\"insulin\":3.5}]");
        service.run_cycle().unwrap();

        let current = service.channel().current().unwrap();
        assert_eq!(current.record.timestamp_ms, 2000);
    }

    #[test]
    fn test_body_preview_truncation() {
        let long = "x".repeat(500);
        assert_eq!(body_preview(&long).len(), BODY_PREVIEW_LEN);
        assert_eq!(body_preview("short"), "short");
    }
}
