//! In-memory catalog + booking ledger for ClickFix.

use std::path::PathBuf;

use chrono::Utc;
use clickfix_core::{BookingCategory, Job, JobStatus, Worker};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

pub const CRATE_NAME: &str = "clickfix-store";

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("illegal status transition {from} -> {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}

/// How `update_status` treats moves outside the lifecycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Strict,
    /// Any status may follow any status.
    Lenient,
}

impl TransitionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub seed_path: Option<PathBuf>,
    pub transition_policy: TransitionPolicy,
    pub event_capacity: usize,
    pub currency: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            transition_policy: TransitionPolicy::Strict,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            currency: "LKR".to_string(),
        }
    }
}

impl MarketplaceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a `CLICKFIX_*` variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            seed_path: lookup("CLICKFIX_SEED_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            transition_policy: lookup("CLICKFIX_TRANSITION_POLICY")
                .and_then(|v| TransitionPolicy::parse(&v))
                .unwrap_or_default(),
            event_capacity: lookup("CLICKFIX_EVENT_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(DEFAULT_EVENT_CAPACITY),
            currency: lookup("CLICKFIX_CURRENCY").unwrap_or_else(|| "LKR".to_string()),
        }
    }
}

/// Read-only set of service-provider profiles, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    workers: Vec<Worker>,
}

impl Catalog {
    pub fn new(workers: Vec<Worker>) -> Self {
        Self { workers }
    }

    pub fn list(&self) -> &[Worker] {
        &self.workers
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Workers in `category` (or any, for "All") whose name or category contains `query`.
    pub fn search(&self, query: &str, category: &str) -> Vec<&Worker> {
        self.workers
            .iter()
            .filter(|w| w.in_category(category) && w.matches_query(query))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for worker in &self.workers {
            if !seen.contains(&worker.category.as_str()) {
                seen.push(worker.category.as_str());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    JobCreated(Job),
    StatusChanged {
        job_id: String,
        worker_id: String,
        from: JobStatus,
        to: JobStatus,
    },
}

/// Worker dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerDashboard {
    pub worker_id: String,
    pub pending: Vec<Job>,
    pub earnings: f64,
    pub completed_count: usize,
}

/// Sole owner of job records. Newest jobs come first.
#[derive(Debug)]
pub struct BookingLedger {
    jobs: Vec<Job>,
    policy: TransitionPolicy,
    events: broadcast::Sender<LedgerEvent>,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new(TransitionPolicy::default(), DEFAULT_EVENT_CAPACITY)
    }
}

impl BookingLedger {
    pub fn new(policy: TransitionPolicy, event_capacity: usize) -> Self {
        Self::with_jobs(Vec::new(), policy, event_capacity)
    }

    /// Jobs are taken as already ordered newest first.
    pub fn with_jobs(jobs: Vec<Job>, policy: TransitionPolicy, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            jobs,
            policy,
            events,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: LedgerEvent) {
        // No receivers is fine; pollers read `list()` instead.
        let _ = self.events.send(event);
    }

    pub fn create(
        &mut self,
        customer_id: &str,
        worker: &Worker,
        description: &str,
        media: Vec<String>,
        price: f64,
    ) -> Result<Job, StoreError> {
        let span = info_span!("ledger_create", customer_id, worker_id = %worker.id);
        let _guard = span.enter();

        if description.trim().is_empty() {
            debug!("rejecting booking without description");
            return Err(StoreError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        let mut id = Uuid::new_v4().to_string();
        while self.get(&id).is_some() {
            id = Uuid::new_v4().to_string();
        }

        let job = Job {
            id,
            customer_id: customer_id.to_string(),
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            service: worker.category.clone(),
            description: description.to_string(),
            status: JobStatus::Pending,
            created_at: Utc::now(),
            price,
            attached_media: media,
        };

        self.jobs.insert(0, job.clone());
        info!(job_id = %job.id, media = job.attached_media.len(), "job created");
        self.emit(LedgerEvent::JobCreated(job.clone()));
        Ok(job)
    }

    /// Setting the status a job already has succeeds without emitting an event.
    pub fn update_status(&mut self, job_id: &str, status: JobStatus) -> Result<Job, StoreError> {
        let span = info_span!("ledger_update_status", job_id, to = %status);
        let _guard = span.enter();

        let Some(job) = self.jobs.iter_mut().find(|j| j.id == job_id) else {
            warn!("status update for unknown job");
            return Err(StoreError::NotFound {
                entity: "job",
                id: job_id.to_string(),
            });
        };

        if job.status == status {
            debug!("status unchanged");
            return Ok(job.clone());
        }

        if self.policy == TransitionPolicy::Strict && !job.status.can_transition_to(&status) {
            warn!(from = %job.status, "illegal status transition rejected");
            return Err(StoreError::InvalidTransition {
                from: job.status.clone(),
                to: status,
            });
        }

        let from = std::mem::replace(&mut job.status, status.clone());
        let updated = job.clone();
        info!(%from, "job status updated");
        self.emit(LedgerEvent::StatusChanged {
            job_id: updated.id.clone(),
            worker_id: updated.worker_id.clone(),
            from,
            to: status,
        });
        Ok(updated)
    }

    pub fn list(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn list_by_customer(&self, customer_id: &str) -> Vec<&Job> {
        self.jobs.iter().filter(|j| j.customer_id == customer_id).collect()
    }

    pub fn list_by_worker(&self, worker_id: &str) -> Vec<&Job> {
        self.jobs.iter().filter(|j| j.worker_id == worker_id).collect()
    }

    pub fn list_by_worker_and_status(&self, worker_id: &str, status: &JobStatus) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|j| j.worker_id == worker_id && &j.status == status)
            .collect()
    }

    pub fn list_by_customer_and_category(
        &self,
        customer_id: &str,
        category: BookingCategory,
    ) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|j| j.customer_id == customer_id && j.category() == category)
            .collect()
    }

    pub fn earnings(&self, worker_id: &str) -> f64 {
        self.list_by_worker_and_status(worker_id, &JobStatus::Completed)
            .iter()
            .map(|j| j.price)
            .sum()
    }

    pub fn completed_count(&self, worker_id: &str) -> usize {
        self.list_by_worker_and_status(worker_id, &JobStatus::Completed)
            .len()
    }

    pub fn pending_count(&self, worker_id: &str) -> usize {
        self.list_by_worker_and_status(worker_id, &JobStatus::Pending)
            .len()
    }

    pub fn dashboard(&self, worker_id: &str) -> WorkerDashboard {
        WorkerDashboard {
            worker_id: worker_id.to_string(),
            pending: self
                .list_by_worker_and_status(worker_id, &JobStatus::Pending)
                .into_iter()
                .cloned()
                .collect(),
            earnings: self.earnings(worker_id),
            completed_count: self.completed_count(worker_id),
        }
    }
}

/// Owned state container handed to every consumer by reference.
#[derive(Debug, Default)]
pub struct Marketplace {
    catalog: Catalog,
    ledger: BookingLedger,
}

impl Marketplace {
    pub fn new(catalog: Catalog, ledger: BookingLedger) -> Self {
        Self { catalog, ledger }
    }

    pub fn from_config(catalog: Catalog, jobs: Vec<Job>, config: &MarketplaceConfig) -> Self {
        Self::new(
            catalog,
            BookingLedger::with_jobs(jobs, config.transition_policy, config.event_capacity),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BookingLedger {
        &mut self.ledger
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.ledger.subscribe()
    }

    /// Books `worker_id` at the worker's current hourly rate.
    pub fn book(
        &mut self,
        customer_id: &str,
        worker_id: &str,
        description: &str,
        media: Vec<String>,
    ) -> Result<Job, StoreError> {
        let worker = self
            .catalog
            .find_by_id(worker_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "worker",
                id: worker_id.to_string(),
            })?;
        self.ledger
            .create(customer_id, worker, description, media, worker.hourly_rate)
    }

    pub fn update_status(&mut self, job_id: &str, status: JobStatus) -> Result<Job, StoreError> {
        self.ledger.update_status(job_id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::broadcast::error::TryRecvError;

    fn worker(id: &str, name: &str, category: &str, rate: f64) -> Worker {
        Worker {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            rating: 4.5,
            hourly_rate: rate,
            image: String::new(),
            location: String::new(),
            about: String::new(),
            reviews: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            worker("1", "Nimal ", "Plumber", 1500.0),
            worker("2", "Saman ", "Electrician", 2000.0),
            worker("3", " Devi", "Cleaner", 1000.0),
            worker("4", "Ravi Raj", "Carpenter", 1800.0),
            worker("5", "Plumbline Kasun", "Carpenter", 1700.0),
        ])
    }

    fn marketplace(policy: TransitionPolicy) -> Marketplace {
        Marketplace::new(catalog(), BookingLedger::new(policy, 16))
    }

    #[test]
    fn search_empty_query_all_returns_catalog_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.search("", "All").iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_matches_name_or_category_case_insensitively() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .search("PLUMB", "All")
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "5"]);

        let carpenters: Vec<_> = catalog
            .search("plumb", "Carpenter")
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(carpenters, vec!["5"]);
        assert!(catalog.search("", "carpenter").is_empty());
    }

    #[test]
    fn find_by_id_is_exact() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_id("2").map(|w| w.category.as_str()), Some("Electrician"));
        assert!(catalog.find_by_id("02").is_none());
    }

    #[test]
    fn categories_are_distinct_in_catalog_order() {
        assert_eq!(
            catalog().categories(),
            vec!["Plumber", "Electrician", "Cleaner", "Carpenter"]
        );
    }

    #[test]
    fn create_prepends_pending_job_with_snapshot() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let first = market.book("c1", "1", "Leaking pipe", vec![]).expect("book");
        let second = market
            .book("c1", "2", "Sparking socket", vec!["file:///tmp/a.jpg".into()])
            .expect("book");

        assert_eq!(first.status, JobStatus::Pending);
        assert_eq!(first.worker_name, "Nimal ");
        assert_eq!(first.service, "Plumber");
        assert_eq!(first.price, 1500.0);
        assert_ne!(first.id, second.id);
        assert_eq!(second.attached_media, vec!["file:///tmp/a.jpg".to_string()]);

        let ids: Vec<_> = market.ledger().list().iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);
        assert_eq!(market.ledger().list_by_customer("c1")[0].id, second.id);
    }

    #[test]
    fn create_stamps_current_time() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let before = Utc::now();
        let job = market.book("c1", "3", "Deep clean", vec![]).expect("book");
        let after = Utc::now();
        assert!(before <= job.created_at && job.created_at <= after);
    }

    #[test]
    fn blank_description_is_rejected_without_mutation() {
        let mut market = marketplace(TransitionPolicy::Strict);
        for description in ["", "   ", "\n\t"] {
            let err = market.book("c1", "1", description, vec![]).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
        }
        assert!(market.ledger().is_empty());
    }

    #[test]
    fn booking_unknown_worker_is_not_found() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let err = market.book("c1", "99", "Help", vec![]).unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                entity: "worker",
                id: "99".into()
            }
        );
        assert!(market.ledger().is_empty());
    }

    #[test]
    fn update_status_touches_only_the_target() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let a = market.book("c1", "1", "A", vec![]).expect("book a");
        let b = market.book("c2", "1", "B", vec![]).expect("book b");

        let updated = market.update_status(&a.id, JobStatus::Accepted).expect("accept");
        assert_eq!(updated.status, JobStatus::Accepted);
        assert_eq!(market.ledger().get(&a.id).map(|j| &j.status), Some(&JobStatus::Accepted));
        assert_eq!(market.ledger().get(&b.id), Some(&b));
    }

    #[test]
    fn update_status_unknown_job_is_not_found() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let job = market.book("c1", "1", "A", vec![]).expect("book");
        let before = market.ledger().list().to_vec();

        let err = market.update_status("nope", JobStatus::Accepted).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "job", .. }));
        assert_eq!(market.ledger().list(), before.as_slice());
        assert_eq!(market.ledger().get(&job.id).map(|j| &j.status), Some(&JobStatus::Pending));
    }

    #[test]
    fn strict_policy_rejects_illegal_transitions() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let job = market.book("c1", "1", "A", vec![]).expect("book");

        let err = market.update_status(&job.id, JobStatus::Completed).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: JobStatus::Pending,
                to: JobStatus::Completed
            }
        );

        market.update_status(&job.id, JobStatus::Rejected).expect("reject");
        let err = market.update_status(&job.id, JobStatus::Accepted).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
        assert_eq!(market.ledger().get(&job.id).map(|j| &j.status), Some(&JobStatus::Rejected));
    }

    #[test]
    fn lenient_policy_allows_any_transition() {
        let mut market = marketplace(TransitionPolicy::Lenient);
        let job = market.book("c1", "1", "A", vec![]).expect("book");
        market.update_status(&job.id, JobStatus::Completed).expect("complete");
        market.update_status(&job.id, JobStatus::Pending).expect("reopen");
        market
            .update_status(&job.id, JobStatus::from("On Hold"))
            .expect("opaque status");
        let job = market.ledger().get(&job.id).expect("job");
        assert_eq!(job.category(), BookingCategory::Ongoing);
    }

    #[test]
    fn repeated_update_is_idempotent() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let job = market.book("c1", "1", "A", vec![]).expect("book");
        market.update_status(&job.id, JobStatus::Accepted).expect("first");
        let once = market.ledger().list().to_vec();
        market.update_status(&job.id, JobStatus::Accepted).expect("second");
        assert_eq!(market.ledger().list(), once.as_slice());
    }

    #[test]
    fn earnings_count_only_completed_jobs_once() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let done = market.book("c1", "1", "A", vec![]).expect("book");
        market.update_status(&done.id, JobStatus::Accepted).expect("accept");
        market.update_status(&done.id, JobStatus::Completed).expect("complete");
        assert_eq!(market.ledger().earnings("1"), 1500.0);

        let pending = market.book("c1", "1", "B", vec![]).expect("book");
        market.book("c1", "2", "Other worker", vec![]).expect("book");
        assert_eq!(market.ledger().earnings("1"), 1500.0);
        assert_eq!(market.ledger().completed_count("1"), 1);

        market.update_status(&pending.id, JobStatus::Accepted).expect("accept");
        market.update_status(&pending.id, JobStatus::Completed).expect("complete");
        market.update_status(&pending.id, JobStatus::Completed).expect("noop");
        assert_eq!(market.ledger().earnings("1"), 3000.0);
        assert_eq!(market.ledger().completed_count("1"), 2);
        assert_eq!(market.ledger().earnings("2"), 0.0);
    }

    #[test]
    fn filters_preserve_ledger_order() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let a = market.book("c1", "1", "A", vec![]).expect("book");
        let b = market.book("c2", "1", "B", vec![]).expect("book");
        let c = market.book("c1", "2", "C", vec![]).expect("book");
        market.update_status(&a.id, JobStatus::Accepted).expect("accept");

        let by_worker: Vec<_> = market.ledger().list_by_worker("1").iter().map(|j| j.id.clone()).collect();
        assert_eq!(by_worker, vec![b.id.clone(), a.id.clone()]);

        let by_customer: Vec<_> = market.ledger().list_by_customer("c1").iter().map(|j| j.id.clone()).collect();
        assert_eq!(by_customer, vec![c.id.clone(), a.id.clone()]);

        let pending = market.ledger().list_by_worker_and_status("1", &JobStatus::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, b.id);
    }

    #[test]
    fn customer_tabs_follow_status_category() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let a = market.book("c1", "1", "A", vec![]).expect("book");
        let b = market.book("c1", "2", "B", vec![]).expect("book");
        market.update_status(&b.id, JobStatus::Rejected).expect("reject");

        let ledger = market.ledger();
        let ongoing = ledger.list_by_customer_and_category("c1", BookingCategory::Ongoing);
        let cancelled = ledger.list_by_customer_and_category("c1", BookingCategory::Cancelled);
        assert_eq!(ongoing.iter().map(|j| &j.id).collect::<Vec<_>>(), vec![&a.id]);
        assert_eq!(cancelled.iter().map(|j| &j.id).collect::<Vec<_>>(), vec![&b.id]);
        assert!(ledger
            .list_by_customer_and_category("c1", BookingCategory::Upcoming)
            .is_empty());
    }

    #[test]
    fn dashboard_collects_pending_and_totals() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let a = market.book("c1", "1", "A", vec![]).expect("book");
        let b = market.book("c1", "1", "B", vec![]).expect("book");
        market.update_status(&a.id, JobStatus::Accepted).expect("accept");
        market.update_status(&a.id, JobStatus::Completed).expect("complete");

        let dash = market.ledger().dashboard("1");
        assert_eq!(dash.pending.iter().map(|j| j.id.clone()).collect::<Vec<_>>(), vec![b.id]);
        assert_eq!(dash.earnings, 1500.0);
        assert_eq!(dash.completed_count, 1);
        assert_eq!(market.ledger().pending_count("1"), 1);
    }

    #[tokio::test]
    async fn subscribers_see_creations_and_transitions() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let mut rx = market.subscribe();

        let job = market.book("c1", "1", "Leaking pipe", vec![]).expect("book");
        market.update_status(&job.id, JobStatus::Accepted).expect("accept");

        assert_eq!(rx.recv().await.expect("created"), LedgerEvent::JobCreated(job.clone()));
        assert_eq!(
            rx.recv().await.expect("changed"),
            LedgerEvent::StatusChanged {
                job_id: job.id.clone(),
                worker_id: "1".into(),
                from: JobStatus::Pending,
                to: JobStatus::Accepted,
            }
        );
    }

    #[test]
    fn failed_and_noop_operations_emit_nothing() {
        let mut market = marketplace(TransitionPolicy::Strict);
        let job = market.book("c1", "1", "A", vec![]).expect("book");
        let mut rx = market.subscribe();

        assert!(market.book("c1", "1", " ", vec![]).is_err());
        assert!(market.update_status("missing", JobStatus::Accepted).is_err());
        assert!(market.update_status(&job.id, JobStatus::Completed).is_err());
        market.update_status(&job.id, JobStatus::Pending).expect("noop");

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    fn config_from(vars: &[(&str, &str)]) -> MarketplaceConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MarketplaceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn config_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.seed_path, None);
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
        assert_eq!(config.currency, "LKR");
    }

    #[test]
    fn config_reads_overrides() {
        let config = config_from(&[
            ("CLICKFIX_SEED_PATH", "/tmp/seed.yaml"),
            ("CLICKFIX_TRANSITION_POLICY", "lenient"),
            ("CLICKFIX_EVENT_CAPACITY", " 8 "),
            ("CLICKFIX_CURRENCY", "USD"),
        ]);
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.yaml")));
        assert_eq!(config.transition_policy, TransitionPolicy::Lenient);
        assert_eq!(config.event_capacity, 8);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn config_ignores_unusable_values() {
        for capacity in ["0", "lots", "-3"] {
            let config = config_from(&[
                ("CLICKFIX_SEED_PATH", "   "),
                ("CLICKFIX_TRANSITION_POLICY", "loose"),
                ("CLICKFIX_EVENT_CAPACITY", capacity),
            ]);
            assert_eq!(config.seed_path, None);
            assert_eq!(config.transition_policy, TransitionPolicy::Strict);
            assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY, "capacity {capacity:?}");
        }
    }

    #[test]
    fn transition_policy_parses_loosely() {
        assert_eq!(TransitionPolicy::parse(" Lenient "), Some(TransitionPolicy::Lenient));
        assert_eq!(TransitionPolicy::parse("STRICT"), Some(TransitionPolicy::Strict));
        assert_eq!(TransitionPolicy::parse("loose"), None);
    }
}
