//! Serial job queue
//!
//! Accepts research jobs over a FIFO queue and drains them one at a time
//! on a single worker task, so at most one job is ever running. The worker
//! parks on a [`Notify`] when the queue is empty and is woken by the next
//! enqueue. Every lifecycle transition publishes an owned progress
//! snapshot on a broadcast channel; subscribers that lag simply miss
//! events, they never block the worker.
//!
//! Jobs are kept in memory for the life of the process and are never
//! deleted, only transitioned.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, broadcast};
use tracing::{error, info, warn};
use uuid::Uuid;

use leadscope_core::domain::job::{Job, JobEvent, JobStatus, ResearchProgress};
use leadscope_core::domain::research::field_names;

use crate::research::{IterationUpdate, MAX_ITERATIONS, ResearchAgent};
use crate::search::SearchProvider;
use crate::store::Database;

#[derive(Default)]
struct JobTable {
    jobs: HashMap<Uuid, Job>,
    pending: VecDeque<Uuid>,
}

/// FIFO research job queue with a single worker
pub struct JobQueue {
    table: Mutex<JobTable>,
    wake: Notify,
    events: broadcast::Sender<JobEvent>,
    agent: ResearchAgent,
}

impl JobQueue {
    /// Creates the queue and spawns its worker task
    pub fn new(
        store: Arc<Database>,
        search: Arc<dyn SearchProvider>,
        event_buffer: usize,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(event_buffer);
        let queue = Arc::new(Self {
            table: Mutex::new(JobTable::default()),
            wake: Notify::new(),
            events,
            agent: ResearchAgent::new(store, search),
        });
        tokio::spawn(Arc::clone(&queue).run_worker());
        queue
    }

    /// Enqueues a research job for a person and returns the job record
    ///
    /// The person is not validated here; an unresolvable person fails the
    /// job when the worker picks it up.
    pub fn enqueue(&self, person_id: Uuid) -> Job {
        let id = Uuid::new_v4();
        let job = Job {
            id,
            person_id,
            status: JobStatus::Queued,
            created_at: chrono::Utc::now(),
            started_at: None,
            completed_at: None,
            error: None,
            progress: ResearchProgress::queued(id, person_id, MAX_ITERATIONS),
        };

        {
            let mut table = self.table.lock().unwrap();
            table.jobs.insert(id, job.clone());
            table.pending.push_back(id);
        }

        info!("Queued research job {} for person {}", id, person_id);
        self.emit(JobEvent::Queued {
            data: job.progress.clone(),
        });
        self.wake.notify_one();
        job
    }

    pub fn get_job(&self, id: Uuid) -> Option<Job> {
        let table = self.table.lock().unwrap();
        table.jobs.get(&id).cloned()
    }

    /// All jobs, newest first
    pub fn list_jobs(&self) -> Vec<Job> {
        let table = self.table.lock().unwrap();
        let mut jobs: Vec<_> = table.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// Subscribes to job lifecycle events
    ///
    /// Dropping the receiver unsubscribes; there is no explicit
    /// unsubscribe call.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: JobEvent) {
        // Send only fails when nobody is subscribed
        let _ = self.events.send(event);
    }

    async fn run_worker(self: Arc<Self>) {
        info!("Research job worker started");
        loop {
            let next = { self.table.lock().unwrap().pending.pop_front() };
            match next {
                Some(job_id) => self.process_job(job_id).await,
                None => self.wake.notified().await,
            }
        }
    }

    async fn process_job(&self, job_id: Uuid) {
        let (person_id, snapshot) = {
            let mut table = self.table.lock().unwrap();
            let Some(job) = table.jobs.get_mut(&job_id) else {
                warn!("Dropped unknown job {} from the queue", job_id);
                return;
            };
            job.status = JobStatus::Running;
            job.started_at = Some(chrono::Utc::now());
            job.progress.status = JobStatus::Running;
            job.progress.current_iteration = 1;
            (job.person_id, job.progress.clone())
        };

        info!("Processing research job {} for person {}", job_id, person_id);
        self.emit(JobEvent::Progress { data: snapshot });

        let on_progress = |update: IterationUpdate| {
            let snapshot = {
                let mut table = self.table.lock().unwrap();
                let Some(job) = table.jobs.get_mut(&job_id) else {
                    return;
                };
                job.progress.current_iteration = update.iteration;
                job.progress.current_query = Some(update.query);
                job.progress.found_fields = update.found_fields;
                job.progress.missing_fields = update.missing_fields;
                job.progress.clone()
            };
            self.emit(JobEvent::Progress { data: snapshot });
        };

        match self.agent.enrich_person(person_id, Some(&on_progress)).await {
            Ok(payload) => {
                let snapshot = {
                    let mut table = self.table.lock().unwrap();
                    let Some(job) = table.jobs.get_mut(&job_id) else {
                        return;
                    };
                    job.status = JobStatus::Completed;
                    job.completed_at = Some(chrono::Utc::now());
                    job.progress.status = JobStatus::Completed;
                    job.progress.current_query = None;
                    job.progress.found_fields = field_names(&payload.found_fields());
                    job.progress.missing_fields = field_names(&payload.missing_fields());
                    job.progress.clone()
                };
                info!(
                    "Research job {} completed with {} field(s) found",
                    job_id,
                    snapshot.found_fields.len()
                );
                self.emit(JobEvent::Completed { data: snapshot });
            }
            Err(e) => {
                let message = e.to_string();
                let snapshot = {
                    let mut table = self.table.lock().unwrap();
                    let Some(job) = table.jobs.get_mut(&job_id) else {
                        return;
                    };
                    job.status = JobStatus::Failed;
                    job.completed_at = Some(chrono::Utc::now());
                    job.error = Some(message.clone());
                    job.progress.status = JobStatus::Failed;
                    job.progress.current_query = None;
                    job.progress.error = Some(message.clone());
                    job.progress.clone()
                };
                error!("Research job {} failed: {}", job_id, message);
                self.emit(JobEvent::Failed { data: snapshot });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockSearchClient;
    use std::time::Duration;

    fn queue_with(store: Arc<Database>) -> Arc<JobQueue> {
        JobQueue::new(
            store,
            Arc::new(MockSearchClient::new(Duration::ZERO)),
            100,
        )
    }

    async fn next_event(rx: &mut broadcast::Receiver<JobEvent>) -> JobEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for job event")
            .expect("event channel closed")
    }

    /// Collects events until the given job reaches a terminal state
    async fn collect_run(rx: &mut broadcast::Receiver<JobEvent>, job_id: Uuid) -> Vec<JobEvent> {
        let mut events = Vec::new();
        loop {
            let event = next_event(rx).await;
            let done = matches!(
                &event,
                JobEvent::Completed { data } | JobEvent::Failed { data }
                    if data.job_id == job_id
            );
            events.push(event);
            if done {
                return events;
            }
        }
    }

    #[tokio::test]
    async fn test_job_runs_to_completion_with_ordered_events() {
        let store = Arc::new(Database::seeded());
        let person_id = store.people_with_companies()[0].person.id;
        let queue = queue_with(store);

        let mut rx = queue.subscribe();
        let job = queue.enqueue(person_id);
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.progress.current_iteration, 0);

        let events = collect_run(&mut rx, job.id).await;

        assert!(matches!(&events[0], JobEvent::Queued { data } if data.job_id == job.id));
        assert!(events[1..events.len() - 1]
            .iter()
            .all(|e| matches!(e, JobEvent::Progress { .. })));
        let last = events.last().unwrap();
        assert!(matches!(last, JobEvent::Completed { .. }));
        assert!(last.progress().missing_fields.is_empty());
        assert!(last.progress().current_query.is_none());

        let stored = queue.get_job(job.id).unwrap();
        assert_eq!(stored.status, JobStatus::Completed);
        assert!(stored.started_at.is_some());
        assert!(stored.completed_at.is_some());
        assert!(stored.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_person_fails_the_job_without_blocking_the_next() {
        let store = Arc::new(Database::seeded());
        let valid_person = store.people_with_companies()[0].person.id;
        let queue = queue_with(store);
        let mut rx = queue.subscribe();

        let person_id = Uuid::new_v4();
        let doomed = queue.enqueue(person_id);
        let healthy = queue.enqueue(valid_person);

        let events = collect_run(&mut rx, doomed.id).await;
        let last = events.last().unwrap();
        assert!(matches!(last, JobEvent::Failed { .. }));
        let error = last.progress().error.as_ref().unwrap();
        assert!(error.contains(&person_id.to_string()));
        assert!(error.contains("not found"));

        let stored = queue.get_job(doomed.id).unwrap();
        assert_eq!(stored.status, JobStatus::Failed);
        assert!(stored.error.is_some());
        assert!(stored.completed_at.is_some());

        // The failure does not stall the worker
        let events = collect_run(&mut rx, healthy.id).await;
        assert!(matches!(events.last().unwrap(), JobEvent::Completed { .. }));
        assert_eq!(queue.get_job(healthy.id).unwrap().status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn test_jobs_run_serially_in_fifo_order() {
        let store = Arc::new(Database::seeded());
        let people = store.people_with_companies();
        let queue = queue_with(store);

        let mut rx = queue.subscribe();
        let first = queue.enqueue(people[0].person.id);
        let second = queue.enqueue(people[1].person.id);

        let mut events = collect_run(&mut rx, first.id).await;
        events.extend(collect_run(&mut rx, second.id).await);

        // The first job finishes before the second emits any progress
        let first_done = events
            .iter()
            .position(|e| {
                matches!(e, JobEvent::Completed { data } if data.job_id == first.id)
            })
            .unwrap();
        let second_started = events
            .iter()
            .position(|e| {
                matches!(e, JobEvent::Progress { data } if data.job_id == second.id)
            })
            .unwrap();
        assert!(first_done < second_started);

        let first_job = queue.get_job(first.id).unwrap();
        let second_job = queue.get_job(second.id).unwrap();
        assert!(first_job.completed_at.unwrap() <= second_job.started_at.unwrap());
    }

    #[tokio::test]
    async fn test_every_snapshot_partitions_the_field_set() {
        let store = Arc::new(Database::seeded());
        let person_id = store.people_with_companies()[0].person.id;
        let queue = queue_with(store);

        let mut rx = queue.subscribe();
        let job = queue.enqueue(person_id);
        let events = collect_run(&mut rx, job.id).await;

        for event in &events {
            let progress = event.progress();
            assert_eq!(
                progress.found_fields.len() + progress.missing_fields.len(),
                5
            );
            assert!(progress
                .found_fields
                .iter()
                .all(|f| !progress.missing_fields.contains(f)));
            assert!(progress.current_iteration <= progress.max_iterations);
        }
    }

    #[tokio::test]
    async fn test_list_jobs_newest_first() {
        let queue = queue_with(Arc::new(Database::empty()));
        let older = queue.enqueue(Uuid::new_v4());
        tokio::time::sleep(Duration::from_millis(5)).await;
        let newer = queue.enqueue(Uuid::new_v4());

        let jobs = queue.list_jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, newer.id);
        assert_eq!(jobs[1].id, older.id);
    }
}
