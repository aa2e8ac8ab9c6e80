//! The render queue
//!
//! Jobs enter through form validation, keep their insertion order, and
//! are launched oldest-first. The queue lives for one program run and is
//! never persisted; `clear_after_run` decides whether a batch run leaves
//! the queue intact for relaunching.

use crate::command::{MidpointPolicy, format_command};
use crate::domain::{JobForm, LogEvent, LogSink, RenderJob, ValidationError};
use crate::launch::{LaunchError, LaunchMode, LaunchOutcome, Launcher};

/// Receipt for a successfully queued job
#[derive(Debug, Clone)]
pub struct Queued {
    /// Position of the job in the queue at the time it was added
    pub index: usize,
    /// The validated job as stored
    pub job: RenderJob,
    /// Command preview, identical to what a later launch will run
    pub command: String,
}

/// What happened to one queued job during a batch run
#[derive(Debug)]
pub struct JobReport {
    /// The job that was handed off
    pub job: RenderJob,
    /// The exact command given to the launcher
    pub command: String,
    /// Launch result for this job
    pub outcome: Result<LaunchOutcome, LaunchError>,
}

impl JobReport {
    /// Whether the launch counts as successful
    pub fn success(&self) -> bool {
        self.outcome.as_ref().map(|outcome| outcome.success).unwrap_or(false)
    }
}

/// FIFO queue of validated render jobs
pub struct RenderQueue {
    jobs: Vec<RenderJob>,
    midpoint: MidpointPolicy,
    clear_after_run: bool,
}

impl RenderQueue {
    /// Create an empty queue
    ///
    /// By default the queue is kept after a batch run so the same jobs
    /// can be launched again.
    pub fn new(midpoint: MidpointPolicy) -> Self {
        Self {
            jobs: Vec::new(),
            midpoint,
            clear_after_run: false,
        }
    }

    /// Choose whether a batch run empties the queue afterwards
    pub fn with_clear_after_run(mut self, clear_after_run: bool) -> Self {
        self.clear_after_run = clear_after_run;
        self
    }

    /// Validate a form and append the resulting job to the queue
    ///
    /// On failure the queue is untouched. On success the receipt carries
    /// the stored job and its command preview; the preview is formatted
    /// by the same code that formats the launch command, so the two can
    /// never drift apart.
    pub fn enqueue(&mut self, form: &JobForm) -> Result<Queued, ValidationError> {
        let job = form.validate()?;
        let command = format_command(&job, self.midpoint);
        let index = self.jobs.len();
        self.jobs.push(job.clone());
        Ok(Queued { index, job, command })
    }

    /// Remove and return the job at `index`
    ///
    /// Jobs after it shift down one position; their relative order is
    /// unchanged. Out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<RenderJob> {
        if index < self.jobs.len() {
            Some(self.jobs.remove(index))
        } else {
            None
        }
    }

    /// Drop every queued job
    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    /// Number of queued jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the queue holds no jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The queued jobs, oldest first
    pub fn jobs(&self) -> &[RenderJob] {
        &self.jobs
    }

    /// Command previews for every queued job, in queue order
    pub fn previews(&self) -> Vec<String> {
        self.jobs
            .iter()
            .map(|job| format_command(job, self.midpoint))
            .collect()
    }

    /// Launch every queued job in insertion order
    ///
    /// Each job is handed to the launcher before the next one is
    /// considered; a failed launch is reported and the run continues
    /// with the remaining jobs. Progress events go to `sink`, including
    /// the exact command for each launch. Afterwards the queue is
    /// cleared only when configured via [`Self::with_clear_after_run`].
    pub fn run_all(
        &mut self,
        launcher: &dyn Launcher,
        mode: LaunchMode,
        sink: &mut dyn LogSink,
    ) -> Vec<JobReport> {
        if self.jobs.is_empty() {
            return Vec::new();
        }

        let mut reports = Vec::with_capacity(self.jobs.len());
        for job in &self.jobs {
            let command = format_command(job, self.midpoint);
            sink.append(LogEvent::launch(&job.scene_path, &command));
            let outcome = launcher.launch(&command, mode);
            if let Err(err) = &outcome {
                sink.append(LogEvent::launch_failed(err));
            }
            reports.push(JobReport {
                job: job.clone(),
                command,
                outcome,
            });
        }
        sink.append(LogEvent::batch_done(reports.len()));

        if self.clear_after_run {
            self.jobs.clear();
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RenderMode, Renderer};

    fn form(scene: &str, start: &str, end: &str) -> JobForm {
        JobForm::new(scene, start, end, "100", Renderer::Karma, RenderMode::FullSequence)
    }

    #[test]
    fn enqueue_appends_in_order_with_matching_previews() {
        let mut queue = RenderQueue::new(MidpointPolicy::Floor);
        let first = queue.enqueue(&form("/a.usd", "1", "10")).expect("valid form");
        let second = queue.enqueue(&form("/b.usd", "5", "8")).expect("valid form");

        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.previews(),
            vec![first.command.clone(), second.command.clone()],
            "previews and enqueue receipts come from the same formatter"
        );
    }

    #[test]
    fn enqueue_rejects_invalid_form_without_touching_queue() {
        let mut queue = RenderQueue::new(MidpointPolicy::Floor);
        queue.enqueue(&form("/a.usd", "1", "10")).expect("valid form");

        let result = queue.enqueue(&form("/b.usd", "", "10"));
        assert!(result.is_err(), "empty start frame must be rejected");
        assert_eq!(queue.len(), 1, "failed enqueue must not grow the queue");
    }

    #[test]
    fn remove_at_keeps_survivors_in_order() {
        let mut queue = RenderQueue::new(MidpointPolicy::Floor);
        queue.enqueue(&form("/a.usd", "1", "10")).expect("valid form");
        queue.enqueue(&form("/b.usd", "1", "10")).expect("valid form");
        queue.enqueue(&form("/c.usd", "1", "10")).expect("valid form");

        let removed = queue.remove_at(1).expect("index 1 exists");
        assert_eq!(removed.scene_path, "/b.usd");

        let scenes: Vec<&str> = queue.jobs().iter().map(|j| j.scene_path.as_str()).collect();
        assert_eq!(scenes, vec!["/a.usd", "/c.usd"]);
        assert_eq!(queue.previews().len(), 2, "previews track the queue after removal");
    }

    #[test]
    fn remove_at_out_of_range_is_a_noop() {
        let mut queue = RenderQueue::new(MidpointPolicy::Floor);
        queue.enqueue(&form("/a.usd", "1", "10")).expect("valid form");

        assert!(queue.remove_at(5).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = RenderQueue::new(MidpointPolicy::Floor);
        queue.enqueue(&form("/a.usd", "1", "10")).expect("valid form");
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_midpoint_policy_flows_into_fml_previews() {
        let mut queue = RenderQueue::new(MidpointPolicy::Ceil);
        let fml = JobForm::new("/a.usd", "1", "10", "100", Renderer::Karma, RenderMode::Fml);
        let queued = queue.enqueue(&fml).expect("valid form");
        assert!(
            queued.command.contains("--frame-list 1 6 10"),
            "ceil midpoint should appear in the preview: {}",
            queued.command
        );
    }
}
