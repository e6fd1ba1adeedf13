//! Agent board service — per-task status machine driving content generation.
//!
//! DESIGN
//! ======
//! `TaskBoard` is a plain value: the three fixed tasks plus the set of task
//! ids with a run in flight. Transitions go through `TaskBoard::try_begin`
//! and `TaskBoard::apply`, each returning the next snapshot.
//!
//! `AgentBoard` is the shared handle a session holds. It swaps snapshots
//! under a short lock, so every transition is atomic and immediately
//! visible, and it owns the async run sequence:
//!
//! ```text
//! IDLE | COMPLETED | ERROR --try_begin--> THINKING --delay--> GENERATING
//!                                  GENERATING --ok--> COMPLETED (result = text)
//!                                  GENERATING --err--> ERROR (result untouched)
//! ```
//!
//! A run cannot be cancelled once started; the in-flight set only blocks
//! re-entry for the same task.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::{AGENTS, AgentSpec};
use crate::llm::ContentGenerator;

pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1200);
pub const DEFAULT_AUTORUN_DELAY: Duration = Duration::from_millis(1500);

const TRANSITION_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("unknown agent task: {0}")]
    UnknownTask(String),
}

impl crate::error::ErrorCode for AgentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTask(_) => "E_UNKNOWN_TASK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    Idle,
    Thinking,
    Generating,
    Completed,
    Error,
}

impl AgentStatus {
    /// A run is in progress; new runs are ignored.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Thinking | Self::Generating)
    }

    /// Label of the task's run button. ERROR is rerunnable, so it reads "Rerun".
    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Idle => "Initialize",
            Self::Completed | Self::Error => "Rerun",
            Self::Thinking | Self::Generating => "Busy",
        }
    }
}

/// One agent task and its latest run state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentTask {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub prompt: &'static str,
    pub status: AgentStatus,
    /// Last generated text. Kept across reruns and failures.
    pub result: Option<String>,
}

impl AgentTask {
    #[must_use]
    pub fn from_spec(spec: &AgentSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
            description: spec.description,
            prompt: spec.prompt,
            status: AgentStatus::Idle,
            result: None,
        }
    }

    /// Result as the view shows it: only while generating or completed.
    #[must_use]
    pub fn visible_result(&self) -> Option<&str> {
        match self.status {
            AgentStatus::Generating | AgentStatus::Completed => self.result.as_deref(),
            _ => None,
        }
    }
}

/// Transitions after a run has begun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Generating,
    Completed(String),
    Failed,
}

/// Outcome of trying to start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Begin {
    /// Task moved to THINKING; the caller owns the run.
    Started { id: &'static str, prompt: &'static str },
    /// A run for this task is already in flight.
    Busy,
}

/// How a run finished, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Failed,
    Ignored,
}

/// A single status change, published to subscribers. `result` is set only
/// on the transition to COMPLETED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub task_id: &'static str,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

// =============================================================================
// TASK BOARD (REDUCER)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<AgentTask>,
    in_flight: HashSet<&'static str>,
}

impl TaskBoard {
    /// The fixed three-task board, all IDLE.
    #[must_use]
    pub fn new() -> Self {
        Self::from_specs(&AGENTS)
    }

    #[must_use]
    pub fn from_specs(specs: &[AgentSpec]) -> Self {
        Self { tasks: specs.iter().map(AgentTask::from_spec).collect(), in_flight: HashSet::new() }
    }

    #[must_use]
    pub fn tasks(&self) -> &[AgentTask] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&AgentTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    #[must_use]
    pub fn is_in_flight(&self, task_id: &str) -> bool {
        self.in_flight.contains(task_id)
    }

    /// Check-and-insert the task into the in-flight set and move it to
    /// THINKING. A task already in flight is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownTask`] for an id not on the board.
    pub fn try_begin(mut self, task_id: &str) -> Result<(Self, Begin), AgentError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Err(AgentError::UnknownTask(task_id.to_string()));
        };
        if self.in_flight.contains(task.id) || task.status.is_busy() {
            return Ok((self, Begin::Busy));
        }
        task.status = AgentStatus::Thinking;
        let begin = Begin::Started { id: task.id, prompt: task.prompt };
        self.in_flight.insert(task.id);
        Ok((self, begin))
    }

    /// Apply a post-begin transition. Unknown ids leave the board unchanged.
    #[must_use]
    pub fn apply(mut self, task_id: &str, event: TaskEvent) -> Self {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return self;
        };
        match event {
            TaskEvent::Generating => task.status = AgentStatus::Generating,
            TaskEvent::Completed(text) => {
                task.status = AgentStatus::Completed;
                task.result = Some(text);
                self.in_flight.remove(task_id);
            }
            TaskEvent::Failed => {
                task.status = AgentStatus::Error;
                self.in_flight.remove(task_id);
            }
        }
        self
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// AGENT BOARD (SHARED HANDLE)
// =============================================================================

#[derive(Clone)]
pub struct AgentBoard {
    board: Arc<Mutex<TaskBoard>>,
    generator: Arc<dyn ContentGenerator>,
    thinking_delay: Duration,
    transitions: broadcast::Sender<Transition>,
}

impl AgentBoard {
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>, thinking_delay: Duration) -> Self {
        Self::with_board(TaskBoard::new(), generator, thinking_delay)
    }

    #[must_use]
    pub fn with_board(board: TaskBoard, generator: Arc<dyn ContentGenerator>, thinking_delay: Duration) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        Self { board: Arc::new(Mutex::new(board)), generator, thinking_delay, transitions }
    }

    /// Current board snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TaskBoard {
        self.lock().clone()
    }

    /// Receive every status change from now on. Feeds the agent event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Transition> {
        self.transitions.subscribe()
    }

    /// Run a task to completion. Returns [`RunOutcome::Ignored`] when a run
    /// for the task is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownTask`] for an id not on the board.
    pub async fn run_agent(&self, task_id: &str) -> Result<RunOutcome, AgentError> {
        match self.begin(task_id)? {
            Begin::Started { id, prompt } => Ok(self.drive(id, prompt).await),
            Begin::Busy => Ok(RunOutcome::Ignored),
        }
    }

    /// Start a run in the background. THINKING is visible before this
    /// returns; `None` means the task was busy and nothing was spawned.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownTask`] for an id not on the board.
    pub fn spawn_run(&self, task_id: &str) -> Result<Option<JoinHandle<RunOutcome>>, AgentError> {
        match self.begin(task_id)? {
            Begin::Started { id, prompt } => {
                let board = self.clone();
                Ok(Some(tokio::spawn(async move { board.drive(id, prompt).await })))
            }
            Begin::Busy => Ok(None),
        }
    }

    /// Run the first task once after `delay`. Abort the handle to cancel.
    #[must_use]
    pub fn schedule_auto_run(&self, delay: Duration) -> JoinHandle<()> {
        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(first) = board.snapshot().tasks().first().map(|t| t.id) else {
                return;
            };
            match board.run_agent(first).await {
                Ok(RunOutcome::Ignored) => debug!(task_id = first, "agent: auto-run skipped, already running"),
                Ok(outcome) => debug!(task_id = first, ?outcome, "agent: auto-run finished"),
                Err(e) => warn!(error = %e, "agent: auto-run failed to start"),
            }
        })
    }

    fn begin(&self, task_id: &str) -> Result<Begin, AgentError> {
        let begin = {
            let mut guard = self.lock();
            let (next, begin) = guard.clone().try_begin(task_id)?;
            *guard = next;
            begin
        };
        match begin {
            Begin::Started { id, .. } => {
                info!(task_id = id, "agent: run started");
                self.publish(id, AgentStatus::Thinking, None);
            }
            Begin::Busy => debug!(task_id, "agent: run ignored, already in flight"),
        }
        Ok(begin)
    }

    async fn drive(&self, id: &'static str, prompt: &'static str) -> RunOutcome {
        tokio::time::sleep(self.thinking_delay).await;

        self.transition(id, TaskEvent::Generating);
        self.publish(id, AgentStatus::Generating, None);

        match self.generator.generate(prompt).await {
            Ok(text) => {
                info!(task_id = id, result_len = text.len(), "agent: run completed");
                self.transition(id, TaskEvent::Completed(text.clone()));
                self.publish(id, AgentStatus::Completed, Some(text));
                RunOutcome::Completed
            }
            Err(e) => {
                warn!(task_id = id, error = %e, "agent: generation failed");
                self.transition(id, TaskEvent::Failed);
                self.publish(id, AgentStatus::Error, None);
                RunOutcome::Failed
            }
        }
    }

    fn transition(&self, id: &str, event: TaskEvent) {
        let mut guard = self.lock();
        let next = guard.clone().apply(id, event);
        *guard = next;
    }

    fn publish(&self, task_id: &'static str, status: AgentStatus, result: Option<String>) {
        // Err only means nobody is listening right now.
        let _ = self.transitions.send(Transition { task_id, status, result });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TaskBoard> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "agents_test.rs"]
mod tests;
