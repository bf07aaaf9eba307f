//! Sequential, timer-driven command processing.
//!
//! A [`CommandQueue`] runs commands one after another. Starting a command
//! calls the init function, which returns the absolute deadlines of the
//! command's steps (or `None` to skip the command). Each step then runs once
//! its deadline has passed, until the step function returns `false`, and the
//! next queued command starts.
//!
//! The queue never sleeps or spawns anything. The host drives it from its
//! own timer: call [`poll`](CommandQueue::poll) and re-arm the timer for the
//! returned deadline.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use styled_elements_core::CommandQueue;
//!
//! let mut queue = CommandQueue::new(
//!     Vec::new(),
//!     |_log: &mut Vec<String>, _cmd: &'static str| Some(vec![Instant::now()]),
//!     |step, log: &mut Vec<String>| {
//!         log.push(format!("step {step}"));
//!         step < 1
//!     },
//! );
//!
//! queue.add_command("fade", Instant::now());
//! queue.poll(Instant::now() + Duration::from_secs(1));
//! assert_eq!(queue.context(), &["step 0", "step 1"]);
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use crate::logging::targets;

/// Upper bound on steps run by a single [`CommandQueue::poll`] call.
const MAX_STEPS_PER_POLL: usize = 1024;

type InitFn<Ctx, Cmd> = Box<dyn FnMut(&mut Ctx, Cmd) -> Option<Vec<Instant>> + Send>;
type StepFn<Ctx> = Box<dyn FnMut(usize, &mut Ctx) -> bool + Send>;

#[derive(Debug)]
struct ActiveCommand {
    step: usize,
    step_times: Vec<Instant>,
}

impl ActiveCommand {
    /// Deadline of the current step, or `None` when it is already due.
    /// Steps past the end of `step_times` are due immediately.
    fn pending_deadline(&self, now: Instant) -> Option<Instant> {
        self.step_times
            .get(self.step)
            .copied()
            .filter(|&deadline| deadline > now)
    }
}

/// Runs commands strictly one at a time, each as a sequence of timed steps.
pub struct CommandQueue<Ctx, Cmd> {
    context: Ctx,
    init: InitFn<Ctx, Cmd>,
    step: StepFn<Ctx>,
    pending: VecDeque<Cmd>,
    active: Option<ActiveCommand>,
}

impl<Ctx, Cmd> CommandQueue<Ctx, Cmd> {
    pub fn new<I, S>(context: Ctx, init: I, step: S) -> Self
    where
        I: FnMut(&mut Ctx, Cmd) -> Option<Vec<Instant>> + Send + 'static,
        S: FnMut(usize, &mut Ctx) -> bool + Send + 'static,
    {
        Self {
            context,
            init: Box::new(init),
            step: Box::new(step),
            pending: VecDeque::new(),
            active: None,
        }
    }

    pub fn context(&self) -> &Ctx {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Ctx {
        &mut self.context
    }

    /// Whether a command is currently being stepped.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Number of commands waiting behind the running one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue a command after every command added before it.
    ///
    /// When the queue is idle the command starts immediately. Returns the
    /// instant at which [`poll`](Self::poll) should next be called.
    pub fn add_command(&mut self, command: Cmd, now: Instant) -> Option<Instant> {
        self.pending.push_back(command);
        if self.active.is_none() {
            self.start_next();
        }
        self.next_deadline(now)
    }

    /// Run every step that is due at `now`.
    ///
    /// Returns the deadline of the next step, `Some(now)` when more steps
    /// are already due, or `None` once the queue is idle.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        for _ in 0..MAX_STEPS_PER_POLL {
            let active = self.active.as_mut()?;
            if let Some(deadline) = active.pending_deadline(now) {
                return Some(deadline);
            }

            let step = active.step;
            if (self.step)(step, &mut self.context) {
                active.step += 1;
            } else {
                tracing::trace!(target: targets::COMMAND_QUEUE, steps = step + 1, "command finished");
                self.start_next();
            }
        }
        self.next_deadline(now)
    }

    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.active
            .as_ref()
            .map(|active| active.pending_deadline(now).unwrap_or(now))
    }

    fn start_next(&mut self) {
        self.active = None;
        while let Some(command) = self.pending.pop_front() {
            match (self.init)(&mut self.context, command) {
                Some(step_times) => {
                    tracing::trace!(target: targets::COMMAND_QUEUE, steps = step_times.len(), "command started");
                    self.active = Some(ActiveCommand {
                        step: 0,
                        step_times,
                    });
                    return;
                }
                None => {
                    tracing::trace!(target: targets::COMMAND_QUEUE, "command skipped by init");
                }
            }
        }
    }
}

impl<Ctx: std::fmt::Debug, Cmd> std::fmt::Debug for CommandQueue<Ctx, Cmd> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandQueue")
            .field("context", &self.context)
            .field("pending", &self.pending.len())
            .field("active", &self.active)
            .finish()
    }
}
