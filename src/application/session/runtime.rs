//! Session runtime - dispatcher task, request queue, and gated tick source.
//!
//! The dispatcher runs on its own task and is the only code that touches the
//! record. Everything else talks to it through a `SessionHandle`, which
//! sends requests over an `mpsc` queue and awaits a `oneshot` reply.
//!
//! The tick source wakes on a fixed interval, but only while the dispatcher
//! reports (over a `watch` channel) that the current phase has a running
//! window or the reflection stopwatch is counting.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::domain::session::SessionError;
use crate::ports::ExportedWorkbook;

use super::{SessionCommand, SessionDispatcher, SessionView};

const REQUEST_QUEUE_DEPTH: usize = 64;

enum Request {
    Command {
        command: SessionCommand,
        reply: oneshot::Sender<Result<SessionView, SessionError>>,
    },
    View {
        reply: oneshot::Sender<SessionView>,
    },
    Export {
        reply: oneshot::Sender<Result<ExportedWorkbook, SessionError>>,
    },
    Tick,
}

/// Cloneable client for the session dispatcher task.
#[derive(Clone)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Applies a command and returns the view rebuilt afterwards.
    pub async fn execute(&self, command: SessionCommand) -> Result<SessionView, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Command { command, reply }).await?;
        response.await.map_err(|_| SessionError::Unavailable)?
    }

    /// Returns the current render view.
    pub async fn view(&self) -> Result<SessionView, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::View { reply }).await?;
        response.await.map_err(|_| SessionError::Unavailable)
    }

    /// Exports the finished session.
    pub async fn export(&self) -> Result<ExportedWorkbook, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Export { reply }).await?;
        response.await.map_err(|_| SessionError::Unavailable)?
    }

    /// Delivers one clock tick.
    pub async fn tick(&self) -> Result<(), SessionError> {
        self.send(Request::Tick).await
    }

    async fn send(&self, request: Request) -> Result<(), SessionError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| SessionError::Unavailable)
    }
}

/// Running dispatcher and tick tasks.
pub struct SessionRuntime {
    handle: SessionHandle,
    dispatcher_task: JoinHandle<()>,
    ticker_task: JoinHandle<()>,
}

impl SessionRuntime {
    /// Spawns the dispatcher and the tick source on the current runtime.
    pub fn spawn(dispatcher: SessionDispatcher, tick_interval: Duration) -> Self {
        let (requests, inbox) = mpsc::channel(REQUEST_QUEUE_DEPTH);
        let (ticks_active, ticks_gate) = watch::channel(dispatcher.wants_ticks());

        let ticker_task = tokio::spawn(run_ticker(requests.downgrade(), ticks_gate, tick_interval));
        let dispatcher_task = tokio::spawn(run_dispatcher(dispatcher, inbox, ticks_active));

        info!(tick_interval_ms = tick_interval.as_millis() as u64, "Session runtime started");

        Self {
            handle: SessionHandle { requests },
            dispatcher_task,
            ticker_task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Drops this runtime's handle and waits for both tasks to finish.
    ///
    /// The dispatcher stops once every cloned handle is gone.
    pub async fn shutdown(self) {
        drop(self.handle);
        let _ = self.dispatcher_task.await;
        let _ = self.ticker_task.await;
    }
}

async fn run_dispatcher(
    mut dispatcher: SessionDispatcher,
    mut inbox: mpsc::Receiver<Request>,
    ticks_active: watch::Sender<bool>,
) {
    while let Some(request) = inbox.recv().await {
        match request {
            Request::Command { command, reply } => {
                let result = dispatcher.dispatch(command).map(|()| dispatcher.view());
                let _ = reply.send(result);
            }
            Request::View { reply } => {
                let _ = reply.send(dispatcher.view());
            }
            Request::Export { reply } => {
                let _ = reply.send(dispatcher.export());
            }
            Request::Tick => dispatcher.tick(),
        }

        let wanted = dispatcher.wants_ticks();
        ticks_active.send_if_modified(|active| {
            if *active == wanted {
                false
            } else {
                debug!(active = wanted, "Tick source toggled");
                *active = wanted;
                true
            }
        });
    }

    info!("Session dispatcher stopped");
}

async fn run_ticker(
    requests: mpsc::WeakSender<Request>,
    mut gate: watch::Receiver<bool>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        while !*gate.borrow_and_update() {
            if gate.changed().await.is_err() {
                return;
            }
        }

        tokio::select! {
            _ = interval.tick() => {
                let Some(sender) = requests.upgrade() else {
                    return;
                };
                if sender.send(Request::Tick).await.is_err() {
                    return;
                }
            }
            changed = gate.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::clock::ManualClock;
    use crate::adapters::spreadsheet::JsonWorkbookWriter;
    use crate::domain::foundation::Timestamp;
    use crate::domain::session::{Identity, Phase, PhaseSequencer};

    fn spawn_runtime(clock: Arc<ManualClock>, tick: Duration) -> SessionRuntime {
        let dispatcher = SessionDispatcher::new(
            PhaseSequencer::default(),
            clock,
            Arc::new(JsonWorkbookWriter::new()),
        );
        SessionRuntime::spawn(dispatcher, tick)
    }

    #[tokio::test]
    async fn handle_round_trips_commands() {
        let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000)));
        let runtime = spawn_runtime(clock, Duration::from_millis(50));
        let handle = runtime.handle();

        let view = handle
            .execute(SessionCommand::SetIdentity(Identity::new(
                "Aki",
                "S100",
                Some("Mon3".to_string()),
            )))
            .await
            .unwrap();
        assert_eq!(view.identity.name, "Aki");

        let view = handle.execute(SessionCommand::Advance).await.unwrap();
        assert_eq!(view.phase, Phase::Instructions);

        drop(handle);
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn refused_command_returns_error_and_notice() {
        let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000)));
        let runtime = spawn_runtime(clock, Duration::from_millis(50));
        let handle = runtime.handle();

        let err = handle.execute(SessionCommand::Advance).await.unwrap_err();
        assert!(matches!(err, SessionError::ValidationFailed { .. }));
        assert!(handle.view().await.unwrap().notice.is_some());

        drop(handle);
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn ticker_updates_running_window() {
        let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000)));
        let runtime = spawn_runtime(clock.clone(), Duration::from_millis(5));
        let handle = runtime.handle();

        handle
            .execute(SessionCommand::SetIdentity(Identity::new(
                "Aki",
                "S100",
                Some("Mon3".to_string()),
            )))
            .await
            .unwrap();
        handle.execute(SessionCommand::Advance).await.unwrap();
        handle.execute(SessionCommand::Advance).await.unwrap();

        clock.advance_secs(120);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let view = handle.view().await.unwrap();
        assert_eq!(view.timer(Phase::Brainstorm).unwrap().elapsed_secs, 120);

        drop(handle);
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn ticker_keeps_reflection_stopwatch_live() {
        let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000)));
        let runtime = spawn_runtime(clock.clone(), Duration::from_millis(5));
        let handle = runtime.handle();

        handle
            .execute(SessionCommand::SetIdentity(Identity::new(
                "Aki",
                "S100",
                Some("Mon3".to_string()),
            )))
            .await
            .unwrap();
        while handle.view().await.unwrap().phase != Phase::Reflection {
            handle.execute(SessionCommand::Advance).await.unwrap();
        }

        clock.advance_secs(75);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(handle.view().await.unwrap().reflection_elapsed_secs, 75);

        drop(handle);
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn export_before_completion_is_refused() {
        let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000)));
        let runtime = spawn_runtime(clock, Duration::from_millis(50));
        let handle = runtime.handle();

        assert!(matches!(handle.export().await, Err(SessionError::InvalidState(_))));

        drop(handle);
        runtime.shutdown().await;
    }
}
