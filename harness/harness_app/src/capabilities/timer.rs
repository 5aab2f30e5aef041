use std::future::Future;
use std::time::Duration;

use crux_core::capability::Operation;
use crux_core::command::RequestBuilder;
use crux_core::{Command, Request};

#[derive(Clone, Copy, serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A one-shot timer run by the shell.
///
/// The shell resolves a `Start` exactly once, with `Elapsed` after the duration or with
/// `Cancelled` if a `Cancel` for the same id arrives first.
#[derive(Clone, serde::Serialize, serde::Deserialize, Debug, PartialEq)]
pub enum SyncTimerOperation {
    Start { id: TimerId, millis: u64 },
    Cancel { id: TimerId },
}

#[derive(Clone, Copy, serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub enum TimerOutput {
    Elapsed { id: TimerId },
    Cancelled { id: TimerId },
}

impl Operation for SyncTimerOperation {
    type Output = TimerOutput;
}

pub fn start<Effect, Event>(id: TimerId, duration: Duration) -> RequestBuilder<Effect, Event, impl Future<Output = TimerOutput>>
where
    Effect: From<Request<SyncTimerOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(SyncTimerOperation::Start {
        id,
        millis: duration.as_millis() as u64,
    })
}

pub fn cancel<Effect, Event>(id: TimerId) -> Command<Effect, Event>
where
    Effect: From<Request<SyncTimerOperation>> + Send + 'static,
    Event: Send + 'static,
{
    Command::notify_shell(SyncTimerOperation::Cancel {
        id,
    })
    .into()
}
