// Outbound color events.
// Consumers register an observer (a closure or a channel sender); the engine
// calls it on hover / selection. A failing consumer never breaks sampling.

use crate::types::ColorEvent;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Receives `{x, y, color}` events from the engine.
pub trait ColorObserver {
    fn notify(&mut self, event: &ColorEvent) -> Result<(), ObserverError>;
}

impl<F> ColorObserver for F
where
    F: FnMut(&ColorEvent) -> Result<(), ObserverError>,
{
    fn notify(&mut self, event: &ColorEvent) -> Result<(), ObserverError> {
        self(event)
    }
}

/// Message-passing form: every event is sent down the channel.
#[derive(Clone, Debug)]
pub struct ChannelObserver(pub Sender<ColorEvent>);

impl ColorObserver for ChannelObserver {
    fn notify(&mut self, event: &ColorEvent) -> Result<(), ObserverError> {
        self.0.send(event.clone())?;
        Ok(())
    }
}

/// Call `observer`, logging (not propagating) an error or a panic.
/// Returns whether the observer completed successfully.
pub(crate) fn dispatch(observer: &mut dyn ColorObserver, event: &ColorEvent, name: &str) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.notify(event))) {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            log::error!("[SamplingEngine#{name}] observer failed: {err}");
            false
        }
        Err(_) => {
            log::error!("[SamplingEngine#{name}] observer panicked");
            false
        }
    }
}
