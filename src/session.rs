//! Replay session: the connection-level handle over a running playback.

use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::driver::Driver;
use crate::playback::Playback;
use crate::snapshot::FrameSnapshot;
use crate::stream::ThrottleExt;
use crate::ticks::{IntervalTicks, TickSource};
use crate::types::FrameRate;
use crate::{SceneLayout, SimulationMeta};

/// Running playback of one simulation input.
///
/// Owns the driver task; dropping the session cancels it. Consumers pull
/// frames through [`ReplaySession::subscribe`] and read the static scene
/// and backend statistics directly.
pub struct ReplaySession {
    /// Frame watch receiver
    frames: watch::Receiver<Option<Arc<FrameSnapshot>>>,

    /// Static geometry for the loaded input
    scene: Arc<SceneLayout>,

    /// Backend transmission statistics
    meta: SimulationMeta,

    /// Driver frequency
    frame_hz: f64,

    /// Cancellation token for stopping the driver task
    cancel: CancellationToken,
}

impl ReplaySession {
    /// Start a session over an engine with an explicit tick source.
    ///
    /// Most callers go through [`crate::Skyroute::open`]; this entry point
    /// exists for headless tools and tests that bring their own pacing.
    pub fn start<T>(playback: Playback, ticks: T) -> Self
    where
        T: TickSource,
    {
        let scene = playback.scene();
        let meta = playback.meta().clone();
        let frame_hz = ticks.frame_hz();

        let channels = Driver::spawn(playback, ticks);

        Self { frames: channels.frames, scene, meta, frame_hz, cancel: channels.cancel }
    }

    /// Start a wall-clock session and wait for the first frame.
    pub async fn start_paced(playback: Playback, frame_hz: f64) -> Self {
        let session = Self::start(playback, IntervalTicks::new(frame_hz));

        // Wait for the first frame so subscribers never observe a cold
        // channel. The driver ticks within one frame interval; the timeout
        // only guards against a stalled runtime.
        let mut frame_rx = session.frames.clone();
        let wait_result =
            tokio::time::timeout(Duration::from_secs(5), Self::first_frame(&mut frame_rx)).await;

        if wait_result.is_err() {
            warn!("Timeout waiting for first frame from driver");
        }

        info!(frame_hz = session.frame_hz, "Replay session started");
        session
    }

    /// Wait until the channel carries a frame. Ends early when the sender
    /// is gone and no frame can arrive anymore.
    async fn first_frame(frame_rx: &mut watch::Receiver<Option<Arc<FrameSnapshot>>>) {
        loop {
            if frame_rx.borrow_and_update().is_some() {
                return;
            }
            if frame_rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Subscribe to frame snapshots
    pub fn subscribe(&self, rate: FrameRate) -> impl Stream<Item = Arc<FrameSnapshot>> + 'static {
        // Base frame stream from the watch channel
        let frames = WatchStream::new(self.frames.clone()).filter_map(|opt| async move { opt });

        match rate.normalize(self.frame_hz) {
            FrameRate::Native => frames.boxed(),
            FrameRate::Max(hz) => {
                let interval = Duration::from_secs_f64(1.0 / hz as f64);
                frames.throttle(interval).boxed()
            }
        }
    }

    /// Get the latest frame (if any has been evaluated yet)
    pub fn current_frame(&self) -> Option<Arc<FrameSnapshot>> {
        self.frames.borrow().clone()
    }

    /// Static geometry for the loaded input
    pub fn scene(&self) -> Arc<SceneLayout> {
        Arc::clone(&self.scene)
    }

    /// Backend transmission statistics for the statistics panel
    pub fn meta(&self) -> &SimulationMeta {
        &self.meta
    }

    /// Driver frame frequency
    pub fn frame_hz(&self) -> f64 {
        self.frame_hz
    }
}

impl Drop for ReplaySession {
    fn drop(&mut self) {
        debug!("Dropping replay session");
        // Cancel the driver task on drop for clean shutdown
        self.cancel.cancel();
    }
}
