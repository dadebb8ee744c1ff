//! Driver spawns and manages the frame evaluation task

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::playback::Playback;
use crate::snapshot::FrameSnapshot;
use crate::ticks::TickSource;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for evaluated frame snapshots
    pub frames: watch::Receiver<Option<Arc<FrameSnapshot>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the frame evaluation task
///
/// Spawns a single task that owns the [`Playback`] engine and the tick
/// source, so there is exactly one writer of simulation time. Consumers
/// observe frames through the watch channel; a frame is fully evaluated
/// before it is published, so every reader of one snapshot sees positions
/// computed against the same clock value.
pub struct Driver;

impl Driver {
    /// Spawn the frame loop for the given engine and tick source.
    ///
    /// Returns a watch receiver for snapshots plus a cancellation token for
    /// graceful shutdown.
    pub fn spawn<T>(playback: Playback, ticks: T) -> DriverChannels
    where
        T: TickSource,
    {
        let (frame_tx, frame_rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let cancel_frame = cancel.clone();

        tokio::spawn(async move {
            Self::frame_loop(playback, ticks, frame_tx, cancel_frame).await;
        });

        DriverChannels { frames: frame_rx, cancel }
    }

    /// Frame loop task - ticks the engine and publishes snapshots
    async fn frame_loop<T>(
        mut playback: Playback,
        mut ticks: T,
        frame_tx: watch::Sender<Option<Arc<FrameSnapshot>>>,
        cancel: CancellationToken,
    ) where
        T: TickSource,
    {
        info!(frame_hz = ticks.frame_hz(), "Frame loop started");
        let mut frame_count = 0u64;

        loop {
            // Allow cancellation while waiting for the next frame slot.
            let delta = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Frame loop cancelled");
                    break;
                }
                delta = ticks.next_delta() => delta,
            };

            let Some(delta) = delta else {
                info!(frame_count, "Tick source exhausted, frame loop ending");
                let _ = frame_tx.send(None);
                break;
            };

            let snapshot = playback.tick(delta);
            frame_count += 1;

            trace!(
                frame = frame_count,
                time = snapshot.simulation_time,
                visible = snapshot.packets.len(),
                "Frame published"
            );

            if frame_tx.send(Some(snapshot)).is_err() {
                debug!("Snapshot receiver dropped, shutting down");
                break;
            }
        }

        info!(frame_count, "Frame loop ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use crate::ticks::{FixedTicks, IntervalTicks};
    use crate::{ConstellationConfig, Playback};

    #[tokio::test(start_paused = true)]
    async fn driver_publishes_monotonic_frames() {
        let playback = Playback::new(test_utils::two_hop_payload(), ConstellationConfig::default())
            .expect("engine should build");

        // Paused clock: each interval tick fires only when the runtime is
        // otherwise idle, so the receiver observes every frame.
        let channels = Driver::spawn(playback, IntervalTicks::new(60.0));
        let mut frames = channels.frames.clone();

        let mut times = Vec::new();
        while times.len() < 3 {
            frames.changed().await.unwrap();
            let snapshot = frames.borrow_and_update().clone().expect("frame expected");
            times.push(snapshot.simulation_time);
        }
        channels.cancel.cancel();

        // 500x speed at 60Hz: 8.33 virtual units per frame.
        let step = 500.0 / 60.0;
        for (i, time) in times.iter().enumerate() {
            assert!((time - step * (i + 1) as f64).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn exhausted_source_ends_the_stream() {
        let playback = Playback::new(test_utils::two_hop_payload(), ConstellationConfig::default())
            .expect("engine should build");

        let channels = Driver::spawn(playback, FixedTicks::new(vec![]));
        let mut frames = channels.frames.clone();

        // The loop publishes the end-of-stream marker and drops the sender.
        frames.changed().await.unwrap();
        assert!(frames.borrow_and_update().is_none());
        assert!(frames.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_the_loop() {
        let playback = Playback::new(test_utils::two_hop_payload(), ConstellationConfig::default())
            .expect("engine should build");

        let channels = Driver::spawn(playback, IntervalTicks::new(60.0));
        let mut frames = channels.frames.clone();

        // Wait for at least one frame, then cancel.
        frames.changed().await.unwrap();
        assert!(frames.borrow_and_update().is_some());
        channels.cancel.cancel();

        // The loop exits and drops its sender.
        assert!(frames.wait_for(|_| false).await.is_err());
    }
}
