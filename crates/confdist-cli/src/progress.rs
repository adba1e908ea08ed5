use confdist::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Bridges engine progress events to an indicatif bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::ComputeStart {
                    conformations,
                    pairs,
                } => {
                    pb.reset();
                    pb.set_length(pairs);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                    pb.set_message(format!("Aligning {} conformations", conformations));
                }
                Progress::PairDone => {
                    pb.inc(1);
                }
                Progress::ComputeFinish => {
                    if pb.position() < pb.length().unwrap_or(0) {
                        pb.set_position(pb.length().unwrap_or(0));
                    }
                    pb.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    if !pb.is_finished() {
                        pb.println(format!("  {}", msg));
                    } else {
                        pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.green/dim} {pos}/{len} pairs  {msg}")
            .expect("Failed to create progress bar style template")
    }
}
