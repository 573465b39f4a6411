use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Status sequence shown while a submitted order "processes". No work is
/// performed in any stage; the dwells only pace the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Processing,
    Done,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Validating => "Validating links…",
            Stage::Processing => "Processing request…",
            Stage::Done => "Redirecting to payment…",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Processing => "processing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Dwell times for the sequence. The defaults are part of the observable
/// contract; tests and the CLI `--no-delay` flag shrink them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dwells {
    pub validating: Duration,
    pub processing: Duration,
    pub done: Duration,
}

impl Default for Dwells {
    fn default() -> Self {
        Self {
            validating: Duration::from_millis(1500),
            processing: Duration::from_millis(1500),
            done: Duration::from_millis(800),
        }
    }
}

impl Dwells {
    pub fn zero() -> Self {
        Self {
            validating: Duration::ZERO,
            processing: Duration::ZERO,
            done: Duration::ZERO,
        }
    }
}

/// Runs the fixed `validating -> processing -> done` sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessingSimulator {
    dwells: Dwells,
}

impl ProcessingSimulator {
    pub fn new(dwells: Dwells) -> Self {
        Self { dwells }
    }

    /// Walks the sequence, reporting each stage as it is entered and holding
    /// it for its dwell. Always visits all three stages in order.
    pub async fn run(&self, mut on_stage: impl FnMut(Stage)) {
        on_stage(Stage::Validating);
        sleep(self.dwells.validating).await;
        on_stage(Stage::Processing);
        sleep(self.dwells.processing).await;
        on_stage(Stage::Done);
        sleep(self.dwells.done).await;
    }

    /// Spawns the sequence as a task bound to the returned handle. Dropping
    /// the handle aborts the task, so no stage fires after the screen that
    /// started it is gone.
    pub fn spawn(&self, stages: mpsc::UnboundedSender<Stage>) -> ProcessingTask {
        let sim = *self;
        let handle = tokio::spawn(async move {
            sim.run(|stage| {
                let _ = stages.send(stage);
            })
            .await;
        });
        ProcessingTask { handle }
    }
}

/// Handle tying a running processing sequence to its screen's lifetime.
pub struct ProcessingTask {
    handle: JoinHandle<()>,
}

impl ProcessingTask {
    /// Waits for the sequence to finish.
    pub async fn wait(mut self) {
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ProcessingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_order_is_fixed() {
        let sim = ProcessingSimulator::new(Dwells::zero());
        let mut stages = Vec::new();
        sim.run(|s| stages.push(s)).await;
        assert_eq!(stages, vec![Stage::Validating, Stage::Processing, Stage::Done]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_dwell_timing() {
        let sim = ProcessingSimulator::default();
        let start = tokio::time::Instant::now();
        let mut offsets = Vec::new();
        sim.run(|_| offsets.push(start.elapsed())).await;

        assert_eq!(offsets[0], Duration::ZERO);
        assert_eq!(offsets[1], Duration::from_millis(1500));
        assert_eq!(offsets[2], Duration::from_millis(3000));
        assert_eq!(start.elapsed(), Duration::from_millis(3800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_task_emits_no_further_stages() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ProcessingSimulator::default().spawn(tx);

        // First stage is sent as soon as the task runs
        assert_eq!(rx.recv().await, Some(Stage::Validating));
        drop(task);

        // Channel closes without ever seeing the later stages
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_completes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ProcessingSimulator::default().spawn(tx);
        task.wait().await;

        let mut stages = Vec::new();
        while let Some(stage) = rx.recv().await {
            stages.push(stage);
        }
        assert_eq!(stages, vec![Stage::Validating, Stage::Processing, Stage::Done]);
    }
}
