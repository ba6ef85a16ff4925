use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend_domain::{ViewModel, ViewSink};

/// In-memory sink recording every frame it is given.
#[derive(Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl RecordingSink {
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.failing.store(true, Ordering::SeqCst);
        sink
    }

    pub fn boxed(&self) -> Box<dyn ViewSink> {
        Box::new(self.clone())
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().expect("frames lock").clone()
    }

    pub fn views(&self) -> Vec<ViewModel> {
        self.frames()
            .iter()
            .map(|frame| serde_json::from_str(frame).expect("view json"))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViewSink for RecordingSink {
    async fn send_text(&mut self, payload: String) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        self.frames.lock().expect("frames lock").push(payload);
        Ok(())
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
