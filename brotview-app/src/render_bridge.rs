use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use brotview_render::{RenderJob, RenderResult, Renderer};

/// Called from the worker thread after each finished render, typically to
/// wake the UI (`egui::Context::request_repaint`).
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

struct RenderRequest {
    id: u64,
    job: RenderJob,
}

struct RenderResponse {
    id: u64,
    result: brotview_render::Result<RenderResult>,
}

/// One background render thread, owned by one viewport.
///
/// Requests are coalesced: the worker always skips to the newest queued job,
/// and responses for anything older than the last submitted id are dropped.
/// Dropping the bridge closes the request channel; the worker exits after its
/// current render.
pub struct RenderBridge {
    tx_request: mpsc::Sender<RenderRequest>,
    rx_response: mpsc::Receiver<RenderResponse>,
    render_id: u64,
    awaiting: Option<u64>,
}

// ---------------------------------------------------------------------------
// impl RenderBridge
// ---------------------------------------------------------------------------

impl RenderBridge {
    pub fn spawn(renderer: Renderer, name: &str, repaint: Option<RepaintHook>) -> Self {
        let (tx_request, rx_request) = mpsc::channel();
        let (tx_response, rx_response) = mpsc::channel();

        thread::Builder::new()
            .name(format!("render-{name}"))
            .spawn(move || render_worker(renderer, rx_request, tx_response, repaint))
            .expect("failed to spawn render worker thread");

        Self {
            tx_request,
            rx_response,
            render_id: 0,
            awaiting: None,
        }
    }

    /// Queue a job and return its id. Any earlier job still queued is superseded.
    pub fn submit(&mut self, job: RenderJob) -> u64 {
        self.render_id += 1;
        debug!(
            id = self.render_id,
            max_iter = job.config.max_iterations,
            fractal = job.kind.label(),
            "Requesting render"
        );
        if self
            .tx_request
            .send(RenderRequest {
                id: self.render_id,
                job,
            })
            .is_err()
        {
            warn!("Render worker is gone; request {} dropped", self.render_id);
            self.awaiting = None;
        } else {
            self.awaiting = Some(self.render_id);
        }
        self.render_id
    }

    /// Whether the newest submitted job has not come back yet.
    pub fn pending(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Non-blocking: the result of the newest job, if it has arrived.
    pub fn try_latest(&mut self) -> Option<brotview_render::Result<RenderResult>> {
        let mut latest = None;
        while let Ok(resp) = self.rx_response.try_recv() {
            if let Some(result) = self.accept(resp) {
                latest = Some(result);
            }
        }
        latest
    }

    /// Block until the newest job comes back. `None` when nothing is pending
    /// or the worker has died.
    pub fn wait_latest(&mut self) -> Option<brotview_render::Result<RenderResult>> {
        while self.awaiting.is_some() {
            match self.rx_response.recv() {
                Ok(resp) => {
                    if let Some(result) = self.accept(resp) {
                        return Some(result);
                    }
                }
                Err(_) => {
                    warn!("Render worker disconnected while a render was pending");
                    self.awaiting = None;
                }
            }
        }
        None
    }

    fn accept(&mut self, resp: RenderResponse) -> Option<brotview_render::Result<RenderResult>> {
        if Some(resp.id) == self.awaiting {
            self.awaiting = None;
            Some(resp.result)
        } else {
            debug!(id = resp.id, "Dropping stale render");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

fn drain_latest(initial: RenderRequest, rx: &mpsc::Receiver<RenderRequest>) -> RenderRequest {
    let mut req = initial;
    while let Ok(newer) = rx.try_recv() {
        req = newer;
    }
    req
}

fn render_worker(
    renderer: Renderer,
    rx: mpsc::Receiver<RenderRequest>,
    tx: mpsc::Sender<RenderResponse>,
    repaint: Option<RepaintHook>,
) {
    while let Ok(initial) = rx.recv() {
        let req = drain_latest(initial, &rx);
        let result = renderer.render(&req.job);
        if let Err(e) = &result {
            warn!(id = req.id, "Render failed: {e}");
        }
        if tx.send(RenderResponse { id: req.id, result }).is_err() {
            return;
        }
        if let Some(repaint) = &repaint {
            repaint();
        }
    }
}
