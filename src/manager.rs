//! The file manager controller.
//!
//! [`FileManager`] owns the UI state (file list, progress rows, banners) and
//! drives the server calls. It never touches the DOM itself; everything
//! outside is reached through the injected traits below, which keeps the
//! whole flow testable without a browser.
//!
//! All futures run on the single UI thread. State lives in a `RefCell` and
//! no borrow is held across an `.await`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{join_all, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::endpoints::Endpoints;
use crate::error::ApiResult;
use crate::notify::{Notice, NoticeId, Notices};
use crate::transfer::{Transfer, TransferId, Transfers};
use crate::types::{NoticeKind, RemoteFile};

/// Progress callback handed to the transport: `(bytes_sent, bytes_total)`.
pub type ProgressFn = Rc<dyn Fn(u64, u64)>;

/// A file handle that can be uploaded.
pub trait UploadFile {
    fn name(&self) -> String;
}

/// HTTP access to the file server.
#[async_trait(?Send)]
pub trait FileApi {
    type File: UploadFile;

    /// POSTs one file as multipart field `file`. Any 2xx is success.
    async fn upload(&self, file: &Self::File, progress: ProgressFn) -> ApiResult<()>;
    /// GETs the current file list.
    async fn list(&self) -> ApiResult<Vec<RemoteFile>>;
    /// DELETEs one file by name.
    async fn delete(&self, name: &str) -> ApiResult<()>;
}

/// The visible parts of the page the controller renders into.
///
/// Each `render_*` call carries the complete current state, never a delta.
pub trait Surface {
    fn render_files(&self, files: &[RemoteFile]);
    fn render_transfers(&self, transfers: &[Transfer]);
    fn render_notices(&self, notices: &[Notice]);
    /// Full page navigation.
    fn navigate(&self, url: &str);
}

/// Blocking yes/no decision taken before a destructive request.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Timer and task spawning on the UI thread.
#[async_trait(?Send)]
pub trait Runtime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
    Declined,
}

#[derive(Default)]
struct State {
    files: Vec<RemoteFile>,
    transfers: Transfers,
    notices: Notices,
}

pub struct FileManager<A: FileApi> {
    api: A,
    surface: Rc<dyn Surface>,
    confirm: Rc<dyn Confirm>,
    runtime: Rc<dyn Runtime>,
    endpoints: Endpoints,
    config: UiConfig,
    state: RefCell<State>,
    me: Weak<Self>,
}

impl<A: FileApi + 'static> FileManager<A> {
    /// Wires the controller to its collaborators and schedules the initial list load.
    ///
    /// Call once at start-up.
    pub fn init(
        api: A,
        surface: Rc<dyn Surface>,
        confirm: Rc<dyn Confirm>,
        runtime: Rc<dyn Runtime>,
        config: UiConfig,
    ) -> Rc<Self> {
        let manager = Self::new(api, surface, confirm, runtime, config);
        let task = Rc::clone(&manager);
        manager.runtime.spawn(Box::pin(async move { task.refresh().await }));
        manager
    }

    /// Builds the controller without loading the list.
    pub fn new(
        api: A,
        surface: Rc<dyn Surface>,
        confirm: Rc<dyn Confirm>,
        runtime: Rc<dyn Runtime>,
        config: UiConfig,
    ) -> Rc<Self> {
        let endpoints = Endpoints::new(config.endpoints.clone());
        Rc::new_cyclic(|me| Self {
            api,
            surface,
            confirm,
            runtime,
            endpoints,
            config,
            state: RefCell::new(State::default()),
            me: me.clone(),
        })
    }

    pub fn files(&self) -> Vec<RemoteFile> {
        self.state.borrow().files.clone()
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.state.borrow().transfers.items().to_vec()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state.borrow().notices.items().to_vec()
    }

    /// Uploads every selected file independently and concurrently.
    ///
    /// Resolves once every upload has settled and its progress row is gone.
    pub async fn select_files(&self, files: Vec<A::File>) -> Vec<UploadOutcome> {
        debug!("{} file(s) selected", files.len());
        join_all(files.into_iter().map(|f| self.upload_owned(f))).await
    }

    async fn upload_owned(&self, file: A::File) -> UploadOutcome {
        self.upload(&file).await
    }

    pub async fn upload(&self, file: &A::File) -> UploadOutcome {
        let name = file.name();
        let id = self.state.borrow_mut().transfers.begin(name.clone());
        self.render_transfers();

        let me = self.me.clone();
        let progress: ProgressFn = Rc::new(move |loaded: u64, total: u64| {
            if let Some(m) = me.upgrade() {
                m.on_progress(id, loaded, total);
            }
        });

        let result = self.api.upload(file, progress).await;
        let settle = Duration::from_millis(self.config.timing.progress_settle_ms);
        let outcome = match result {
            Ok(()) => {
                info!("Upload finished: {}", name);
                self.state.borrow_mut().transfers.settle(id, true);
                self.render_transfers();
                self.notify(&self.config.messages.upload_ok, NoticeKind::Success);
                // Liste neu laden, während der Fortschritt noch stehen bleibt
                futures::join!(self.refresh(), self.runtime.sleep(settle));
                UploadOutcome::Uploaded
            }
            Err(e) => {
                warn!("Upload failed: {}: {}", name, e);
                self.state.borrow_mut().transfers.settle(id, false);
                self.render_transfers();
                self.notify(&self.config.messages.upload_failed, NoticeKind::Error);
                self.runtime.sleep(settle).await;
                UploadOutcome::Failed
            }
        };

        self.state.borrow_mut().transfers.remove(id);
        self.render_transfers();
        outcome
    }

    fn on_progress(&self, id: TransferId, loaded: u64, total: u64) {
        let changed = self.state.borrow_mut().transfers.advance(id, loaded, total);
        if changed {
            self.render_transfers();
        }
    }

    /// Reloads the file list. On failure the previous list stays on screen.
    pub async fn refresh(&self) {
        match self.api.list().await {
            Ok(files) => {
                debug!("File list: {} entries", files.len());
                self.state.borrow_mut().files = files;
                let snapshot = self.files();
                self.surface.render_files(&snapshot);
            }
            Err(e) => warn!("Failed to load file list: {}", e),
        }
    }

    pub fn download(&self, name: &str) {
        let url = self.endpoints.download(name);
        debug!("Navigating to {}", url);
        self.surface.navigate(&url);
    }

    pub async fn delete(&self, name: &str) -> DeleteOutcome {
        if !self.confirm.confirm(&self.config.messages.confirm_delete) {
            debug!("Delete declined: {}", name);
            return DeleteOutcome::Declined;
        }
        match self.api.delete(name).await {
            Ok(()) => {
                info!("Deleted: {}", name);
                self.notify(&self.config.messages.delete_ok, NoticeKind::Success);
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!("Delete failed: {}: {}", name, e);
                self.notify(&self.config.messages.delete_failed, NoticeKind::Error);
                DeleteOutcome::Failed
            }
        }
    }

    /// Runs [`delete`](Self::delete) as a task on the runtime.
    ///
    /// The task belongs to the manager, so it finishes even when the row that
    /// started it is removed by a concurrent refresh.
    pub fn request_delete(&self, name: &str) {
        let Some(me) = self.me.upgrade() else { return };
        let name = name.to_string();
        self.runtime.spawn(Box::pin(async move {
            me.delete(&name).await;
        }));
    }

    /// Shows a banner and schedules its removal after `timing.notice_ttl_ms`.
    pub fn notify(&self, message: &str, kind: NoticeKind) -> NoticeId {
        let id = self.state.borrow_mut().notices.push(message, kind);
        self.render_notices();

        let me = self.me.clone();
        let runtime = Rc::clone(&self.runtime);
        let ttl = Duration::from_millis(self.config.timing.notice_ttl_ms);
        self.runtime.spawn(Box::pin(async move {
            runtime.sleep(ttl).await;
            if let Some(m) = me.upgrade() {
                m.dismiss(id);
            }
        }));
        id
    }

    /// Removes a banner. Returns `false` if it was already removed.
    pub fn dismiss(&self, id: NoticeId) -> bool {
        let removed = self.state.borrow_mut().notices.dismiss(id);
        if removed {
            self.render_notices();
        }
        removed
    }

    fn render_transfers(&self) {
        let snapshot = self.transfers();
        self.surface.render_transfers(&snapshot);
    }

    fn render_notices(&self) {
        let snapshot = self.notices();
        self.surface.render_notices(&snapshot);
    }
}
