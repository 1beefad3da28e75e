//! In-memory collaborators for driving [`FileManager`] without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use tokio::time::Instant;

use crate::config::UiConfig;
use crate::error::{ApiError, ApiResult};
use crate::manager::{Confirm, FileApi, FileManager, ProgressFn, Runtime, Surface, UploadFile};
use crate::notify::Notice;
use crate::transfer::Transfer;
use crate::types::RemoteFile;

#[derive(Debug, Clone)]
pub struct FakeFile {
    pub name: String,
}

impl FakeFile {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl UploadFile for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Scripted file server.
#[derive(Default)]
pub struct FakeApi {
    pub files: RefCell<Vec<RemoteFile>>,
    pub fail_uploads: RefCell<HashSet<String>>,
    pub fail_list: Cell<bool>,
    pub fail_delete: Cell<bool>,
    /// Progress reports sent during every upload, as `(loaded, total)`.
    pub progress_steps: RefCell<Vec<(u64, u64)>>,
    pub upload_latency: Cell<Duration>,
    /// Time between the server removing a file and the DELETE response arriving.
    pub delete_latency: Cell<Duration>,
    pub uploads: RefCell<Vec<String>>,
    pub deletes: RefCell<Vec<String>>,
    pub list_calls: Cell<usize>,
    pub settled_at: RefCell<VecDeque<Instant>>,
}

#[async_trait(?Send)]
impl FileApi for Rc<FakeApi> {
    type File = FakeFile;

    async fn upload(&self, file: &FakeFile, progress: ProgressFn) -> ApiResult<()> {
        self.uploads.borrow_mut().push(file.name.clone());
        let steps = self.progress_steps.borrow().clone();
        for (loaded, total) in steps {
            progress(loaded, total);
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(self.upload_latency.get()).await;
        self.settled_at.borrow_mut().push_back(Instant::now());
        if self.fail_uploads.borrow().contains(&file.name) {
            return Err(ApiError::from_status(400, r#"{"error": "不支持的文件类型"}"#));
        }
        self.files.borrow_mut().push(RemoteFile::named(file.name.clone()));
        Ok(())
    }

    async fn list(&self) -> ApiResult<Vec<RemoteFile>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_list.get() {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(self.files.borrow().clone())
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        self.deletes.borrow_mut().push(name.to_string());
        if self.fail_delete.get() {
            return Err(ApiError::from_status(404, r#"{"error": "文件不存在"}"#));
        }
        self.files.borrow_mut().retain(|f| f.name != name);
        tokio::time::sleep(self.delete_latency.get()).await;
        Ok(())
    }
}

/// Records everything the controller renders.
#[derive(Default)]
pub struct RecordingSurface {
    pub file_renders: RefCell<Vec<Vec<RemoteFile>>>,
    pub transfer_renders: RefCell<Vec<Vec<Transfer>>>,
    pub notices: RefCell<Vec<Notice>>,
    /// Every notice ever shown, in order.
    pub shown: RefCell<Vec<Notice>>,
    pub navigations: RefCell<Vec<String>>,
    pub transfers_cleared_at: RefCell<Vec<Instant>>,
}

impl RecordingSurface {
    pub fn last_files(&self) -> Vec<RemoteFile> {
        self.file_renders.borrow().last().cloned().unwrap_or_default()
    }

    pub fn shown_kinds(&self) -> Vec<crate::types::NoticeKind> {
        self.shown.borrow().iter().map(|n| n.kind).collect()
    }
}

impl Surface for RecordingSurface {
    fn render_files(&self, files: &[RemoteFile]) {
        self.file_renders.borrow_mut().push(files.to_vec());
    }

    fn render_transfers(&self, transfers: &[Transfer]) {
        if transfers.is_empty() {
            self.transfers_cleared_at.borrow_mut().push(Instant::now());
        }
        self.transfer_renders.borrow_mut().push(transfers.to_vec());
    }

    fn render_notices(&self, notices: &[Notice]) {
        let mut shown = self.shown.borrow_mut();
        for n in notices {
            if !shown.iter().any(|s| s.id == n.id) {
                shown.push(n.clone());
            }
        }
        *self.notices.borrow_mut() = notices.to_vec();
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }
}

pub struct FixedConfirm {
    pub answer: bool,
    pub asked: RefCell<Vec<String>>,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer, asked: RefCell::new(Vec::new()) }
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

/// Runs tasks on the current `LocalSet` and sleeps on the (paused) tokio clock.
pub struct TokioRuntime;

#[async_trait(?Send)]
impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct Harness {
    pub api: Rc<FakeApi>,
    pub surface: Rc<RecordingSurface>,
    pub confirm: Rc<FixedConfirm>,
    pub manager: Rc<FileManager<Rc<FakeApi>>>,
}

pub fn harness(confirm_answer: bool) -> Harness {
    let api = Rc::new(FakeApi::default());
    let surface = Rc::new(RecordingSurface::default());
    let confirm = Rc::new(FixedConfirm::new(confirm_answer));
    let manager = FileManager::new(
        Rc::clone(&api),
        surface.clone(),
        confirm.clone(),
        Rc::new(TokioRuntime),
        UiConfig::default(),
    );
    Harness { api, surface, confirm, manager }
}
