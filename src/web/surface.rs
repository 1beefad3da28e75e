use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::*;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

use crate::manager::{Confirm, Runtime, Surface};
use crate::notify::Notice;
use crate::transfer::Transfer;
use crate::types::RemoteFile;

/// Renders controller state by replacing the contents of Dioxus signals.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    pub files: Signal<Vec<RemoteFile>>,
    pub transfers: Signal<Vec<Transfer>>,
    pub notices: Signal<Vec<Notice>>,
}

impl Surface for SignalSurface {
    fn render_files(&self, files: &[RemoteFile]) {
        let mut sig = self.files;
        sig.set(files.to_vec());
    }

    fn render_transfers(&self, transfers: &[Transfer]) {
        let mut sig = self.transfers;
        sig.set(transfers.to_vec());
    }

    fn render_notices(&self, notices: &[Notice]) {
        let mut sig = self.notices;
        sig.set(notices.to_vec());
    }

    fn navigate(&self, url: &str) {
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().set_href(url) {
                tracing::error!("Navigation to {} failed: {:?}", url, e);
            }
        }
    }
}

/// `window.confirm()`; a missing window counts as "no".
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub struct BrowserRuntime;

#[async_trait(?Send)]
impl Runtime for BrowserRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    async fn sleep(&self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
