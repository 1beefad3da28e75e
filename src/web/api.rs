use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::endpoints::Endpoints;
use crate::error::{ApiError, ApiResult};
use crate::manager::{FileApi, ProgressFn, UploadFile};
use crate::types::RemoteFile;

impl UploadFile for File {
    fn name(&self) -> String {
        File::name(self)
    }
}

/// Same-origin HTTP client for the file server.
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

fn map_net(e: reqwasm::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn map_js(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

async fn check(resp: reqwasm::http::Response) -> ApiResult<reqwasm::http::Response> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_else(|_| "HTTP Fehler".into());
    Err(ApiError::from_status(status, &text))
}

#[async_trait(?Send)]
impl FileApi for HttpApi {
    type File = File;

    // fetch() meldet keinen Upload-Fortschritt, daher XMLHttpRequest
    async fn upload(&self, file: &File, progress: ProgressFn) -> ApiResult<()> {
        let form = FormData::new().map_err(map_js)?;
        form.append_with_blob_and_filename("file", file, &file.name()).map_err(map_js)?;

        let xhr = XmlHttpRequest::new().map_err(map_js)?;
        xhr.open("POST", &self.endpoints.upload()).map_err(map_js)?;

        let (tx, rx) = oneshot::channel::<ApiResult<()>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let on_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
            if ev.length_computable() {
                progress(ev.loaded() as u64, ev.total() as u64);
            }
        });
        let on_load = {
            let tx = Rc::clone(&tx);
            let xhr = xhr.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
                let status = xhr.status().unwrap_or(0);
                let result = ApiError::check_status(status, || xhr.response_text().ok().flatten().unwrap_or_default());
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            })
        };
        let on_error = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(ApiError::Network(format!("Upload abgebrochen ({})", ev.type_()))));
                }
            })
        };

        let upload = xhr.upload().map_err(map_js)?;
        upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form)).map_err(map_js)?;
        let result = rx.await.unwrap_or_else(|_| Err(ApiError::Network("Upload abgebrochen".into())));

        // Closures bleiben bis hier am Leben; danach Handler lösen
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        drop((on_progress, on_load, on_error));
        result
    }

    async fn list(&self) -> ApiResult<Vec<RemoteFile>> {
        let resp = reqwasm::http::Request::get(&self.endpoints.files()).send().await.map_err(map_net)?;
        let resp = check(resp).await?;
        let text = resp.text().await.map_err(map_net)?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn delete(&self, name: &str) -> ApiResult<()> {
        let resp = reqwasm::http::Request::delete(&self.endpoints.delete(name)).send().await.map_err(map_net)?;
        check(resp).await?;
        Ok(())
    }
}
