use std::rc::Rc;
use std::sync::OnceLock;

use dioxus::prelude::*;
use tracing::{error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlElement, HtmlInputElement};

use super::api::HttpApi;
use super::dom;
use super::surface::{BrowserRuntime, SignalSurface, WindowConfirm};
use crate::config::{self, UiConfig};
use crate::endpoints::Endpoints;
use crate::manager::FileManager;
use crate::notify::Notice;
use crate::qr;
use crate::transfer::{Transfer, TransferPhase};
use crate::types::RemoteFile;

type WebManager = FileManager<HttpApi>;

const CONFIG_ELEMENT_ID: &str = "qrshare-config";
const DROP_ZONE_ID: &str = "dropZone";
const FILE_INPUT_ID: &str = "fileInput";

static CONFIG: OnceLock<UiConfig> = OnceLock::new();

fn ui_config() -> &'static UiConfig {
    CONFIG.get_or_init(UiConfig::default)
}

fn config_override() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

pub fn launch() {
    console_error_panic_hook::set_once();
    let (cfg, cfg_err) = match config::load(config_override().as_deref()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (UiConfig::default(), Some(e)),
    };
    crate::logging::init(&cfg.log);
    if let Some(e) = cfg_err {
        warn!("Ignoring config override: {}", e);
    }
    let _ = CONFIG.set(cfg);
    info!("QRShare UI starting");
    dioxus_web::launch::launch(app, vec![], Default::default());
}

// Hängt Klick, Drag & Drop und Dateiauswahl an die gerenderten Elemente
fn bind_selection(manager: Rc<WebManager>) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };
    let zone = doc.get_element_by_id(DROP_ZONE_ID).and_then(|e| e.dyn_into::<HtmlElement>().ok());
    let input = doc.get_element_by_id(FILE_INPUT_ID).and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
    let (Some(zone), Some(input)) = (zone, input) else {
        error!("Drop zone or file input missing from the page");
        return;
    };
    let on_files: Rc<dyn Fn(Vec<File>)> = Rc::new(move |files: Vec<File>| {
        let manager = manager.clone();
        wasm_bindgen_futures::spawn_local(async move {
            manager.select_files(files).await;
        });
    });
    if let Err(e) = dom::bind_file_selection(&zone, &input, on_files) {
        error!("Binding file selection failed: {}", e);
    }
}

fn app() -> Element {
    let files = use_signal(Vec::<RemoteFile>::new);
    let transfers = use_signal(Vec::<Transfer>::new);
    let notices = use_signal(Vec::<Notice>::new);

    let manager = use_context_provider(|| {
        let cfg = ui_config().clone();
        let api = HttpApi::new(Endpoints::new(cfg.endpoints.clone()));
        let surface = Rc::new(SignalSurface { files, transfers, notices });
        FileManager::init(api, surface, Rc::new(WindowConfirm), Rc::new(BrowserRuntime), cfg)
    });

    {
        let manager = manager.clone();
        use_effect(move || bind_selection(manager.clone()));
    }

    rsx! {
        div { class: "app",
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand",
                        span { "📁 QRShare" }
                    }
                    AccessUrl {}
                }
            }
            div { class: "container",
                section { class: "panel qr-panel",
                    h2 { "扫码访问" }
                    QrDisplay {}
                }
                section { class: "panel",
                    div { id: DROP_ZONE_ID, class: "drop-zone",
                        span { class: "material-icons", "cloud_upload" }
                        p { "拖拽文件到这里或点击选择文件" }
                    }
                    input { id: FILE_INPUT_ID, r#type: "file", multiple: true, style: "display:none" }
                    div { class: "transfers",
                        for t in transfers.read().iter().cloned() {
                            TransferRow { key: "{t.id.0}", transfer: t.clone() }
                        }
                    }
                }
                section { class: "panel",
                    h2 { "文件列表" }
                    div { id: "fileList", class: "file-list",
                        for file in files.read().iter().cloned() {
                            FileRow { key: "{file.name}", file: file.clone() }
                        }
                    }
                }
            }
            // Benachrichtigungen am Ende der Seite
            div { class: "notices",
                for notice in notices.read().iter().cloned() {
                    NoticeBanner { key: "{notice.id.0}", notice: notice.clone() }
                }
            }
        }
    }
}

#[component]
fn QrDisplay() -> Element {
    let svg = use_hook(|| {
        let url = web_sys::window().and_then(|w| w.location().href().ok()).unwrap_or_default();
        match qr::render_svg(&url, &ui_config().qr) {
            Ok(svg) => svg,
            Err(e) => {
                warn!("QR code for {} failed: {}", url, e);
                String::new()
            }
        }
    });
    rsx! {
        div { id: "qrCode", class: "qr-code", dangerous_inner_html: "{svg}" }
    }
}

#[component]
fn AccessUrl() -> Element {
    let origin = use_hook(|| {
        web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default()
    });
    rsx! {
        div { class: "access-url",
            span { "访问地址: " }
            a { id: "access-url", href: "{origin}", "{origin}" }
        }
    }
}

#[component]
fn TransferRow(transfer: Transfer) -> Element {
    let phase = match transfer.phase {
        TransferPhase::Uploading => "uploading",
        TransferPhase::Succeeded => "done",
        TransferPhase::Failed => "failed",
    };
    let width = format!("width: {:.1}%", transfer.percent);
    rsx! {
        div { class: "transfer transfer-{phase}",
            div { class: "transfer-name", "{transfer.name}" }
            div { class: "progress",
                div { class: "progress-bar", style: "{width}" }
            }
        }
    }
}

#[component]
fn FileRow(file: RemoteFile) -> Element {
    let manager = use_context::<Rc<WebManager>>();

    let download = {
        let manager = manager.clone();
        let name = file.name.clone();
        move |_| manager.download(&name)
    };
    let delete = {
        let name = file.name.clone();
        move |_| manager.request_delete(&name)
    };
    let details = file.details();

    rsx! {
        div { class: "file-item",
            span { class: "material-icons file-icon", "description" }
            div { class: "file-meta",
                div { class: "file-name", "{file.name}" }
                { details.map(|d| rsx!(div { class: "file-details", "{d}" })) }
            }
            div { class: "action-buttons",
                button { class: "custom-button", title: "下载", onclick: download,
                    span { class: "material-icons", "download" }
                }
                button { class: "custom-button", title: "删除", onclick: delete,
                    span { class: "material-icons", "delete" }
                }
            }
        }
    }
}

#[component]
fn NoticeBanner(notice: Notice) -> Element {
    let manager = use_context::<Rc<WebManager>>();
    let id = notice.id;
    let kind = notice.kind.as_str();
    rsx! {
        div { class: "alert alert-{kind} alert-dismissible fade show", role: "alert",
            "{notice.message}"
            button { r#type: "button", class: "btn-close", title: "关闭",
                onclick: move |_| {
                    manager.dismiss(id);
                }
            }
        }
    }
}
