//! Native event wiring for file selection.
//!
//! Dioxus events do not expose `web_sys::File` handles, so the drop zone and
//! the hidden input get plain DOM listeners. The closures are leaked; both
//! elements live as long as the page.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileList, HtmlElement, HtmlInputElement};

pub const DRAG_OVER_CLASS: &str = "drag-over";

/// Collects a `FileList` into owned handles, keeping the browser's order.
pub fn files_from_list(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn listen<E, F>(target: &HtmlElement, event: &str, handler: F) -> Result<(), String>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| format!("{} listener: {:?}", event, e))?;
    closure.forget();
    Ok(())
}

/// Binds click-to-browse and drag-and-drop on `drop_zone` and the change
/// event on `file_input`. Both paths hand the selection to `on_files`.
pub fn bind_file_selection(
    drop_zone: &HtmlElement,
    file_input: &HtmlInputElement,
    on_files: Rc<dyn Fn(Vec<File>)>,
) -> Result<(), String> {
    {
        let input = file_input.clone();
        listen(drop_zone, "click", move |_ev: web_sys::MouseEvent| input.click())?;
    }
    {
        let zone = drop_zone.clone();
        listen(drop_zone, "dragover", move |ev: DragEvent| {
            ev.prevent_default();
            let _ = zone.class_list().add_1(DRAG_OVER_CLASS);
        })?;
    }
    {
        let zone = drop_zone.clone();
        listen(drop_zone, "dragleave", move |ev: DragEvent| {
            ev.prevent_default();
            let _ = zone.class_list().remove_1(DRAG_OVER_CLASS);
        })?;
    }
    {
        let zone = drop_zone.clone();
        let on_files = Rc::clone(&on_files);
        listen(drop_zone, "drop", move |ev: DragEvent| {
            ev.prevent_default();
            let _ = zone.class_list().remove_1(DRAG_OVER_CLASS);
            let files = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .map(|list| files_from_list(&list))
                .unwrap_or_default();
            if !files.is_empty() {
                on_files(files);
            }
        })?;
    }
    {
        let input = file_input.clone();
        let target: &HtmlElement = file_input.as_ref();
        listen(target, "change", move |_ev: web_sys::Event| {
            let files = input.files().map(|list| files_from_list(&list)).unwrap_or_default();
            // Leeren, damit dieselbe Datei erneut gewählt werden kann
            input.set_value("");
            if !files.is_empty() {
                on_files(files);
            }
        })?;
    }
    Ok(())
}
