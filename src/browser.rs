//! Thin adapters between the editor logic and the browser.

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlDocument, HtmlTextAreaElement, MediaQueryList, Storage};

use crate::config::EditorConfig;
use crate::controller::CopyMethod;
use crate::deferred::Schedule;
use crate::error::{ClipboardError, StorageError};
use crate::prefs::KeyValueStore;
use crate::scroll::{PaneMetrics, ScrollPane};
use crate::theme::Theme;

const CONFIG_ELEMENT_ID: &str = "md-preview-config";

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Js(js_error(e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Js(js_error(e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Js(js_error(e)))
    }
}

/// Live `prefers-color-scheme` signal.
pub struct ColorSchemeWatcher {
    query: Option<MediaQueryList>,
}

impl ColorSchemeWatcher {
    pub fn new(media_query: &str) -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(media_query).ok().flatten());
        if query.is_none() {
            debug!("matchMedia unavailable, assuming light scheme");
        }
        Self { query }
    }

    pub fn prefers_dark(&self) -> bool {
        self.query.as_ref().is_some_and(MediaQueryList::matches)
    }

    pub fn on_change<F>(&self, callback: F) -> Option<EventListener>
    where
        F: Fn(bool) + 'static,
    {
        let query = self.query.clone()?;
        let target = query.clone();
        Some(EventListener::new(&query, "change", move |_| {
            callback(target.matches())
        }))
    }
}

/// Scroll geometry of a DOM element.
pub struct DomPane<'a>(pub &'a Element);

impl ScrollPane for DomPane<'_> {
    fn metrics(&self) -> PaneMetrics {
        PaneMetrics {
            offset: f64::from(self.0.scroll_top()),
            scroll_height: f64::from(self.0.scroll_height()),
            client_height: f64::from(self.0.client_height()),
        }
    }

    fn set_offset(&self, offset: f64) {
        self.0.set_scroll_top(offset.round() as i32);
    }
}

/// `requestAnimationFrame`; dropping the handle cancels the frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationFrames;

impl Schedule for AnimationFrames {
    type Handle = AnimationFrame;

    fn schedule(&self, callback: Box<dyn FnOnce()>) -> AnimationFrame {
        request_animation_frame(move |_| callback())
    }
}

/// `setTimeout` with a fixed delay; dropping the handle clears it.
#[derive(Clone, Copy, Debug)]
pub struct Timeouts {
    pub delay_ms: u32,
}

impl Schedule for Timeouts {
    type Handle = Timeout;

    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(self.delay_ms, callback)
    }
}

async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let navigator = window.navigator();
    // Absent outside secure contexts.
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| ClipboardError::Unavailable)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(ClipboardError::Unavailable);
    }
    let clipboard: web_sys::Clipboard = clipboard.unchecked_into();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(js_error(e)))
}

/// Selects the editor contents and runs `execCommand("copy")`. The result
/// is not checked.
fn selection_copy(editor: Option<&HtmlTextAreaElement>) {
    if let Some(editor) = editor {
        editor.select();
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok());
    match document.map(|d| d.exec_command("copy")) {
        Some(Ok(copied)) => debug!("execCommand(copy) returned {copied}"),
        Some(Err(e)) => debug!("execCommand(copy) threw: {}", js_error(e)),
        None => debug!("no document for fallback copy"),
    }
}

pub async fn copy_text(text: &str, editor: Option<&HtmlTextAreaElement>) -> CopyMethod {
    match write_clipboard(text).await {
        Ok(()) => CopyMethod::Clipboard,
        Err(err) => {
            debug!("{err}, using selection copy");
            selection_copy(editor);
            CopyMethod::Fallback
        }
    }
}

pub fn apply_theme_attribute(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            warn!("failed to apply theme: {}", js_error(e));
        }
    }
}

pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Reads the optional inline JSON config block, falling back to defaults.
pub fn read_inline_config() -> EditorConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return EditorConfig::default();
    };
    EditorConfig::from_json(&raw).unwrap_or_else(|err| {
        warn!("{err}; using defaults");
        EditorConfig::default()
    })
}
