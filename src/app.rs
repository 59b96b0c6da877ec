use std::cell::RefCell;
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::trace;

use crate::browser::{self, AnimationFrames, BrowserStorage, ColorSchemeWatcher, DomPane, Timeouts};
use crate::controller::{Action, Controller, UiEvent};
use crate::deferred::LatestOnly;
use crate::prefs::PreferenceStore;
use crate::render::render_markdown;
use crate::scroll::{ScrollSynchronizer, SyncDirection};
use crate::theme::Theme;

/// Everything an event handler needs, cloned into each closure.
#[derive(Clone)]
struct Shell {
    controller: Rc<RefCell<Controller<BrowserStorage>>>,
    scroll: Rc<ScrollSynchronizer<LatestOnly<AnimationFrames>>>,
    status_timer: Rc<LatestOnly<Timeouts>>,
    editor: NodeRef<html::Textarea>,
    preview: NodeRef<html::Div>,
    set_theme: WriteSignal<Theme>,
    set_status: WriteSignal<String>,
    set_status_visible: WriteSignal<bool>,
}

impl Shell {
    fn dispatch(&self, event: UiEvent) {
        let actions = self.controller.borrow_mut().handle(event);
        self.apply(actions);
    }

    fn apply(&self, actions: Vec<Action>) {
        for action in actions {
            match action {
                // Written straight to the DOM so a following sync pass sees
                // the new scroll height.
                Action::SetEditorText(text) => {
                    if let Some(editor) = self.editor.get_untracked() {
                        editor.set_value(&text);
                    }
                }
                Action::SetPreview(markup) => {
                    if let Some(preview) = self.preview.get_untracked() {
                        preview.set_inner_html(&markup);
                    }
                }
                Action::ApplyTheme(theme) => {
                    browser::apply_theme_attribute(theme);
                    self.set_theme.set(theme);
                }
                Action::SyncScroll(direction) => self.sync_scroll(direction),
                Action::CopyToClipboard(text) => {
                    let shell = self.clone();
                    let editor = self.editor.get_untracked();
                    spawn_local(async move {
                        let method = browser::copy_text(&text, editor.as_ref()).await;
                        shell.dispatch(UiEvent::CopyFinished(method));
                    });
                }
                Action::ShowStatus(message) => {
                    self.set_status.set(message);
                    self.set_status_visible.set(true);
                    let set_visible = self.set_status_visible;
                    self.status_timer.restart(move || set_visible.set(false));
                }
            }
        }
    }

    fn sync_scroll(&self, direction: SyncDirection) {
        let (Some(editor), Some(preview)) =
            (self.editor.get_untracked(), self.preview.get_untracked())
        else {
            return;
        };
        let editor = DomPane(&editor);
        let preview = DomPane(&preview);
        let ran = match direction {
            SyncDirection::EditorToPreview => self.scroll.sync(&editor, &preview),
            SyncDirection::PreviewToEditor => self.scroll.sync(&preview, &editor),
        };
        if !ran {
            trace!("sync pass already pending, dropped {direction:?}");
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = browser::read_inline_config();
    let color_scheme = ColorSchemeWatcher::new(&config.color_scheme_query);

    let (controller, startup) = Controller::start(
        PreferenceStore::new(BrowserStorage),
        config.storage_keys.clone(),
        render_markdown,
        color_scheme.prefers_dark(),
    );
    let initial_sync = controller.sync_enabled();

    let (theme, set_theme) = signal(controller.theme());
    let (status, set_status) = signal(String::new());
    let (status_visible, set_status_visible) = signal(false);

    let editor_ref = NodeRef::<html::Textarea>::new();
    let preview_ref = NodeRef::<html::Div>::new();

    let shell = Shell {
        controller: Rc::new(RefCell::new(controller)),
        scroll: Rc::new(ScrollSynchronizer::new(LatestOnly::new(AnimationFrames))),
        status_timer: Rc::new(LatestOnly::new(Timeouts {
            delay_ms: config.status_timeout_ms,
        })),
        editor: editor_ref,
        preview: preview_ref,
        set_theme,
        set_status,
        set_status_visible,
    };

    // First render once the panes are mounted.
    let pending_startup = RefCell::new(Some(startup));
    let on_mount = shell.clone();
    Effect::new(move |_| {
        if editor_ref.get().is_none() || preview_ref.get().is_none() {
            return;
        }
        if let Some(actions) = pending_startup.borrow_mut().take() {
            on_mount.apply(actions);
        }
    });

    let on_scheme = shell.clone();
    if let Some(listener) =
        color_scheme.on_change(move |dark| on_scheme.dispatch(UiEvent::OsThemeChanged(dark)))
    {
        listener.forget();
    }

    let on_input = shell.clone();
    let on_editor_scroll = shell.clone();
    let on_preview_scroll = shell.clone();
    let on_reset = shell.clone();
    let on_copy = shell.clone();
    let on_dark = shell.clone();
    let on_sync = shell;

    view! {
        <main class="app-layout">
            <header class="toolbar">
                <span class="brand">"Markdown Live Preview"</span>
                <div class="toolbar-actions">
                    <label class="toggle">
                        <input
                            type="checkbox"
                            prop:checked=initial_sync
                            on:change=move |ev| on_sync.dispatch(UiEvent::SyncToggled(event_target_checked(&ev)))
                        />
                        "Sync scroll"
                    </label>
                    <label class="toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || theme.get() == Theme::Dark
                            on:change=move |ev| on_dark.dispatch(UiEvent::DarkModeToggled(event_target_checked(&ev)))
                        />
                        "Dark mode"
                    </label>
                    <button on:click=move |_| on_copy.dispatch(UiEvent::CopyRequested) title="Copy markdown">
                        "Copy"
                    </button>
                    <button on:click=move |_| on_reset.dispatch(UiEvent::Reset) title="Replace with sample markdown">
                        "Reset"
                    </button>
                </div>
            </header>
            <section class="panes">
                <textarea
                    node_ref=editor_ref
                    class="editor-pane"
                    on:input=move |ev| on_input.dispatch(UiEvent::Input(event_target_value(&ev)))
                    on:scroll=move |_| on_editor_scroll.dispatch(UiEvent::EditorScrolled)
                    placeholder="Write markdown..."
                    spellcheck="false"
                ></textarea>
                <div
                    node_ref=preview_ref
                    class="preview-pane markdown-body"
                    on:scroll=move |_| on_preview_scroll.dispatch(UiEvent::PreviewScrolled)
                ></div>
            </section>
            <div
                class=move || if status_visible.get() { "status is-visible" } else { "status" }
                role="status"
                aria-live="polite"
            >
                {move || status.get()}
            </div>
        </main>
    }
}
