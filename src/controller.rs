use log::{debug, info};

use crate::config::StorageKeys;
use crate::prefs::{KeyValueStore, PreferenceStore};
use crate::render::{RenderFn, RenderPipeline};
use crate::scroll::SyncDirection;
use crate::theme::{Theme, ThemeResolver};

pub const SAMPLE_DOCUMENT: &str = r#"# Markdown Live Preview

Write on the left. See the preview on the right.

## Quick cheatsheet
- **Bold** and *italic*
- Lists, links, and code
- Tables and blockquotes

### Code block
~~~js
const greet = (name) => "Hello, " + name + "!";
console.log(greet("md.airat.top"));
~~~

> Tip: Toggle Sync Scroll to keep both panes aligned.

| Feature | Status |
| --- | --- |
| Live preview | Ready |
| Dark mode | On |
| Sync scroll | Optional |

[Project repo](https://github.com/AiratTop/md.airat.top)
"#;

pub const RESET_STATUS: &str = "Reset to sample markdown";

/// How the clipboard write ended up being performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    Fallback,
}

impl CopyMethod {
    pub fn status_message(self) -> &'static str {
        match self {
            Self::Clipboard => "Markdown copied to clipboard",
            Self::Fallback => "Markdown copied",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Input(String),
    EditorScrolled,
    PreviewScrolled,
    Reset,
    CopyRequested,
    CopyFinished(CopyMethod),
    DarkModeToggled(bool),
    SyncToggled(bool),
    OsThemeChanged(bool),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input(_) => "editor:input",
            Self::EditorScrolled => "editor:scroll",
            Self::PreviewScrolled => "preview:scroll",
            Self::Reset => "reset:click",
            Self::CopyRequested => "copy:click",
            Self::CopyFinished(_) => "copy:finished",
            Self::DarkModeToggled(_) => "dark-mode:change",
            Self::SyncToggled(_) => "sync:change",
            Self::OsThemeChanged(_) => "color-scheme:change",
        }
    }
}

/// DOM work requested by the controller, applied in order by the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetEditorText(String),
    SetPreview(String),
    ApplyTheme(Theme),
    SyncScroll(SyncDirection),
    CopyToClipboard(String),
    ShowStatus(String),
}

pub struct Controller<S> {
    store: PreferenceStore<S>,
    keys: StorageKeys,
    pipeline: RenderPipeline,
    theme: ThemeResolver,
    text: String,
    sync_enabled: bool,
}

impl<S: KeyValueStore> Controller<S> {
    /// Restores persisted state and returns the actions of the first
    /// render. The theme is applied without being written back.
    pub fn start(
        store: PreferenceStore<S>,
        keys: StorageKeys,
        render: RenderFn,
        os_prefers_dark: bool,
    ) -> (Self, Vec<Action>) {
        let stored_content = store.get(&keys.content, "");
        let theme = ThemeResolver::load(&store, &keys, os_prefers_dark);
        let sync_enabled = store.get_flag(&keys.sync, true);
        info!(
            "starting editor: theme mode {}, preference {}, sync {}",
            theme.mode().as_str(),
            theme.preference().as_str(),
            sync_enabled
        );

        let mut controller = Self {
            store,
            keys,
            pipeline: RenderPipeline::new(render),
            theme,
            text: String::new(),
            sync_enabled,
        };

        let initial = if stored_content.trim().is_empty() {
            SAMPLE_DOCUMENT.to_string()
        } else {
            stored_content
        };
        let mut actions = vec![Action::ApplyTheme(controller.theme.resolved())];
        actions.extend(controller.set_content(initial));
        (controller, actions)
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }

    pub fn theme(&self) -> Theme {
        self.theme.resolved()
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Action> {
        debug!("{}", event.name());
        match event {
            UiEvent::Input(text) => {
                self.text = text;
                self.refresh()
            }
            UiEvent::EditorScrolled => self.sync_pass(SyncDirection::EditorToPreview),
            UiEvent::PreviewScrolled => self.sync_pass(SyncDirection::PreviewToEditor),
            UiEvent::Reset => {
                let mut actions = self.set_content(SAMPLE_DOCUMENT.to_string());
                actions.push(Action::ShowStatus(RESET_STATUS.to_string()));
                actions
            }
            UiEvent::CopyRequested => vec![Action::CopyToClipboard(self.text.clone())],
            UiEvent::CopyFinished(method) => {
                vec![Action::ShowStatus(method.status_message().to_string())]
            }
            UiEvent::DarkModeToggled(dark) => {
                let theme = self.theme.toggle(dark, &self.store, &self.keys);
                vec![Action::ApplyTheme(theme)]
            }
            UiEvent::SyncToggled(enabled) => {
                self.sync_enabled = enabled;
                self.store.set_flag(&self.keys.sync, enabled);
                self.sync_pass(SyncDirection::EditorToPreview)
            }
            UiEvent::OsThemeChanged(prefers_dark) => self
                .theme
                .os_changed(prefers_dark)
                .map(Action::ApplyTheme)
                .into_iter()
                .collect(),
        }
    }

    fn set_content(&mut self, text: String) -> Vec<Action> {
        self.text = text;
        let mut actions = vec![Action::SetEditorText(self.text.clone())];
        actions.extend(self.refresh());
        actions
    }

    fn refresh(&mut self) -> Vec<Action> {
        let html = self
            .pipeline
            .update(&self.text, &self.store, &self.keys.content);
        let mut actions = vec![Action::SetPreview(html)];
        actions.extend(self.sync_pass(SyncDirection::EditorToPreview));
        actions
    }

    fn sync_pass(&self, direction: SyncDirection) -> Vec<Action> {
        if self.sync_enabled {
            vec![Action::SyncScroll(direction)]
        } else {
            Vec::new()
        }
    }
}
