use pulldown_cmark::{html, Event, Options, Parser};

use crate::prefs::{KeyValueStore, PreferenceStore};

/// Pure markdown-to-HTML conversion. Must not panic on any input.
pub type RenderFn = fn(&str) -> String;

/// GitHub-flavoured rendering where every newline inside a paragraph
/// becomes a `<br />`.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut html_output = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

pub struct RenderPipeline {
    render: RenderFn,
}

impl RenderPipeline {
    pub fn new(render: RenderFn) -> Self {
        Self { render }
    }

    /// Renders `text` and persists it under `content_key`.
    pub fn update<S: KeyValueStore>(
        &self,
        text: &str,
        store: &PreferenceStore<S>,
        content_key: &str,
    ) -> String {
        let html = (self.render)(text);
        store.set(content_key, text);
        html
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::prefs::testing::{FailingStorage, MemoryStorage};

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(render_markdown("one\ntwo"), "<p>one<br />\ntwo</p>\n");
    }

    #[test]
    fn renders_tables_and_task_lists() {
        let html = render_markdown("| a | b |\n| --- | --- |\n| 1 | 2 |\n\n- [x] done\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn headings_have_no_ids() {
        assert_eq!(render_markdown("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn malformed_input_degrades_gracefully() {
        let html = render_markdown("**unclosed\n```\nfence never ends\n| broken | table\n[link](");
        assert!(!html.is_empty());
    }

    #[test]
    fn update_renders_and_persists() {
        let backend = Rc::new(MemoryStorage::default());
        let store = PreferenceStore::new(Rc::clone(&backend));
        let pipeline = RenderPipeline::new(render_markdown);
        let html = pipeline.update("*hi*", &store, "content");
        assert_eq!(html, render_markdown("*hi*"));
        assert_eq!(backend.value("content").as_deref(), Some("*hi*"));
    }

    #[test]
    fn update_uses_injected_renderer_even_when_storage_fails() {
        fn shout(text: &str) -> String {
            text.to_uppercase()
        }
        let store = PreferenceStore::new(FailingStorage);
        let pipeline = RenderPipeline::new(shout);
        assert_eq!(pipeline.update("abc", &store, "content"), "ABC");
    }
}
