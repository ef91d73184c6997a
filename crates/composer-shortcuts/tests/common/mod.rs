#![allow(dead_code)]

use composer_core::{BlockNode, Document, Editor, Point, Selection};
use composer_shortcuts::{KeyEvent, ShortcutEngine};

pub fn editor_at(children: Vec<BlockNode>, path: Vec<usize>, offset: usize) -> Editor {
    let doc = Document::new(children);
    Editor::new(doc, Selection::collapsed(Point::new(path, offset)))
}

/// Types `text` one key at a time the way a host would: the engine sees each
/// key first and the character is inserted only if it was not consumed.
pub fn type_keys(editor: &mut Editor, engine: &ShortcutEngine, text: &str, tasks_enabled: bool) {
    for ch in text.chars() {
        let mut event = KeyEvent::char(ch);
        engine
            .handle_key_press(editor, &mut event, tasks_enabled)
            .unwrap();
        if !event.default_prevented() {
            editor.insert_text(ch.encode_utf8(&mut [0; 4])).unwrap();
        }
    }
}
