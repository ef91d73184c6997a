use composer_core::{
    BlockNode, BlockType, Document, DocumentValue, Editor, EditorConfig, Node, Point, Selection,
};
use pretty_assertions::assert_eq;

#[test]
fn document_value_reads_tagged_json() {
    let json = r#"{
        "document": {
            "children": [
                {
                    "block_type": "todo_item",
                    "children": [{ "node": "text", "text": "ship it" }]
                }
            ]
        }
    }"#;

    let value = DocumentValue::from_json_str(json).unwrap();
    assert_eq!(value.schema, "composer");
    assert_eq!(value.version, 1);
    assert_eq!(
        value.into_document(),
        Document::new(vec![BlockNode::new(
            BlockType::TodoItem,
            vec![Node::text("ship it")],
        )])
    );
}

#[test]
fn editor_config_falls_back_to_defaults() {
    assert_eq!(EditorConfig::from_json_str("{}").unwrap().max_undo, 200);
    assert_eq!(
        EditorConfig::from_json_str(r#"{ "max_undo": 5 }"#)
            .unwrap()
            .max_undo,
        5
    );
}

#[test]
fn editor_keeps_its_config_and_trims_history() {
    let config = EditorConfig::from_json_str(r#"{ "max_undo": 2 }"#).unwrap();
    let doc = Document::new(vec![BlockNode::paragraph("")]);
    let mut editor =
        Editor::with_config(doc, Selection::collapsed(Point::new(vec![0, 0], 0)), config);
    assert_eq!(editor.config().max_undo, 2);

    for ch in ["a", "b", "c"] {
        editor.insert_text(ch).unwrap();
    }
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.doc().children, vec![BlockNode::paragraph("a")]);
}
