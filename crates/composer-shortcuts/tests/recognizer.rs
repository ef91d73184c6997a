mod common;

use common::editor_at;
use composer_core::{BlockNode, BlockType, Node};
use composer_shortcuts::{
    FeatureGate, MAX_MARKER_LEN, RuleTable, ShortcutEngine, ShortcutRule, recognize,
};
use rstest::rstest;

#[rstest]
#[case("-", 1, Some(BlockType::BulletListItem))]
#[case("*", 1, Some(BlockType::BulletListItem))]
#[case(">", 1, Some(BlockType::Quote))]
#[case("1.", 2, Some(BlockType::NumberListItem))]
#[case("1.", 1, None)]
#[case("-x", 2, None)]
#[case("->", 1, Some(BlockType::BulletListItem))]
#[case("2.", 2, None)]
fn prefix_before_cursor_selects_rule(
    #[case] text: &str,
    #[case] offset: usize,
    #[case] expected: Option<BlockType>,
) {
    let engine = ShortcutEngine::standard();
    let editor = editor_at(vec![BlockNode::paragraph(text)], vec![0, 0], offset);

    let found = engine.recognize(&editor, false);

    assert_eq!(found.as_ref().map(|m| m.rule.block_type), expected);
    if let Some(m) = found {
        assert_eq!(m.block_path, vec![0]);
        assert_eq!(m.delete_count, offset);
    }
}

#[test]
fn gate_is_enforced_inside_lookup() {
    let engine = ShortcutEngine::standard();
    let editor = editor_at(vec![BlockNode::paragraph("[]")], vec![0, 0], 2);

    assert!(engine.recognize(&editor, false).is_none());
    let found = engine.recognize(&editor, true).unwrap();
    assert_eq!(found.rule.block_type, BlockType::TodoItem);
    assert_eq!(found.rule.gate, FeatureGate::Tasks);
}

#[test]
fn cursor_must_be_in_a_text_leaf() {
    let engine = ShortcutEngine::standard();
    let editor = editor_at(vec![BlockNode::paragraph("-")], vec![0], 1);
    assert!(engine.recognize(&editor, true).is_none());

    let editor = editor_at(vec![BlockNode::paragraph("-")], vec![3, 0], 1);
    assert!(engine.recognize(&editor, true).is_none());
}

#[test]
fn only_paragraphs_are_transformed() {
    let engine = ShortcutEngine::standard();
    for block_type in [
        BlockType::Quote,
        BlockType::BulletListItem,
        BlockType::NumberListItem,
        BlockType::TodoItem,
    ] {
        let block = BlockNode::new(block_type, vec![Node::text("-")]);
        let editor = editor_at(vec![block], vec![0, 0], 1);
        assert!(engine.recognize(&editor, true).is_none(), "{block_type}");
    }
}

#[test]
fn container_must_be_listed_by_the_rule() {
    let rules = RuleTable::new([
        ShortcutRule::new("-", BlockType::BulletListItem).valid_in([BlockType::Quote])
    ])
    .unwrap();
    let quoted = BlockNode::new(BlockType::Quote, vec![Node::paragraph("-")]);
    let todo = BlockNode::new(BlockType::TodoItem, vec![Node::paragraph("-")]);

    let editor = editor_at(vec![quoted, todo], vec![0, 0, 0], 1);
    assert!(recognize(&rules, editor.doc(), editor.selection(), false).is_some());

    let mut editor = editor;
    editor.set_selection(composer_core::Selection::collapsed(composer_core::Point::new(
        vec![1, 0, 0],
        1,
    )));
    assert!(recognize(&rules, editor.doc(), editor.selection(), false).is_none());
}

#[test]
fn cursor_inside_a_multibyte_char_fails_closed() {
    let engine = ShortcutEngine::standard();
    let editor = editor_at(vec![BlockNode::paragraph("é")], vec![0, 0], 1);
    assert!(engine.recognize(&editor, true).is_none());
}

#[test]
fn marker_window_is_three_characters() {
    assert_eq!(MAX_MARKER_LEN, 3);

    let rules = RuleTable::new([ShortcutRule::new("---", BlockType::Quote)]).unwrap();
    let editor = editor_at(vec![BlockNode::paragraph("---")], vec![0, 0], 3);
    assert!(recognize(&rules, editor.doc(), editor.selection(), false).is_some());
}

#[test]
fn marker_window_counts_characters_not_bytes() {
    let rules = RuleTable::new([
        ShortcutRule::new("«»", BlockType::Quote),
        ShortcutRule::new("ééé", BlockType::BulletListItem),
        ShortcutRule::new("éééé", BlockType::NumberListItem),
    ])
    .unwrap();

    let editor = editor_at(vec![BlockNode::paragraph("«»")], vec![0, 0], 4);
    let found = recognize(&rules, editor.doc(), editor.selection(), false).unwrap();
    assert_eq!(found.rule.block_type, BlockType::Quote);
    assert_eq!(found.delete_count, 2);

    let editor = editor_at(vec![BlockNode::paragraph("ééé")], vec![0, 0], 6);
    let found = recognize(&rules, editor.doc(), editor.selection(), false).unwrap();
    assert_eq!(found.rule.block_type, BlockType::BulletListItem);
    assert_eq!(found.delete_count, 3);

    let editor = editor_at(vec![BlockNode::paragraph("éééé")], vec![0, 0], 8);
    assert!(recognize(&rules, editor.doc(), editor.selection(), false).is_none());
}
