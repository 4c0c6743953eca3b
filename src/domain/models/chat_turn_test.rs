use anyhow::Result;

use super::ChatHistory;
use super::ChatTurn;
use super::Role;

#[test]
fn it_executes_new() {
    let turn = ChatTurn::user("Hi there!");
    assert_eq!(turn.role(), Role::User);
    assert_eq!(turn.role().label(), "You");
    assert_eq!(turn.content(), "Hi there!");

    let turn = ChatTurn::assistant("Hello!");
    assert_eq!(turn.role(), Role::Assistant);
    assert_eq!(turn.role().label(), "Assistant");
    assert_eq!(turn.role().to_string(), "assistant");
}

#[test]
fn it_appends_in_order() {
    let mut history = ChatHistory::default();
    history.push(ChatTurn::user("first"));
    history.push(ChatTurn::assistant("second"));
    history.push(ChatTurn::user("third"));

    let contents = history
        .turns()
        .iter()
        .map(|turn| return turn.content())
        .collect::<Vec<_>>();

    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(history.len(), 3);
}

#[test]
fn it_clears_to_empty() {
    let mut history = ChatHistory::default();
    history.push(ChatTurn::user("first"));
    history.push(ChatTurn::assistant("second"));
    history.clear();

    assert!(history.is_empty());
    assert_eq!(history.len(), 0);
}

#[test]
fn it_serializes_to_json() -> Result<()> {
    let mut history = ChatHistory::default();
    assert_eq!(history.to_json()?, "[]");

    history.push(ChatTurn::user("What is X?"));
    history.push(ChatTurn::assistant("X is Y"));

    insta::assert_snapshot!(history.to_json()?, @r###"[{"role":"user","content":"What is X?"},{"role":"assistant","content":"X is Y"}]"###);

    return Ok(());
}

#[test]
fn it_deserializes_turns() -> Result<()> {
    let turn: ChatTurn = serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#)?;
    assert_eq!(turn, ChatTurn::assistant("ok"));

    return Ok(());
}
