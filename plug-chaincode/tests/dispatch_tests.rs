mod common;

use common::Harness;
use plug_chaincode::{Chaincode, ContractError, Tag};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn invoke_json(cc: &Chaincode, h: &Harness, function: &str, args: &[&str]) -> Value {
    let bytes = cc.invoke(&h.ctx(), function, &strings(args)).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn deployable_chaincodes() {
    let names = |cc: Chaincode| cc.contracts().map(|c| c.name()).collect::<Vec<_>>();
    assert_eq!(
        names(Chaincode::plug()),
        vec!["TagContract", "CategoryContract", "CategoryGroupContract"]
    );
    assert_eq!(names(Chaincode::post()), vec!["PostContract"]);
    assert_eq!(names(Chaincode::topic()), vec!["TopicContract"]);
    assert_eq!(names(Chaincode::userprofile()), vec!["UserProfileContract"]);
    assert_eq!(Chaincode::by_name("topic").unwrap().namespace(), "topic");
    assert!(Chaincode::by_name("userinfo").is_none());
}

#[test]
fn bare_and_qualified_names() {
    let h = Harness::new("alice");
    let cc = Chaincode::plug();

    let created = invoke_json(&cc, &h, "CreateTag", &[r#"{"name":"rust","creatorID":1}"#]);
    assert_eq!(created, json!({"name": "rust", "creatorID": 1, "description": ""}));

    let read = invoke_json(&cc, &h, "TagContract:ReadTag", &["rust"]);
    let tag: Tag = serde_json::from_value(read).unwrap();
    assert_eq!(tag.creator_id, 1);

    assert_eq!(invoke_json(&cc, &h, "TagExists", &["rust"]), json!(true));
    assert_eq!(invoke_json(&cc, &h, "CategoryExists", &["rust"]), json!(false));
}

#[test]
fn functions_without_result_return_no_bytes() {
    let h = Harness::new("alice");
    let cc = Chaincode::post();
    let bytes = cc.invoke(&h.ctx(), "InitLedger", &[]).unwrap();
    assert!(bytes.is_empty());
    let bytes = cc.invoke(&h.ctx(), "PostContract:DeletePost", &strings(&["1"]));
    assert_eq!(
        bytes.unwrap_err().to_string(),
        "the post 1 can only be deleted by its creator"
    );
}

#[test]
fn unknown_functions() {
    let h = Harness::new("alice");
    let cc = Chaincode::plug();

    let err = cc.invoke(&h.ctx(), "CreatePost", &[]).unwrap_err();
    assert!(matches!(err, ContractError::UnknownFunction { .. }));
    assert_eq!(err.to_string(), "function CreatePost not found in plug");

    let err = cc.invoke(&h.ctx(), "PostContract:CreatePost", &[]).unwrap_err();
    assert_eq!(err.to_string(), "function CreatePost not found in PostContract");

    let err = cc.invoke(&h.ctx(), "TagContract:CreateCategory", &[]).unwrap_err();
    assert_eq!(err.to_string(), "function CreateCategory not found in TagContract");
}

#[test]
fn argument_checks() {
    let h = Harness::new("alice");
    let cc = Chaincode::userprofile();
    cc.invoke(&h.ctx(), "CreateUser", &strings(&[r#"{"wallet":"w1"}"#]))
        .unwrap();

    let err = cc.invoke(&h.ctx(), "ReadUser", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid arguments for ReadUser: expected 1 arguments, got 0"
    );

    let err = cc
        .invoke(&h.ctx(), "AssignRole", &strings(&["w1", "admin"]))
        .unwrap_err();
    assert!(matches!(err, ContractError::InvalidArgument { .. }), "{err}");

    let user = invoke_json(&cc, &h, "AssignRole", &["w1", "3"]);
    assert_eq!(user["rolesAssigned"], json!([3]));
}

#[test]
fn emoji_code_must_fit() {
    let h = Harness::new("alice");
    let cc = Chaincode::topic();
    cc.invoke(&h.ctx(), "CreateTopic", &strings(&[r#"{"hash":"t1"}"#]))
        .unwrap();

    let err = cc
        .invoke(&h.ctx(), "AddTopicEmoji", &strings(&["t1", "256"]))
        .unwrap_err();
    assert!(matches!(err, ContractError::InvalidArgument { .. }), "{err}");

    let topic = invoke_json(&cc, &h, "AddTopicEmoji", &["t1", "12"]);
    assert_eq!(topic["emojis"], json!({"12": ["alice"]}));
}
