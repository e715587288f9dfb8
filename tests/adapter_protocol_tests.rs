//! Wire protocol tests - parsing, serialization, and replica hashing

use wordgrid::adapter::{
    create_error, create_hello, create_welcome, parse_message, state_hash, AssignedRole,
    CommandOp, ErrorCode, ParsedMessage, StateHash,
};
use wordgrid::core::{Dictionary, Game};
use wordgrid::engine::OpError;

fn game() -> Game {
    Game::new(Dictionary::from_text("cat\ndog\n"), 4242)
}

#[test]
fn hello_roundtrip() {
    let hello = create_hello(1, "test-client", "1.0.0");
    let json = serde_json::to_string(&hello).unwrap();

    match parse_message(&json).unwrap() {
        ParsedMessage::Hello(parsed) => {
            assert_eq!(parsed.client.name, "test-client");
            assert_eq!(parsed.protocol_version, "1.0.0");
            assert!(parsed.requested.stream_observations);
        }
        other => panic!("expected hello, got {:?}", other),
    }
}

#[test]
fn command_ops_roundtrip() {
    let ops = [
        CommandOp::Place {
            letter: 'q',
            x: 3,
            y: 4,
        },
        CommandOp::Remove { x: 3, y: 4 },
        CommandOp::PickTwist { index: 2 },
        CommandOp::Deal,
    ];

    for op in ops {
        let json = format!(
            r#"{{"type":"command","seq":5,"ts":1,"op":{}}}"#,
            serde_json::to_string(&op).unwrap()
        );
        match parse_message(&json).unwrap() {
            ParsedMessage::Command(parsed) => assert_eq!(parsed.op, op),
            other => panic!("expected command, got {:?}", other),
        }
    }
}

#[test]
fn wire_ops_use_camel_case_tags() {
    let json = serde_json::to_string(&CommandOp::PickTwist { index: 0 }).unwrap();
    assert!(json.contains(r#""op":"pickTwist""#));
}

#[test]
fn unknown_message_type_is_soft_error() {
    match parse_message(r#"{"type":"gossip","seq":11}"#).unwrap() {
        ParsedMessage::Unknown(unknown) => assert_eq!(unknown.seq, 11),
        other => panic!("expected unknown, got {:?}", other),
    }
}

#[test]
fn welcome_assigns_role() {
    let welcome = create_welcome(3, "1.0.0", 17, AssignedRole::Observer);
    let json = serde_json::to_string(&welcome).unwrap();
    assert!(json.contains(r#""role":"observer""#));
    assert!(json.contains(r#""game_id":"wordgrid""#));
}

#[test]
fn error_codes_are_stable_strings() {
    let error = create_error(9, ErrorCode::NotController, "nope");
    let json = serde_json::to_string(&error).unwrap();
    assert!(json.contains(r#""code":"not_controller""#));

    for (op_error, expected) in [
        (OpError::OutOfBounds, ErrorCode::InvalidPlace),
        (OpError::CellOccupied, ErrorCode::InvalidPlace),
        (OpError::GameOver, ErrorCode::GameOver),
        (OpError::TwistPending, ErrorCode::TwistPending),
        (OpError::BadTwistIndex, ErrorCode::InvalidTwist),
    ] {
        assert_eq!(ErrorCode::from(op_error), expected);
    }
}

#[test]
fn state_hash_is_hex_on_the_wire() {
    let json = serde_json::to_string(&StateHash(0xdeadbeef)).unwrap();
    assert_eq!(json, r#""00000000deadbeef""#);
    let back: StateHash = serde_json::from_str(&json).unwrap();
    assert_eq!(back, StateHash(0xdeadbeef));
}

#[test]
fn replicas_share_a_state_hash() {
    let mut server = game();
    let mut client = game();

    for (letter, x, y) in [('c', 0, 0), ('a', 1, 0), ('t', 2, 0)] {
        server.place(letter, x, y);
        client.place(letter, x, y);
    }

    assert_eq!(
        state_hash(&server.snapshot()),
        state_hash(&client.snapshot())
    );
}

#[test]
fn state_hash_tracks_every_mutation() {
    let mut g = game();
    let mut seen = vec![state_hash(&g.snapshot())];

    g.place('c', 0, 0);
    seen.push(state_hash(&g.snapshot()));
    g.place('a', 1, 0);
    seen.push(state_hash(&g.snapshot()));
    g.place('t', 2, 0);
    seen.push(state_hash(&g.snapshot()));
    g.flush_score();
    seen.push(state_hash(&g.snapshot()));

    for (i, a) in seen.iter().enumerate() {
        for b in seen.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn diverged_replicas_hash_differently() {
    let mut server = game();
    let mut client = game();

    server.place('c', 0, 0);
    client.place('c', 1, 0);

    assert_ne!(
        state_hash(&server.snapshot()),
        state_hash(&client.snapshot())
    );
}
