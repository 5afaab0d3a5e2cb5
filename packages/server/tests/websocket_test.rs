//! Integration tests for the WebSocket room protocol.

mod common;

use common::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_join_creates_room_and_sends_history() {
    // テスト項目: 最初の join でルームが作られ、空の履歴と joined が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    alice
        .send_json(json!({"type": "join", "username": "alice", "room_id": "r1"}))
        .await;

    // then (期待する結果):
    let history = alice.recv_json().await;
    assert_eq!(history["type"], "history");
    assert_eq!(history["room_id"], "r1");
    assert_eq!(history["messages"], json!([]));
    assert_eq!(history["participants"], json!(["alice"]));

    let joined = alice.recv_json().await;
    assert_eq!(joined["type"], "presence");
    assert_eq!(joined["kind"], "joined");
    assert_eq!(joined["username"], "alice");
    assert_eq!(joined["timestamp"], "3:07 pm");
}

#[tokio::test]
async fn test_message_reaches_room_only() {
    // テスト項目: メッセージは送信者を含む同じルームの全員に届き、他のルームには届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    let mut carol = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined
    carol.join("carol", "r2").await;

    // when (操作):
    bob.send_json(json!({"type": "send_message", "text": "hi <b>all</b>"}))
        .await;

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let message = client.recv_json().await;
        assert_eq!(message["type"], "message");
        assert_eq!(message["author"], "bob");
        assert_eq!(message["text"], "hi <b>all</b>");
        assert_eq!(message["is_system"], false);
    }
    carol.expect_silence().await;
}

#[tokio::test]
async fn test_join_send_leave_scenario() {
    // テスト項目: alice と bob が参加し bob が発言、alice が退出した後のルームの状態
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined
    bob.send_json(json!({"type": "send_message", "text": "hi"})).await;
    alice.recv_json().await;
    bob.recv_json().await;

    // when (操作):
    alice.send_json(json!({"type": "leave"})).await;

    // then (期待する結果):
    let left = bob.recv_json().await;
    assert_eq!(left["type"], "presence");
    assert_eq!(left["kind"], "left");
    assert_eq!(left["username"], "alice");
    assert_eq!(left["participants"], json!(["bob"]));

    let (status, snapshot) = server.get_json("/api/rooms/r1").await;
    assert_eq!(status, 200);
    assert_eq!(snapshot["participants"], json!(["bob"]));
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["messages"][0]["author"], "bob");
    assert_eq!(snapshot["messages"][0]["text"], "hi");
}

#[tokio::test]
async fn test_last_leave_removes_room() {
    // テスト項目: 最後の参加者が抜けるとルームが一覧から消える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut solo = server.connect().await;
    solo.join("x", "solo").await;

    // when (操作):
    solo.send_json(json!({"type": "leave"})).await;
    solo.send_json(json!({"type": "list_rooms"})).await;

    // then (期待する結果):
    let rooms = solo.recv_json().await;
    assert_eq!(rooms["type"], "rooms");
    assert_eq!(rooms["rooms"], json!([]));

    let (status, _) = server.get_json("/api/rooms/solo").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_send_before_join_is_dropped() {
    // テスト項目: 参加前の送信は黙って捨てられ、ルームも作られない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    client
        .send_json(json!({"type": "send_message", "text": "anyone?"}))
        .await;

    // then (期待する結果):
    client.expect_silence().await;
    let (_, rooms) = server.get_json("/api/rooms").await;
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn test_disconnect_is_treated_as_leave() {
    // テスト項目: 切断は leave と同じく残った参加者に left として通知される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    let left = bob.recv_json().await;
    assert_eq!(left["kind"], "left");
    assert_eq!(left["username"], "alice");
    assert_eq!(left["participants"], json!(["bob"]));
}

#[tokio::test]
async fn test_malformed_input_is_rejected() {
    // テスト項目: 不正な JSON と空のユーザー名は呼び出し元にだけ error が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    bob.join("bob", "r1").await;

    // when (操作):
    alice.send_raw("not json").await;
    let invalid_json = alice.recv_json().await;
    alice
        .send_json(json!({"type": "join", "username": "   ", "room_id": "r1"}))
        .await;
    let empty_username = alice.recv_json().await;

    // then (期待する結果):
    assert_eq!(invalid_json["type"], "error");
    assert_eq!(invalid_json["code"], "malformed");
    assert_eq!(empty_username["type"], "error");
    assert_eq!(empty_username["code"], "malformed");
    bob.expect_silence().await;

    let (_, snapshot) = server.get_json("/api/rooms/r1").await;
    assert_eq!(snapshot["participants"], json!(["bob"]));
}

#[tokio::test]
async fn test_join_other_room_leaves_previous() {
    // テスト項目: 別のルームへの join で旧ルームから抜け、旧ルームに left が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined

    // when (操作):
    let history = bob.join("bob", "r2").await;

    // then (期待する結果):
    assert_eq!(history["room_id"], "r2");
    let left = alice.recv_json().await;
    assert_eq!(left["kind"], "left");
    assert_eq!(left["room_id"], "r1");
    assert_eq!(left["username"], "bob");

    let (_, r1) = server.get_json("/api/rooms/r1").await;
    assert_eq!(r1["participants"], json!(["alice"]));
    let (_, r2) = server.get_json("/api/rooms/r2").await;
    assert_eq!(r2["participants"], json!(["bob"]));
}

#[tokio::test]
async fn test_typing_excludes_sender() {
    // テスト項目: typing は送信者以外の参加者にだけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined

    // when (操作):
    alice
        .send_json(json!({"type": "typing", "is_typing": true}))
        .await;

    // then (期待する結果):
    let typing = bob.recv_json().await;
    assert_eq!(typing["type"], "typing");
    assert_eq!(typing["username"], "alice");
    assert_eq!(typing["is_typing"], true);
    alice.expect_silence().await;
}

#[tokio::test]
async fn test_concurrent_joins_are_both_visible() {
    // テスト項目: 同時に参加した 2 人が、後から参加した人の history に両方含まれる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;

    // when (操作):
    tokio::join!(alice.join("alice", "r1"), bob.join("bob", "r1"));
    let mut carol = server.connect().await;
    let history = carol.join("carol", "r1").await;

    // then (期待する結果):
    let mut participants: Vec<String> = history["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|name| name.as_str().unwrap().to_string())
        .collect();
    participants.sort();
    assert_eq!(participants, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_message_order_is_preserved() {
    // テスト項目: 同じルームのメッセージは全員に送信順で届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.join("alice", "r1").await;
    bob.join("bob", "r1").await;
    alice.recv_json().await; // bob joined

    // when (操作):
    for text in ["one", "two", "three"] {
        alice
            .send_json(json!({"type": "send_message", "text": text}))
            .await;
    }

    // then (期待する結果):
    for expected in ["one", "two", "three"] {
        assert_eq!(bob.recv_json().await["text"], expected);
    }
}
