//! Value Objects
//!
//! 入力値はトランスポート層でこれらの型に変換され、検証済みの値だけが
//! コア（`SessionRegistry` / `RoomDirectory`）に渡されます。

use std::fmt;

use hiroba_shared::time::{format_display_time, timestamp_to_rfc3339};
use uuid::Uuid;

use super::error::ValueObjectError;

const USERNAME_MAX_CHARS: usize = 50;
const ROOM_ID_MAX_CHARS: usize = 100;
const MESSAGE_TEXT_MAX_CHARS: usize = 2000;

fn validate_text(
    field: &'static str,
    value: String,
    max: usize,
    trim: bool,
) -> Result<String, ValueObjectError> {
    let value = if trim {
        value.trim().to_string()
    } else {
        value
    };
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty { field });
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(ValueObjectError::TooLong { field, max, actual });
    }
    Ok(value)
}

/// トランスポート層が接続ごとに割り当てる識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の識別子から ConnectionId を作成
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty {
                field: "connection_id",
            });
        }
        Ok(Self(value))
    }

    /// 新しい ConnectionId を払い出す（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名。一意である必要はない
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// 前後の空白を取り除き、空でないことと最大長を検証する
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("username", value, USERNAME_MAX_CHARS, true).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームの識別子。存在しないルームへの join で遅延生成される
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("room_id", value, ROOM_ID_MAX_CHARS, true).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文
///
/// 本文は加工せずに保持する（エスケープはクライアントの責務）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("text", value, MESSAGE_TEXT_MAX_CHARS, false).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ ID
///
/// 壁時計のミリ秒は同一ミリ秒内の送信で衝突するため使わず、UUID v4 を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// チャット表示用の時刻（例: `3:07 pm`）
    pub fn to_display(&self, offset_minutes: i32) -> String {
        format_display_time(self.0, offset_minutes)
    }

    /// HTTP API 用の RFC 3339 文字列
    pub fn to_rfc3339(&self, offset_minutes: i32) -> String {
        timestamp_to_rfc3339(self.0, offset_minutes)
    }
}
