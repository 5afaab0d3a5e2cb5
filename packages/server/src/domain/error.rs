//! ドメイン層のエラー型

use thiserror::Error;

/// Value Object の生成時に発生するエラー
///
/// トランスポート層で入力を検証する際に使われ、`Malformed` として
/// クライアントに返されます。コアには到達しません。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 空文字列（空白のみを含む）
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// 最大長を超えている
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Broadcaster がメッセージ配送に失敗した際のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// 宛先の接続が登録されていない
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// ペイロードのシリアライズに失敗した
    #[error("failed to encode event: {0}")]
    EncodeFailed(String),

    /// チャンネルへの送信に失敗した
    #[error("failed to push to connection: {0}")]
    PushFailed(String),
}
