//! UseCase 層のエラー定義

use thiserror::Error;

/// 接続受け入れ時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID のストリームが既に開いている
    #[error("connection id '{0}' is already in use")]
    DuplicateConnectionId(String),
}
