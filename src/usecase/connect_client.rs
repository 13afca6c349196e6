//! UseCase: 接続受け入れ処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録処理（重複チェック、配送チャンネルの登録）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：同時に開いたストリーム間で接続 ID の
//!   一意性を守る
//! - 登録された配送チャンネルにイベントが届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：使用中の接続 ID での接続試行

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    common::time::get_jst_timestamp,
    domain::{ConnectionId, RegistryError, RoomEvent, RoomRegistry, Timestamp},
};

use super::error::ConnectError;

/// 接続受け入れのユースケース
pub struct ConnectClientUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 接続受け入れを実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - ストリームに束縛する接続 ID（Domain Model）
    /// * `sender` - イベント配送チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録成功
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<RoomEvent>,
    ) -> Result<(), ConnectError> {
        let connected_at = Timestamp::new(get_jst_timestamp());
        self.registry
            .register_connection(connection_id, sender, connected_at)
            .await
            .map_err(|e| match e {
                RegistryError::DuplicateConnection(id) => ConnectError::DuplicateConnectionId(id),
                RegistryError::ConnectionNotFound(id) => ConnectError::DuplicateConnectionId(id),
            })
    }
}
