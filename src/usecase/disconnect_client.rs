//! UseCase: 接続切断処理
//!
//! ストリームが閉じた接続を登録から外し、参加中だったルームからの
//! 暗黙退室を行う。明示的な退室イベントなしに切断してもメンバー集合に
//! 残留しないための処理。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 切断処理（登録解除、暗黙退室、残メンバーへの通知）
//!
//! ### なぜこのテストが必要か
//! - 切断された接続がルームに残留しないことを保証（メンバー集合のリーク防止）
//! - 退室通知が残りのメンバーに届き、切断した本人には届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中の接続の切断
//! - エッジケース：どのルームにも参加していない接続の切断
//! - 異常系：未登録の接続の切断（二重切断）

use std::sync::Arc;

use crate::domain::{ConnectionId, DepartedRoom, RoomRegistry};

/// 接続切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 接続切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Some(DepartedRoom)` - 暗黙退室したルーム
    /// * `None` - どのルームにも居なかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<DepartedRoom> {
        // 1. 配送チャンネルを先に外す。以降この接続にはイベントが積まれない
        //    （退室通知も残メンバーにだけ届く）
        let _ = self.registry.unregister_connection(connection_id).await;

        // 2. 参加中だったルームからの暗黙退室
        self.registry.leave_room(connection_id).await
    }
}
