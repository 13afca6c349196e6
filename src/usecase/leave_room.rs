//! UseCase: ルーム退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 明示的な退室処理（退室通知、メンバー削除、空ルームの破棄）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：退室通知は退室者本人を含む退室前の
//!   メンバー全員に届く
//! - 逆引きインデックスから正しく削除されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの退室と通知
//! - エッジケース：最後のメンバーの退室（ルーム破棄）
//! - 異常系：どのルームにも居ない接続の退室試行

use std::sync::Arc;

use crate::domain::{ConnectionId, DepartedRoom, RoomRegistry};

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退室を実行
    ///
    /// 退室先は逆引きインデックスが決める（クライアントが申告した
    /// ルーム ID は参考情報でしかない）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退室する接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Some(DepartedRoom)` - 退室したルームと通知先
    /// * `None` - どのルームにも居なかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<DepartedRoom> {
        self.registry.leave_room(connection_id).await
    }
}
