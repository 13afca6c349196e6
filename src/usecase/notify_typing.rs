//! UseCase: タイピング通知処理
//!
//! ステートレスな中継。サーバー側にタイマーも重複排除もなく、
//! 「タイピング終了」イベントも存在しない。表示側の消し込みは
//! クライアントの責務。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId, RoomRegistry};

/// タイピング通知のユースケース
pub struct NotifyTypingUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl NotifyTypingUseCase {
    /// 新しい NotifyTypingUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// タイピング通知を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（Domain Model）
    /// * `sender_id` - 入力中の接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// 通知先のクライアント ID リスト（送信者を除く）
    pub async fn execute(&self, room_id: &RoomId, sender_id: &ConnectionId) -> Vec<String> {
        self.registry.notify_typing(room_id, sender_id).await
    }
}
