//! UseCase: ノート更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateNoteUseCase::execute() メソッド
//! - ノート上書き処理（last-write-wins、送信者除外ブロードキャスト）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：送信者以外に更新がブロードキャストされる
//!   （送信者へのエコーなし、ACK なし）
//! - 比較もマージも行わない無条件上書きであることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：更新のブロードキャスト
//! - エッジケース：送信者のみのルーム（ブロードキャスト対象なし）、空文字の更新

use std::sync::Arc;

use crate::{
    common::time::get_jst_timestamp,
    domain::{ConnectionId, NoteContent, RoomId, RoomRegistry, Timestamp},
};

/// ノート更新のユースケース
pub struct UpdateNoteUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl UpdateNoteUseCase {
    /// 新しい UpdateNoteUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ノート更新を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（Domain Model）
    /// * `sender_id` - 更新を送った接続の ID（Domain Model）
    /// * `content` - 新しいノート内容（空文字を含め任意の値）
    ///
    /// # Returns
    ///
    /// ブロードキャスト先のクライアント ID リスト（送信者を除く）
    pub async fn execute(
        &self,
        room_id: RoomId,
        sender_id: &ConnectionId,
        content: NoteContent,
    ) -> Vec<String> {
        let written_at = Timestamp::new(get_jst_timestamp());
        self.registry
            .set_note(room_id, content, sender_id, written_at)
            .await
    }
}
