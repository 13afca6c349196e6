//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加処理（遅延作成、スナップショット配送、別ルームからの暗黙退室）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：参加者は現在のノートとメンバー一覧を受け取る
//! - 1 接続 1 ルームの不変条件を保証（2 つ目のルームへの参加は
//!   前のルームからの退室を伴う）
//!
//! ### どのような状況を想定しているか
//! - 正常系：空ルーム / ノート済みルームへの参加
//! - エッジケース：同じルームへの再参加、別ルームへの乗り換え

use std::sync::Arc;

use crate::{
    common::time::get_jst_timestamp,
    domain::{ConnectionId, RoomId, RoomRegistry, Timestamp},
};

/// ルーム参加の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 参加者に配送されたノート内容（未記入なら None）
    pub note: Option<String>,
    /// 参加後のメンバー一覧（ソート済み、参加者本人を含む）
    pub users: Vec<String>,
    /// 乗り換えで退室したルーム（あれば）
    pub departed_room: Option<RoomId>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（リレー状態へのアクセスの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加先のルーム ID（Domain Model）
    /// * `connection_id` - 参加する接続の ID（Domain Model）
    ///
    /// # Returns
    ///
    /// 参加者に配送された内容と、乗り換え元ルーム
    pub async fn execute(&self, room_id: RoomId, connection_id: ConnectionId) -> JoinOutcome {
        // 1. 別ルームに参加中なら、そのルームからの退室を先に確定させる
        //    （退室通知の配送は Registry が行う）
        let departed_room = match self.registry.room_of(&connection_id).await {
            Some(prev) if prev != room_id => self
                .registry
                .leave_room(&connection_id)
                .await
                .map(|d| d.room_id),
            _ => None,
        };

        // 2. 参加（ルームの遅延作成とスナップショット配送を含む）
        let joined_at = Timestamp::new(get_jst_timestamp());
        let joined = self
            .registry
            .join_room(room_id, connection_id, joined_at)
            .await;

        JoinOutcome {
            note: joined.note,
            users: joined.users,
            departed_room,
        }
    }
}
