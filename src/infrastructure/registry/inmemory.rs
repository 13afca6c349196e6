//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリストレージとして使用します。プロセスメモリのみで、
//! 永続化は行いません（プロセス終了とともに全ルームが消えます）。
//!
//! ## ロック構成
//!
//! - `rooms` の外側ロックはハンドル（`Arc<Mutex<RoomSlot>>`）の取得・挿入・
//!   削除にのみ使い、ルーム状態の変更は各ルームのロックで直列化します。
//!   異なるルームの操作は互いに競合しません。
//! - ルームの変更とブロードキャストのキュー投入は同じルームロックの中で
//!   行います。これにより 1 ルーム内のイベント順序は全メンバーで一致し、
//!   read-modify-broadcast の途中に別イベントが割り込むことはありません。
//! - ロック順序は rooms → room → connections の一方向のみ。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{
        ConnectionId, DepartedRoom, JoinedRoom, Member, NoteContent, RegistryError, Room,
        RoomEvent, RoomId, RoomRegistry, Timestamp,
    },
    ui::state::ClientInfo,
};

/// ルーム状態と破棄フラグ。
///
/// evicted は、破棄前に取得された古いハンドル経由の変更が、マップから
/// 削除済みのルームを蘇らせてしまうのを防ぐための墓標です。
struct RoomSlot {
    room: Room,
    evicted: bool,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    /// 接続中のクライアント（配送チャンネルを含む）
    connections: Mutex<HashMap<String, ClientInfo>>,
    /// ルーム ID → ルーム状態
    rooms: Mutex<HashMap<RoomId, Arc<Mutex<RoomSlot>>>>,
    /// 接続 → 参加中ルームの逆引き（切断時の暗黙退室に使う）
    membership: Mutex<HashMap<ConnectionId, RoomId>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            rooms: Mutex::new(HashMap::new()),
            membership: Mutex::new(HashMap::new()),
        }
    }

    /// 登録済みの各宛先へイベントをキューに積む。
    /// 未登録の宛先は黙ってスキップする（切断直後の競合は正常系）。
    async fn deliver(&self, targets: &[ConnectionId], event: &RoomEvent) {
        let clients = self.connections.lock().await;
        for target in targets {
            if let Some(info) = clients.get(target.as_str())
                && info.sender.send(event.clone()).is_err()
            {
                tracing::warn!("Failed to queue event for connection '{}'", target);
            }
        }
    }

    async fn room_handle(&self, room_id: &RoomId) -> Option<Arc<Mutex<RoomSlot>>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn room_handle_or_create(
        &self,
        room_id: &RoomId,
        created_at: Timestamp,
    ) -> Arc<Mutex<RoomSlot>> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                Arc::new(Mutex::new(RoomSlot {
                    room: Room::new(room_id.clone(), created_at),
                    evicted: false,
                }))
            })
            .clone()
    }

    /// メンバーが 0 になったルームをマップから外す。
    /// ロック内で空であることを確認し直してから破棄する。
    async fn evict_if_empty(&self, room_id: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(handle) = rooms.get(room_id).cloned() {
            let mut slot = handle.lock().await;
            if slot.room.is_empty() {
                slot.evicted = true;
                drop(slot);
                rooms.remove(room_id);
                tracing::debug!("Room '{}' evicted (no members left)", room_id);
            }
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<RoomEvent>,
        connected_at: Timestamp,
    ) -> Result<(), RegistryError> {
        let mut clients = self.connections.lock().await;
        if clients.contains_key(connection_id.as_str()) {
            return Err(RegistryError::DuplicateConnection(
                connection_id.into_string(),
            ));
        }
        clients.insert(
            connection_id.into_string(),
            ClientInfo {
                sender,
                connected_at,
            },
        );
        Ok(())
    }

    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<(), RegistryError> {
        let mut clients = self.connections.lock().await;
        clients
            .remove(connection_id.as_str())
            .map(|_| ())
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.as_str().to_string()))
    }

    async fn get_client_info(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<ClientInfo, RegistryError> {
        let clients = self.connections.lock().await;
        clients
            .get(connection_id.as_str())
            .cloned()
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.as_str().to_string()))
    }

    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> JoinedRoom {
        loop {
            let handle = self.room_handle_or_create(&room_id, joined_at).await;
            let mut slot = handle.lock().await;
            if slot.evicted {
                // 破棄と競合した古いハンドル。マップから取り直す。
                continue;
            }

            {
                let mut membership = self.membership.lock().await;
                membership.insert(connection_id.clone(), room_id.clone());
            }

            slot.room
                .add_member(Member::new(connection_id.clone(), joined_at));

            let note = slot.room.current_note().map(|n| n.as_str().to_string());
            let mut users: Vec<String> = slot
                .room
                .members
                .iter()
                .map(|m| m.id.as_str().to_string())
                .collect();
            users.sort();

            // 配送はルームロック内で行い、ルーム単位の順序を保つ
            let joiner = std::slice::from_ref(&connection_id);
            if let Some(content) = note.clone() {
                self.deliver(joiner, &RoomEvent::NoteUpdated { content }).await;
            }
            self.deliver(
                joiner,
                &RoomEvent::RoomUsers {
                    users: users.clone(),
                },
            )
            .await;
            self.deliver(
                &slot.room.member_ids(),
                &RoomEvent::MemberJoined {
                    connection_id: connection_id.as_str().to_string(),
                },
            )
            .await;

            return JoinedRoom { note, users };
        }
    }

    async fn leave_room(&self, connection_id: &ConnectionId) -> Option<DepartedRoom> {
        let room_id = { self.membership.lock().await.remove(connection_id) }?;
        let handle = self.room_handle(&room_id).await?;

        let (members_before, now_empty) = {
            let mut slot = handle.lock().await;
            if slot.evicted {
                // 破棄済みルームにメンバーは居ない
                return None;
            }
            let members_before = slot.room.member_ids();
            slot.room.remove_member(connection_id);
            self.deliver(
                &members_before,
                &RoomEvent::MemberLeft {
                    connection_id: connection_id.as_str().to_string(),
                },
            )
            .await;
            (members_before, slot.room.is_empty())
        };

        if now_empty {
            self.evict_if_empty(&room_id).await;
        }

        Some(DepartedRoom {
            room_id,
            members_before: members_before
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        })
    }

    async fn set_note(
        &self,
        room_id: RoomId,
        content: NoteContent,
        sender: &ConnectionId,
        written_at: Timestamp,
    ) -> Vec<String> {
        loop {
            let handle = self.room_handle_or_create(&room_id, written_at).await;
            let mut slot = handle.lock().await;
            if slot.evicted {
                continue;
            }

            let broadcast = content.as_str().to_string();
            slot.room.set_note(content);

            let targets: Vec<ConnectionId> = slot
                .room
                .member_ids()
                .into_iter()
                .filter(|id| id != sender)
                .collect();
            self.deliver(&targets, &RoomEvent::NoteUpdated { content: broadcast })
                .await;

            return targets
                .iter()
                .map(|id| id.as_str().to_string())
                .collect();
        }
    }

    async fn notify_typing(&self, room_id: &RoomId, sender: &ConnectionId) -> Vec<String> {
        let Some(handle) = self.room_handle(room_id).await else {
            return Vec::new();
        };
        let slot = handle.lock().await;
        if slot.evicted {
            return Vec::new();
        }

        let targets: Vec<ConnectionId> = slot
            .room
            .member_ids()
            .into_iter()
            .filter(|id| id != sender)
            .collect();
        self.deliver(
            &targets,
            &RoomEvent::MemberTyping {
                connection_id: sender.as_str().to_string(),
            },
        )
        .await;

        targets.iter().map(|id| id.as_str().to_string()).collect()
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let membership = self.membership.lock().await;
        membership.get(connection_id).cloned()
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let handle = self.room_handle(room_id).await?;
        let slot = handle.lock().await;
        if slot.evicted {
            return None;
        }
        Some(slot.room.clone())
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let handles: Vec<Arc<Mutex<RoomSlot>>> = {
            let rooms = self.rooms.lock().await;
            rooms.values().cloned().collect()
        };
        let mut snapshot = Vec::with_capacity(handles.len());
        for handle in handles {
            let slot = handle.lock().await;
            if !slot.evicted {
                snapshot.push(slot.room.clone());
            }
        }
        snapshot
    }

    async fn count_connections(&self) -> usize {
        let clients = self.connections.lock().await;
        clients.len()
    }
}
