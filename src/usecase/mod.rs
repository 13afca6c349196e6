//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod notify_typing;
pub mod update_note;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::ConnectError;
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use update_note::UpdateNoteUseCase;
