//! メッセージ送信（通知）の実装
//!
//! このモジュールは `MessagePusher` trait の具体的な実装を提供します。
//!
//! - `websocket`: 接続ごとの WebSocket 送信チャンネルを使った実装
//!
//! 送信先はこのプロセス内の接続に限られます。

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
