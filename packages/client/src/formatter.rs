//! Message formatting utilities for client display.

use hanare_shared::time::{timestamp_to_jst_clock_time, timestamp_to_jst_rfc3339};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner printed right after connecting
    pub fn format_welcome(url: &str, connected_at: i64) -> String {
        format!(
            "\n{RULE}\nConnected to {} at {}\nType /help for commands. Press Ctrl+C to exit.\n{RULE}\n",
            url,
            timestamp_to_jst_rfc3339(connected_at)
        )
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /create        create a new room (you become its admin)",
            "  /join <code>   join a room by its 6-character code",
            "  /leave         leave the current room",
            "  /close         close the current room (admin only)",
            "  /help          show this help",
            "  /quit          exit",
            "Any other line is sent as a message to the current room.",
            "",
        ]
        .join("\n")
    }

    pub fn format_room_created(room_code: &str, username: &str) -> String {
        format!(
            "\n{RULE}\nRoom created: {}\nShare this code so others can join.\nYou are '{}' (admin)\n{RULE}\n",
            room_code, username
        )
    }

    pub fn format_room_joined(room_code: &str, username: &str) -> String {
        format!(
            "\n{RULE}\nJoined room {}\nYou are '{}'\n{RULE}\n",
            room_code, username
        )
    }

    pub fn format_user_joined(username: &str) -> String {
        format!("\n+ {} joined\n", username)
    }

    pub fn format_user_left(username: &str) -> String {
        format!("\n- {} left\n", username)
    }

    /// Format a chat message
    ///
    /// Admin messages are marked with `★`, the user's own messages with `(me)`.
    pub fn format_new_message(
        username: &str,
        message: &str,
        is_admin: bool,
        is_me: bool,
        timestamp: i64,
    ) -> String {
        let admin_mark = if is_admin { "★" } else { "" };
        let me_suffix = if is_me { " (me)" } else { "" };
        format!(
            "\n[{}] {}@{}{}: {}\n",
            timestamp_to_jst_clock_time(timestamp),
            admin_mark,
            username,
            me_suffix,
            message
        )
    }

    pub fn format_room_closed() -> String {
        "\n× The room was closed by its admin\n".to_string()
    }

    /// Informational line produced by the client itself (errors, local validation)
    pub fn format_notice(text: &str) -> String {
        format!("\n! {}\n", text)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_room_created() {
        // テスト項目: ルーム作成時にコードと自分の表示名が表示される
        // given (前提条件):
        let room_code = "X7K2QP";
        let username = "Red-Lion-Apple";

        // when (操作):
        let result = MessageFormatter::format_room_created(room_code, username);

        // then (期待する結果):
        assert!(result.contains("Room created: X7K2QP"));
        assert!(result.contains("'Red-Lion-Apple' (admin)"));
    }

    #[test]
    fn test_format_new_message_from_admin() {
        // テスト項目: 管理者のメッセージには印が付き、JST の時刻が表示される
        // given (前提条件):
        // 2023-01-01T00:00:00+09:00
        let timestamp = 1672498800000;

        // when (操作):
        let result =
            MessageFormatter::format_new_message("Red-Lion-Apple", "hi", true, false, timestamp);

        // then (期待する結果):
        assert_eq!(result, "\n[00:00:00] ★@Red-Lion-Apple: hi\n");
    }

    #[test]
    fn test_format_new_message_from_me() {
        // テスト項目: 自分のメッセージには (me) が付く
        // given (前提条件):
        let timestamp = 1672498800000;

        // when (操作):
        let result =
            MessageFormatter::format_new_message("Blue-Bear-Grape", "yo", false, true, timestamp);

        // then (期待する結果):
        assert!(result.contains("@Blue-Bear-Grape (me): yo"));
        assert!(!result.contains('★'));
    }

    #[test]
    fn test_format_welcome() {
        // テスト項目: 接続時のバナーに URL と接続時刻が表示される
        // given (前提条件):
        let url = "ws://127.0.0.1:3000/ws";

        // when (操作):
        let result = MessageFormatter::format_welcome(url, 1672498800000);

        // then (期待する結果):
        assert!(result.contains("Connected to ws://127.0.0.1:3000/ws"));
        assert!(result.contains("2023-01-01T00:00:00+09:00"));
    }

    #[test]
    fn test_format_help_lists_commands() {
        // テスト項目: ヘルプに全てのコマンドが含まれる
        // given (前提条件):
        let commands = ["/create", "/join", "/leave", "/close", "/help", "/quit"];

        // when (操作):
        let result = MessageFormatter::format_help();

        // then (期待する結果):
        for command in commands {
            assert!(result.contains(command), "missing {command}");
        }
    }
}
