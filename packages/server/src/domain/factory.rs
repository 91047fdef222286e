//! ルームコード・表示名の生成
//!
//! どちらも乱数生成器を引数で受け取るため、テストではシード付きの RNG を渡せます。

use rand::Rng;

use super::value_object::{DisplayName, ROOM_CODE_ALPHABET, ROOM_CODE_LENGTH, RoomCode};

const COLORS: &[&str] = &["Red", "Blue", "Green", "Yellow", "Purple"];
const ANIMALS: &[&str] = &["Lion", "Tiger", "Bear", "Wolf", "Eagle"];
const FRUITS: &[&str] = &["Apple", "Banana", "Orange", "Grape", "Mango"];

const DISPLAY_NAME_SEPARATOR: &str = "-";

/// RoomCode Factory
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    /// 衝突しないルームコードを生成
    ///
    /// `is_taken` が true を返す間、6 文字全体を引き直します。
    /// 呼び出し側は、同じロックを保持したまま生成したコードを登録する必要があります。
    pub fn generate<R, F>(rng: &mut R, is_taken: F) -> RoomCode
    where
        R: Rng + ?Sized,
        F: Fn(&RoomCode) -> bool,
    {
        loop {
            let code = Self::draw(rng);
            if !is_taken(&code) {
                return code;
            }
        }
    }

    fn draw<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
        let code: String = (0..ROOM_CODE_LENGTH)
            .map(|_| ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())] as char)
            .collect();
        RoomCode::from_generated(code)
    }
}

/// DisplayName Factory
pub struct DisplayNameFactory;

impl DisplayNameFactory {
    /// 色・動物・果物を 1 つずつ選んで `-` で連結した表示名を生成
    ///
    /// 一意性は保証しません（同じ名前が複数の接続に付くこともあります）。
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> DisplayName {
        let name = [COLORS, ANIMALS, FRUITS]
            .iter()
            .map(|parts| parts[rng.random_range(0..parts.len())])
            .collect::<Vec<_>>()
            .join(DISPLAY_NAME_SEPARATOR);
        DisplayName::from_generated(name)
    }
}
