//! User Name Value Object
//!
//! ユーザー名はログインとセッション Cookie の両方に使う識別子。
//! Cookie の値は `user_name:signature` なので、区切り文字 `:` を
//! 含む名前は登録時点で拒否する。
//!
//! ## 設計方針
//! - NFKC 正規化 → 前後空白除去 → 検証
//! - ASCII 英数字と `_ . -` のみ許可
//! - 大文字小文字は区別する（`Alice` と `alice` は別ユーザー）
//!
//! ## 不変条件
//! - 長さ: 1〜32 文字
//! - `:` を含まない（許可文字に含まれないため自動的に保証）

use serde::Serialize;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 32;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid character '{char}' at position {position}. Only A-Z, a-z, 0-9, _, ., - are allowed")]
    InvalidCharacter { char: char, position: usize },
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Normalize and validate raw input
    pub fn parse(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let normalized = normalized.trim();

        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = normalized
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(c)))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        Ok(Self(normalized.to_string()))
    }

    /// Trust a value read back from the users table
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}
