//! オペレーター資格情報の検証
//!
//! 署名トークンよりも低保証の、完全一致によるユーザー名・パスワード対。
//! 特権読み取りパス専用で、一般の認可機構に拡張する設計ではない。

use subtle::ConstantTimeEq;

/// オペレーター資格情報（プロセス起動時に設定から構築）
#[derive(Debug, Clone)]
pub struct OperatorCredentials {
    /// オペレーターのユーザー名
    pub username: String,
    /// オペレーターのパスワード
    pub password: String,
}

impl OperatorCredentials {
    /// 提示された資格情報を検証する
    ///
    /// 両フィールドを定数時間で比較し、単一の合否に合成する。
    /// ユーザー名とパスワードのどちらが誤っていたかは結果から
    /// 判別できない。
    ///
    /// # Arguments
    /// * `username` - 提示されたユーザー名
    /// * `password` - 提示されたパスワード
    ///
    /// # Returns
    /// * `true` - 両方一致
    /// * `false` - いずれか（または両方）不一致
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (username_ok & password_ok).into()
    }
}
