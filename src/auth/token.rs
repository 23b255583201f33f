//! 署名付きケイパビリティトークンの発行・検証
//!
//! トークンはランダムなペイロード部と、共有シークレットによる
//! HMAC-SHA256署名をURL-safe Base64化して先頭8文字に切り詰めた
//! 署名部を連結した文字列。サーバー側の状態を一切持たない
//! （stateless proof-of-possession）。

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// 署名部の文字数。
///
/// Base64の8文字 ≒ 48ビットのエントロピーしかなく、意図的に弱い
/// レガシー互換の方式である。暗黙にハードコードせず、ここで明示的な
/// パラメーターとして扱う。
pub const SIGNATURE_CHARS: usize = 8;

/// トークン全体の最小文字数（構造チェック）
pub const MIN_TOKEN_CHARS: usize = 16;

/// 発行時のペイロード部の文字数
const PAYLOAD_CHARS: usize = 24;

/// トークンを検証する
///
/// # Arguments
/// * `token` - 提示されたトークン（不透明な文字列として扱う）
/// * `secret` - 共有シークレット
///
/// # Returns
/// * `true` - 構造チェックと署名照合の両方に合格
/// * `false` - それ以外すべて。不正な入力でもパニックしない
pub fn validate(token: &str, secret: &[u8]) -> bool {
    validate_with_min_length(token, secret, MIN_TOKEN_CHARS)
}

/// 最小長を指定してトークンを検証する
///
/// # Arguments
/// * `token` - 提示されたトークン
/// * `secret` - 共有シークレット
/// * `min_length` - トークン全体の最小文字数
///
/// # Returns
/// * `true` - 検証成功
/// * `false` - 検証失敗（構造エラーか署名不一致かは区別しない）
pub fn validate_with_min_length(token: &str, secret: &[u8], min_length: usize) -> bool {
    if token.chars().count() < min_length {
        return false;
    }

    // 末尾SIGNATURE_CHARS文字が提示署名、残りがペイロード
    let split = match token.char_indices().rev().nth(SIGNATURE_CHARS - 1) {
        Some((idx, _)) => idx,
        None => return false,
    };
    let (payload, presented) = token.split_at(split);

    let expected = signature_for(payload, secret);

    // Constant-time comparison to prevent timing attacks.
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

/// ペイロードに署名を付与してトークンを生成する
///
/// # Arguments
/// * `payload` - ペイロード部
/// * `secret` - 共有シークレット
///
/// # Returns
/// * `String` - ペイロード + 署名（SIGNATURE_CHARS文字）
pub fn sign(payload: &str, secret: &[u8]) -> String {
    format!("{}{}", payload, signature_for(payload, secret))
}

/// ランダムなペイロードで新しいトークンを発行する
///
/// # Arguments
/// * `secret` - 共有シークレット
///
/// # Returns
/// * `String` - 発行されたトークン
pub fn issue(secret: &[u8]) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    let payload: String = (0..PAYLOAD_CHARS)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    sign(&payload, secret)
}

/// ペイロードの期待署名を計算する
///
/// HMAC-SHA256のダイジェストをURL-safe Base64化し、
/// 先頭SIGNATURE_CHARS文字に切り詰める。
fn signature_for(payload: &str, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let digest = mac.finalize().into_bytes();

    let encoded = URL_SAFE_NO_PAD.encode(digest);
    // Base64出力はASCIIなので先頭8文字＝先頭8バイト
    encoded[..SIGNATURE_CHARS].to_string()
}
