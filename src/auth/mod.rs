// 認証モジュール

/// 署名付きケイパビリティトークンの発行・検証（HMAC-SHA256）
pub mod token;

/// オペレーター資格情報の検証
pub mod operator;

/// 認証ミドルウェア（トークン検証、オペレーター認証）
pub mod middleware;

/// 投稿トークンを運ぶHTTPヘッダー名
pub const INGEST_TOKEN_HEADER: &str = "x-log-token";

/// オペレーターのユーザー名ヘッダー名
pub const OPERATOR_USERNAME_HEADER: &str = "dev-username";

/// オペレーターのパスワードヘッダー名
pub const OPERATOR_PASSWORD_HEADER: &str = "dev-password";

/// オペレーター読み取り時の対象ユーザーヘッダー名
pub const OWNER_ID_HEADER: &str = "user-id";
