//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。メッセージと分類（I/O・JSON・HTTP・環境・引数）を持ち、
//! 終了コードへのマッピングもここで行う。

/// 共通エラー型
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Http(String),
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    /// I/O エラー（メッセージのみ）
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// JSON のシリアライズ・デシリアライズ失敗
    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    /// HTTP リクエスト・レスポンスの失敗
    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    /// 環境変数の未設定・不正
    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    /// コマンドライン引数の不正
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// 使い方の誤り（usage を表示すべきエラー）か
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// プロセス終了コード（64: 引数不正, 70: システムエラー）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            _ => 70,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::invalid_argument("bad flag").exit_code(), 64);
        assert_eq!(Error::io_msg("disk").exit_code(), 70);
        assert_eq!(Error::http("503").exit_code(), 70);
    }

    #[test]
    fn test_is_usage() {
        assert!(Error::invalid_argument("x").is_usage());
        assert!(!Error::json("x").is_usage());
    }

    #[test]
    fn test_display_is_message_only() {
        let e = Error::io_msg("Failed to write 'a.json': denied");
        assert_eq!(e.to_string(), "Failed to write 'a.json': denied");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("missing"));
    }
}
