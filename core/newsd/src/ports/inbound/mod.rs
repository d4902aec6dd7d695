//! Inbound ポート: CLI から usecase を起動する境界

use crate::domain::NewsdCommand;
use common::error::Error;

/// 解析済みコマンドを実行して終了コードを返す
pub trait CommandRunner {
    fn run(&self, cmd: NewsdCommand) -> Result<i32, Error>;
}
