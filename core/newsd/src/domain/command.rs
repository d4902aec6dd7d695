//! CLI から usecase へ渡すコマンド表現

/// 実行するサブコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum NewsdCommand {
    /// usage を表示して正常終了
    Help,
    /// 1 記事を生成して取り込む
    Generate,
    /// 一定間隔で generate を繰り返す（Ctrl-C で停止）
    Serve,
    /// 保存済み記事の一覧（新しい順）
    List,
    /// id 指定で 1 記事を表示
    Show { id: String },
    /// 最新の 1 記事を表示
    Latest,
}
