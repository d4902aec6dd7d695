//! 結合テスト: パイプライン全体をスタブと実ファイルで動かす

mod ingest_tests;
