//! ポート層（Inbound / Outbound trait 定義）

pub mod inbound;
pub mod outbound;
