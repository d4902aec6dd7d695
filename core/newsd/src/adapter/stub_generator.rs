//! 固定文面を返すニュース生成アダプタ
//!
//! API キーが無い環境やテストで使う。パーサが扱う全区画
//! （タイトル行 / 本文 / Sources: / Images:）を含む文面を返す。

use crate::ports::outbound::NewsGenerator;
use common::error::Error;

#[derive(Debug, Clone, Default)]
pub struct StubGenerator;

impl NewsGenerator for StubGenerator {
    fn generate(&self) -> Result<String, Error> {
        Ok("Global Markets Rally After Policy Announcement\n\
            Stock markets across Europe and Asia rallied today after central banks \
            announced coordinated policy measures. Analysts described the move as the \
            strongest signal of cooperation in years.\n\n\
            Investors responded quickly, with major indexes closing higher across the board.\n\n\
            Sources:\n\
            Example Wire - https://example.com/markets-rally\n\
            Example Times - https://example.com/policy-announcement\n\n\
            Images:\n\
            https://images.example.com/markets/rally.jpg\n"
            .to_string())
    }
}
