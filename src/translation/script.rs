/*!
 * Simplified-to-traditional Chinese script conversion.
 *
 * A local, offline translation policy: each simplified character is mapped to
 * its traditional form through a conversion table. The built-in table covers
 * the characters that actually occur in plugin locale files; a user-supplied
 * TSV file (one `simplified<TAB>traditional` pair per line) can extend or
 * override it for project-specific vocabulary.
 */

use anyhow::{Result, Context};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::TranslationError;
use crate::translation::policy::TranslationPolicy;

/// Built-in simplified -> traditional character pairs
///
/// Kept as parallel string literals so the table stays greppable; both sides
/// must have the same character count.
const SIMPLIFIED: &str = "爱按办帮备笔边标宾产长尝车称成虫传创从达带单当党档点电东动读断对队发范飞费风复该钢给观广归国过还汉号后华画欢环会机积极记纪际继家价间简见键将节进经惊旧举开块宽况来乐离礼历连两辆料临龙楼录虑马买卖满门们面难内鸟农盘品枪强墙请权确让热认荣设声胜师时实识书术树数双说丝虽随岁态铁听头图团万为伟卫问无误习戏系显现线响项写选学压验样药页业医亿义艺议译应营优邮游于语员远运杂则张这证织职执指质钟种众专转装准资总走组";
const TRADITIONAL: &str = "愛按辦幫備筆邊標賓產長嘗車稱成蟲傳創從達帶單當黨檔點電東動讀斷對隊發範飛費風復該鋼給觀廣歸國過還漢號後華畫歡環會機積極記紀際繼家價間簡見鍵將節進經驚舊舉開塊寬況來樂離禮歷連兩輛料臨龍樓錄慮馬買賣滿門們面難內鳥農盤品槍強牆請權確讓熱認榮設聲勝師時實識書術樹數雙說絲雖隨歲態鐵聽頭圖團萬為偉衛問無誤習戲係顯現線響項寫選學壓驗樣藥頁業醫億義藝議譯應營優郵遊於語員遠運雜則張這證織職執指質鐘種眾專轉裝準資總走組";

/// Local script-conversion policy
pub struct ScriptConverter {
    table: HashMap<char, char>,
}

impl ScriptConverter {
    /// Converter with the built-in table only
    pub fn new() -> Self {
        let table = SIMPLIFIED.chars().zip(TRADITIONAL.chars()).collect();
        Self { table }
    }

    /// Converter with the built-in table extended from a TSV mapping file
    pub fn with_mapping_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut converter = Self::new();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read mapping file: {:?}", path.as_ref()))?;

        let mut added = 0usize;
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (from, to) = line
                .split_once('\t')
                .with_context(|| format!("Malformed mapping on line {}", line_no + 1))?;
            let (Some(from), Some(to)) = (single_char(from), single_char(to)) else {
                anyhow::bail!("Mapping on line {} is not a single character pair", line_no + 1);
            };
            converter.table.insert(from, to);
            added += 1;
        }
        debug!("Loaded {} custom script mappings", added);
        Ok(converter)
    }

    /// Convert a string character by character; unmapped characters pass
    /// through unchanged
    pub fn convert(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Default for ScriptConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

#[async_trait]
impl TranslationPolicy for ScriptConverter {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        Ok(self.convert(text))
    }
}
