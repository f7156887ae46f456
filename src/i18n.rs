use serde::{Deserialize, Serialize};

/// 目标语言类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ru")]
    Russian,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::Korean => write!(f, "ko"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Russian => write!(f, "ru"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(TargetLanguage::English),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" => Ok(TargetLanguage::Japanese),
            "ko" | "korean" | "한국어" => Ok(TargetLanguage::Korean),
            "de" | "german" | "deutsch" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" => Ok(TargetLanguage::French),
            "ru" | "russian" | "русский" => Ok(TargetLanguage::Russian),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::Korean => "한국어",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Russian => "Русский",
        }
    }

    /// Instruction appended to system prompts whose output is read by people
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => {
                "Write every free-text answer in English. Keep product names exactly as they are spelled by their vendors."
            }
            TargetLanguage::Chinese => "请使用中文撰写所有自由文本回答，产品名称保持厂商的原始拼写。",
            TargetLanguage::Japanese => {
                "自由記述の回答はすべて日本語で書いてください。製品名はベンダーの表記どおりに保ってください。"
            }
            TargetLanguage::Korean => {
                "모든 자유 서술형 답변은 한국어로 작성하세요. 제품 이름은 공급업체의 표기를 그대로 유지하세요."
            }
            TargetLanguage::German => {
                "Schreiben Sie alle Freitext-Antworten auf Deutsch. Produktnamen bleiben in der Schreibweise des Herstellers."
            }
            TargetLanguage::French => {
                "Rédigez toutes les réponses en texte libre en français. Conservez les noms de produits tels que les éditeurs les écrivent."
            }
            TargetLanguage::Russian => {
                "Пишите все ответы в свободной форме на русском языке. Названия продуктов оставляйте в написании производителя."
            }
        }
    }

    /// Heading of the recommendation section in the rendered report
    pub fn recommendation_heading(&self) -> &'static str {
        match self {
            TargetLanguage::English => "Recommendation",
            TargetLanguage::Chinese => "推荐建议",
            TargetLanguage::Japanese => "推奨",
            TargetLanguage::Korean => "추천",
            TargetLanguage::German => "Empfehlung",
            TargetLanguage::French => "Recommandation",
            TargetLanguage::Russian => "Рекомендация",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::English);
    }

    #[test]
    fn test_from_str_accepts_codes_and_names() {
        assert_eq!("en".parse::<TargetLanguage>().unwrap(), TargetLanguage::English);
        assert_eq!("German".parse::<TargetLanguage>().unwrap(), TargetLanguage::German);
        assert_eq!("中文".parse::<TargetLanguage>().unwrap(), TargetLanguage::Chinese);
        assert!("klingon".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_display_matches_serde_code() {
        let json = serde_json::to_string(&TargetLanguage::Japanese).unwrap();
        assert_eq!(json, format!("\"{}\"", TargetLanguage::Japanese));
    }

    #[test]
    fn test_prompt_instruction_is_present_for_every_language() {
        for language in [
            TargetLanguage::English,
            TargetLanguage::Chinese,
            TargetLanguage::Japanese,
            TargetLanguage::Korean,
            TargetLanguage::German,
            TargetLanguage::French,
            TargetLanguage::Russian,
        ] {
            assert!(!language.prompt_instruction().is_empty());
            assert!(!language.recommendation_heading().is_empty());
            assert!(!language.display_name().is_empty());
        }
    }
}
