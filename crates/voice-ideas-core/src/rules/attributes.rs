//! Idea Attributes
//!
//! アイデアレコードに付与する属性値。
//! すべて閉じた列挙型で、シリアライズ時は出力仕様どおりの文字列になる。

use std::fmt;

use serde::{Deserialize, Serialize};

/// Toneのpositive閾値（この値を含まない）
pub const POSITIVE_TONE_THRESHOLD: f64 = 0.3;

/// Toneのnegative閾値（この値を含まない）
pub const NEGATIVE_TONE_THRESHOLD: f64 = -0.1;

/// 進捗ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

/// カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Health,
    Learning,
    Work,
    Personal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Work => "work",
            Self::Personal => "personal",
        }
    }
}

/// 期日（該当なしは`Option::None`で表現）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueDate {
    #[serde(rename = "tomorrow")]
    Tomorrow,
    #[serde(rename = "next week")]
    NextWeek,
    #[serde(rename = "this weekend")]
    ThisWeekend,
}

impl DueDate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tomorrow => "tomorrow",
            Self::NextWeek => "next week",
            Self::ThisWeekend => "this weekend",
        }
    }
}

/// アイデアの発生源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginType {
    Spontaneous,
    Planned,
}

impl OriginType {
    /// phraseトリガーのみで決まる（verb/future-intentは見ない）
    pub fn from_phrase_trigger(phrase_fired: bool) -> Self {
        if phrase_fired {
            Self::Spontaneous
        } else {
            Self::Planned
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spontaneous => "spontaneous",
            Self::Planned => "planned",
        }
    }
}

/// 感情スコアから導くトーン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    /// スコアなし・NaNはneutral
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s > POSITIVE_TONE_THRESHOLD => Self::Positive,
            Some(s) if s < NEGATIVE_TONE_THRESHOLD => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// 具体化の度合い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementLevel {
    Initial,
    Detailed,
    Conceptual,
}

impl RefinementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Detailed => "detailed",
            Self::Conceptual => "conceptual",
        }
    }
}

/// 確信度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeliefLevel {
    Medium,
    High,
    Low,
}

impl BeliefLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(
    Status,
    Category,
    DueDate,
    OriginType,
    Tone,
    RefinementLevel,
    BeliefLevel
);
