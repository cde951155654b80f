//! # Rules Module
//!
//! 文字起こしテキストからアイデアを検出し、属性を導くためのキーワードルール。
//!
//! ## 設計目的
//!
//! 判定ロジックを条件分岐の連鎖ではなく順序付きデータとして持つことで、
//! 属性ごとの優先順位とデフォルト値をそのまま読めるようにする：
//!
//! - **Trigger**: verb / phrase / future-intent の3種。いずれかが成立すればアイデア
//! - **RuleSet**: 属性ごとの `(label, keywords)` の並び。先に一致したものが勝つ
//! - **Tone**: キーワードではなく感情スコアの閾値で決まる
//!
//! ## モジュール構成
//!
//! - `attributes`: 属性値の列挙型
//! - `builtin`: ビルトインのルール表
//!
//! ## 使用例
//!
//! ```rust
//! use voice_ideas_core::rules::{Category, CATEGORY_RULES, PHRASE_TRIGGER};
//!
//! // 小文字化済みテキストに対して判定する
//! let text = "i want to learn how to code for my job";
//! assert_eq!(CATEGORY_RULES.first_match(text), Category::Learning);
//! assert!(!PHRASE_TRIGGER.matches(text));
//! ```

mod attributes;
mod builtin;

// Re-exports
pub use attributes::{
    BeliefLevel, Category, DueDate, OriginType, RefinementLevel, Status, Tone,
    NEGATIVE_TONE_THRESHOLD, POSITIVE_TONE_THRESHOLD,
};
pub use builtin::{
    KeywordSet, Rule, RuleSet, BELIEF_RULES, CATEGORY_RULES, DUE_DATE_RULES,
    FUTURE_INTENT_TRIGGER, PHRASE_TRIGGER, REFINEMENT_RULES, STATUS_RULES, VERB_TRIGGER,
};
