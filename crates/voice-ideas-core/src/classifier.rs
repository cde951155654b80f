//! Entry Classifier
//!
//! VoiceEntryの並びからタグ頻度とアイデア一覧を一度の走査で作る。
//! 入力がどんな形でも失敗しない（欠けた値はデフォルトに落とす）。
//!
//! ```rust
//! use voice_ideas_core::{analyze, VoiceEntry};
//!
//! let entries = vec![
//!     VoiceEntry::new("I just thought of a great solution").with_tags(["work"]),
//!     VoiceEntry::new("Bought milk").with_tags(["errand", "work"]),
//! ];
//!
//! let result = analyze(&entries);
//! assert_eq!(result.tag_counts["work"], 2);
//! assert_eq!(result.ideas.len(), 1);
//! assert_eq!(result.summary, "Analysis of 2 entries found 1 potential ideas");
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::VoiceEntry;
use crate::rules::{
    BeliefLevel, Category, DueDate, OriginType, RefinementLevel, Status, Tone, BELIEF_RULES,
    CATEGORY_RULES, DUE_DATE_RULES, FUTURE_INTENT_TRIGGER, PHRASE_TRIGGER, REFINEMENT_RULES,
    STATUS_RULES, VERB_TRIGGER,
};

/// トリガー判定結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub verb: bool,
    pub phrase: bool,
    pub future_intent: bool,
}

impl Triggers {
    /// 小文字化済みテキストから判定
    pub fn detect(lowered: &str) -> Self {
        Self {
            verb: VERB_TRIGGER.matches(lowered),
            phrase: PHRASE_TRIGGER.matches(lowered),
            future_intent: FUTURE_INTENT_TRIGGER.matches(lowered),
        }
    }

    /// いずれかが成立すればアイデア
    pub fn any(&self) -> bool {
        self.verb || self.phrase || self.future_intent
    }

    /// 成立したトリガー名
    pub fn fired(&self) -> Vec<&'static str> {
        [
            (self.verb, VERB_TRIGGER.name),
            (self.phrase, PHRASE_TRIGGER.name),
            (self.future_intent, FUTURE_INTENT_TRIGGER.name),
        ]
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, name)| name)
        .collect()
    }
}

/// 検出されたアイデア
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaRecord {
    /// 元の文字起こし（加工しない）
    pub task_text: String,
    pub status: Status,
    pub category: Category,
    /// 該当なしは`null`
    pub due_date: Option<DueDate>,
    pub origin_type: OriginType,
    pub tone: Tone,
    pub refinement_level: RefinementLevel,
    pub belief_level: BeliefLevel,
}

/// 分類結果全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// タグ → 出現回数
    pub tag_counts: HashMap<String, usize>,
    /// アイデア（入力順）
    pub ideas: Vec<IdeaRecord>,
    /// 件数サマリ
    pub summary: String,
}

impl AnalysisResult {
    /// 出現回数の多い順（同数はタグ名順）
    pub fn top_tags(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .tag_counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(limit);
        tags
    }

    /// 特定カテゴリのアイデアを取得
    pub fn ideas_in_category(&self, category: Category) -> Vec<&IdeaRecord> {
        self.ideas
            .iter()
            .filter(|idea| idea.category == category)
            .collect()
    }

    /// アイデアを特定カテゴリに絞った結果（タグ頻度とサマリは全体のまま）
    pub fn with_category(&self, category: Category) -> AnalysisResult {
        AnalysisResult {
            tag_counts: self.tag_counts.clone(),
            ideas: self
                .ideas_in_category(category)
                .into_iter()
                .cloned()
                .collect(),
            summary: self.summary.clone(),
        }
    }

    /// ステータス別のアイデア数を取得
    pub fn status_counts(&self) -> HashMap<Status, usize> {
        let mut counts = HashMap::new();
        for idea in &self.ideas {
            *counts.entry(idea.status).or_insert(0) += 1;
        }
        counts
    }
}

/// サマリ文字列
pub fn summary_line(entry_count: usize, idea_count: usize) -> String {
    format!(
        "Analysis of {} entries found {} potential ideas",
        entry_count, idea_count
    )
}

/// アイデア分類器
///
/// 状態を持たないので、同じ入力には常に同じ結果を返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryClassifier;

impl EntryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 文字起こしのトリガー判定
    pub fn triggers(&self, transcript: &str) -> Triggers {
        Triggers::detect(&transcript.to_lowercase())
    }

    /// 1件を分類（アイデアでなければNone）
    pub fn classify(&self, entry: &VoiceEntry) -> Option<IdeaRecord> {
        let lowered = entry.transcript.to_lowercase();
        let triggers = Triggers::detect(&lowered);
        if !triggers.any() {
            return None;
        }
        debug!(id = %entry.id, triggers = ?triggers.fired(), "detected idea");
        Some(self.enrich_lowered(entry, &lowered, triggers))
    }

    /// トリガー判定済みのエントリに属性を付与
    pub fn enrich(&self, entry: &VoiceEntry, triggers: Triggers) -> IdeaRecord {
        self.enrich_lowered(entry, &entry.transcript.to_lowercase(), triggers)
    }

    fn enrich_lowered(&self, entry: &VoiceEntry, lowered: &str, triggers: Triggers) -> IdeaRecord {
        IdeaRecord {
            task_text: entry.transcript.clone(),
            status: STATUS_RULES.first_match(lowered),
            category: CATEGORY_RULES.first_match(lowered),
            due_date: DUE_DATE_RULES.first_match(lowered),
            origin_type: OriginType::from_phrase_trigger(triggers.phrase),
            tone: Tone::from_score(entry.emotion_score),
            refinement_level: REFINEMENT_RULES.first_match(lowered),
            belief_level: BELIEF_RULES.first_match(lowered),
        }
    }

    /// 全エントリを一度に走査してタグ頻度とアイデア一覧を作る
    pub fn analyze(&self, entries: &[VoiceEntry]) -> AnalysisResult {
        let mut tag_counts: HashMap<String, usize> = HashMap::new();
        let mut ideas = Vec::new();

        for entry in entries {
            for tag in &entry.tags {
                *tag_counts.entry(tag.clone()).or_insert(0) += 1;
            }
            if let Some(idea) = self.classify(entry) {
                ideas.push(idea);
            }
        }

        debug!(
            entries = entries.len(),
            ideas = ideas.len(),
            distinct_tags = tag_counts.len(),
            "analyzed voice entries"
        );

        AnalysisResult {
            summary: summary_line(entries.len(), ideas.len()),
            tag_counts,
            ideas,
        }
    }
}

/// `EntryClassifier::analyze`のショートカット
pub fn analyze(entries: &[VoiceEntry]) -> AnalysisResult {
    EntryClassifier::new().analyze(entries)
}
