//! Builtin Rule Tables
//!
//! コード内で定義されるキーワードルール。
//! テーブルの並び順がそのまま判定の優先順位になる（先勝ち）。
//! キーワードはすべて小文字で、小文字化済みテキストに対する部分一致で判定する。

use super::attributes::{BeliefLevel, Category, DueDate, RefinementLevel, Status};

/// 1トリガー分のキーワード集合
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    /// トリガー名（ログ用）
    pub name: &'static str,
    /// 部分一致キーワード
    pub keywords: &'static [&'static str],
}

impl KeywordSet {
    /// いずれかのキーワードを含むか
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }

    /// 最初に一致したキーワード
    pub fn matched_keyword(&self, text: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| text.contains(k))
    }
}

/// ラベルとキーワードの組
#[derive(Debug, Clone, Copy)]
pub struct Rule<L: 'static> {
    pub label: L,
    pub keywords: &'static [&'static str],
}

/// 優先順位付きルール表とデフォルト値
#[derive(Debug, Clone, Copy)]
pub struct RuleSet<L: 'static> {
    /// 判定順のルール
    pub rules: &'static [Rule<L>],
    /// どれにも一致しない場合の値
    pub default: L,
}

impl<L: Copy + 'static> RuleSet<L> {
    /// 最初に一致したルールのラベル、なければデフォルト
    pub fn first_match(&self, text: &str) -> L {
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k)))
            .map(|rule| rule.label)
            .unwrap_or(self.default)
    }
}

/// verbトリガー
pub const VERB_TRIGGER: KeywordSet = KeywordSet {
    name: "verb",
    keywords: &[
        "build", "create", "start", "try", "make", "develop", "design", "launch",
    ],
};

/// phraseトリガー（origin_typeの判定にも使う）
pub const PHRASE_TRIGGER: KeywordSet = KeywordSet {
    name: "phrase",
    keywords: &[
        "just thought of",
        "what if",
        "idea for",
        "thinking about",
        "occurred to me",
        "imagine if",
        "how about",
    ],
};

/// future-intentトリガー
pub const FUTURE_INTENT_TRIGGER: KeywordSet = KeywordSet {
    name: "future_intent",
    keywords: &[
        "going to",
        "plan to",
        "want to",
        "would like to",
        "intend to",
    ],
};

pub const STATUS_RULES: RuleSet<Status> = RuleSet {
    rules: &[
        Rule {
            label: Status::InProgress,
            keywords: &["already started", "in progress", "working on"],
        },
        Rule {
            label: Status::Completed,
            keywords: &["finished", "completed", "done"],
        },
    ],
    default: Status::New,
};

/// 複数カテゴリに一致した場合はこの並びで先のものが勝つ
pub const CATEGORY_RULES: RuleSet<Category> = RuleSet {
    rules: &[
        Rule {
            label: Category::Health,
            keywords: &["health", "exercise", "workout", "diet"],
        },
        Rule {
            label: Category::Learning,
            keywords: &["learn", "study", "course", "read"],
        },
        Rule {
            label: Category::Work,
            keywords: &["work", "job", "career", "business"],
        },
        Rule {
            label: Category::Personal,
            keywords: &["personal", "life", "relationship"],
        },
    ],
    default: Category::General,
};

pub const DUE_DATE_RULES: RuleSet<Option<DueDate>> = RuleSet {
    rules: &[
        Rule {
            label: Some(DueDate::Tomorrow),
            keywords: &["tomorrow"],
        },
        Rule {
            label: Some(DueDate::NextWeek),
            keywords: &["next week"],
        },
        Rule {
            label: Some(DueDate::ThisWeekend),
            keywords: &["this weekend"],
        },
    ],
    default: None,
};

pub const REFINEMENT_RULES: RuleSet<RefinementLevel> = RuleSet {
    rules: &[
        Rule {
            label: RefinementLevel::Detailed,
            keywords: &["detailed plan", "steps to", "process for"],
        },
        Rule {
            label: RefinementLevel::Conceptual,
            keywords: &["thinking about", "considering"],
        },
    ],
    default: RefinementLevel::Initial,
};

pub const BELIEF_RULES: RuleSet<BeliefLevel> = RuleSet {
    rules: &[
        Rule {
            label: BeliefLevel::High,
            keywords: &["definitely", "absolutely", "must", "will"],
        },
        Rule {
            label: BeliefLevel::Low,
            keywords: &["maybe", "perhaps", "might", "could"],
        },
    ],
    default: BeliefLevel::Medium,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keywords() -> Vec<&'static str> {
        let mut words = Vec::new();
        for set in [VERB_TRIGGER, PHRASE_TRIGGER, FUTURE_INTENT_TRIGGER] {
            words.extend_from_slice(set.keywords);
        }
        for rule in STATUS_RULES.rules {
            words.extend_from_slice(rule.keywords);
        }
        for rule in CATEGORY_RULES.rules {
            words.extend_from_slice(rule.keywords);
        }
        for rule in DUE_DATE_RULES.rules {
            words.extend_from_slice(rule.keywords);
        }
        for rule in REFINEMENT_RULES.rules {
            words.extend_from_slice(rule.keywords);
        }
        for rule in BELIEF_RULES.rules {
            words.extend_from_slice(rule.keywords);
        }
        words
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for word in all_keywords() {
            assert_eq!(word, word.to_lowercase(), "keyword must be lowercase");
        }
    }

    #[test]
    fn test_triggers() {
        assert!(VERB_TRIGGER.matches("i want to build a new app"));
        assert!(PHRASE_TRIGGER.matches("it occurred to me on the train"));
        assert!(FUTURE_INTENT_TRIGGER.matches("we would like to move"));
        assert!(!PHRASE_TRIGGER.matches("groceries and laundry"));
        assert_eq!(
            PHRASE_TRIGGER.matched_keyword("what if we just thought of it"),
            Some("just thought of")
        );
    }

    #[test]
    fn test_status_priority() {
        assert_eq!(STATUS_RULES.first_match("working on it"), Status::InProgress);
        assert_eq!(STATUS_RULES.first_match("finished the draft"), Status::Completed);
        // in progress wins over completed
        assert_eq!(
            STATUS_RULES.first_match("already started, half done"),
            Status::InProgress
        );
        assert_eq!(STATUS_RULES.first_match("a fresh thought"), Status::New);
    }

    #[test]
    fn test_category_priority() {
        assert_eq!(
            CATEGORY_RULES.first_match("i want to learn how to code for my job"),
            Category::Learning
        );
        assert_eq!(
            CATEGORY_RULES.first_match("a workout plan for work"),
            Category::Health
        );
        assert_eq!(
            CATEGORY_RULES.first_match("my career and my relationship"),
            Category::Work
        );
        assert_eq!(
            CATEGORY_RULES.first_match("family life"),
            Category::Personal
        );
        assert_eq!(CATEGORY_RULES.first_match("a new app"), Category::General);
    }

    #[test]
    fn test_due_date_rules() {
        assert_eq!(
            DUE_DATE_RULES.first_match("call them tomorrow"),
            Some(DueDate::Tomorrow)
        );
        assert_eq!(
            DUE_DATE_RULES.first_match("sometime next week"),
            Some(DueDate::NextWeek)
        );
        assert_eq!(
            DUE_DATE_RULES.first_match("fix the bike this weekend"),
            Some(DueDate::ThisWeekend)
        );
        assert_eq!(
            DUE_DATE_RULES.first_match("this weekend or tomorrow"),
            Some(DueDate::Tomorrow)
        );
        assert_eq!(DUE_DATE_RULES.first_match("someday"), None);
    }

    #[test]
    fn test_refinement_rules() {
        assert_eq!(
            REFINEMENT_RULES.first_match("a detailed plan while thinking about it"),
            RefinementLevel::Detailed
        );
        assert_eq!(
            REFINEMENT_RULES.first_match("considering a move"),
            RefinementLevel::Conceptual
        );
        assert_eq!(
            REFINEMENT_RULES.first_match("a rough note"),
            RefinementLevel::Initial
        );
    }

    #[test]
    fn test_belief_rules() {
        assert_eq!(
            BELIEF_RULES.first_match("i will maybe do it"),
            BeliefLevel::High
        );
        assert_eq!(BELIEF_RULES.first_match("perhaps later"), BeliefLevel::Low);
        assert_eq!(BELIEF_RULES.first_match("a note"), BeliefLevel::Medium);
    }
}
