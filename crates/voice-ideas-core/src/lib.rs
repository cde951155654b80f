pub mod classifier;
pub mod config;
pub mod entry;
pub mod error;
pub mod ingest;
pub mod rules;

pub use classifier::{
    analyze, summary_line, AnalysisResult, EntryClassifier, IdeaRecord, Triggers,
};
pub use config::{Config, IngestConfig, OutputConfig, OutputFormat};
pub use entry::{VoiceEntry, DEFAULT_USER_ID};
pub use error::{Result, VoiceIdeasError};
pub use ingest::{parse_tag_list, parse_timestamp, EntryLoader};

// Rule system
pub use rules::{
    BeliefLevel, Category, DueDate, KeywordSet, OriginType, RefinementLevel, Rule, RuleSet,
    Status, Tone,
};
