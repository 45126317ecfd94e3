//! Fixed schemas for AI generated exercises and grading results.
//!
//! Every AI response is deserialized into one of these types and then
//! checked with [`Validate`] before it is cached or persisted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::Module;

/// Semantic checks beyond the JSON shape.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parse an AI response body and validate it.
///
/// Tolerates a surrounding markdown code fence, which some providers emit
/// even in JSON mode.
pub fn parse_validated<T: DeserializeOwned + Validate>(raw: &str) -> Result<T> {
    let value: T = serde_json::from_str(strip_code_fence(raw))?;
    value.validate()?;
    Ok(value)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_score(field: &'static str, score: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&score) {
        return Err(CoreError::invalid(field, format!("{} is outside 0-100", score)));
    }
    Ok(())
}

fn require_unique_ids(ids: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    let mut any = false;
    for id in ids {
        any = true;
        if !seen.insert(id) {
            return Err(CoreError::invalid("questions", format!("duplicate id {}", id)));
        }
    }
    if !any {
        return Err(CoreError::invalid("questions", "at least one question is required"));
    }
    Ok(())
}

// === Generated content ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub min: u32,
    pub max: u32,
}

impl Validate for WordCount {
    fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(CoreError::invalid(
                "word_count",
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Chinese writing topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChineseWritingTopic {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub requirements: String,
    pub word_count: WordCount,
}

impl Validate for ChineseWritingTopic {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        self.word_count.validate()
    }
}

/// English writing topic with Chinese translations of the instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishWritingTopic {
    pub title: String,
    pub title_cn: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub description_cn: String,
    pub requirements: String,
    pub word_count: WordCount,
    pub useful_expressions: Vec<String>,
}

impl Validate for EnglishWritingTopic {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        self.word_count.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub word: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalQuestion {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
    pub answer: String,
    pub analysis: String,
}

/// Classical Chinese passage with annotations and questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalPassage {
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub original_text: String,
    pub annotations: Vec<Annotation>,
    pub questions: Vec<ClassicalQuestion>,
}

impl Validate for ClassicalPassage {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("original_text", &self.original_text)?;
        require_unique_ids(self.questions.iter().map(|q| q.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishQuestion {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub analysis: String,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    pub phonetic: String,
    pub meaning: String,
    pub example: String,
}

/// English reading passage with comprehension questions and vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishPassage {
    pub title: String,
    pub topic: String,
    pub passage: String,
    pub word_count: u32,
    pub questions: Vec<EnglishQuestion>,
    pub vocabulary: Vec<VocabularyItem>,
}

impl Validate for EnglishPassage {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("passage", &self.passage)?;
        require_unique_ids(self.questions.iter().map(|q| q.id))
    }
}

// === Grading results ===

/// Common accessors over essay grading results.
pub trait ScoredFeedback {
    fn total_score(&self) -> f64;
    fn grade(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub score: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarError {
    pub original: String,
    pub corrected: String,
    pub rule: String,
}

fn validate_essay(total_score: f64, grade: &str, dimensions: &[Dimension]) -> Result<()> {
    require_score("total_score", total_score)?;
    require_text("grade", grade)?;
    for dimension in dimensions {
        require_score("dimensions.score", dimension.score)?;
    }
    Ok(())
}

/// Chinese essay grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChineseEssayGrading {
    pub total_score: f64,
    pub grade: String,
    pub summary: String,
    pub dimensions: Vec<Dimension>,
    pub suggestions: Vec<String>,
    pub rewrite_example: String,
}

impl Validate for ChineseEssayGrading {
    fn validate(&self) -> Result<()> {
        validate_essay(self.total_score, &self.grade, &self.dimensions)
    }
}

impl ScoredFeedback for ChineseEssayGrading {
    fn total_score(&self) -> f64 {
        self.total_score
    }

    fn grade(&self) -> &str {
        &self.grade
    }
}

/// English essay grading, including grammar corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishEssayGrading {
    pub total_score: f64,
    pub grade: String,
    pub summary: String,
    pub dimensions: Vec<Dimension>,
    pub grammar_errors: Vec<GrammarError>,
    pub suggestions: Vec<String>,
    pub rewrite_example: String,
}

impl Validate for EnglishEssayGrading {
    fn validate(&self) -> Result<()> {
        validate_essay(self.total_score, &self.grade, &self.dimensions)
    }
}

impl ScoredFeedback for EnglishEssayGrading {
    fn total_score(&self) -> f64 {
        self.total_score
    }

    fn grade(&self) -> &str {
        &self.grade
    }
}

/// Grading of a single reading question.
///
/// Classical reading returns `key_points`, English reading returns
/// `explanation`; [`ItemGrading::validate_for`] enforces the right one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGrading {
    pub score: f64,
    pub is_correct: bool,
    pub comment: String,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ItemGrading {
    pub fn validate_for(&self, module: Module) -> Result<()> {
        require_score("score", self.score)?;
        match module {
            Module::ClassicalReading if self.key_points.is_none() => {
                Err(CoreError::invalid("key_points", "missing"))
            }
            Module::EnglishReading if self.explanation.is_none() => {
                Err(CoreError::invalid("explanation", "missing"))
            }
            _ => Ok(()),
        }
    }
}

impl Validate for ItemGrading {
    fn validate(&self) -> Result<()> {
        require_score("score", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chinese_topic() {
        let raw = r#"{
            "title": "我的妈妈",
            "type": "记叙文",
            "description": "写一写你的妈妈",
            "requirements": "真情实感",
            "word_count": { "min": 300, "max": 500 }
        }"#;
        let topic: ChineseWritingTopic = parse_validated(raw).unwrap();
        assert_eq!(topic.kind, "记叙文");
        assert_eq!(topic.word_count.max, 500);
    }

    #[test]
    fn rejects_inverted_word_count() {
        let raw = r#"{
            "title": "t", "type": "x", "description": "d", "requirements": "r",
            "word_count": { "min": 500, "max": 300 }
        }"#;
        let err = parse_validated::<ChineseWritingTopic>(raw).unwrap_err();
        assert!(err.to_string().contains("word_count"));
    }

    #[test]
    fn rejects_missing_field() {
        let raw = r#"{ "title": "t", "type": "x" }"#;
        assert!(matches!(
            parse_validated::<ChineseWritingTopic>(raw),
            Err(CoreError::Json(_))
        ));
    }

    #[test]
    fn strips_markdown_fence() {
        let raw = "```json\n{\"score\": 80, \"is_correct\": true, \"comment\": \"ok\", \"correct_answer\": \"a\"}\n```";
        let item: ItemGrading = parse_validated(raw).unwrap();
        assert!(item.is_correct);
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let passage = ClassicalPassage {
            title: "陋室铭".into(),
            author: "刘禹锡".into(),
            dynasty: "唐".into(),
            original_text: "山不在高".into(),
            annotations: vec![],
            questions: vec![
                ClassicalQuestion {
                    id: 1,
                    kind: "word_explain".into(),
                    question: "q".into(),
                    answer: "a".into(),
                    analysis: "n".into(),
                },
                ClassicalQuestion {
                    id: 1,
                    kind: "comprehension".into(),
                    question: "q".into(),
                    answer: "a".into(),
                    analysis: "n".into(),
                },
            ],
        };
        assert!(passage.validate().is_err());
    }

    #[test]
    fn rejects_passage_without_questions() {
        let passage = EnglishPassage {
            title: "A".into(),
            topic: "campus".into(),
            passage: "text".into(),
            word_count: 4,
            questions: vec![],
            vocabulary: vec![],
        };
        assert!(passage.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_score() {
        let raw = r#"{
            "total_score": 120, "grade": "A", "summary": "s",
            "dimensions": [], "suggestions": [], "rewrite_example": ""
        }"#;
        assert!(parse_validated::<ChineseEssayGrading>(raw).is_err());
    }

    #[test]
    fn item_grading_requires_module_specific_field() {
        let item = ItemGrading {
            score: 50.0,
            is_correct: false,
            comment: "c".into(),
            correct_answer: "a".into(),
            key_points: None,
            explanation: Some("e".into()),
        };
        assert!(item.validate_for(Module::EnglishReading).is_ok());
        assert!(item.validate_for(Module::ClassicalReading).is_err());
    }
}
