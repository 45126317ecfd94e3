//! Test fixtures and factory functions for request bodies and AI replies.

use serde_json::{json, Value};
use uuid::Uuid;

/// Body for an essay submission.
pub fn essay_submission(plan_id: Uuid, content: &str) -> Value {
    json!({
        "plan_id": plan_id,
        "content": content,
        "topic_title": "我最难忘的一件事",
    })
}

/// One reading answer.
pub fn reading_answer(question_id: u32, reference: &str, student: &str) -> Value {
    json!({
        "question_id": question_id,
        "question_type": "fill_blank",
        "question_text": format!("Question {}", question_id),
        "reference_answer": reference,
        "student_answer": student,
    })
}

/// Body for a reading submission.
pub fn reading_submission(plan_id: Uuid, answers: Vec<Value>) -> Value {
    json!({
        "plan_id": plan_id,
        "answers": answers,
    })
}

/// Body for creating a classical text.
pub fn text_request(title: &str) -> Value {
    json!({
        "title": title,
        "author": "刘禹锡",
        "content": "山不在高，有仙则名。",
    })
}

/// AI reply for a Chinese writing topic.
pub fn chinese_topic_reply(title: &str) -> String {
    json!({
        "title": title,
        "type": "记叙文",
        "description": "写一件小事",
        "requirements": "真情实感",
        "word_count": { "min": 300, "max": 500 },
    })
    .to_string()
}

/// AI reply for a Chinese essay grading.
pub fn chinese_grading_reply(total_score: f64, grade: &str) -> String {
    json!({
        "total_score": total_score,
        "grade": grade,
        "summary": "写得不错",
        "dimensions": [
            { "name": "内容与立意", "score": total_score, "comment": "切题" }
        ],
        "suggestions": ["多用修辞"],
        "rewrite_example": "示例",
    })
    .to_string()
}

/// AI reply for one English reading item.
pub fn english_item_reply(score: f64, is_correct: bool) -> String {
    json!({
        "score": score,
        "is_correct": is_correct,
        "comment": "点评",
        "correct_answer": "cafeteria",
        "explanation": "解析",
    })
    .to_string()
}
