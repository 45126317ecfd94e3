//! Development fixtures

use practice_core::{Module, Role};

use crate::config::AiDefaults;
use crate::db::Database;
use crate::error::Result;
use crate::routes::auth::{DEV_ADMIN_ID, DEV_PARENT_ID, DEV_STUDENT_ID};

const DEV_INVITE_CODE: &str = "ABC123";
const PLACEHOLDER_KEY: &str = "placeholder-key";

fn default_model(module: Module) -> &'static str {
    match module {
        Module::EnglishReading => "qwen-plus",
        _ => "qwen-max",
    }
}

/// Seed the fixture users, their parent link and default AI configs.
///
/// Existing AI config rows are left untouched so admin edits survive
/// restarts.
pub async fn seed_dev_fixtures(db: &Database, ai: &AiDefaults) -> Result<()> {
    db.ensure_user(
        DEV_STUDENT_ID,
        "13800000001",
        Role::Student,
        Some(practice_core::types::DEFAULT_GRADE_LEVEL),
        Some("测试学生"),
    )
    .await?;
    db.ensure_user(DEV_PARENT_ID, "13800000002", Role::Parent, None, Some("测试家长"))
        .await?;
    db.ensure_user(DEV_ADMIN_ID, "13800000003", Role::Admin, None, Some("管理员"))
        .await?;
    db.link_parent(DEV_PARENT_ID, DEV_STUDENT_ID, DEV_INVITE_CODE)
        .await?;

    let api_key = ai.qwen_api_key.as_deref().unwrap_or(PLACEHOLDER_KEY);
    for module in Module::ALL {
        db.ensure_ai_config(
            module.as_str(),
            "qwen",
            default_model(module),
            api_key,
            ai.qwen_base_url.as_deref(),
        )
        .await?;
    }

    tracing::info!("development fixtures seeded");
    Ok(())
}
