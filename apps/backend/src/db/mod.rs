//! PostgreSQL database operations

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Consecutive correct answers that resolve a wrong-question entry
pub const RESOLVE_AFTER_CORRECT: i32 = 2;

const PLAN_COLUMNS: &str =
    "id, student_id, date, module, status, ai_content, created_at, updated_at";
const SUBMISSION_COLUMNS: &str =
    "id, plan_id, student_id, version, content, score, grade, feedback, created_at";
const TEXT_COLUMNS: &str = "id, title, author, dynasty, content, translation, notes, difficulty, \
     grade_level, created_at, updated_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    pub async fn create_user(
        &self,
        id: Uuid,
        phone: &str,
        role: Role,
        grade: Option<&str>,
        name: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, phone, role, grade, name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, phone, role, grade, name, created_at
            "#,
        )
        .bind(id)
        .bind(phone)
        .bind(role.as_str())
        .bind(grade)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user unless the id or phone is already taken
    pub async fn ensure_user(
        &self,
        id: Uuid,
        phone: &str,
        role: Role,
        grade: Option<&str>,
        name: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, phone, role, grade, name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(phone)
        .bind(role.as_str())
        .bind(grade)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, phone, role, grade, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a user; plans, submissions and links cascade
    pub async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a parent to a student
    pub async fn link_parent(
        &self,
        parent_id: Uuid,
        student_id: Uuid,
        invite_code: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO parent_children (parent_id, student_id, invite_code)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(parent_id)
        .bind(student_id)
        .bind(invite_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// First student linked to a parent
    pub async fn get_linked_child(&self, parent_id: Uuid) -> Result<Option<User>> {
        let child = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.phone, u.role, u.grade, u.name, u.created_at
            FROM parent_children pc
            JOIN users u ON u.id = pc.student_id
            WHERE pc.parent_id = $1
            ORDER BY pc.created_at
            LIMIT 1
            "#,
        )
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(child)
    }

    /// Users newest first with plan and submission counts
    pub async fn list_users_with_counts(&self) -> Result<Vec<AdminUser>> {
        let users = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT u.id, u.phone, u.role, u.grade, u.name, u.created_at,
                   (SELECT COUNT(*) FROM training_plans p WHERE p.student_id = u.id) AS plan_count,
                   (SELECT COUNT(*) FROM submissions s WHERE s.student_id = u.id) AS submission_count
            FROM users u
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    // === Training Plan Repository ===

    /// Find or create the plan for (student, date, module) in one statement.
    ///
    /// The no-op update makes `RETURNING` yield the existing row on conflict,
    /// so concurrent callers all receive the same plan.
    pub async fn find_or_create_plan(
        &self,
        student_id: Uuid,
        date: NaiveDate,
        module: Module,
    ) -> Result<DbTrainingPlan> {
        let query = format!(
            r#"
            INSERT INTO training_plans (student_id, date, module)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, date, module)
            DO UPDATE SET student_id = EXCLUDED.student_id
            RETURNING {}
            "#,
            PLAN_COLUMNS
        );
        let plan = sqlx::query_as::<_, DbTrainingPlan>(&query)
            .bind(student_id)
            .bind(date)
            .bind(module.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(plan)
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> Result<Option<DbTrainingPlan>> {
        let query = format!("SELECT {} FROM training_plans WHERE id = $1", PLAN_COLUMNS);
        let plan = sqlx::query_as::<_, DbTrainingPlan>(&query)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(plan)
    }

    /// Cache generated exercise content on the plan
    pub async fn set_plan_content(&self, plan_id: Uuid, ai_content: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE training_plans
            SET ai_content = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(plan_id)
        .bind(ai_content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Completed plans with their latest submission, newest first
    pub async fn get_completed_plans(&self, student_id: Uuid) -> Result<Vec<PlanWithLatest>> {
        let plans = sqlx::query_as::<_, PlanWithLatest>(
            r#"
            SELECT p.id, p.date, p.module, p.status,
                   s.id AS submission_id, s.score, s.grade, s.created_at AS submitted_at
            FROM training_plans p
            LEFT JOIN LATERAL (
                SELECT id, score, grade, created_at
                FROM submissions
                WHERE plan_id = p.id
                ORDER BY version DESC
                LIMIT 1
            ) s ON TRUE
            WHERE p.student_id = $1 AND p.status = 'completed'
            ORDER BY p.date DESC, p.updated_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    /// All plans in a date range with their latest submission
    pub async fn get_plans_between(
        &self,
        student_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PlanWithLatest>> {
        let plans = sqlx::query_as::<_, PlanWithLatest>(
            r#"
            SELECT p.id, p.date, p.module, p.status,
                   s.id AS submission_id, s.score, s.grade, s.created_at AS submitted_at
            FROM training_plans p
            LEFT JOIN LATERAL (
                SELECT id, score, grade, created_at
                FROM submissions
                WHERE plan_id = p.id
                ORDER BY version DESC
                LIMIT 1
            ) s ON TRUE
            WHERE p.student_id = $1 AND p.date >= $2 AND p.date <= $3
            ORDER BY p.date, p.module
            "#,
        )
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    /// One page of completed plans, optionally filtered by module
    pub async fn get_history_page(
        &self,
        student_id: Uuid,
        module: Option<Module>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PlanWithLatest>, i64)> {
        let module = module.map(|m| m.as_str());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM training_plans
            WHERE student_id = $1 AND status = 'completed'
              AND ($2::TEXT IS NULL OR module = $2)
            "#,
        )
        .bind(student_id)
        .bind(module)
        .fetch_one(&self.pool)
        .await?;

        let records = sqlx::query_as::<_, PlanWithLatest>(
            r#"
            SELECT p.id, p.date, p.module, p.status,
                   s.id AS submission_id, s.score, s.grade, s.created_at AS submitted_at
            FROM training_plans p
            LEFT JOIN LATERAL (
                SELECT id, score, grade, created_at
                FROM submissions
                WHERE plan_id = p.id
                ORDER BY version DESC
                LIMIT 1
            ) s ON TRUE
            WHERE p.student_id = $1 AND p.status = 'completed'
              AND ($2::TEXT IS NULL OR p.module = $2)
            ORDER BY p.date DESC, p.updated_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(student_id)
        .bind(module)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((records, total))
    }

    // === Submission Repository ===

    pub async fn get_submission(&self, submission_id: Uuid) -> Result<Option<DbSubmission>> {
        let query = format!("SELECT {} FROM submissions WHERE id = $1", SUBMISSION_COLUMNS);
        let submission = sqlx::query_as::<_, DbSubmission>(&query)
            .bind(submission_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(submission)
    }

    pub async fn get_latest_submission(&self, plan_id: Uuid) -> Result<Option<DbSubmission>> {
        let query = format!(
            "SELECT {} FROM submissions WHERE plan_id = $1 ORDER BY version DESC LIMIT 1",
            SUBMISSION_COLUMNS
        );
        let submission = sqlx::query_as::<_, DbSubmission>(&query)
            .bind(plan_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(submission)
    }

    /// All versions of a plan, newest first
    pub async fn get_plan_submissions(&self, plan_id: Uuid) -> Result<Vec<DbSubmission>> {
        let query = format!(
            "SELECT {} FROM submissions WHERE plan_id = $1 ORDER BY version DESC",
            SUBMISSION_COLUMNS
        );
        let submissions = sqlx::query_as::<_, DbSubmission>(&query)
            .bind(plan_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(submissions)
    }

    /// Persist a graded submission as the plan's next version.
    ///
    /// Runs in one transaction: the plan row is locked so concurrent submits
    /// serialize on the version number, the plan is marked completed and the
    /// wrong-question notebook is updated from the question outcomes.
    pub async fn record_submission(
        &self,
        new: &NewSubmission,
        outcomes: &[QuestionOutcome],
    ) -> Result<DbSubmission> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM training_plans WHERE id = $1 FOR UPDATE")
            .bind(new.plan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Plan {}", new.plan_id)))?;

        let version: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM submissions WHERE plan_id = $1",
        )
        .bind(new.plan_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            r#"
            INSERT INTO submissions (plan_id, student_id, version, content, score, grade, feedback)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SUBMISSION_COLUMNS
        );
        let submission = sqlx::query_as::<_, DbSubmission>(&query)
            .bind(new.plan_id)
            .bind(new.student_id)
            .bind(version)
            .bind(&new.content)
            .bind(new.score)
            .bind(&new.grade)
            .bind(&new.feedback)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE training_plans
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(new.plan_id)
        .execute(&mut *tx)
        .await?;

        for outcome in outcomes {
            if outcome.is_correct {
                sqlx::query(
                    r#"
                    UPDATE wrong_questions
                    SET consecutive_correct = consecutive_correct + 1,
                        status = CASE
                            WHEN consecutive_correct + 1 >= $4 THEN 'resolved'
                            ELSE status
                        END,
                        updated_at = NOW()
                    WHERE student_id = $1 AND module = $2 AND question_key = $3
                    "#,
                )
                .bind(new.student_id)
                .bind(new.module.as_str())
                .bind(&outcome.question_key)
                .bind(RESOLVE_AFTER_CORRECT)
                .execute(&mut *tx)
                .await?;
            } else {
                sqlx::query(
                    r#"
                    INSERT INTO wrong_questions
                        (student_id, module, question_key, question_content,
                         correct_answer, student_answer)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (student_id, module, question_key) DO UPDATE SET
                        error_count = wrong_questions.error_count + 1,
                        consecutive_correct = 0,
                        status = 'active',
                        question_content = EXCLUDED.question_content,
                        correct_answer = EXCLUDED.correct_answer,
                        student_answer = EXCLUDED.student_answer,
                        updated_at = NOW()
                    "#,
                )
                .bind(new.student_id)
                .bind(new.module.as_str())
                .bind(&outcome.question_key)
                .bind(&outcome.question_content)
                .bind(&outcome.correct_answer)
                .bind(&outcome.student_answer)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(submission)
    }

    // === Wrong Question Repository ===

    /// Up to 50 entries, most recently updated first
    pub async fn list_wrong_questions(
        &self,
        student_id: Uuid,
        module: Option<Module>,
        status: WrongQuestionStatus,
    ) -> Result<Vec<DbWrongQuestion>> {
        let mistakes = sqlx::query_as::<_, DbWrongQuestion>(
            r#"
            SELECT id, student_id, module, question_key, question_content, correct_answer,
                   student_answer, error_count, consecutive_correct, status, created_at, updated_at
            FROM wrong_questions
            WHERE student_id = $1 AND status = $2
              AND ($3::TEXT IS NULL OR module = $3)
            ORDER BY updated_at DESC
            LIMIT 50
            "#,
        )
        .bind(student_id)
        .bind(status.as_str())
        .bind(module.map(|m| m.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(mistakes)
    }

    /// Active entries per module
    pub async fn count_active_wrong_by_module(&self, student_id: Uuid) -> Result<Vec<ModuleCount>> {
        let counts = sqlx::query_as::<_, ModuleCount>(
            r#"
            SELECT module, COUNT(*) AS count
            FROM wrong_questions
            WHERE student_id = $1 AND status = 'active'
            GROUP BY module
            ORDER BY module
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn count_active_wrong(&self, student_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM wrong_questions WHERE student_id = $1 AND status = 'active'",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn get_wrong_question(
        &self,
        student_id: Uuid,
        module: Module,
        question_key: &str,
    ) -> Result<Option<DbWrongQuestion>> {
        let mistake = sqlx::query_as::<_, DbWrongQuestion>(
            r#"
            SELECT id, student_id, module, question_key, question_content, correct_answer,
                   student_answer, error_count, consecutive_correct, status, created_at, updated_at
            FROM wrong_questions
            WHERE student_id = $1 AND module = $2 AND question_key = $3
            "#,
        )
        .bind(student_id)
        .bind(module.as_str())
        .bind(question_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mistake)
    }

    /// Set the status of a student's own entry
    pub async fn update_wrong_question_status(
        &self,
        id: Uuid,
        student_id: Uuid,
        status: WrongQuestionStatus,
    ) -> Result<Option<DbWrongQuestion>> {
        let mistake = sqlx::query_as::<_, DbWrongQuestion>(
            r#"
            UPDATE wrong_questions
            SET status = $3,
                consecutive_correct = CASE WHEN $3 = 'active' THEN 0 ELSE consecutive_correct END,
                updated_at = NOW()
            WHERE id = $1 AND student_id = $2
            RETURNING id, student_id, module, question_key, question_content, correct_answer,
                      student_answer, error_count, consecutive_correct, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(student_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(mistake)
    }

    // === AI Config Repository ===

    pub async fn get_ai_config(&self, module: &str) -> Result<Option<AiConfig>> {
        let config = sqlx::query_as::<_, AiConfig>(
            r#"
            SELECT id, module, provider, model_name, api_key, base_url, temperature,
                   created_at, updated_at
            FROM ai_configs
            WHERE module = $1
            "#,
        )
        .bind(module)
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }

    pub async fn list_ai_configs(&self) -> Result<Vec<AiConfig>> {
        let configs = sqlx::query_as::<_, AiConfig>(
            r#"
            SELECT id, module, provider, model_name, api_key, base_url, temperature,
                   created_at, updated_at
            FROM ai_configs
            ORDER BY module
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(configs)
    }

    /// Insert a default config unless the module already has one
    pub async fn ensure_ai_config(
        &self,
        module: &str,
        provider: &str,
        model_name: &str,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_configs (module, provider, model_name, api_key, base_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (module) DO NOTHING
            "#,
        )
        .bind(module)
        .bind(provider)
        .bind(model_name)
        .bind(api_key)
        .bind(base_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Apply a partial update; `None` when the module has no row
    pub async fn update_ai_config(
        &self,
        module: &str,
        patch: &AiConfigPatch,
    ) -> Result<Option<AiConfig>> {
        // Empty base_url clears the override
        let clear_base_url = matches!(patch.base_url.as_deref(), Some(""));
        let base_url = patch.base_url.as_deref().filter(|url| !url.is_empty());

        let config = sqlx::query_as::<_, AiConfig>(
            r#"
            UPDATE ai_configs SET
                provider = COALESCE($2, provider),
                model_name = COALESCE($3, model_name),
                api_key = COALESCE($4, api_key),
                base_url = CASE WHEN $6 THEN NULL ELSE COALESCE($5, base_url) END,
                temperature = COALESCE($7, temperature),
                updated_at = NOW()
            WHERE module = $1
            RETURNING id, module, provider, model_name, api_key, base_url, temperature,
                      created_at, updated_at
            "#,
        )
        .bind(module)
        .bind(patch.provider.as_deref())
        .bind(patch.model_name.as_deref())
        .bind(patch.api_key.as_deref())
        .bind(base_url)
        .bind(clear_base_url)
        .bind(patch.temperature)
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }

    // === Classic Text Repository ===

    /// Up to 100 texts, newest first
    pub async fn list_texts(
        &self,
        search: Option<&str>,
        grade_level: Option<&str>,
    ) -> Result<Vec<ClassicText>> {
        let query = format!(
            r#"
            SELECT {}
            FROM classic_texts
            WHERE ($1::TEXT IS NULL OR title ILIKE '%' || $1 || '%' OR author ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR grade_level = $2)
            ORDER BY created_at DESC
            LIMIT 100
            "#,
            TEXT_COLUMNS
        );
        let texts = sqlx::query_as::<_, ClassicText>(&query)
            .bind(search)
            .bind(grade_level)
            .fetch_all(&self.pool)
            .await?;

        Ok(texts)
    }

    pub async fn create_text(&self, text: &NewClassicText) -> Result<ClassicText> {
        let query = format!(
            r#"
            INSERT INTO classic_texts
                (title, author, dynasty, content, translation, notes, difficulty, grade_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TEXT_COLUMNS
        );
        let created = sqlx::query_as::<_, ClassicText>(&query)
            .bind(&text.title)
            .bind(&text.author)
            .bind(&text.dynasty)
            .bind(&text.content)
            .bind(&text.translation)
            .bind(&text.notes)
            .bind(text.difficulty)
            .bind(&text.grade_level)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    pub async fn update_text(
        &self,
        id: Uuid,
        update: &UpdateTextRequest,
    ) -> Result<Option<ClassicText>> {
        let query = format!(
            r#"
            UPDATE classic_texts SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                dynasty = COALESCE($4, dynasty),
                content = COALESCE($5, content),
                translation = COALESCE($6, translation),
                notes = COALESCE($7, notes),
                difficulty = COALESCE($8, difficulty),
                grade_level = COALESCE($9, grade_level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TEXT_COLUMNS
        );
        let updated = sqlx::query_as::<_, ClassicText>(&query)
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.author.as_deref())
            .bind(update.dynasty.as_deref())
            .bind(update.content.as_deref())
            .bind(update.translation.as_deref())
            .bind(update.notes.as_deref())
            .bind(update.difficulty)
            .bind(update.grade_level.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    pub async fn delete_text(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM classic_texts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // === Stats Repository ===

    pub async fn get_admin_stats(&self) -> Result<AdminStatsResponse> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE role = 'student') AS total_students,
                (SELECT COUNT(*) FROM training_plans) AS total_plans,
                (SELECT COUNT(*) FROM training_plans WHERE status = 'completed') AS total_completed,
                (SELECT COUNT(*) FROM classic_texts) AS total_texts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AdminStatsResponse {
            total_students: row.get("total_students"),
            total_plans: row.get("total_plans"),
            total_completed: row.get("total_completed"),
            total_texts: row.get("total_texts"),
        })
    }

    pub async fn get_health_counts(&self) -> Result<HealthCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM ai_configs) AS ai_configs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(HealthCounts {
            users: row.get("users"),
            ai_configs: row.get("ai_configs"),
        })
    }
}
