use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use rollcall_auth::UserRole;
use rollcall_core::AppError;
use rollcall_models::{
    CreateLectureDto, Defaulter, DefaulterCandidate, Lecture, LectureReportRow, LectureWithQr,
    LiveAttendee,
};

use crate::metrics::track_lecture_created;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn create_lecture(
        db: &PgPool,
        dto: CreateLectureDto,
        frontend_url: &str,
    ) -> Result<LectureWithQr, AppError> {
        let owner_role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(&dto.teacher_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch lecture owner")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))?;

        if owner_role != UserRole::Teacher {
            return Err(AppError::bad_request(anyhow!(
                "Lectures can only be assigned to teachers"
            )));
        }

        let lecture = sqlx::query_as::<_, Lecture>(
            r#"
            INSERT INTO lectures (name, subject, date, time, teacher_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, subject, date, time, teacher_id, created_at
            "#,
        )
        .bind(dto.lecture_name())
        .bind(dto.subject.trim())
        .bind(dto.date)
        .bind(dto.time.trim())
        .bind(&dto.teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            // The owner can be deleted between the role check and the insert.
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(anyhow!("Teacher not found"))
            }
            e => AppError::database(anyhow::Error::new(e).context("Failed to insert lecture")),
        })?;

        track_lecture_created();
        tracing::info!(lecture_id = lecture.id, "Lecture created");

        Ok(LectureWithQr::new(lecture, frontend_url))
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_lectures(
        db: &PgPool,
        teacher_id: &str,
        frontend_url: &str,
    ) -> Result<Vec<LectureWithQr>, AppError> {
        let lectures = sqlx::query_as::<_, Lecture>(
            r#"
            SELECT id, name, subject, date, time, teacher_id, created_at
            FROM lectures
            WHERE teacher_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher lectures")
        .map_err(AppError::database)?;

        Ok(lectures
            .into_iter()
            .map(|lecture| LectureWithQr::new(lecture, frontend_url))
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_lecture(db: &PgPool, lecture_id: i64) -> Result<Lecture, AppError> {
        sqlx::query_as::<_, Lecture>(
            "SELECT id, name, subject, date, time, teacher_id, created_at FROM lectures WHERE id = $1",
        )
        .bind(lecture_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch lecture")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Lecture not found")))
    }

    /// Attendees in the order they checked in.
    #[instrument(skip(db))]
    pub async fn get_live_attendance(
        db: &PgPool,
        lecture_id: i64,
    ) -> Result<Vec<LiveAttendee>, AppError> {
        let attendees = sqlx::query_as::<_, LiveAttendee>(
            r#"
            SELECT a.id, a.timestamp, u.name AS student_name, u.roll_number, u.enrollment_number
            FROM attendance a
            JOIN users u ON a.student_id = u.id
            WHERE a.lecture_id = $1
            ORDER BY a.timestamp ASC, a.id ASC
            "#,
        )
        .bind(lecture_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch live attendance")
        .map_err(AppError::database)?;

        Ok(attendees)
    }

    #[instrument(skip(db))]
    pub async fn get_lecture_report(
        db: &PgPool,
        lecture_id: i64,
    ) -> Result<Vec<LectureReportRow>, AppError> {
        let rows = sqlx::query_as::<_, LectureReportRow>(
            r#"
            SELECT u.id, u.name, u.roll_number, u.enrollment_number, a.timestamp
            FROM attendance a
            JOIN users u ON a.student_id = u.id
            WHERE a.lecture_id = $1 AND a.status = 'present'
            ORDER BY u.roll_number ASC NULLS LAST, u.name ASC
            "#,
        )
        .bind(lecture_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch lecture report")
        .map_err(AppError::database)?;

        Ok(rows)
    }

    /// Students attending less than 75% of a teacher's lectures.
    ///
    /// Only students with at least one attendance in those lectures are
    /// considered.
    #[instrument(skip(db))]
    pub async fn get_defaulters(db: &PgPool, teacher_id: &str) -> Result<Vec<Defaulter>, AppError> {
        let total_lectures: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lectures WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(db)
                .await
                .context("Failed to count teacher lectures")
                .map_err(AppError::database)?;

        if total_lectures == 0 {
            return Ok(Vec::new());
        }

        let candidates = sqlx::query_as::<_, DefaulterCandidate>(
            r#"
            SELECT u.id, u.name, u.roll_number, u.enrollment_number, COUNT(a.id) AS attended_count
            FROM users u
            JOIN attendance a ON u.id = a.student_id
            JOIN lectures l ON a.lecture_id = l.id
            WHERE u.role = 'student' AND l.teacher_id = $1
            GROUP BY u.id, u.name, u.roll_number, u.enrollment_number
            ORDER BY u.name ASC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance counts")
        .map_err(AppError::database)?;

        let defaulters: Vec<Defaulter> = candidates
            .into_iter()
            .filter_map(|candidate| candidate.into_defaulter(total_lectures))
            .collect();

        tracing::debug!(total_lectures, defaulters = defaulters.len(), "Defaulter report built");

        Ok(defaulters)
    }
}
