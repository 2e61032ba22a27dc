use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use rollcall_auth::UserRole;
use rollcall_core::AppError;
use rollcall_models::{ATTENDANCE_PRESENT, Attendance, LectureWithTeacher, MarkAttendanceDto};

use crate::metrics::track_attendance_marked;

/// Postgres' default name for the `attendance.student_id` foreign key.
const STUDENT_FK: &str = "attendance_student_id_fkey";

pub struct StudentService;

impl StudentService {
    /// Records the student as present and returns the new row's id.
    ///
    /// The unique `(lecture_id, student_id)` constraint decides duplicates:
    /// when the insert is skipped the attendance was already marked.
    #[instrument(skip(db))]
    pub async fn mark_attendance(db: &PgPool, dto: MarkAttendanceDto) -> Result<i64, AppError> {
        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(&dto.student_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        if role != UserRole::Student {
            return Err(AppError::bad_request(anyhow!(
                "Only students can mark attendance"
            )));
        }

        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO attendance (lecture_id, student_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (lecture_id, student_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(dto.lecture_id)
        .bind(&dto.student_id)
        .bind(ATTENDANCE_PRESENT)
        .fetch_optional(db)
        .await;

        match result {
            Ok(Some(id)) => {
                track_attendance_marked("marked");
                tracing::info!(attendance_id = id, "Attendance marked");
                Ok(id)
            }
            Ok(None) => {
                track_attendance_marked("duplicate");
                Err(AppError::conflict(
                    "Attendance already marked for this lecture.",
                ))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                let missing = match db_err.constraint() {
                    Some(STUDENT_FK) => "Student not found",
                    _ => "Lecture not found",
                };
                Err(AppError::not_found(anyhow!(missing)))
            }
            Err(e) => Err(AppError::database(
                anyhow::Error::new(e).context("Failed to insert attendance"),
            )),
        }
    }

    /// Every lecture with its teacher's name, newest first.
    #[instrument(skip(db))]
    pub async fn get_lectures(db: &PgPool) -> Result<Vec<LectureWithTeacher>, AppError> {
        let lectures = sqlx::query_as::<_, LectureWithTeacher>(
            r#"
            SELECT l.id, l.name, l.subject, l.date, l.time, l.teacher_id, l.created_at,
                   u.name AS teacher_name
            FROM lectures l
            JOIN users u ON l.teacher_id = u.id
            WHERE u.role = 'teacher'
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch lectures")
        .map_err(AppError::database)?;

        Ok(lectures)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance_history(
        db: &PgPool,
        student_id: &str,
    ) -> Result<Vec<Attendance>, AppError> {
        let records = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, lecture_id, student_id, status, timestamp
            FROM attendance
            WHERE student_id = $1
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance history")
        .map_err(AppError::database)?;

        Ok(records)
    }
}
