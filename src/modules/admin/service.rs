//! Admin queries and the cascade-delete workflows.
//!
//! Deletes run inside one transaction. Lectures and attendance rows are
//! copied into the archive tables before they are removed, and the rows
//! being removed are locked first so no attendance can slip in between
//! the archive copy and the delete. Returning early drops the
//! transaction, which rolls it back.

use anyhow::{Context, anyhow};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use rollcall_auth::UserRole;
use rollcall_core::AppError;
use rollcall_models::{
    AttendanceOverview, CombinedAttendance, CombinedLectures, DashboardCounts, DashboardStats,
    LectureOverview, SubjectAttendance, TopStudent, TrendPoint, User, UserSummary, merge_trends,
};

use crate::metrics::track_cascade_delete;

/// Days covered by the attendance trend chart.
const TREND_WINDOW_DAYS: i32 = 30;
const TOP_STUDENTS_LIMIT: i64 = 10;

const ACTIVE_LECTURES_QUERY: &str = r#"
    SELECT l.id, NULL::BIGINT AS original_lecture_id, l.name, l.subject, l.date, l.time,
           l.teacher_id, u.name AS teacher_name, u.email AS teacher_email,
           (SELECT COUNT(*) FROM attendance a WHERE a.lecture_id = l.id) AS attendance_count,
           l.created_at, NULL::TIMESTAMPTZ AS archived_at, 'active'::TEXT AS status
    FROM lectures l
    LEFT JOIN users u ON l.teacher_id = u.id
    ORDER BY l.created_at DESC, l.id DESC
"#;

const ARCHIVED_LECTURES_QUERY: &str = r#"
    SELECT id, original_lecture_id, name, subject, date, time, teacher_id, teacher_name,
           NULL::TEXT AS teacher_email, attendance_count, created_at, archived_at,
           'archived'::TEXT AS status
    FROM archived_lectures
    ORDER BY archived_at DESC, id DESC
"#;

const ACTIVE_ATTENDANCE_QUERY: &str = r#"
    SELECT a.id, NULL::BIGINT AS original_attendance_id, a.lecture_id, a.student_id, a.status,
           a.timestamp, u.name AS student_name, u.roll_number, u.enrollment_number,
           l.name AS lecture_name, l.subject, l.date AS lecture_date,
           NULL::TIMESTAMPTZ AS archived_at, 'active'::TEXT AS record_status
    FROM attendance a
    JOIN users u ON a.student_id = u.id
    JOIN lectures l ON a.lecture_id = l.id
    ORDER BY a.timestamp DESC, a.id DESC
"#;

// The lecture of an archived row is either still live (its student was
// deleted) or archived alongside it.
const ARCHIVED_ATTENDANCE_QUERY: &str = r#"
    SELECT aa.id, aa.original_attendance_id, aa.lecture_id, aa.student_id, aa.status,
           aa.timestamp, aa.student_name, aa.roll_number, aa.enrollment_number,
           COALESCE(l.name, al.name) AS lecture_name,
           COALESCE(l.subject, al.subject) AS subject,
           COALESCE(l.date, al.date) AS lecture_date,
           aa.archived_at, 'archived'::TEXT AS record_status
    FROM archived_attendance aa
    LEFT JOIN lectures l ON l.id = aa.lecture_id
    LEFT JOIN archived_lectures al ON al.original_lecture_id = aa.lecture_id
    ORDER BY aa.timestamp DESC, aa.id DESC
"#;

/// Rows moved to the archive by one delete.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveCounts {
    pub lectures: u64,
    pub attendance: u64,
}

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn get_dashboard_stats(db: &PgPool) -> Result<DashboardStats, AppError> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE role = 'teacher') AS total_teachers,
                (SELECT COUNT(*) FROM users WHERE role = 'student') AS total_students,
                (SELECT COUNT(*) FROM lectures) AS active_lectures,
                (SELECT COUNT(*) FROM archived_lectures) AS archived_lectures,
                (SELECT COUNT(*) FROM attendance) AS active_attendance,
                (SELECT COUNT(*) FROM archived_attendance) AS archived_attendance
            "#,
        )
        .fetch_one(db)
        .await
        .context("Failed to fetch dashboard stats")
        .map_err(AppError::database)?;

        Ok(counts.into())
    }

    /// Teachers and students, grouped by role, newest first.
    #[instrument(skip(db))]
    pub async fn get_all_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, roll_number, enrollment_number, created_at
            FROM users
            WHERE role <> 'admin'
            ORDER BY role::TEXT ASC, created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_active_lectures(db: &PgPool) -> Result<Vec<LectureOverview>, AppError> {
        sqlx::query_as::<_, LectureOverview>(ACTIVE_LECTURES_QUERY)
            .fetch_all(db)
            .await
            .context("Failed to fetch lectures")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_archived_lectures(db: &PgPool) -> Result<Vec<LectureOverview>, AppError> {
        sqlx::query_as::<_, LectureOverview>(ARCHIVED_LECTURES_QUERY)
            .fetch_all(db)
            .await
            .context("Failed to fetch archived lectures")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_combined_lectures(db: &PgPool) -> Result<CombinedLectures, AppError> {
        let active = Self::get_active_lectures(db).await?;
        let archived = Self::get_archived_lectures(db).await?;
        Ok(CombinedLectures::new(active, archived))
    }

    #[instrument(skip(db))]
    pub async fn get_active_attendance(db: &PgPool) -> Result<Vec<AttendanceOverview>, AppError> {
        sqlx::query_as::<_, AttendanceOverview>(ACTIVE_ATTENDANCE_QUERY)
            .fetch_all(db)
            .await
            .context("Failed to fetch attendance records")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_combined_attendance(db: &PgPool) -> Result<CombinedAttendance, AppError> {
        let active = Self::get_active_attendance(db).await?;
        let archived = sqlx::query_as::<_, AttendanceOverview>(ARCHIVED_ATTENDANCE_QUERY)
            .fetch_all(db)
            .await
            .context("Failed to fetch archived attendance")
            .map_err(AppError::database)?;

        Ok(CombinedAttendance::new(active, archived))
    }

    /// Attendance per day over the trend window, live and archived rows
    /// counted together.
    #[instrument(skip(db))]
    pub async fn get_attendance_trend(db: &PgPool) -> Result<Vec<TrendPoint>, AppError> {
        let mut sources = Vec::with_capacity(2);

        for table in ["attendance", "archived_attendance"] {
            let query = format!(
                r#"
                SELECT DATE(timestamp) AS date, COUNT(*) AS count
                FROM {table}
                WHERE timestamp >= NOW() - make_interval(days => $1)
                GROUP BY DATE(timestamp)
                "#
            );
            let points = sqlx::query_as::<_, TrendPoint>(&query)
                .bind(TREND_WINDOW_DAYS)
                .fetch_all(db)
                .await
                .with_context(|| format!("Failed to fetch {table} trend"))
                .map_err(AppError::database)?;
            sources.push(points);
        }

        Ok(merge_trends(sources))
    }

    #[instrument(skip(db))]
    pub async fn get_top_students(db: &PgPool) -> Result<Vec<TopStudent>, AppError> {
        let students = sqlx::query_as::<_, TopStudent>(
            r#"
            SELECT u.id, u.name, u.roll_number, u.enrollment_number,
                   COUNT(a.id) AS attendance_count
            FROM users u
            JOIN attendance a ON u.id = a.student_id
            WHERE u.role = 'student'
            GROUP BY u.id, u.name, u.roll_number, u.enrollment_number
            ORDER BY attendance_count DESC, u.name ASC
            LIMIT $1
            "#,
        )
        .bind(TOP_STUDENTS_LIMIT)
        .fetch_all(db)
        .await
        .context("Failed to fetch top students")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance_by_subject(
        db: &PgPool,
    ) -> Result<Vec<SubjectAttendance>, AppError> {
        let subjects = sqlx::query_as::<_, SubjectAttendance>(
            r#"
            SELECT l.subject, COUNT(DISTINCT l.id) AS lecture_count,
                   COUNT(a.id) AS attendance_count
            FROM lectures l
            LEFT JOIN attendance a ON l.id = a.lecture_id
            GROUP BY l.subject
            ORDER BY attendance_count DESC, l.subject ASC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance by subject")
        .map_err(AppError::database)?;

        Ok(subjects)
    }

    /// Deletes a teacher or student together with everything hanging off
    /// them.
    ///
    /// Students lose their attendance rows. Teachers lose their lectures
    /// and all attendance for those lectures.
    #[instrument(skip(db))]
    pub async fn delete_user(
        db: &PgPool,
        requester_id: &str,
        user_id: &str,
    ) -> Result<UserSummary, AppError> {
        if requester_id == user_id {
            return Err(AppError::bad_request(anyhow!(
                "Cannot delete your own admin account"
            )));
        }

        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let target = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, role FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch user")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let archived = match target.role {
            UserRole::Admin => {
                return Err(AppError::forbidden("Cannot delete admin accounts"));
            }
            UserRole::Student => ArchiveCounts {
                lectures: 0,
                attendance: archive_student_attendance(&mut tx, &target.id).await?,
            },
            UserRole::Teacher => {
                let lecture_ids: Vec<i64> = sqlx::query_scalar(
                    "SELECT id FROM lectures WHERE teacher_id = $1 ORDER BY id FOR UPDATE",
                )
                .bind(&target.id)
                .fetch_all(&mut *tx)
                .await
                .context("Failed to lock teacher lectures")
                .map_err(AppError::database)?;

                archive_lectures(&mut tx, &lecture_ids).await?
            }
        };

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(&target.id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        tx.commit()
            .await
            .context("Failed to commit user deletion")
            .map_err(AppError::database)?;

        track_cascade_delete(target.role.as_str(), archived.lectures, archived.attendance);
        tracing::info!(
            user_id = %target.id,
            role = %target.role,
            archived_lectures = archived.lectures,
            archived_attendance = archived.attendance,
            "User deleted"
        );

        Ok(target)
    }

    /// Deletes a lecture and its attendance, archiving both. Returns the
    /// lecture's name.
    #[instrument(skip(db))]
    pub async fn delete_lecture(db: &PgPool, lecture_id: i64) -> Result<String, AppError> {
        let mut tx = db
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let name: String =
            sqlx::query_scalar("SELECT name FROM lectures WHERE id = $1 FOR UPDATE")
                .bind(lecture_id)
                .fetch_optional(&mut *tx)
                .await
                .context("Failed to fetch lecture")
                .map_err(AppError::database)?
                .ok_or_else(|| AppError::not_found(anyhow!("Lecture not found")))?;

        let archived = archive_lectures(&mut tx, &[lecture_id]).await?;

        tx.commit()
            .await
            .context("Failed to commit lecture deletion")
            .map_err(AppError::database)?;

        track_cascade_delete("lecture", archived.lectures, archived.attendance);
        tracing::info!(
            lecture_id,
            archived_attendance = archived.attendance,
            "Lecture deleted"
        );

        Ok(name)
    }
}

/// Copies a student's attendance into the archive, then deletes it.
async fn archive_student_attendance(
    conn: &mut PgConnection,
    student_id: &str,
) -> Result<u64, AppError> {
    sqlx::query(
        r#"
        INSERT INTO archived_attendance
            (original_attendance_id, lecture_id, student_id, student_name, roll_number,
             enrollment_number, status, timestamp)
        SELECT a.id, a.lecture_id, a.student_id, u.name, u.roll_number, u.enrollment_number,
               a.status, a.timestamp
        FROM attendance a
        LEFT JOIN users u ON u.id = a.student_id
        WHERE a.student_id = $1
        "#,
    )
    .bind(student_id)
    .execute(&mut *conn)
    .await
    .context("Failed to archive student attendance")
    .map_err(AppError::database)?;

    let deleted = sqlx::query("DELETE FROM attendance WHERE student_id = $1")
        .bind(student_id)
        .execute(&mut *conn)
        .await
        .context("Failed to delete student attendance")
        .map_err(AppError::database)?;

    Ok(deleted.rows_affected())
}

/// Copies lectures and their attendance into the archive, then deletes
/// the attendance followed by the lectures. The lecture snapshot keeps
/// the head count it had at deletion time.
async fn archive_lectures(
    conn: &mut PgConnection,
    lecture_ids: &[i64],
) -> Result<ArchiveCounts, AppError> {
    if lecture_ids.is_empty() {
        return Ok(ArchiveCounts::default());
    }

    sqlx::query(
        r#"
        INSERT INTO archived_lectures
            (original_lecture_id, name, subject, date, time, teacher_id, teacher_name,
             attendance_count, created_at)
        SELECT l.id, l.name, l.subject, l.date, l.time, l.teacher_id, u.name,
               (SELECT COUNT(*) FROM attendance a WHERE a.lecture_id = l.id),
               l.created_at
        FROM lectures l
        LEFT JOIN users u ON u.id = l.teacher_id
        WHERE l.id = ANY($1)
        "#,
    )
    .bind(lecture_ids)
    .execute(&mut *conn)
    .await
    .context("Failed to archive lectures")
    .map_err(AppError::database)?;

    sqlx::query(
        r#"
        INSERT INTO archived_attendance
            (original_attendance_id, lecture_id, student_id, student_name, roll_number,
             enrollment_number, status, timestamp)
        SELECT a.id, a.lecture_id, a.student_id, u.name, u.roll_number, u.enrollment_number,
               a.status, a.timestamp
        FROM attendance a
        LEFT JOIN users u ON u.id = a.student_id
        WHERE a.lecture_id = ANY($1)
        "#,
    )
    .bind(lecture_ids)
    .execute(&mut *conn)
    .await
    .context("Failed to archive lecture attendance")
    .map_err(AppError::database)?;

    let attendance = sqlx::query("DELETE FROM attendance WHERE lecture_id = ANY($1)")
        .bind(lecture_ids)
        .execute(&mut *conn)
        .await
        .context("Failed to delete lecture attendance")
        .map_err(AppError::database)?
        .rows_affected();

    let lectures = sqlx::query("DELETE FROM lectures WHERE id = ANY($1)")
        .bind(lecture_ids)
        .execute(&mut *conn)
        .await
        .context("Failed to delete lectures")
        .map_err(AppError::database)?
        .rows_affected();

    Ok(ArchiveCounts {
        lectures,
        attendance,
    })
}
