//! Seed records and seeding configuration.

use chrono::{DateTime, NaiveDate, Utc};
use rollcall_auth::UserRole;

/// Every seeded user id starts with this, which is how `clear-seed` finds
/// them again.
pub const SEED_ID_PREFIX: &str = "SEED-";
pub const SEED_EMAIL_DOMAIN: &str = "seed.rollcall.test";
/// Password shared by all seeded accounts.
pub const SEED_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
}

pub struct LectureSeed {
    pub name: String,
    pub subject: String,
    pub date: NaiveDate,
    pub time: String,
    pub teacher_id: String,
}

pub struct AttendanceSeed {
    pub lecture_id: i64,
    pub student_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub teachers: usize,
    pub students: usize,
    pub lectures_per_teacher: usize,
    /// Chance that a given student attended a given lecture, 0.0 to 1.0.
    pub attendance_rate: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 5,
            students: 40,
            lectures_per_teacher: 8,
            attendance_rate: 0.8,
        }
    }
}

impl SeedConfig {
    pub fn new(teachers: usize, students: usize) -> Self {
        Self {
            teachers,
            students,
            ..Default::default()
        }
    }

    pub fn with_lectures_per_teacher(mut self, lectures_per_teacher: usize) -> Self {
        self.lectures_per_teacher = lectures_per_teacher;
        self
    }

    pub fn with_attendance_rate(mut self, attendance_rate: f64) -> Self {
        self.attendance_rate = attendance_rate.clamp(0.0, 1.0);
        self
    }
}
