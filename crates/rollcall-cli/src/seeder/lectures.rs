//! Lecture and attendance seeding functionality.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{AttendanceSeed, LectureSeed};

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "English",
    "History",
    "Economics",
];

const SLOTS: &[&str] = &["09:00", "10:30", "12:00", "14:00", "15:30"];

/// Lectures are spread over this many days before today.
const LOOKBACK_DAYS: i64 = 30;

pub fn generate_lectures(teacher_ids: &[String], per_teacher: usize) -> Vec<LectureSeed> {
    let today = Utc::now().date_naive();

    teacher_ids
        .par_iter()
        .flat_map_iter(|teacher_id| {
            let mut rng = rand::thread_rng();
            (0..per_teacher)
                .map(|_| {
                    let subject = SUBJECTS.choose(&mut rng).copied().unwrap_or("General");
                    let date = today - Duration::days(rng.gen_range(0..LOOKBACK_DAYS));
                    let time = SLOTS.choose(&mut rng).copied().unwrap_or("09:00");

                    LectureSeed {
                        name: format!("{} - {}", subject, date),
                        subject: subject.to_string(),
                        date,
                        time: time.to_string(),
                        teacher_id: teacher_id.clone(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Every student gets an independent roll of `rate` for every lecture.
pub fn generate_attendance(
    lectures: &[(i64, NaiveDate, String)],
    student_ids: &[String],
    rate: f64,
) -> Vec<AttendanceSeed> {
    let rate = rate.clamp(0.0, 1.0);

    lectures
        .par_iter()
        .flat_map_iter(|(lecture_id, date, time)| {
            let mut rng = rand::thread_rng();
            let start = lecture_start(*date, time);

            let mut records = Vec::new();
            for student_id in student_ids {
                if rng.gen_bool(rate) {
                    records.push(AttendanceSeed {
                        lecture_id: *lecture_id,
                        student_id: student_id.clone(),
                        timestamp: start + Duration::minutes(rng.gen_range(0..15)),
                    });
                }
            }
            records
        })
        .collect()
}

fn lecture_start(date: NaiveDate, time: &str) -> chrono::DateTime<Utc> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(time))
}

/// Inserts lectures and returns `(id, date, time)` for each.
pub async fn seed_lectures(
    db: &PgPool,
    teacher_ids: &[String],
    per_teacher: usize,
) -> Result<Vec<(i64, NaiveDate, String)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} lectures per teacher...", per_teacher);

    let lectures = generate_lectures(teacher_ids, per_teacher);
    let mut tx = db.begin().await?;

    // 5 params per lecture
    const BATCH_SIZE: usize = 1000;
    let mut inserted = Vec::with_capacity(lectures.len());

    for chunk in lectures.chunks(BATCH_SIZE) {
        let mut query =
            String::from("INSERT INTO lectures (name, subject, date, time, teacher_id) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 5;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${})",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5
            ));
        }
        query.push_str(" RETURNING id, date, time");

        let mut q = sqlx::query_as::<_, (i64, NaiveDate, String)>(&query);
        for lecture in chunk {
            q = q
                .bind(&lecture.name)
                .bind(&lecture.subject)
                .bind(lecture.date)
                .bind(&lecture.time)
                .bind(&lecture.teacher_id);
        }
        inserted.extend(q.fetch_all(&mut *tx).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} lectures in {:?}",
        inserted.len(),
        start_time.elapsed()
    );
    Ok(inserted)
}

pub async fn seed_attendance(
    db: &PgPool,
    lectures: &[(i64, NaiveDate, String)],
    student_ids: &[String],
    rate: f64,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("✅ Seeding attendance at {:.0}%...", rate * 100.0);

    let records = generate_attendance(lectures, student_ids, rate);
    let mut tx = db.begin().await?;

    // 3 params per record
    const BATCH_SIZE: usize = 5000;
    let mut total = 0;

    for chunk in records.chunks(BATCH_SIZE) {
        let mut query =
            String::from("INSERT INTO attendance (lecture_id, student_id, timestamp) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 3;
            query.push_str(&format!("(${}, ${}, ${})", p + 1, p + 2, p + 3));
        }
        query.push_str(" ON CONFLICT (lecture_id, student_id) DO NOTHING");

        let mut q = sqlx::query(&query);
        for record in chunk {
            q = q
                .bind(record.lecture_id)
                .bind(&record.student_id)
                .bind(record.timestamp);
        }
        total += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} attendance records in {:?}",
        total,
        start_time.elapsed()
    );
    Ok(total)
}
