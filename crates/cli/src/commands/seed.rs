//! Seed the database with demo data for local development.
//!
//! Creates a handful of parents, tutors, and requests across the served
//! cities so the dashboards have something to show. Idempotent: rerunning
//! skips accounts that already exist.
//!
//! Every seeded account logs in with the password `demo-tutorconnect`.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use tutorconnect_core::{Board, City, Role};

/// Password shared by all seeded demo accounts.
const DEMO_PASSWORD: &str = "demo-tutorconnect";

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,
}

struct DemoParent {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    city: City,
    requests: &'static [DemoRequest],
}

struct DemoRequest {
    student_name: Option<&'static str>,
    board: Board,
    class: i16,
    subjects: &'static [&'static str],
    locality: &'static str,
    preferred_timings: &'static str,
}

struct DemoTutor {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    city: City,
    subjects: &'static [&'static str],
    class_min: i16,
    class_max: i16,
    localities: &'static [&'static str],
    fee: i64,
    timings: &'static str,
}

const PARENTS: &[DemoParent] = &[
    DemoParent {
        name: "Ritu Sharma",
        email: "ritu.sharma@example.com",
        phone: "9876501234",
        city: City::Kanpur,
        requests: &[
            DemoRequest {
                student_name: Some("Aarav"),
                board: Board::Cbse,
                class: 9,
                subjects: &["Mathematics", "Physics"],
                locality: "Civil Lines",
                preferred_timings: "Weekdays after 5pm",
            },
            DemoRequest {
                student_name: Some("Anaya"),
                board: Board::Cbse,
                class: 6,
                subjects: &["English", "Hindi"],
                locality: "Swaroop Nagar",
                preferred_timings: "Weekend mornings",
            },
        ],
    },
    DemoParent {
        name: "Manoj Gupta",
        email: "manoj.gupta@example.com",
        phone: "9876505678",
        city: City::Lucknow,
        requests: &[DemoRequest {
            student_name: None,
            board: Board::Icse,
            class: 11,
            subjects: &["Accountancy", "Business Studies"],
            locality: "Gomti Nagar",
            preferred_timings: "Evenings",
        }],
    },
];

const TUTORS: &[DemoTutor] = &[
    DemoTutor {
        name: "Sahil Verma",
        email: "sahil.verma@example.com",
        phone: "9876509012",
        city: City::Kanpur,
        subjects: &["Mathematics", "Physics", "Chemistry"],
        class_min: 6,
        class_max: 12,
        localities: &["Civil Lines", "Mall Road", "Kalyanpur"],
        fee: 450,
        timings: "Weekdays 4pm-9pm",
    },
    DemoTutor {
        name: "Priya Mishra",
        email: "priya.mishra@example.com",
        phone: "9876503456",
        city: City::Lucknow,
        subjects: &["Accountancy", "Economics", "Business Studies"],
        class_min: 9,
        class_max: 12,
        localities: &["Gomti Nagar", "Hazratganj"],
        fee: 600,
        timings: "Evenings and weekends",
    },
];

/// Seed demo data.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or a write fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|_| SeedError::PasswordHash)?
        .to_string();

    for parent in PARENTS {
        let Some(parent_id) = insert_profile(
            &pool,
            parent.name,
            parent.email,
            parent.phone,
            parent.city,
            Role::Parent,
            &password_hash,
        )
        .await?
        else {
            tracing::info!("Parent {} already seeded, skipping", parent.email);
            continue;
        };

        for request in parent.requests {
            let subjects: Vec<String> =
                request.subjects.iter().map(|s| (*s).to_owned()).collect();
            sqlx::query(
                "INSERT INTO parent_request
                     (parent_id, student_name, board, class, subjects, locality, preferred_timings)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(parent_id)
            .bind(request.student_name)
            .bind(request.board)
            .bind(request.class)
            .bind(&subjects)
            .bind(request.locality)
            .bind(request.preferred_timings)
            .execute(&pool)
            .await?;
        }

        tracing::info!(
            "Seeded parent {} with {} request(s)",
            parent.email,
            parent.requests.len()
        );
    }

    for tutor in TUTORS {
        let Some(tutor_id) = insert_profile(
            &pool,
            tutor.name,
            tutor.email,
            tutor.phone,
            tutor.city,
            Role::Tutor,
            &password_hash,
        )
        .await?
        else {
            tracing::info!("Tutor {} already seeded, skipping", tutor.email);
            continue;
        };

        let subjects: Vec<String> = tutor.subjects.iter().map(|s| (*s).to_owned()).collect();
        let localities: Vec<String> = tutor.localities.iter().map(|s| (*s).to_owned()).collect();

        sqlx::query(
            "INSERT INTO tutor_profile
                 (tutor_id, subjects, class_min, class_max, locality_preferences,
                  fee_per_class, available_timings)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (tutor_id) DO NOTHING",
        )
        .bind(tutor_id)
        .bind(&subjects)
        .bind(tutor.class_min)
        .bind(tutor.class_max)
        .bind(&localities)
        .bind(Decimal::from(tutor.fee))
        .bind(tutor.timings)
        .execute(&pool)
        .await?;

        tracing::info!("Seeded tutor {}", tutor.email);
    }

    tracing::info!("Seeding complete. Demo accounts use password {DEMO_PASSWORD:?}");
    Ok(())
}

/// Insert a profile, returning its ID, or `None` if the email exists.
async fn insert_profile(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: &str,
    city: City,
    role: Role,
    password_hash: &str,
) -> Result<Option<i64>, SeedError> {
    let id = sqlx::query_scalar(
        "INSERT INTO profile (name, email, phone, city, role, password_hash)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(city)
    .bind(role)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}
