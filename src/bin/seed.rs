use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use schoolhouse::{
    domain::{CreateApplicationRequest, CreateNoticeRequest, NoticeDraft},
    integrations::IntegrationManager,
    repository::{
        ApplicationRepository, NoticeRepository, SqliteApplicationRepository,
        SqliteNoticeRepository, SqliteStudentRepository,
    },
    service::enrollment::EnrollmentService,
};

#[derive(Parser)]
#[command(about = "Seed the schoolhouse database with sample data")]
struct Args {
    /// Database to seed
    #[arg(long, default_value = "sqlite:schoolhouse.db")]
    database_url: String,

    /// Number of notices to create
    #[arg(long, default_value_t = 12)]
    notices: usize,

    /// Number of pending applications to create
    #[arg(long, default_value_t = 5)]
    applications: usize,

    /// Accept the first application, minting a student and credentials
    #[arg(long)]
    accept_first: bool,
}

const CATEGORIES: &[&str] = &[
    "News",
    "Urgent",
    "Events",
    "Godliness",
    "Excellence",
    "Spelling",
];

const PROGRAMS: &[&str] = &[
    "Pre-School (Nursery)",
    "Pre-School (KG)",
    "Primary 1",
    "Primary 4",
    "JHS 1",
    "JHS 2",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Seeding {}...", args.database_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    println!("Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let notice_repo = SqliteNoticeRepository::new(db_pool.clone());
    let application_repo = SqliteApplicationRepository::new(db_pool.clone());

    println!("Creating {} notices...", args.notices);
    let mut rng = rand::thread_rng();
    for i in 0..args.notices {
        let category = *CATEGORIES.choose(&mut rng).unwrap();
        // Roughly a third of the notices get an expiry; a few of those are
        // already past so the expiry filter has something to hide.
        let expiry = match rng.gen_range(0..3) {
            0 => Some((Utc::now() + Duration::days(rng.gen_range(1..30))).date_naive()),
            1 if i % 4 == 0 => Some((Utc::now() - Duration::days(3)).date_naive()),
            _ => None,
        };

        notice_repo
            .create(NoticeDraft::from_request(
                CreateNoticeRequest {
                    title: Some(format!("{} update #{}", category, i + 1)),
                    message: Some(
                        "Please take note and contact the school office for details.".to_string(),
                    ),
                    posted_by: "Head Teacher".to_string(),
                    class: None,
                    category: Some(category.to_string()),
                    expiry,
                    image: None,
                },
            ))
            .await?;
    }
    println!("  Created {} notices", args.notices);

    println!("Creating {} pending applications...", args.applications);
    let mut first_application_id = None;
    for _ in 0..args.applications {
        let parent_name: String = Name().fake();
        let child_name: String = Name().fake();
        let email = format!(
            "{}@example.com",
            parent_name.to_lowercase().replace(' ', ".")
        );
        let dob = NaiveDate::from_ymd_opt(
            2012 + rng.gen_range(0..9),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )
        .unwrap();

        let application = application_repo
            .create(CreateApplicationRequest {
                child_name,
                dob,
                program: PROGRAMS.choose(&mut rng).unwrap().to_string(),
                parent_name,
                phone: PhoneNumber().fake(),
                email,
                address: None,
            })
            .await?;

        first_application_id.get_or_insert(application.id);
    }
    println!("  Created {} applications", args.applications);

    if args.accept_first {
        if let Some(id) = first_application_id {
            let enrollment = EnrollmentService::new(
                Arc::new(SqliteApplicationRepository::new(db_pool.clone())),
                Arc::new(SqliteStudentRepository::new(db_pool.clone())),
                Arc::new(IntegrationManager::new()),
                "EZ".to_string(),
                "Greater Accra".to_string(),
            );
            let outcome = enrollment.accept(id).await?;
            println!(
                "  Accepted application {} -> student {} (login {} / {})",
                id,
                outcome.student.id,
                outcome.application.login_email.unwrap_or_default(),
                outcome.application.login_password.unwrap_or_default()
            );
        }
    }

    println!("Done.");
    Ok(())
}
