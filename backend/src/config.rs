use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Programs an employee may hold at most one active request for.
const DEFAULT_ONE_TIME_PROGRAMS: [&str; 5] = [
    "Yoga and Meditation",
    "Mental Health Support",
    "Awareness Programs",
    "Health Checkup Camps",
    "Gym Membership",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_origin: String,
    pub allowed_origins: Vec<String>,
    pub one_time_programs: Vec<String>,
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
            let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".to_string());
            let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
            let name = env::var("DB_NAME").unwrap_or_else(|_| "benefitdesk".to_string());
            format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
        });

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Url::parse(&frontend_origin)
            .map_err(|_| anyhow!("Invalid FRONTEND_ORIGIN value: {}", frontend_origin))?;
        let frontend_origin = frontend_origin.trim_end_matches('/').to_string();

        let mut allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5500".to_string(),
                    "http://127.0.0.1:5500".to_string(),
                ]
            });
        if !allowed_origins.contains(&frontend_origin) {
            allowed_origins.push(frontend_origin.clone());
        }

        let one_time_programs: Vec<String> = env::var("ONE_TIME_PROGRAMS")
            .map(|raw| {
                raw.split(',')
                    .map(|program| program.trim().to_string())
                    .filter(|program| !program.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                DEFAULT_ONE_TIME_PROGRAMS
                    .iter()
                    .map(|program| program.to_string())
                    .collect()
            });

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "Uploads".to_string()));
        let public_dir =
            PathBuf::from(env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()));

        Ok(Config {
            database_url,
            port,
            frontend_origin,
            allowed_origins,
            one_time_programs,
            upload_dir,
            public_dir,
        })
    }
}
