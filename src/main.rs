use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jwch::{
    api::{JwchClient, SessionError},
    config::JwchConfig,
    portal::{
        calendar::{fetch_locate_date, fetch_school_calendar, fetch_term_events},
        course::{fetch_semester_courses, fetch_terms},
        mark::{fetch_cet, fetch_credit, fetch_gpa, fetch_js, fetch_marks},
        notice::fetch_notices,
        room::{fetch_empty_rooms, fetch_exam_rooms, fetch_qishan_empty_rooms},
        user::{fetch_lectures, fetch_student_detail},
    },
    schema::EmptyRoomQuery,
    session_store::{SessionStore, SessionStoreLoadError},
};
use jwch_utils::{fs_json_util::read_json, student_id::Credentials};
use log::{info, warn};
use serde::Serialize;

#[derive(Parser)]
struct Opts {
    /// TOML client settings. The `QINGGUO_*` environment variables are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "ignore/credentials.json")]
    credentials: PathBuf,
    #[arg(long, default_value = "ignore/session.json")]
    session: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lists the terms the student has courses in.
    Terms,
    /// Lists the courses of a term, the latest one by default.
    Courses {
        #[arg(long)]
        term: Option<String>,
    },
    Marks,
    /// Shows the personal detail, together with CET and computer-exam results.
    Info,
    Gpa,
    /// Shows earned and required credits per category.
    Credit,
    /// Lists the lectures signed up for. Needs `lecture_url` in the config.
    Lectures,
    ExamRooms {
        #[arg(long)]
        term: String,
    },
    EmptyRooms {
        #[command(flatten)]
        query: EmptyRoomQuery,
        /// Search the Qishan teaching buildings one by one.
        #[arg(long)]
        qishan: bool,
    },
    /// Shows the school calendar, or the events of one term.
    Calendar {
        #[arg(long)]
        term_id: Option<String>,
    },
    Notices {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Shows the current teaching week. Needs `locate_date_url` in the config.
    LocateDate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    let config = match &opts.config {
        Some(path) => JwchConfig::load(path)?,
        None => JwchConfig::from_env(),
    };

    let client = match &opts.command {
        // The notice board and the date script are public.
        Command::Notices { .. } | Command::LocateDate => JwchClient::new(&config).await?,
        _ => {
            let client = logged_in_client(&opts, &config).await?;
            client.export_session()?.save(&opts.session)?;
            info!("Saved session to {:?}.", opts.session);
            client
        }
    };

    match opts.command {
        Command::Terms => print(&fetch_terms(&client).await?),
        Command::Courses { term } => {
            let terms = fetch_terms(&client).await?;
            let term = match term {
                Some(term) => term,
                None => terms.terms().first().context("No term was found")?.clone(),
            };
            print(&fetch_semester_courses(&client, &terms, &term).await?)
        }
        Command::Marks => print(&fetch_marks(&client).await?),
        Command::Info => {
            #[derive(Serialize)]
            struct Info<T, U> {
                detail: T,
                cet: U,
                js: U,
            }
            print(&Info {
                detail: fetch_student_detail(&client).await?,
                cet: fetch_cet(&client).await?,
                js: fetch_js(&client).await?,
            })
        }
        Command::Gpa => print(&fetch_gpa(&client).await?),
        Command::Credit => print(&fetch_credit(&client).await?),
        Command::Lectures => {
            let url = config
                .lecture_url
                .as_ref()
                .context("`lecture_url` is not configured")?;
            print(&fetch_lectures(&client, url).await?)
        }
        Command::ExamRooms { term } => print(&fetch_exam_rooms(&client, &term).await?),
        Command::EmptyRooms { query, qishan } => {
            let rooms = if qishan {
                fetch_qishan_empty_rooms(&client, &query).await?
            } else {
                fetch_empty_rooms(&client, &query).await?
            };
            print(&rooms)
        }
        Command::Calendar { term_id: None } => print(&fetch_school_calendar(&client).await?),
        Command::Calendar {
            term_id: Some(term_id),
        } => print(&fetch_term_events(&client, &term_id).await?),
        Command::Notices { page } => print(&fetch_notices(&client, page).await?),
        Command::LocateDate => {
            let url = config
                .locate_date_url
                .as_ref()
                .context("`locate_date_url` is not configured")?;
            print(&fetch_locate_date(&client, url).await?)
        }
    }
}

/// Reuses the saved session when it is still alive, and logs in otherwise.
async fn logged_in_client(opts: &Opts, config: &JwchConfig) -> anyhow::Result<JwchClient> {
    let credentials: Credentials = read_json(&opts.credentials)?;
    let session = match SessionStore::load(&opts.session) {
        Ok(session) => session,
        Err(SessionStoreLoadError::NotFound) => {
            info!("Session store was not found.  Creating a new one.");
            SessionStore::default()
        }
        Err(e) => return Err(e.into()),
    };
    let mut client = JwchClient::restore(config, &session).await?;
    match client.check_session().await {
        Ok(()) => {
            info!("Reusing the saved session.");
            return Ok(client);
        }
        Err(e) => match e.downcast_ref::<SessionError>() {
            Some(SessionError::EvaluationRequired) => return Err(e),
            Some(SessionError::AccountConflict { .. }) => warn!("{e}"),
            _ => info!("Session is not usable: {e:#}"),
        },
    }
    client.login(&credentials).await?;
    client.check_session().await?;
    Ok(client)
}

fn print(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
