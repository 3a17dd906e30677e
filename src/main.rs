//! Breakwell CLI.
//!
//! Drives the client core from the terminal: dashboard, check-ins, break
//! execution (with a live countdown), and the music/video flows.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use breakwell::cadence;
use breakwell::config::{load_config, save_config};
use breakwell::dashboard::load_dashboard;
use breakwell::executor::BreakExecutor;
use breakwell::http::ApiClient;
use breakwell::notification::LogNotifier;
use breakwell::services::breaks::BreakService;
use breakwell::services::checkins::{
    AfternoonCheckin, CheckinService, EveningCheckin, MorningCheckin,
};
use breakwell::services::music::MusicService;
use breakwell::services::video::VideoService;
use breakwell::services::wellness::WellnessService;
use breakwell::services::TherapyOutcome;
use breakwell::session::{SessionManager, UserProfile};
use breakwell::storage::FileStore;

#[derive(Parser)]
#[command(name = "breakwell", version, about = "Wellness client for the Breakwell backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate stress, tasks, and check-in status into one view
    Dashboard,
    /// Daily check-ins
    Checkin {
        #[command(subcommand)]
        command: CheckinCommand,
    },
    /// Break schedule and execution
    Breaks {
        #[command(subcommand)]
        command: BreaksCommand,
    },
    /// Music recommendations via the backend's Spotify integration
    Music {
        #[command(subcommand)]
        command: MusicCommand,
    },
    /// Upcoming calendar events
    Calendar {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Guided video recommendations
    Video {
        /// Current mood, free text
        #[arg(long)]
        mood: Option<String>,
        /// Use the stress-level fallback instead of AI curation
        #[arg(long)]
        no_ai: bool,
    },
    /// Local session state
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Print the active configuration
    Config {
        /// Write the resolved configuration to ~/.breakwell/config.json
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum CheckinCommand {
    /// Today's completion state and the next due check-in
    Status,
    /// Past check-ins, grouped morning/afternoon/evening
    History {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Rolling averages and trend
    Analytics {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Submit a morning check-in
    Morning {
        #[arg(long)]
        mood: u8,
        #[arg(long)]
        energy: u8,
        #[arg(long)]
        sleep_quality: u8,
        #[arg(long)]
        stress: u8,
        #[arg(long, default_value = "")]
        notes: String,
        /// Goals, one per line
        #[arg(long, default_value = "")]
        goals: String,
    },
    /// Submit an afternoon check-in
    Afternoon {
        #[arg(long)]
        mood: u8,
        #[arg(long)]
        energy: u8,
        #[arg(long)]
        stress: u8,
        #[arg(long)]
        focus: u8,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Submit an evening check-in
    Evening {
        #[arg(long)]
        mood: u8,
        #[arg(long)]
        energy: u8,
        #[arg(long)]
        stress: u8,
        #[arg(long)]
        productivity: u8,
        #[arg(long, default_value = "")]
        notes: String,
        /// Gratitude entries, one per line
        #[arg(long, default_value = "")]
        gratitude: String,
        #[arg(long)]
        goals_achieved: bool,
    },
}

#[derive(Subcommand)]
enum BreaksCommand {
    /// Fetch and print the recommended break schedule
    Schedule {
        /// Also insert the breaks into the user's calendar
        #[arg(long)]
        auto_insert: bool,
    },
    /// Start the nth recommended break and run its countdown to completion
    Run {
        /// Position in the schedule, zero-based
        index: usize,
        /// Optional feedback submitted if you complete early with Ctrl-C
        #[arg(long)]
        feedback: Option<String>,
    },
    /// Skip the nth recommended break
    Skip {
        index: usize,
        #[arg(long)]
        reason: Option<String>,
    },
    /// The break the backend currently considers active
    Current,
    /// Guided content for a break type
    Content { break_type: String },
    /// Break completion history
    History {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[derive(Subcommand)]
enum MusicCommand {
    /// Spotify connection status
    Status,
    /// Print the Spotify login URL
    Login,
    /// Mood-aware track recommendations
    Recommend {
        #[arg(long)]
        mood: Option<String>,
    },
    /// Create a playlist from the current recommendations
    Playlist {
        #[arg(long)]
        mood: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Store a session from an already-issued identity token
    SignIn {
        #[arg(long)]
        token: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Drop the stored session (preferences survive)
    SignOut,
    /// Show the stored session, if any
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config().context("loading configuration")?;
    let api = Arc::new(ApiClient::new(&config).context("building API client")?);

    let wellness = WellnessService::new(api.clone());
    let checkins = CheckinService::new(api.clone(), config.user_id.clone());
    let break_service = BreakService::new(api.clone(), config.user_id.clone());
    let music = MusicService::new(api.clone());
    let video = VideoService::new(api.clone());

    match cli.command {
        Command::Dashboard => {
            let vm = load_dashboard(&wellness, &checkins).await?;
            println!(
                "Wellness: {}/10 ({}), burnout risk {}",
                vm.stress.stress_score, vm.stress.stress_level, vm.stress.burnout_risk
            );
            println!("Mood state: {}", vm.stress.mood_state);
            for pattern in vm.stress.key_patterns.iter().take(2) {
                println!("  - {}", pattern);
            }
            for rec in vm.stress.wellness_recommendations.iter().take(3) {
                println!("  [{}] {}: {}", rec.priority, rec.action, rec.reasoning);
            }
            println!(
                "Based on {} calendar events, {} tasks{}",
                vm.calendar_event_count,
                vm.task_count,
                if vm.task_fetch_degraded {
                    " (task fetch unavailable)"
                } else {
                    ""
                }
            );
            match vm.next_checkin {
                Some(kind) => println!("Next check-in due: {}", kind),
                None => println!("No check-in due right now ({} locally)", vm.cadence_hint),
            }
        }

        Command::Checkin { command } => run_checkin(command, &checkins).await?,
        Command::Breaks { command } => run_breaks(command, break_service).await?,
        Command::Music { command } => run_music(command, &music).await?,

        Command::Calendar { days } => {
            let events = wellness.calendar_events(days).await?;
            for event in &events.events {
                println!(
                    "  {}  {} ({} attendee{})",
                    event.start.as_deref().unwrap_or("?"),
                    event.summary,
                    event.attendees,
                    if event.attendees == 1 { "" } else { "s" }
                );
            }
            println!("{} events in the next {} days", events.total, days);
        }

        Command::Video { mood, no_ai } => {
            match video.therapy(mood.as_deref(), !no_ai).await? {
                TherapyOutcome::NeedsAuth => {
                    println!("Video recommendations need backend authorization first.")
                }
                TherapyOutcome::Ready(response) => {
                    if let Some(assessment) = &response.stress_assessment {
                        println!(
                            "Stress: {}/10 ({})",
                            assessment.score, assessment.level
                        );
                    }
                    for v in &response.therapeutic_videos {
                        println!("  {} [{}] {}", v.title, v.channel, v.url);
                    }
                    println!("{} videos", response.total_videos);
                }
            }
        }

        Command::Session { command } => {
            let store = FileStore::default_location()?;
            let manager = SessionManager::new(&store);
            match command {
                SessionCommand::SignIn { token, email, name } => {
                    let user = UserProfile {
                        id: 0,
                        email,
                        name,
                        has_calendar: false,
                        has_notion: false,
                        has_spotify: false,
                        created_at: None,
                    };
                    let session = manager.sign_in(&token, &user).await?;
                    println!("Signed in as {}", session.user.email);
                }
                SessionCommand::SignOut => {
                    manager.sign_out().await?;
                    println!("Signed out.");
                }
                SessionCommand::Show => match manager.restore().await? {
                    Some(session) => {
                        println!("{} <{}>", session.user.name, session.user.email)
                    }
                    None => println!("No stored session."),
                },
            }
        }

        Command::Config { init } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if init {
                save_config(&config).context("writing configuration")?;
                println!("Written to {}", breakwell::config::config_path()?.display());
            }
        }
    }

    Ok(())
}

async fn run_checkin(command: CheckinCommand, checkins: &CheckinService) -> anyhow::Result<()> {
    match command {
        CheckinCommand::Status => {
            let status = checkins.status().await?;
            println!(
                "morning: {}  afternoon: {}  evening: {}",
                done(status.morning_completed),
                done(status.afternoon_completed),
                done(status.evening_completed)
            );
            match cadence::prompt_for(Some(&status)) {
                Some(kind) => println!("Next due: {}", kind),
                None => println!("Nothing due right now."),
            }
        }
        CheckinCommand::History { days } => {
            let history = checkins.history(days).await?;
            println!(
                "Last {} days: {} morning, {} afternoon, {} evening check-ins",
                days, history.total_morning, history.total_afternoon, history.total_evening
            );
        }
        CheckinCommand::Analytics { days } => {
            let analytics = checkins.analytics(days).await?.analytics;
            println!(
                "Averages over {} days: mood {:.1}, energy {:.1}, stress {:.1} ({} check-ins, trend {})",
                days,
                analytics.average_mood,
                analytics.average_energy,
                analytics.average_stress,
                analytics.total_checkins,
                analytics.trend
            );
        }
        CheckinCommand::Morning {
            mood,
            energy,
            sleep_quality,
            stress,
            notes,
            goals,
        } => {
            let checkin = MorningCheckin::new(mood, energy, sleep_quality, stress, &notes, &goals)?;
            let ack = checkins.submit_morning(&checkin).await?;
            report_submission("Morning", ack.success);
        }
        CheckinCommand::Afternoon {
            mood,
            energy,
            stress,
            focus,
            notes,
        } => {
            let checkin = AfternoonCheckin::new(mood, energy, stress, focus, &notes)?;
            let ack = checkins.submit_afternoon(&checkin).await?;
            report_submission("Afternoon", ack.success);
        }
        CheckinCommand::Evening {
            mood,
            energy,
            stress,
            productivity,
            notes,
            gratitude,
            goals_achieved,
        } => {
            let checkin = EveningCheckin::new(
                mood,
                energy,
                stress,
                productivity,
                &notes,
                &gratitude,
                goals_achieved,
            )?;
            let ack = checkins.submit_evening(&checkin).await?;
            report_submission("Evening", ack.success);
        }
    }
    Ok(())
}

async fn run_breaks(command: BreaksCommand, service: BreakService) -> anyhow::Result<()> {
    let executor = BreakExecutor::new(service.clone(), Arc::new(LogNotifier));

    match command {
        BreaksCommand::Schedule { auto_insert } => {
            let response = executor.load_schedule(auto_insert).await?;
            println!(
                "Stress: {}/10 ({})",
                response.stress_assessment.score, response.stress_assessment.level
            );
            for (i, (id, rec)) in executor.schedule().iter().enumerate() {
                println!(
                    "  [{}] {} for {} min at {} ({})",
                    i, rec.break_type, rec.duration_minutes, rec.time_slot, id
                );
                println!("      {}", rec.reasoning);
            }
            if auto_insert && response.auto_inserted {
                println!(
                    "{} break(s) added to your calendar.",
                    response.inserted_breaks.len()
                );
            }
        }

        BreaksCommand::Run { index, feedback } => {
            executor.load_schedule(false).await?;
            let schedule = executor.schedule();
            let Some((id, rec)) = schedule.get(index) else {
                bail!(
                    "no break at index {} ({} in schedule)",
                    index,
                    schedule.len()
                );
            };

            executor.start(id).await?;
            println!(
                "Started {} break ({} min). Ctrl-C completes it early.",
                rec.break_type, rec.duration_minutes
            );

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        executor.complete(id, feedback.as_deref()).await?;
                        println!("\nCompleted early. Great job!");
                        break;
                    }
                    _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
                        match executor.remaining_secs() {
                            Some(left) => {
                                print!("\r  {}:{:02} remaining ", left / 60, left % 60);
                                use std::io::Write;
                                std::io::stdout().flush().ok();
                            }
                            // Countdown gone: auto-completion has run.
                            None => {
                                println!("\nBreak complete.");
                                break;
                            }
                        }
                    }
                }
            }
        }

        BreaksCommand::Skip { index, reason } => {
            executor.load_schedule(false).await?;
            let schedule = executor.schedule();
            let Some((id, rec)) = schedule.get(index) else {
                bail!(
                    "no break at index {} ({} in schedule)",
                    index,
                    schedule.len()
                );
            };
            executor.skip(id, reason.as_deref()).await?;
            println!("Skipped the {} break.", rec.break_type);
        }

        BreaksCommand::Current => {
            let current = service.current().await?;
            if current.active {
                println!(
                    "{} ({} min), {}s elapsed",
                    current.title.as_deref().unwrap_or("Wellness break"),
                    current.duration_minutes.unwrap_or_default(),
                    current.elapsed_seconds.unwrap_or_default()
                );
            } else {
                println!("No break active.");
            }
        }

        BreaksCommand::Content { break_type } => {
            let content = service.content(&break_type).await?;
            println!("{} ({}s total)", content.title, content.total_duration);
            for step in &content.steps {
                println!("  {:>3}s  {}", step.seconds, step.text);
            }
        }

        BreaksCommand::History { days } => {
            let history = service.history(days).await?;
            println!(
                "{} breaks in {} days, {} completed ({}%)",
                history.stats.total_breaks,
                history.stats.days,
                history.stats.completed_breaks,
                history.stats.completion_rate
            );
        }
    }
    Ok(())
}

async fn run_music(command: MusicCommand, music: &MusicService) -> anyhow::Result<()> {
    match command {
        MusicCommand::Status => {
            let status = music.status().await?;
            if status.authenticated {
                let who = status
                    .user
                    .map(|u| u.name)
                    .unwrap_or_else(|| "unknown".to_string());
                println!("Spotify connected as {}", who);
            } else {
                println!("Spotify not connected. Run `breakwell music login`.");
            }
        }
        MusicCommand::Login => {
            let url = music.login_url().await?;
            println!("Open this URL to connect Spotify:\n{}", url);
        }
        MusicCommand::Recommend { mood } => match music.therapy(mood.as_deref()).await? {
            TherapyOutcome::NeedsAuth => {
                println!("Spotify auth required. Run `breakwell music login` first.")
            }
            TherapyOutcome::Ready(response) => {
                if let Some(goal) = &response.therapeutic_goal {
                    println!("Goal: {}", goal);
                }
                for track in &response.tracks {
                    println!("  {} - {} ({})", track.artist, track.name, track.url);
                }
                println!("{} tracks", response.total_tracks);
            }
        },
        MusicCommand::Playlist { mood } => match music.create_playlist(mood.as_deref()).await? {
            TherapyOutcome::NeedsAuth => {
                println!("Spotify auth required. Run `breakwell music login` first.")
            }
            TherapyOutcome::Ready(response) => match response.playlist {
                Some(playlist) => println!(
                    "Created \"{}\" with {} tracks: {}",
                    playlist.name, playlist.tracks, playlist.url
                ),
                None => println!("{}", response.message.unwrap_or_else(|| "Done.".to_string())),
            },
        },
    }
    Ok(())
}

fn done(flag: bool) -> &'static str {
    if flag {
        "done"
    } else {
        "pending"
    }
}

fn report_submission(kind: &str, success: bool) {
    if success {
        println!("{} check-in recorded. Thanks for taking a moment.", kind);
    } else {
        println!("{} check-in was not accepted by the backend.", kind);
    }
}
