use crate::infra::{InMemoryRosterRepository, InMemoryScoreRepository};
use clap::Args;
use courier_scoreboard::error::AppError;
use courier_scoreboard::workflows::scoring::{
    decode_run, score_run, MatchScoringService, ScoreMatchRequest, ScoringServiceError,
    SessionLogImporter,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreLogArgs {
    /// Raw session log text to score
    #[arg(long, required_unless_present = "file", conflicts_with = "file")]
    pub(crate) log: Option<String>,
    /// File containing one raw session log per line
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional session log CSV export to import on top of the built-in logs
    #[arg(long)]
    pub(crate) sessions: Option<PathBuf>,
}

/// Decode and score raw logs without touching any store. Useful when an
/// instructor wants to sanity-check a device export line.
pub(crate) fn run_score_log(args: ScoreLogArgs) -> Result<(), AppError> {
    let logs: Vec<String> = match (args.log, args.file) {
        (Some(log), _) => vec![log],
        (None, Some(path)) => std::fs::read_to_string(path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        (None, None) => Vec::new(),
    };

    for raw in &logs {
        let record = decode_run(raw).map_err(ScoringServiceError::Format)?;
        let breakdown = score_run(&record);
        println!(
            "route stops: {:>2}  deliveries: {:>2}  profit: {:>6}  satisfaction: {:>3}%  bonus: {:>3}",
            record.route.len(),
            record.deliveries.len(),
            breakdown.profit,
            breakdown.satisfaction_percent,
            breakdown.bonus,
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let roster = Arc::new(InMemoryRosterRepository::default());
    let scores = Arc::new(InMemoryScoreRepository::default());
    let player_refs = seed_sample_roster(&roster);
    seed_sample_attempts(&roster);

    if let Some(path) = args.sessions {
        let outcome = SessionLogImporter::from_path(path, roster.as_ref())?;
        println!(
            "imported {} session logs ({} skipped)",
            outcome.imported, outcome.skipped
        );
    }

    let service = MatchScoringService::new(roster, scores);

    println!("== scored matches ==");
    for player_ref in &player_refs {
        for match_number in 1..=MAX_DEMO_MATCHES {
            let request = ScoreMatchRequest {
                player_ref: player_ref.clone(),
                class_code: DEMO_CLASS.to_string(),
                match_number,
            };
            match service.process(&request) {
                Ok(view) => println!(
                    "{} match {}: profit {:>6}, satisfaction {:>3}%, bonus {:>3}",
                    view.player_ref,
                    view.match_number,
                    view.profit,
                    view.satisfaction_percent,
                    view.bonus,
                ),
                Err(ScoringServiceError::AttemptNotFound { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    println!("== class summaries ==");
    for player_ref in &player_refs {
        let summary = service.summary(player_ref, DEMO_CLASS)?;
        println!(
            "{}: {} matches, average score {}",
            summary.player_ref, summary.total_matches, summary.avg_score
        );
    }

    Ok(())
}

pub(crate) const DEMO_CLASS: &str = "LOG-101";
const MAX_DEMO_MATCHES: u32 = 5;

pub(crate) fn seed_sample_roster(roster: &InMemoryRosterRepository) -> Vec<String> {
    roster.register_classroom(DEMO_CLASS, "Logistics Fundamentals");
    let refs = ["unit-01", "unit-02", "unit-03"];
    let names = ["Ava Reyes", "Tom Okafor", "Mina Castellanos"];
    for (external_ref, name) in refs.iter().zip(names) {
        roster.register_player(external_ref, name);
    }
    refs.iter().map(|r| r.to_string()).collect()
}

// Built-in device logs so the demo works without an export file.
fn seed_sample_attempts(roster: &InMemoryRosterRepository) {
    use chrono::Utc;
    use courier_scoreboard::workflows::scoring::{MatchAttempt, RosterRepository};

    let samples = [
        ("unit-01", 1, "v1|1,2|1,pkg,true,std,500;2,pkg,false,std,300|1|dev-01|2026-03-02T10:15:00Z|9f3a"),
        ("unit-01", 2, "v1|3,4|3,pkg,true,std,450;3,pkg,true,std,200|2|dev-01|2026-03-02T10:40:00Z|71bc"),
        ("unit-02", 1, "v1|5|5,pkg,true,std,700|1|dev-02|2026-03-02T10:18:00Z|0d2e"),
        ("unit-03", 1, "v1||0,pkg,false,std,150|0|dev-03|2026-03-02T10:22:00Z|c481"),
    ];

    for (external_ref, match_number, raw_log) in samples {
        let player = roster
            .find_player(external_ref)
            .expect("roster available")
            .expect("player seeded");
        let classroom = roster
            .find_classroom(DEMO_CLASS)
            .expect("roster available")
            .expect("class seeded");
        roster
            .record_attempt(MatchAttempt {
                player: player.id,
                classroom: classroom.id,
                match_number,
                raw_log: raw_log.to_string(),
                recorded_at: Utc::now(),
            })
            .expect("attempt stored");
    }
}
