use log::{debug, info, warn};

use ranked_pairs::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::collections::HashMap;
use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

#[derive(Debug, Snafu)]
pub enum RpError {
    #[snafu(display("Error opening ballot file {path}"))]
    OpeningBallots {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing ballot file {path}"))]
    ParsingBallots {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error opening reference matrix {path}"))]
    OpeningMatrix {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Tabulation failed: {source}"))]
    Tabulation { source: VotingErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type RpResult<T> = Result<T, RpError>;

// One entry of the ballot file: either the bare tie-group structure or an
// object carrying a multiplicity.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BallotEntry {
    Groups(Vec<Vec<String>>),
    Weighted { count: u64, ranking: Vec<Vec<String>> },
}

impl BallotEntry {
    fn into_ranking(self) -> Ranking {
        match self {
            BallotEntry::Groups(groups) => Ranking { groups, count: 1 },
            BallotEntry::Weighted { count, ranking } => Ranking {
                groups: ranking,
                count,
            },
        }
    }
}

fn read_ballots(path: &str) -> RpResult<Vec<Ranking>> {
    let contents = fs::read_to_string(path).context(OpeningBallotsSnafu { path })?;
    parse_ballots(contents.as_str()).context(ParsingBallotsSnafu { path })
}

fn parse_ballots(contents: &str) -> Result<Vec<Ranking>, serde_json::Error> {
    let entries: Vec<BallotEntry> = serde_json::from_str(contents)?;
    Ok(entries.into_iter().map(|e| e.into_ranking()).collect())
}

// Parses a tab-separated margin matrix: the first row lists the column
// candidates, each following row starts with the row candidate. The cell at
// (row r, column c) is the signed margin of r over c.
fn read_margin_matrix(text: &str) -> RpResult<HashMap<(String, String), i64>> {
    let mut res: HashMap<(String, String), i64> = HashMap::new();
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(h) => h,
        None => return Ok(res),
    };
    let col_headers: Vec<&str> = header.split('\t').skip(1).collect();
    for line in lines {
        let mut cells = line.split('\t');
        let row_header = match cells.next() {
            Some(h) => h,
            None => continue,
        };
        for (idx, value) in cells.enumerate() {
            let col_header = match col_headers.get(idx) {
                Some(c) => *c,
                None => whatever!("margin matrix row {:?} is wider than the header", row_header),
            };
            let parsed: i64 = match value.trim().parse() {
                Result::Ok(x) => x,
                Result::Err(_) => whatever!(
                    "margin matrix cell ({:?}, {:?}) is not an integer: {:?}",
                    row_header,
                    col_header,
                    value
                ),
            };
            res.insert((row_header.to_string(), col_header.to_string()), parsed);
        }
    }
    Ok(res)
}

// Renders the computed margins as a full matrix in the same tab-separated
// layout, rows and columns sorted by candidate name.
fn margin_matrix_text(result: &VotingResult) -> String {
    let mut names: Vec<String> = Vec::new();
    let mut margins: HashMap<(String, String), i64> = HashMap::new();
    for mr in result.pairwise.iter() {
        for c in [&mr.first, &mr.second] {
            if !names.contains(c) {
                names.push(c.clone());
            }
        }
        margins.insert((mr.first.clone(), mr.second.clone()), mr.margin);
        margins.insert((mr.second.clone(), mr.first.clone()), -mr.margin);
    }
    names.sort();

    let mut out = String::new();
    for c in names.iter() {
        out.push('\t');
        out.push_str(c);
    }
    out.push('\n');
    for r in names.iter() {
        out.push_str(r);
        for c in names.iter() {
            let v = margins.get(&(r.clone(), c.clone())).copied().unwrap_or(0);
            out.push('\t');
            out.push_str(v.to_string().as_str());
        }
        out.push('\n');
    }
    out
}

fn check_reference(path: &str, result: &VotingResult) -> RpResult<()> {
    let contents = fs::read_to_string(path).context(OpeningMatrixSnafu { path })?;
    let reference = read_margin_matrix(contents.as_str())?;
    let computed_text = margin_matrix_text(result);
    let computed = read_margin_matrix(computed_text.as_str())?;

    let mut mismatches = 0;
    for ((r, c), v) in reference.iter() {
        let computed_v = computed.get(&(r.clone(), c.clone()));
        if computed_v != Some(v) {
            warn!(
                "margin ({:?}, {:?}): reference {:?}, computed {:?}",
                r, c, v, computed_v
            );
            mismatches += 1;
        }
    }
    if mismatches > 0 {
        print_diff(contents.as_str(), computed_text.as_str(), "\n");
        whatever!("{} margin cells differ from the reference matrix", mismatches);
    }
    info!("check_reference: all {:?} reference cells match", reference.len());
    Ok(())
}

fn build_summary_js(result: &VotingResult) -> JSValue {
    let tiers: Vec<JSValue> = result
        .tiers
        .iter()
        .map(|t| json!({"rank": t.rank, "candidates": t.candidates}))
        .collect();
    let margins: Vec<JSValue> = result
        .pairwise
        .iter()
        .map(|m| json!({"first": m.first, "second": m.second, "margin": m.margin}))
        .collect();
    json!({
        "winners": result.winners,
        "ranking": tiers,
        "margins": margins
    })
}

pub fn run_election(args: &Args) -> RpResult<()> {
    let ballots = read_ballots(args.input.as_str())?;
    info!(
        "run_election: processing {:?} ballots from {}",
        ballots.len(),
        args.input
    );

    let mut rules = VoteRules::DEFAULT_RULES;
    if let Some(m) = args.max_orderings {
        rules.max_orderings = m;
    }

    let result = run_ranked_pairs(&ballots, &rules, &None).context(TabulationSnafu {})?;
    debug!("run_election: result: {:?}", result);

    for tier in result.tiers.iter() {
        println!("Rank {}: {}", tier.rank, tier.candidates.join(", "));
    }

    if let Some(out) = args.out.clone() {
        let summary = build_summary_js(&result);
        let pretty = serde_json::to_string_pretty(&summary).context(SerializingSummarySnafu {})?;
        if out == "stdout" {
            println!("{}", pretty);
        } else {
            fs::write(out.as_str(), pretty.as_str())
                .context(WritingSummarySnafu { path: out.as_str() })?;
            info!("run_election: summary written to {}", out);
        }
    }

    if let Some(reference) = args.reference.clone() {
        check_reference(reference.as_str(), &result)?;
    }

    Ok(())
}

pub fn run_app(args: Args) {
    debug!("run_app: args: {:?}", args);
    if let Err(e) = run_election(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
        std::process::exit(1);
    }
}
