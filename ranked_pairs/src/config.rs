// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A candidate, also known as an alternative in the social choice
/// literature. Identity is carried by `id`; `name` is an optional
/// human-facing label.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub name: Option<String>,
}

/// A ballot: an ordered sequence of tie-groups of candidate ids, together
/// with the number of voters who submitted this exact ballot.
///
/// `groups = [["A"], ["B"], ["C", "D"]]` expresses A > B > (C = D).
/// A candidate may appear in at most one group. A candidate omitted from the
/// ballot is simply never compared against the others by this ballot.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ranking {
    pub groups: Vec<Vec<String>>,
    pub count: u64,
}

// ******** Output data structures *********

/// The signed pairwise margin for one unordered candidate pair, reported
/// once with the lexicographically smaller id in `first`. A positive margin
/// means `first` is preferred to `second` by that many votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MarginRecord {
    pub first: String,
    pub second: String,
    pub margin: i64,
}

/// One tier of the stratified ranking. `rank` is 1 for the strongest tier
/// and grows by the size of each preceding tier.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankTier {
    pub rank: u32,
    pub candidates: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    /// The first tier: the overall winner, or the tied winner set.
    pub winners: Vec<String>,
    /// All tiers, strongest first. The tiers cover every candidate exactly
    /// once.
    pub tiers: Vec<RankTier>,
    /// Pairwise margins over the full candidate roster, before any
    /// stratification round removed anyone.
    pub pairwise: Vec<MarginRecord>,
}

/// Errors that prevent the tabulation from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// A ballot referenced no candidates at all. `ranking` is the index of
    /// the offending ballot in the input collection.
    EmptyRanking { ranking: usize },
    /// A ballot carried a zero voter count.
    ZeroWeight { ranking: usize },
    /// A candidate appeared in more than one tie-group of a single ballot.
    DuplicateCandidate { ranking: usize, candidate: String },
    /// Resolving the margin ties of one round would take more complete
    /// orderings than the rules allow. This is a recoverable signal: no
    /// partial answer is produced. `required` saturates at `u128::MAX`.
    TooManyOrderings { required: u128, limit: u64 },
    /// The stratification loop stopped making progress. This is an internal
    /// invariant violation, not a property of the ballots.
    NoConvergence,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::EmptyRanking { ranking } => {
                write!(f, "ballot {} references no candidates", ranking)
            }
            VotingErrors::ZeroWeight { ranking } => {
                write!(f, "ballot {} carries a zero voter count", ranking)
            }
            VotingErrors::DuplicateCandidate { ranking, candidate } => {
                write!(
                    f,
                    "ballot {} ranks candidate {} more than once",
                    ranking, candidate
                )
            }
            VotingErrors::TooManyOrderings { required, limit } => {
                write!(
                    f,
                    "resolving the margin ties requires {} complete orderings, above the configured limit of {}",
                    required, limit
                )
            }
            VotingErrors::NoConvergence => {
                write!(f, "the stratification loop did not converge")
            }
        }
    }
}

// ********* Configuration **********

/// The rules that govern a tabulation.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VoteRules {
    /// Hard bound on the number of complete orderings enumerated in a single
    /// round. A tie tier of k equal-margin majorities contributes a factor
    /// of k!, so unconstrained elections can blow up quickly. When the bound
    /// would be exceeded, the engine reports
    /// [VotingErrors::TooManyOrderings] before enumerating anything rather
    /// than truncating the search.
    pub max_orderings: u64,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        max_orderings: 1_000_000,
    };
}
