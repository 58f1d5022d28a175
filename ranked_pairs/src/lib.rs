//! Election resolution under the ranked pairs (Tideman) method: pairwise
//! margins are tallied between every two candidates, majorities are locked
//! in from the strongest margin down while skipping any that would close a
//! cycle, and the candidates nobody defeats win. Equal-margin majorities are
//! resolved by considering every possible ordering among them, and repeated
//! rounds with the winners removed produce a complete stratified ranking.

mod config;
mod graph;
mod orderings;

pub mod builder;

use log::{debug, info};

use std::collections::{HashMap, HashSet};
use std::ops::{AddAssign, SubAssign};

pub use crate::config::*;

use crate::graph::Digraph;
use crate::orderings::{total_orderings, CompleteOrderings};

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub(crate) struct CandidateId(pub(crate) u32);

/// A signed vote-count difference for an ordered candidate pair.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
pub(crate) struct Margin(pub(crate) i64);

impl Margin {
    const ZERO: Margin = Margin(0);
}

impl AddAssign for Margin {
    fn add_assign(&mut self, rhs: Margin) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Margin {
    fn sub_assign(&mut self, rhs: Margin) {
        self.0 -= rhs.0;
    }
}

// A ballot after candidate interning. Only known candidates remain and every
// group holds at least one of them.
#[derive(Eq, PartialEq, Debug, Clone)]
struct RankingInternal {
    groups: Vec<Vec<CandidateId>>,
    count: u64,
}

// Invariant: margin > 0. Only a strictly positive tally entry may become a
// majority.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub(crate) struct Majority {
    winner: CandidateId,
    loser: CandidateId,
    margin: Margin,
}

impl Majority {
    pub(crate) fn new(winner: CandidateId, loser: CandidateId, margin: Margin) -> Majority {
        debug_assert!(margin > Margin::ZERO, "majority with a non-positive margin");
        Majority {
            winner,
            loser,
            margin,
        }
    }
}

/// Runs the full ranked pairs stratification for the given ballots.
///
/// Arguments:
/// * `coll` the collection of ballots to process
/// * `rules` the rules that govern this election
/// * `candidates` the registered candidates for this election. If not
///   provided, the roster is inferred from the ballots in order of first
///   appearance.
///
/// The result covers every candidate exactly once across its tiers; an empty
/// election yields an empty result.
pub fn run_ranked_pairs(
    coll: &[Ranking],
    rules: &VoteRules,
    candidates: &Option<Vec<Candidate>>,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {:?} ballots, candidates: {:?}, rules: {:?}",
        coll.len(),
        candidates,
        rules
    );

    let cr: CheckResult = checks(coll, candidates)?;
    let all_candidates = cr.candidates;
    let rankings = cr.rankings;
    {
        let mut sorted_candidates: Vec<&(String, CandidateId)> = all_candidates.iter().collect();
        sorted_candidates.sort_by_key(|p| p.1);
        for p in sorted_candidates.iter() {
            info!("Candidate: {}: {}", p.1 .0, p.0);
        }
    }

    let candidates_by_id: HashMap<CandidateId, String> = all_candidates
        .iter()
        .map(|(cname, cid)| (*cid, cname.clone()))
        .collect();
    let all_ids: Vec<CandidateId> = all_candidates.iter().map(|(_, cid)| *cid).collect();

    // Pairwise margins over the full roster, for reporting.
    let full_tally = compute_margins(&rankings, &HashSet::new());
    let pairwise = margin_records(&full_tally, &all_candidates);

    let mut skip: HashSet<CandidateId> = HashSet::new();
    let mut tiers: Vec<RankTier> = Vec::new();
    let mut next_rank: u32 = 1;
    while skip.len() < all_ids.len() {
        let round_id = tiers.len() + 1;
        let winners = run_single_round(&all_ids, &rankings, &skip, rules)?;
        info!("Round id: {:?} winners: {:?}", round_id, winners);
        if winners.is_empty() {
            // Acyclicity guarantees a source for any non-empty candidate
            // set, so an empty round here means the loop cannot terminate.
            return Err(VotingErrors::NoConvergence);
        }
        let mut names: Vec<String> = winners
            .iter()
            .map(|cid| candidates_by_id.get(cid).unwrap().clone())
            .collect();
        names.sort();
        skip.extend(winners.iter().copied());
        next_rank += names.len() as u32;
        tiers.push(RankTier {
            rank: next_rank - names.len() as u32,
            candidates: names,
        });
    }

    let winners = tiers.first().map(|t| t.candidates.clone()).unwrap_or_default();
    Ok(VotingResult {
        winners,
        tiers,
        pairwise,
    })
}

/// One ranked pairs round over the candidates not in `skip`: the union of
/// the winner sets obtained under every possible resolution of the
/// equal-margin ties. Winners are returned sorted by candidate id.
///
/// An empty candidate set yields an empty winner set immediately.
fn run_single_round(
    all_candidates: &[CandidateId],
    rankings: &[RankingInternal],
    skip: &HashSet<CandidateId>,
    rules: &VoteRules,
) -> Result<Vec<CandidateId>, VotingErrors> {
    let candidates: Vec<CandidateId> = all_candidates
        .iter()
        .filter(|cid| !skip.contains(cid))
        .copied()
        .collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let tally = compute_margins(rankings, skip);
    let majorities = extract_majorities(&tally);
    let tiers = group_into_tiers(majorities);
    debug!(
        "run_single_round: {:?} candidates, tie tier sizes: {:?}",
        candidates.len(),
        tiers.iter().map(|t| t.len()).collect::<Vec<usize>>()
    );

    let required = total_orderings(tiers.iter().map(|t| t.len()));
    if required > rules.max_orderings as u128 {
        return Err(VotingErrors::TooManyOrderings {
            required,
            limit: rules.max_orderings,
        });
    }

    let mut winners: HashSet<CandidateId> = HashSet::new();
    for ordering in CompleteOrderings::new(&tiers) {
        let graph = build_dominance_graph(&candidates, &ordering);
        winners.extend(graph.sources());
        if winners.len() == candidates.len() {
            // The union cannot grow any further.
            break;
        }
    }

    let mut res: Vec<CandidateId> = winners.into_iter().collect();
    res.sort();
    Ok(res)
}

/// The pairwise vote margins between every two candidates named by the
/// ballots, skipped candidates excluded. Pure, and antisymmetric by
/// construction: `tally[(x, y)] == -tally[(y, x)]` for every pair present.
fn compute_margins(
    rankings: &[RankingInternal],
    skip: &HashSet<CandidateId>,
) -> HashMap<(CandidateId, CandidateId), Margin> {
    let mut tally: HashMap<(CandidateId, CandidateId), Margin> = HashMap::new();
    for ranking in rankings.iter() {
        let count = Margin(ranking.count as i64);
        for i in 0..ranking.groups.len() {
            for j in i..ranking.groups.len() {
                for &b in ranking.groups[i].iter() {
                    for &w in ranking.groups[j].iter() {
                        if b == w || skip.contains(&b) || skip.contains(&w) {
                            continue;
                        }
                        // For i == j the two directions cancel out: tied
                        // candidates yield no margin.
                        *tally.entry((b, w)).or_insert(Margin::ZERO) += count;
                        *tally.entry((w, b)).or_insert(Margin::ZERO) -= count;
                    }
                }
            }
        }
    }
    tally
}

/// Filters the tally down to strict majorities: one `Majority` per ordered
/// pair with a strictly positive margin, so at most one direction per
/// unordered pair and none for an exact tie. Sorted by descending margin,
/// then by candidate ids so that enumeration order is reproducible.
fn extract_majorities(tally: &HashMap<(CandidateId, CandidateId), Margin>) -> Vec<Majority> {
    let mut majorities: Vec<Majority> = tally
        .iter()
        .filter(|(_, margin)| **margin > Margin::ZERO)
        .map(|(&(winner, loser), &margin)| Majority::new(winner, loser, margin))
        .collect();
    majorities.sort_by_key(|m| (std::cmp::Reverse(m.margin), m.winner, m.loser));
    majorities
}

/// Groups the sorted majorities into tie tiers of identical margin,
/// strongest tier first. An empty majority set yields an empty partial
/// order.
fn group_into_tiers(majorities: Vec<Majority>) -> Vec<Vec<Majority>> {
    let mut tiers: Vec<Vec<Majority>> = Vec::new();
    for m in majorities {
        match tiers.last_mut() {
            Some(tier) if tier[0].margin == m.margin => tier.push(m),
            _ => tiers.push(vec![m]),
        }
    }
    tiers
}

/// Builds the dominance graph for one complete ordering: majorities are
/// locked in strongest first, and an edge is skipped whenever the loser
/// already reaches the winner, since inserting it would close a cycle. The
/// graph is acyclic at every step.
fn build_dominance_graph(
    candidates: &[CandidateId],
    ordering: &[Majority],
) -> Digraph<CandidateId> {
    let mut graph: Digraph<CandidateId> = Digraph::new();
    for &c in candidates.iter() {
        graph.add_node(c);
    }
    for m in ordering.iter() {
        if !graph.can_reach(m.loser, m.winner) {
            graph.add_edge(m.winner, m.loser);
        }
    }
    graph
}

/// Signed margins over the full roster, one record per unordered pair,
/// reported with the lexicographically smaller id first. Pairs that no
/// ballot compares are reported with a zero margin.
fn margin_records(
    tally: &HashMap<(CandidateId, CandidateId), Margin>,
    candidates: &[(String, CandidateId)],
) -> Vec<MarginRecord> {
    let mut names: Vec<(String, CandidateId)> = candidates.to_vec();
    names.sort();
    let mut records: Vec<MarginRecord> = Vec::new();
    for (i, (first, fid)) in names.iter().enumerate() {
        for (second, sid) in names[i + 1..].iter() {
            let margin = tally.get(&(*fid, *sid)).copied().unwrap_or(Margin::ZERO);
            records.push(MarginRecord {
                first: first.clone(),
                second: second.clone(),
                margin: margin.0,
            });
        }
    }
    records
}

struct CheckResult {
    rankings: Vec<RankingInternal>,
    candidates: Vec<(String, CandidateId)>,
}

// Validates the ballots and interns candidate names. Candidates are returned
// in registration order, or in order of first appearance when no roster was
// provided. With a roster, unregistered names are dropped from the ballots.
fn checks(
    coll: &[Ranking],
    reg_candidates: &Option<Vec<Candidate>>,
) -> Result<CheckResult, VotingErrors> {
    debug!("checks: coll size: {:?}", coll.len());
    let mut names: Vec<(String, CandidateId)> = Vec::new();
    let mut ids: HashMap<String, CandidateId> = HashMap::new();
    if let Some(cands) = reg_candidates {
        for c in cands.iter() {
            if !ids.contains_key(&c.id) {
                let cid = CandidateId((ids.len() + 1) as u32);
                ids.insert(c.id.clone(), cid);
                names.push((c.id.clone(), cid));
            }
        }
    }
    let infer = reg_candidates.is_none();

    let mut rankings: Vec<RankingInternal> = Vec::new();
    for (idx, r) in coll.iter().enumerate() {
        if r.count == 0 {
            return Err(VotingErrors::ZeroWeight { ranking: idx });
        }
        let mut seen: HashSet<CandidateId> = HashSet::new();
        let mut groups: Vec<Vec<CandidateId>> = Vec::new();
        for group in r.groups.iter() {
            let mut g: Vec<CandidateId> = Vec::new();
            for name in group.iter() {
                let cid = match ids.get(name) {
                    Some(cid) => *cid,
                    None if infer => {
                        let cid = CandidateId((ids.len() + 1) as u32);
                        ids.insert(name.clone(), cid);
                        names.push((name.clone(), cid));
                        cid
                    }
                    None => {
                        debug!(
                            "checks: ballot {:?}: dropping unregistered candidate {:?}",
                            idx, name
                        );
                        continue;
                    }
                };
                if !seen.insert(cid) {
                    return Err(VotingErrors::DuplicateCandidate {
                        ranking: idx,
                        candidate: name.clone(),
                    });
                }
                g.push(cid);
            }
            if !g.is_empty() {
                groups.push(g);
            }
        }
        if groups.is_empty() {
            return Err(VotingErrors::EmptyRanking { ranking: idx });
        }
        rankings.push(RankingInternal {
            groups,
            count: r.count,
        });
    }

    debug!(
        "checks: ballots: {:?}  candidates: {:?}",
        rankings.len(),
        names.len()
    );
    Ok(CheckResult {
        rankings,
        candidates: names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(groups: &[&[&str]], count: u64) -> Ranking {
        Ranking {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
            count,
        }
    }

    fn tier(rank: u32, candidates: &[&str]) -> RankTier {
        RankTier {
            rank,
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
        }
    }

    // The nine equally weighted ballots from T.M. Zavist, T.N. Tideman 1988,
    // Social Choice and Welfare, page 170.
    fn zavist_tideman_ballots() -> Vec<Ranking> {
        let orders: Vec<Vec<&str>> = vec![
            vec!["d", "e", "b", "b'", "f", "a", "c"],
            vec!["e", "b", "b'", "f", "c", "a", "d"],
            vec!["b", "b'", "f", "c", "a", "d", "e"],
            vec!["c", "f", "a", "d", "e", "b", "b'"],
            vec!["d", "c", "a", "e", "b", "b'", "f"],
            vec!["a", "b'", "b", "c", "d", "e", "f"],
            vec!["a", "c", "b'", "b", "d", "e", "f"],
            vec!["f", "e", "a", "c", "b'", "b", "d"],
            vec!["f", "e", "b'", "b", "d", "c", "a"],
        ];
        orders
            .iter()
            .map(|o| Ranking {
                groups: o.iter().map(|c| vec![c.to_string()]).collect(),
                count: 1,
            })
            .collect()
    }

    fn margin_of(
        tally: &HashMap<(CandidateId, CandidateId), Margin>,
        ids: &HashMap<String, CandidateId>,
        x: &str,
        y: &str,
    ) -> i64 {
        tally
            .get(&(ids[x], ids[y]))
            .copied()
            .unwrap_or(Margin::ZERO)
            .0
    }

    fn interned(coll: &[Ranking]) -> (Vec<RankingInternal>, HashMap<String, CandidateId>) {
        let cr = checks(coll, &None).unwrap();
        let ids = cr.candidates.into_iter().collect();
        (cr.rankings, ids)
    }

    #[test]
    fn empty_election_yields_empty_stratification() {
        let res = run_ranked_pairs(&[], &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(res.tiers, Vec::new());
        assert_eq!(res.winners, Vec::<String>::new());
    }

    #[test]
    fn zero_margin_pair_ties_for_first() {
        // One voter A > B, one voter B > A: no majority either way.
        let ballots = vec![ranking(&[&["A"], &["B"]], 1), ranking(&[&["B"], &["A"]], 1)];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(res.tiers, vec![tier(1, &["A", "B"])]);
        assert_eq!(
            res.pairwise,
            vec![MarginRecord {
                first: "A".to_string(),
                second: "B".to_string(),
                margin: 0
            }]
        );
    }

    #[test]
    fn in_ballot_tie_produces_no_majority_between_tied() {
        // A = B > C: both A and C, and B and C, get a majority; A and B tie.
        let ballots = vec![ranking(&[&["A", "B"], &["C"]], 1)];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(res.tiers, vec![tier(1, &["A", "B"]), tier(3, &["C"])]);
        assert_eq!(res.winners, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn three_cycle_ties_all_candidates() {
        let ballots = vec![
            ranking(&[&["A"], &["B"], &["C"]], 1),
            ranking(&[&["B"], &["C"], &["A"]], 1),
            ranking(&[&["C"], &["A"], &["B"]], 1),
        ];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(res.tiers, vec![tier(1, &["A", "B", "C"])]);
    }

    #[test]
    fn weakest_cycle_edge_is_skipped() {
        // Margins: B>C by 5, A>B by 3, C>A by 1. The C -> A majority closes
        // the cycle and is dropped, so A wins outright.
        let ballots = vec![
            ranking(&[&["A"], &["B"], &["C"]], 4),
            ranking(&[&["B"], &["C"], &["A"]], 3),
            ranking(&[&["C"], &["A"], &["B"]], 2),
        ];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(
            res.tiers,
            vec![tier(1, &["A"]), tier(2, &["B"]), tier(3, &["C"])]
        );
        assert_eq!(res.winners, vec!["A".to_string()]);
    }

    #[test]
    fn margins_are_antisymmetric() {
        let (rankings, _) = interned(&zavist_tideman_ballots());
        let tally = compute_margins(&rankings, &HashSet::new());
        for (&(x, y), &m) in tally.iter() {
            assert_eq!(tally[&(y, x)], Margin(-m.0));
        }
    }

    #[test]
    fn majorities_are_well_formed() {
        let (rankings, _) = interned(&zavist_tideman_ballots());
        let tally = compute_margins(&rankings, &HashSet::new());
        let majorities = extract_majorities(&tally);
        let mut pairs: HashSet<(CandidateId, CandidateId)> = HashSet::new();
        for m in majorities.iter() {
            assert!(m.margin > Margin::ZERO);
            assert!(pairs.insert((m.winner, m.loser)), "duplicate pair");
            assert!(
                !pairs.contains(&(m.loser, m.winner)),
                "both directions materialized"
            );
        }
    }

    #[test]
    fn ballot_order_does_not_matter() {
        let ballots = zavist_tideman_ballots();
        let mut reversed = ballots.clone();
        reversed.reverse();
        let (rankings_a, ids_a) = interned(&ballots);
        let (rankings_b, ids_b) = interned(&reversed);
        let tally_a = compute_margins(&rankings_a, &HashSet::new());
        let tally_b = compute_margins(&rankings_b, &HashSet::new());
        for x in ["a", "b", "b'", "c", "d", "e", "f"] {
            for y in ["a", "b", "b'", "c", "d", "e", "f"] {
                assert_eq!(
                    margin_of(&tally_a, &ids_a, x, y),
                    margin_of(&tally_b, &ids_b, x, y)
                );
            }
        }
    }

    #[test]
    fn dominance_graphs_stay_acyclic() {
        let (rankings, _) = interned(&zavist_tideman_ballots());
        let candidates: Vec<CandidateId> = (1..=7).map(CandidateId).collect();
        let tally = compute_margins(&rankings, &HashSet::new());
        let tiers = group_into_tiers(extract_majorities(&tally));
        for ordering in CompleteOrderings::new(&tiers).take(50) {
            let graph = build_dominance_graph(&candidates, &ordering);
            assert!(graph.is_acyclic());
            assert!(!graph.sources().is_empty());
        }
    }

    #[test]
    fn zavist_tideman_margin_matrix() {
        let (rankings, ids) = interned(&zavist_tideman_ballots());
        let tally = compute_margins(&rankings, &HashSet::new());
        // The published matrix: every pair has margin 1 or 3 one way.
        let expected: Vec<(&str, &str, i64)> = vec![
            ("a", "b", 1),
            ("a", "b'", 1),
            ("c", "a", 1),
            ("a", "d", 3),
            ("a", "e", 1),
            ("f", "a", 3),
            ("b", "b'", 1),
            ("b", "c", 1),
            ("b", "d", 3),
            ("e", "b", 3),
            ("b", "f", 3),
            ("b'", "c", 1),
            ("b'", "d", 3),
            ("e", "b'", 3),
            ("b'", "f", 3),
            ("c", "d", 3),
            ("c", "e", 1),
            ("f", "c", 1),
            ("d", "e", 3),
            ("f", "d", 1),
            ("e", "f", 1),
        ];
        assert_eq!(expected.len(), 21);
        for (x, y, m) in expected {
            assert_eq!(margin_of(&tally, &ids, x, y), m, "margin({}, {})", x, y);
            assert_eq!(margin_of(&tally, &ids, y, x), -m, "margin({}, {})", y, x);
        }
    }

    #[test]
    fn zavist_tideman_full_enumeration_is_refused() {
        // The data has a tie tier of 10 majorities (margin 3) and one of 11
        // (margin 1): 10! * 11! complete orderings. The engine must refuse
        // explicitly rather than truncate.
        let ballots = zavist_tideman_ballots();
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None);
        assert_eq!(
            res,
            Err(VotingErrors::TooManyOrderings {
                required: 144_850_083_840_000,
                limit: VoteRules::DEFAULT_RULES.max_orderings,
            })
        );
    }

    #[test]
    fn zavist_tideman_restricted_stratification() {
        // Restricted to {a, c, d, e} the tie tiers have 3 majorities each,
        // 36 orderings per round, which is exhaustively enumerable.
        let ballots: Vec<Ranking> = zavist_tideman_ballots()
            .iter()
            .map(|r| Ranking {
                groups: r
                    .groups
                    .iter()
                    .map(|g| {
                        g.iter()
                            .filter(|c| ["a", "c", "d", "e"].contains(&c.as_str()))
                            .cloned()
                            .collect::<Vec<String>>()
                    })
                    .filter(|g: &Vec<String>| !g.is_empty())
                    .collect(),
                count: r.count,
            })
            .collect();
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        assert_eq!(
            res.tiers,
            vec![
                tier(1, &["c"]),
                tier(2, &["a"]),
                tier(3, &["d"]),
                tier(4, &["e"]),
            ]
        );
    }

    #[test]
    fn skipped_candidates_are_excluded_from_the_round() {
        let (rankings, ids) = interned(&zavist_tideman_ballots());
        let all: Vec<CandidateId> = (1..=7).map(CandidateId).collect();
        let skip: HashSet<CandidateId> = [ids["b"], ids["b'"], ids["f"]].into_iter().collect();
        let winners =
            run_single_round(&all, &rankings, &skip, &VoteRules::DEFAULT_RULES).unwrap();
        assert_eq!(winners, vec![ids["c"]]);
    }

    #[test]
    fn isolated_candidate_ties_for_first() {
        // Z is registered but never ranked: no majority involves it, so it
        // ties with the round winner.
        let roster = Some(
            ["A", "B", "Z"]
                .iter()
                .map(|id| Candidate {
                    id: id.to_string(),
                    name: None,
                })
                .collect::<Vec<Candidate>>(),
        );
        let ballots = vec![ranking(&[&["A"], &["B"]], 1)];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &roster).unwrap();
        assert_eq!(res.tiers, vec![tier(1, &["A", "Z"]), tier(3, &["B"])]);
    }

    #[test]
    fn ordering_limit_is_an_explicit_error() {
        // Four disjoint majorities of margin 1 make a single tie tier of
        // four: 24 orderings.
        let ballots = vec![
            ranking(&[&["A"], &["B"]], 1),
            ranking(&[&["C"], &["D"]], 1),
            ranking(&[&["E"], &["F"]], 1),
            ranking(&[&["G"], &["H"]], 1),
        ];
        let rules = VoteRules { max_orderings: 10 };
        let res = run_ranked_pairs(&ballots, &rules, &None);
        assert_eq!(
            res,
            Err(VotingErrors::TooManyOrderings {
                required: 24,
                limit: 10
            })
        );
        let permissive = VoteRules { max_orderings: 24 };
        assert!(run_ranked_pairs(&ballots, &permissive, &None).is_ok());
    }

    #[test]
    fn malformed_ballots_are_rejected() {
        let empty = vec![ranking(&[], 1)];
        assert_eq!(
            run_ranked_pairs(&empty, &VoteRules::DEFAULT_RULES, &None),
            Err(VotingErrors::EmptyRanking { ranking: 0 })
        );

        let zero = vec![ranking(&[&["A"], &["B"]], 0)];
        assert_eq!(
            run_ranked_pairs(&zero, &VoteRules::DEFAULT_RULES, &None),
            Err(VotingErrors::ZeroWeight { ranking: 0 })
        );

        let duplicated = vec![ranking(&[&["A"], &["B", "A"]], 1)];
        assert_eq!(
            run_ranked_pairs(&duplicated, &VoteRules::DEFAULT_RULES, &None),
            Err(VotingErrors::DuplicateCandidate {
                ranking: 0,
                candidate: "A".to_string()
            })
        );
    }

    #[test]
    fn stratification_covers_every_candidate_once() {
        let ballots = vec![
            ranking(&[&["A"], &["B"], &["C"]], 4),
            ranking(&[&["B"], &["C"], &["A"]], 3),
            ranking(&[&["C", "D"], &["A"]], 2),
        ];
        let res = run_ranked_pairs(&ballots, &VoteRules::DEFAULT_RULES, &None).unwrap();
        let mut all: Vec<String> = res
            .tiers
            .iter()
            .flat_map(|t| t.candidates.iter().cloned())
            .collect();
        all.sort();
        let distinct: HashSet<String> = all.iter().cloned().collect();
        assert_eq!(all.len(), distinct.len());
        assert_eq!(
            all,
            vec!["A", "B", "C", "D"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<String>>()
        );
        // Rank numbering: 1 + sizes of the preceding tiers.
        let mut expected_rank = 1;
        for t in res.tiers.iter() {
            assert_eq!(t.rank, expected_rank);
            assert!(!t.candidates.is_empty());
            expected_rank += t.candidates.len() as u32;
        }
    }
}
