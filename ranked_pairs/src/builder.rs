pub use crate::config::*;
use crate::run_ranked_pairs;

/// A builder for collecting ballots.
///
/// ```
/// use ranked_pairs::builder::Builder;
/// use ranked_pairs::VoteRules;
/// # use ranked_pairs::VotingErrors;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?;
///
/// // One voter with Anna > Clara, two voters with Bob = Clara.
/// builder.add_ranking_simple(&["Anna".to_string(), "Clara".to_string()])?;
/// builder.add_ranking(&[vec!["Bob".to_string(), "Clara".to_string()]], 2)?;
///
/// let result = builder.tabulate()?;
/// assert_eq!(result.winners, vec!["Anna".to_string(), "Bob".to_string()]);
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: VoteRules,
    pub(crate) _candidates: Option<Vec<Candidate>>,
    pub(crate) _rankings: Vec<Ranking>,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: *rules,
            _candidates: None,
            _rankings: Vec::new(),
        })
    }

    /// Registers the candidate roster. Without a roster, candidates are
    /// inferred from the ballots; with one, unregistered names on ballots
    /// are ignored.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: self._rules,
            _candidates: Some(
                cands
                    .iter()
                    .map(|id| Candidate {
                        id: id.clone(),
                        name: None,
                    })
                    .collect(),
            ),
            _rankings: self._rankings,
        })
    }

    /// Adds one ballot ranking the given candidates in strict preference
    /// order, without ties.
    pub fn add_ranking_simple(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        let groups: Vec<Vec<String>> = candidates.iter().map(|c| vec![c.clone()]).collect();
        self.add_ranking(&groups, 1)
    }

    /// Adds a ballot given as ordered tie-groups, with the number of voters
    /// who submitted it.
    pub fn add_ranking(&mut self, groups: &[Vec<String>], count: u64) -> Result<(), VotingErrors> {
        if count == 0 {
            return Err(VotingErrors::ZeroWeight {
                ranking: self._rankings.len(),
            });
        }
        self._rankings.push(Ranking {
            groups: groups.to_vec(),
            count,
        });
        Ok(())
    }

    /// Runs the ranked pairs tabulation over the ballots collected so far.
    pub fn tabulate(&self) -> Result<VotingResult, VotingErrors> {
        run_ranked_pairs(&self._rankings, &self._rules, &self._candidates)
    }
}
