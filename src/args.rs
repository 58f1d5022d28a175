use clap::Parser;

/// This is a ranked pairs (Tideman) tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file containing the ballots. The file is an array of
    /// ballots; each ballot is an ordered list of tie-groups of candidate names:
    /// [["A"],["B"],["C","D"]] expresses A > B > (C = D). An entry may also be
    /// {"count": n, "ranking": [...]} to carry a multiplicity.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path) A reference file containing a tab-separated pairwise margin
    /// matrix (row and column headers are candidate names, the cell at row r and
    /// column c is the signed margin of r over c). If provided, rankedpairs will
    /// check that the computed margins match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election
    /// will be written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// Hard bound on the number of tie-resolved orderings considered per round.
    /// Equal-margin majorities are resolved by enumerating every ordering among
    /// them, which grows factorially with the size of the tied groups.
    #[clap(long, value_parser)]
    pub max_orderings: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
