/// Check a file name against a whitespace-separated search query.
///
/// Every token must appear somewhere in the name; order does not matter and
/// letter case is ignored. A query with no tokens matches everything.
pub fn matches_search(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    query
        .split_whitespace()
        .all(|token| name.contains(&token.to_lowercase()))
}
