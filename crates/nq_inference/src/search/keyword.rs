use nq_core::ArticleMetadata;

use super::top_k;

/// Lowercased query words longer than two characters, stripped of
/// surrounding punctuation. Length is measured after trimming, so `to?` is
/// dropped and `eth,` becomes `eth`.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|word| word.chars().count() > 2)
        .collect()
}

/// Total number of case-insensitive occurrences of every term in `text`.
pub fn keyword_score(terms: &[String], text: &str) -> usize {
    let text = text.to_lowercase();
    terms.iter().map(|term| text.matches(term.as_str()).count()).sum()
}

/// Ranks candidates by keyword hits in their title and description. Ties,
/// including the all-zero case, keep the input order.
pub fn keyword_search(query: &str, candidates: &[ArticleMetadata], limit: usize) -> Vec<ArticleMetadata> {
    let terms = query_terms(query);
    let scores = candidates
        .iter()
        .map(|c| keyword_score(&terms, &c.search_text()))
        .collect();
    top_k(candidates, scores, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, description: &str) -> ArticleMetadata {
        ArticleMetadata {
            id: title.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            url: format!("https://news.test/{}", title),
            source: "test".to_string(),
            published_at: Utc::now(),
            content: None,
        }
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(query_terms("What happened to Bitcoin?"), vec!["what", "happened", "bitcoin"]);
        assert!(query_terms("is it ok").is_empty());
        assert_eq!(query_terms("  ETH  $100k "), vec!["eth", "100k"]);
        assert_eq!(query_terms("to? eth, ok!"), vec!["eth"]);
    }

    #[test]
    fn test_score_is_case_insensitive() {
        let terms = query_terms("BITCOIN price");
        assert_eq!(keyword_score(&terms, "Bitcoin bitcoin PRICE"), 3);
        assert_eq!(keyword_score(&query_terms("bitcoin PRICE"), "BITCOIN bitcoin price"), 3);
    }

    #[test]
    fn test_short_tokens_never_score() {
        assert_eq!(keyword_score(&query_terms("to an of ETH"), "to an of an to"), 0);
    }

    #[test]
    fn test_keyword_search_orders_by_hits() {
        let candidates = vec![
            article("Ethereum upgrade", "staking changes"),
            article("Bitcoin dips", "bitcoin miners sell"),
            article("Markets", "bitcoin and ether"),
        ];
        let ranked = keyword_search("What happened to Bitcoin?", &candidates, 5);
        let titles: Vec<_> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Bitcoin dips", "Markets", "Ethereum upgrade"]);
    }

    #[test]
    fn test_keyword_search_without_hits_keeps_order() {
        let candidates = vec![article("one", ""), article("two", ""), article("three", "")];
        let ranked = keyword_search("solana", &candidates, 2);
        let titles: Vec<_> = ranked.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }
}
