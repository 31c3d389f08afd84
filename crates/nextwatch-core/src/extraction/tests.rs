use super::*;

fn pairs(candidates: &[RecommendationCandidate]) -> Vec<(&str, &str)> {
    candidates
        .iter()
        .map(|c| (c.title.as_str(), c.year.as_str()))
        .collect()
}

#[test]
fn test_numbered_list() {
    let candidates = extract_candidates("1. Crash Landing on You (2019)\n2. Vincenzo (2021)");
    assert_eq!(
        candidates,
        vec![
            RecommendationCandidate::new("Crash Landing on You", "2019"),
            RecommendationCandidate::new("Vincenzo", "2021"),
        ]
    );
}

#[test]
fn test_fallback_scan_is_greedy_up_to_parenthesis() {
    let candidates = extract_candidates("Some ramble about The Glory (2022) being great");
    assert_eq!(pairs(&candidates), vec![("Some ramble about The Glory", "2022")]);
}

#[test]
fn test_quotes_are_stripped() {
    let text = "1. \"Crash Landing on You\" (2019)\n2. 'Vincenzo' (2021)\n- \"The Glory\" (2022)";
    assert_eq!(
        pairs(&extract_candidates(text)),
        vec![
            ("Crash Landing on You", "2019"),
            ("Vincenzo", "2021"),
            ("The Glory", "2022"),
        ]
    );
}

#[test]
fn test_bullets_and_tabbed_numbering() {
    let text = "\t1.\tMy Demon (2023)\n• Business Proposal (2022)\n* Vagabond (2019)\n- Doona (2023)";
    assert_eq!(
        pairs(&extract_candidates(text)),
        vec![
            ("My Demon", "2023"),
            ("Business Proposal", "2022"),
            ("Vagabond", "2019"),
            ("Doona", "2023"),
        ]
    );
}

#[test]
fn test_description_after_dash() {
    let text = "1. Vincenzo (2021) - a lawyer with mafia ties\nThe Heirs (2013) - high school romance";
    assert_eq!(
        pairs(&extract_candidates(text)),
        vec![("Vincenzo", "2021"), ("The Heirs", "2013")]
    );
}

#[test]
fn test_numbers_in_titles_survive() {
    let text = "1. Twenty-Five Twenty-One (2022)\n2. 2521 (2022)";
    assert_eq!(
        pairs(&extract_candidates(text)),
        vec![("Twenty-Five Twenty-One", "2022"), ("2521", "2022")]
    );
}

#[test]
fn test_commentary_lines_are_skipped() {
    let text = "Here are some shows you might like:\n\n1. Vincenzo (2021)\n\nEnjoy watching!";
    assert_eq!(pairs(&extract_candidates(text)), vec![("Vincenzo", "2021")]);
}

#[test]
fn test_fallback_not_used_when_cascade_matches() {
    let text = "1. Vincenzo (2021)\nI also liked The Glory (2022) a lot";
    assert_eq!(pairs(&extract_candidates(text)), vec![("Vincenzo", "2021")]);
}

#[test]
fn test_no_candidates() {
    assert!(extract_candidates("").is_empty());
    assert!(extract_candidates("I could not find anything, sorry.").is_empty());
    assert!(extract_candidates("Vincenzo (21)").is_empty());
}

#[test]
fn test_clean_title() {
    assert_eq!(clean_title("  \"Vincenzo\" ").as_deref(), Some("Vincenzo"));
    assert_eq!(clean_title("'Doona'").as_deref(), Some("Doona"));
    assert_eq!(clean_title("\"Mismatched'").as_deref(), Some("\"Mismatched'"));
    assert_eq!(clean_title("   "), None);
}

#[test]
fn test_bare_lines() {
    assert_eq!(
        pairs(&extract_candidates("Vincenzo (2021)\nThe Glory (2022)")),
        vec![("Vincenzo", "2021"), ("The Glory", "2022")]
    );
}

#[test]
fn test_fallback_scan_recovers_every_occurrence() {
    let text = "I loved Vincenzo (2021) and then The Glory (2022) was great";
    assert_eq!(
        pairs(&extract_candidates(text)),
        vec![("I loved Vincenzo", "2021"), ("and then The Glory", "2022")]
    );
}
