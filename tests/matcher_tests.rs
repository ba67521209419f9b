mod common;
use common::{catalog_file, practice};
use starpass::catalog::{NeedSpec, TemplateCatalog, TemplateEntry};
use starpass::core::matcher::{partial_ratio, ratio, score};
use starpass::core::{Matcher, match_title};
use starpass::models::EventType;

fn entry(description: &str, need_id: &str) -> TemplateEntry {
    TemplateEntry {
        description: description.to_string(),
        group: None,
        initiative: "Test".to_string(),
        kind: EventType::Scrimmage,
        need_ids: vec![NeedSpec {
            id: need_id.to_string(),
            description: "Officials".to_string(),
            slots: 4,
            max_length: None,
            offset_start: 0,
            offset_end: 0,
        }],
    }
}

#[test]
fn test_exact_keyword_scores_100() {
    let file = catalog_file();
    let m = match_title("petals", practice(&file), 80);

    assert_eq!(m.keyword, "petals");
    assert_eq!(m.score, 100);
    assert!(!m.fallback);
    assert_eq!(m.template.need_ids[0].id, "2001");
}

#[test]
fn test_title_is_trimmed_and_lowercased() {
    let file = catalog_file();
    let m = match_title("   BUDS  ", practice(&file), 80);

    assert_eq!(m.keyword, "buds");
    assert_eq!(m.score, 100);
}

#[test]
fn test_keyword_inside_longer_title_matches() {
    let file = catalog_file();
    let m = match_title("Juniors Practice - Petals", practice(&file), 80);

    assert_eq!(m.keyword, "petals");
    assert!(!m.fallback);
}

#[test]
fn test_specific_keyword_declared_first_wins_tie() {
    // Both "dh: game 1" and "petals" are fully contained in the title.
    let file = catalog_file();
    let m = match_title("DH: Game 1 - Petals", practice(&file), 80);

    assert_eq!(m.keyword, "dh: game 1");
    assert_eq!(m.template.need_ids.len(), 2);
}

#[test]
fn test_tie_break_follows_declaration_order() {
    let first = TemplateCatalog::new(
        "ties",
        vec![
            ("scrimmage a".into(), entry("A", "1")),
            ("scrimmage b".into(), entry("B", "2")),
            ("default".into(), entry("Default", "")),
        ],
    )
    .expect("valid catalog");
    let reversed = TemplateCatalog::new(
        "ties",
        vec![
            ("scrimmage b".into(), entry("B", "2")),
            ("scrimmage a".into(), entry("A", "1")),
            ("default".into(), entry("Default", "")),
        ],
    )
    .expect("valid catalog");

    assert_eq!(match_title("Scrimmage", &first, 80).keyword, "scrimmage a");
    assert_eq!(match_title("Scrimmage", &reversed, 80).keyword, "scrimmage b");
}

#[test]
fn test_unrelated_title_falls_back_to_default() {
    let file = catalog_file();
    let m = match_title("zzzz qqqq xxxx", practice(&file), 80);

    assert_eq!(m.keyword, "default");
    assert!(m.fallback);
    assert!(m.score < 80);
    assert!(m.template.need_ids[0].id.is_empty());
}

#[test]
fn test_below_threshold_falls_back_but_keeps_best_score() {
    let file = catalog_file();
    let matcher = Matcher::new(practice(&file), 90);
    let m = matcher.match_title("Pedals");

    assert!(m.fallback);
    assert_eq!(m.keyword, "default");
    assert_eq!(m.score, 83);

    // Same title is accepted with a lower threshold.
    let m = match_title("Pedals", practice(&file), 80);
    assert_eq!(m.keyword, "petals");
    assert!(!m.fallback);
}

#[test]
fn test_empty_title_uses_default() {
    let file = catalog_file();
    let m = match_title("   ", practice(&file), 0);

    assert!(m.fallback);
    assert_eq!(m.keyword, "default");
}

#[test]
fn test_default_keyword_is_never_scored() {
    let file = catalog_file();
    let m = match_title("Default", practice(&file), 80);

    assert!(m.fallback);
    assert_eq!(m.keyword, "default");
    assert!(m.score < 80);
}

#[test]
fn test_matching_is_deterministic() {
    let file = catalog_file();
    let matcher = Matcher::new(practice(&file), 80);

    for title in ["DH: Game 1", "Buds Practice", "Team Social"] {
        let a = matcher.match_title(title);
        let b = matcher.match_title(title);
        assert_eq!(a.keyword, b.keyword);
        assert_eq!(a.score, b.score);
        assert_eq!(a.fallback, b.fallback);
    }
}

#[test]
fn test_score_helpers() {
    assert_eq!(ratio("abc", "abd"), 67);
    assert_eq!(ratio("", ""), 0);
    assert_eq!(partial_ratio("dh: game 1 - petals", "petals"), 100);
    assert_eq!(partial_ratio("petals", "dh: game 1 - petals"), 100);
    assert_eq!(partial_ratio("", "petals"), 0);
    assert_eq!(score("buds", "buds"), 100);
}

#[test]
fn test_exact_title_beats_earlier_contained_keyword() {
    let catalog = TemplateCatalog::new(
        "games",
        vec![
            ("game".into(), entry("Any game", "10")),
            ("game 1".into(), entry("First game", "11")),
            ("default".into(), entry("Default", "")),
        ],
    )
    .expect("valid catalog");

    let m = match_title("Game 1", &catalog, 80);
    assert_eq!(m.keyword, "game 1");
    assert_eq!(m.score, 100);
    assert!(!m.fallback);
    assert_eq!(m.template.need_ids[0].id, "11");

    // A longer title still goes to the first keyword it contains.
    assert_eq!(match_title("Game 1 - Petals", &catalog, 80).keyword, "game");
}
