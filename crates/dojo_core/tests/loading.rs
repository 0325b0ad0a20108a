use std::fs;

use dojo_core::{Catalog, Config, Error};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::compiled_default());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dojo.toml");
    fs::write(
        &path,
        "[links]\nexternal_rel = \"noopener noreferrer\"\n\n[quiz]\ndefault_pass_score = 80\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.links.external_rel, "noopener noreferrer");
    assert_eq!(config.links.external_target, "_blank");
    assert_eq!(config.quiz.default_pass_score, 80);
}

#[test]
fn malformed_config_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dojo.toml");
    fs::write(&path, "[quiz\ndefault_pass_score = ").unwrap();

    match Config::load(&path) {
        Err(Error::ConfigParse { path: got, .. }) => assert_eq!(got, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_catalog_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Catalog::load(&dir.path().join("catalog.json"));
    assert!(matches!(result, Err(Error::CatalogRead { .. })));
}

#[test]
fn malformed_catalog_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"{"lessons": [{"id": 1}]}"#).unwrap();

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, Error::CatalogParse { .. }));
    assert!(err.to_string().contains("catalog.json"));
}

#[test]
fn catalog_from_disk_feeds_renderer_and_quiz() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r###"{
            "lessons": [{
                "id": "l1", "style_id": "s", "belt_id": "b", "slug": "rei",
                "title": "Rei", "category": "dojo_rules",
                "content_md": "## Bowing\nBow when entering the [dojo](/culture#dojo).\n\n- Heels together\n- Eyes forward"
            }],
            "quizzes": [{"id": "q", "title": "Etiquette", "pass_score": 50}],
            "questions": [
                {"id": "q1", "quiz_id": "q", "prompt": "When do you bow?",
                 "options": ["Never", "Entering the dojo"], "correct_option_index": 1},
                {"id": "q2", "quiz_id": "q", "prompt": "Say?",
                 "options": ["Oss", "Hello"], "correct_option_index": 0}
            ]
        }"###,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let lesson = catalog.lesson_by_slug("rei").unwrap();
    let html = dojo_core::blocks_to_html(&lesson.body(), &Config::compiled_default());
    assert_eq!(
        html,
        "<div class=\"space-y-3\">\n\
         <h2>Bowing</h2>\n\
         <p>Bow when entering the <a href=\"/culture#dojo\">dojo</a>.</p>\n\
         <ul>\n<li>Heels together</li>\n<li>Eyes forward</li>\n</ul>\n\
         </div>\n"
    );

    let mut session = catalog.start_quiz("q").unwrap();
    assert!(session.select("q1", 1));
    assert!(session.submit());
    let result = session.result().unwrap();
    assert_eq!((result.score, result.passed), (50, true));
}

#[test]
fn lesson_page_from_disk_lists_sources() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{
            "lessons": [{
                "id": "l1", "style_id": "s", "belt_id": "b", "slug": "heian-shodan",
                "title": "Heian Shodan", "category": "kata", "status": "published",
                "steps": ["Yoi", "Hidari gedan barai"],
                "safety_warnings": ["Warm up first"],
                "sources_json": [{"title": "Karate-do Kyohan", "url": "https://ex.com/kyohan"}]
            }]
        }"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let lesson = catalog.lesson_by_slug("heian-shodan").unwrap();
    let html = dojo_core::lesson_to_html(lesson, &Config::compiled_default());
    assert!(html.contains("<ol>\n<li>Yoi</li>\n<li>Hidari gedan barai</li>\n</ol>\n"));
    assert!(html.contains("<section class=\"lesson-safety-warnings\">"));
    assert!(html.contains(
        "<a href=\"https://ex.com/kyohan\" target=\"_blank\" rel=\"noreferrer\">"
    ));
    assert!(!html.contains("lesson-notice"));
}
