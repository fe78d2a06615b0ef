use mockito::{Matcher, Server};
use serde_json::json;

use codequiz::api::{ApiClient, ApiError, FetchEvent, ReportEvent};
use codequiz::model::{Difficulty, OptionKey, QuestionBatch, ScoreTally, StatReport, UserStat};

#[test]
fn test_question_batch_decodes_platform_field_names() {
    let payload = json!({
        "data": [{
            "Image": "",
            "Question": "Which statement reads rows?",
            "Answer": "a",
            "Level": "medium",
            "Option_a": "SELECT",
            "Option_b": "INSERT",
            "Option_c": "DROP",
            "Option_d": "GRANT",
            "Explanation": "SELECT is the read statement."
        }],
        "numbers": [1]
    });

    let batch: QuestionBatch = serde_json::from_value(payload).unwrap();
    assert_eq!(batch.data.len(), 1);
    assert_eq!(batch.numbers, vec![1]);

    let q = &batch.data[0];
    assert_eq!(q.prompt, "Which statement reads rows?");
    assert_eq!(q.answer, OptionKey::A);
    assert_eq!(q.level, Difficulty::Medium);
    assert_eq!(q.option_text(OptionKey::A), "SELECT");
    assert_eq!(q.option_text(OptionKey::D), "GRANT");
    assert_eq!(q.explanation, "SELECT is the read statement.");
    // Empty image string means no image
    assert!(q.image_url().is_none());
}

#[test]
fn test_image_and_missing_optional_fields() {
    let payload = json!({
        "Image": "https://example.com/diagram.png",
        "Question": "What does the diagram show?",
        "Answer": "c",
        "Level": "easy",
        "Option_a": "a",
        "Option_b": "b",
        "Option_c": "c",
        "Option_d": "d"
    });

    let q: codequiz::model::Question = serde_json::from_value(payload).unwrap();
    assert_eq!(q.image_url(), Some("https://example.com/diagram.png"));
    // Explanation absent on the wire decodes to empty
    assert_eq!(q.explanation, "");
}

#[test]
fn test_unrecognized_level_grades_as_hard() {
    let mk = |level: &str| {
        json!({
            "Image": "",
            "Question": "q",
            "Answer": "a",
            "Level": level,
            "Option_a": "1",
            "Option_b": "2",
            "Option_c": "3",
            "Option_d": "4",
            "Explanation": ""
        })
    };

    let easy: codequiz::model::Question = serde_json::from_value(mk("easy")).unwrap();
    assert_eq!(easy.level, Difficulty::Easy);

    let hard: codequiz::model::Question = serde_json::from_value(mk("hard")).unwrap();
    assert_eq!(hard.level, Difficulty::Hard);

    // Anything the client does not know is graded as hard
    let other: codequiz::model::Question = serde_json::from_value(mk("expert")).unwrap();
    assert_eq!(other.level, Difficulty::Hard);
}

#[test]
fn test_ordered_applies_one_based_permutation() {
    let mk = |prompt: &str| codequiz::model::Question {
        image: String::new(),
        prompt: prompt.to_string(),
        answer: OptionKey::A,
        level: Difficulty::Easy,
        option_a: "1".to_string(),
        option_b: "2".to_string(),
        option_c: "3".to_string(),
        option_d: "4".to_string(),
        explanation: String::new(),
    };

    let batch = QuestionBatch {
        data: vec![mk("first"), mk("second"), mk("third")],
        numbers: vec![3, 1, 2],
    };
    let ordered = batch.ordered();
    assert_eq!(ordered.len(), 3);
    assert_eq!(ordered[0].prompt, "third");
    assert_eq!(ordered[1].prompt, "first");
    assert_eq!(ordered[2].prompt, "second");

    // Entries outside the data range are skipped, including the 0 that a
    // 1-based list should never contain
    let sparse = QuestionBatch {
        data: vec![mk("first"), mk("second")],
        numbers: vec![1, 5, 0, 2],
    };
    let ordered = sparse.ordered();
    assert_eq!(ordered.len(), 2);
    assert_eq!(ordered[0].prompt, "first");
    assert_eq!(ordered[1].prompt, "second");
}

#[test]
fn test_stat_report_serializes_flat_counts() {
    let mut tally = ScoreTally::default();
    tally.record(Difficulty::Easy, true);
    tally.record(Difficulty::Easy, false);
    tally.record(Difficulty::Medium, true);
    tally.record(Difficulty::Hard, false);
    tally.record(Difficulty::Hard, false);

    let report = StatReport::new("javascript", Some("u-7".to_string()), tally);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["type"], "javascript");
    assert_eq!(value["user_id"], "u-7");
    assert_eq!(value["easy_correct"], 1);
    assert_eq!(value["easy_incorrect"], 1);
    assert_eq!(value["medium_correct"], 1);
    assert_eq!(value["medium_incorrect"], 0);
    assert_eq!(value["hard_correct"], 0);
    assert_eq!(value["hard_incorrect"], 2);

    // Anonymous play omits the identity key entirely
    let anonymous = StatReport::new("javascript", None, tally);
    let value = serde_json::to_value(&anonymous).unwrap();
    assert!(value.get("user_id").is_none());
}

#[test]
fn test_user_stat_decodes_string_typed_stats() {
    let payload = json!({
        "Total_score": "99.99",
        "Highest_score": "10",
        "Rank": "42",
        "Count": "977"
    });

    let stat: UserStat = serde_json::from_value(payload).unwrap();
    assert_eq!(stat.total_score, "99.99");
    assert_eq!(stat.highest_score, "10");
    assert_eq!(stat.rank, "42");
    assert_eq!(stat.count, "977");
}

// --- platform round trips -----------------------------------------------

#[test]
fn test_fetch_questions_hits_category_route() {
    let mut server = Server::new();
    let body = json!({
        "data": [{
            "Image": "",
            "Question": "q",
            "Answer": "b",
            "Level": "easy",
            "Option_a": "1",
            "Option_b": "2",
            "Option_c": "3",
            "Option_d": "4",
            "Explanation": "e"
        }],
        "numbers": [1]
    });
    let mock = server
        .mock("GET", "/questions/postgresql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create();

    let client = ApiClient::new(&server.url()).unwrap();
    let batch = client.fetch_questions("postgresql").unwrap();
    assert_eq!(batch.data.len(), 1);
    assert_eq!(batch.data[0].answer, OptionKey::B);
    mock.assert();
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/questions/rust")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": [], "numbers": [] }).to_string())
        .create();

    // A trailing slash on the configured URL must not send "//questions"
    let client = ApiClient::new(&format!("{}/", server.url())).unwrap();
    assert_eq!(client.base(), server.url());
    client.fetch_questions("rust").unwrap();
    mock.assert();
}

#[test]
fn test_report_posts_counts_and_decodes_envelope() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/stats/")
        .match_body(Matcher::Json(json!({
            "user_id": "u-1",
            "type": "go",
            "easy_correct": 1,
            "easy_incorrect": 0,
            "medium_correct": 0,
            "medium_incorrect": 1,
            "hard_correct": 0,
            "hard_incorrect": 0
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "Total_score": "12.5",
                    "Highest_score": "6",
                    "Rank": "3",
                    "Count": "40"
                }
            })
            .to_string(),
        )
        .create();

    let mut tally = ScoreTally::default();
    tally.record(Difficulty::Easy, true);
    tally.record(Difficulty::Medium, false);

    let client = ApiClient::new(&server.url()).unwrap();
    let report = StatReport::new("go", Some("u-1".to_string()), tally);
    let stat = client.report_stats(&report).unwrap();
    assert_eq!(stat.total_score, "12.5");
    assert_eq!(stat.rank, "3");
    mock.assert();
}

#[test]
fn test_non_success_status_is_an_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/questions/lua")
        .with_status(404)
        .with_body("{}")
        .create();

    let client = ApiClient::new(&server.url()).unwrap();
    let err = client.fetch_questions("lua").unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 404));
}

#[test]
fn test_failed_fetch_degrades_to_empty_batch() {
    // Nothing listens here; the quiz should still come up, just empty
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    let rx = codequiz::api::spawn_fetch(client, "rust".to_string());

    let FetchEvent::Loaded(batch) = rx.recv().unwrap();
    assert!(batch.data.is_empty());
    assert!(batch.numbers.is_empty());
    assert!(batch.ordered().is_empty());
}

#[test]
fn test_failed_report_yields_failed_event() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    let report = StatReport::new("rust", None, ScoreTally::default());
    let rx = codequiz::api::spawn_report(client, report);

    assert!(matches!(rx.recv().unwrap(), ReportEvent::Failed));
}
