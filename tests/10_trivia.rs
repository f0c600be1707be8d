mod common;

use std::collections::HashSet;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{assert_error, get, post, send};

#[tokio::test]
async fn lists_categories_as_id_map() -> Result<()> {
    let app = common::trivia();
    let res = get(&app, "/categories").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], json!(true));
    assert_eq!(res.body["total_categories"], json!(6));
    assert_eq!(res.body["categories"]["1"], json!("Science"));
    assert_eq!(res.body["categories"]["6"], json!("Sports"));
    Ok(())
}

#[tokio::test]
async fn paginates_questions() -> Result<()> {
    let app = common::trivia();

    let first = get(&app, "/questions").await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["total_questions"], json!(16));
    assert_eq!(first.body["questions"].as_array().unwrap().len(), common::PER_PAGE);
    assert!(first.body["categories"].is_object());
    assert!(first.body["current_category"].is_null());

    let second = get(&app, "/questions?page=2").await?;
    assert_eq!(second.body["questions"].as_array().unwrap().len(), 6);
    assert_ne!(first.body["questions"][0]["id"], second.body["questions"][0]["id"]);
    Ok(())
}

#[tokio::test]
async fn page_beyond_last_is_not_found() -> Result<()> {
    let app = common::trivia();
    assert_error(&get(&app, "/questions?page=1000").await?, 404);
    assert_error(&get(&app, "/questions?page=0").await?, 404);
    Ok(())
}

#[tokio::test]
async fn unparseable_page_falls_back_to_first() -> Result<()> {
    let app = common::trivia();
    let first = get(&app, "/questions").await?;

    for uri in ["/questions?page=abc", "/questions?page=", "/questions?page=-1"] {
        let res = get(&app, uri).await?;
        assert_eq!(res.status, StatusCode::OK, "{}", uri);
        assert_eq!(res.body["questions"], first.body["questions"], "{}", uri);
    }

    let search = post(&app, "/questions/search?page=x", json!({"searchTerm": ""})).await?;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.body["questions"].as_array().unwrap().len(), common::PER_PAGE);
    Ok(())
}

#[tokio::test]
async fn create_adds_exactly_one_question() -> Result<()> {
    let app = common::trivia();
    let before = get(&app, "/questions").await?.body["total_questions"].as_u64().unwrap();

    let res = post(
        &app,
        "/questions",
        json!({"question": "What is the capital of Peru?", "answer": "Lima", "category": "3", "difficulty": 2}),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total_questions"], json!(before + 1));

    let created = res.body["created"].as_i64().unwrap();
    let geography = get(&app, "/categories/3/questions").await?;
    let ids: Vec<i64> = geography.body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&created));
    Ok(())
}

#[tokio::test]
async fn create_rejects_bad_input() -> Result<()> {
    let app = common::trivia();

    assert_error(&post(&app, "/questions", json!({"answer": "x", "category": 1, "difficulty": 1})).await?, 400);
    assert_error(&post(&app, "/questions", json!({"question": "  ", "answer": "x", "category": 1, "difficulty": 1})).await?, 400);
    assert_error(&post(&app, "/questions", json!({"question": "q", "answer": "a", "category": 1, "difficulty": 9})).await?, 422);
    assert_error(&post(&app, "/questions", json!({"question": "q", "answer": "a", "category": 1000, "difficulty": 1})).await?, 422);

    let total = get(&app, "/questions").await?.body["total_questions"].clone();
    assert_eq!(total, json!(16));
    Ok(())
}

#[tokio::test]
async fn delete_then_delete_again_is_not_found() -> Result<()> {
    let app = common::trivia();

    let res = send(&app, Method::DELETE, "/questions/5", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["question_id"], json!(5));
    assert_eq!(get(&app, "/questions").await?.body["total_questions"], json!(15));

    assert_error(&send(&app, Method::DELETE, "/questions/5", None, None).await?, 404);
    assert_error(&send(&app, Method::DELETE, "/questions/not-a-number", None, None).await?, 404);
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive() -> Result<()> {
    let app = common::trivia();

    let res = post(&app, "/questions/search", json!({"searchTerm": "WORLD CUP"})).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total_questions"], json!(2));
    for q in res.body["questions"].as_array().unwrap() {
        assert!(q["question"].as_str().unwrap().contains("World Cup"));
    }

    let one = post(&app, "/questions/search", json!({"searchTerm": "in 1930"})).await?;
    assert_eq!(one.body["total_questions"], json!(1));
    assert_eq!(one.body["questions"][0]["answer"], json!("Uruguay"));

    let none = post(&app, "/questions/search", json!({"searchTerm": "zzzz-no-match"})).await?;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.body["total_questions"], json!(0));
    assert_eq!(none.body["questions"], json!([]));
    Ok(())
}

#[tokio::test]
async fn empty_search_term_matches_everything() -> Result<()> {
    let app = common::trivia();

    let res = post(&app, "/questions/search", json!({"searchTerm": ""})).await?;
    assert_eq!(res.body["total_questions"], json!(16));
    assert_eq!(res.body["questions"].as_array().unwrap().len(), common::PER_PAGE);

    assert_error(&post(&app, "/questions/search", json!({})).await?, 400);
    Ok(())
}

#[tokio::test]
async fn questions_by_category() -> Result<()> {
    let app = common::trivia();

    let res = get(&app, "/categories/6/questions").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["current_category"], json!(6));
    assert_eq!(res.body["total_questions"], json!(2));
    for q in res.body["questions"].as_array().unwrap() {
        assert_eq!(q["category"], json!(6));
    }

    assert_error(&get(&app, "/categories/1000/questions").await?, 404);
    Ok(())
}

#[tokio::test]
async fn quiz_never_repeats_and_ends_with_null() -> Result<()> {
    let app = common::trivia();
    let mut asked: Vec<i64> = Vec::new();

    loop {
        let res = post(
            &app,
            "/quizzes",
            json!({"previous_questions": asked, "quiz_category": {"id": 0, "type": "click"}}),
        )
        .await?;
        assert_eq!(res.status, StatusCode::OK);

        let question = &res.body["question"];
        if question.is_null() {
            break;
        }
        let id = question["id"].as_i64().unwrap();
        assert!(!asked.contains(&id), "question {} asked twice", id);
        asked.push(id);
        assert!(asked.len() <= 16);
    }

    let unique: HashSet<i64> = asked.iter().copied().collect();
    assert_eq!(unique.len(), 16);
    Ok(())
}

#[tokio::test]
async fn quiz_stays_within_category() -> Result<()> {
    let app = common::trivia();

    let res = post(&app, "/quizzes", json!({"previous_questions": [15], "quiz_category": {"id": "6", "type": "Sports"}})).await?;
    assert_eq!(res.body["question"]["id"], json!(16));

    let done = post(&app, "/quizzes", json!({"previous_questions": [15, 16], "quiz_category": {"id": 6}})).await?;
    assert_eq!(done.status, StatusCode::OK);
    assert!(done.body["question"].is_null());
    Ok(())
}

#[tokio::test]
async fn quiz_rejects_unknown_or_missing_category() -> Result<()> {
    let app = common::trivia();

    assert_error(&post(&app, "/quizzes", json!({"previous_questions": [], "quiz_category": {"id": 1000}})).await?, 422);
    assert_error(&post(&app, "/quizzes", json!({"previous_questions": []})).await?, 400);
    Ok(())
}

#[tokio::test]
async fn unknown_route_and_wrong_method_use_error_envelope() -> Result<()> {
    let app = common::trivia();

    assert_error(&get(&app, "/nowhere").await?, 404);
    assert_error(&send(&app, Method::DELETE, "/categories", None, None).await?, 405);
    assert_error(&send(&app, Method::PUT, "/questions", Some(json!({})), None).await?, 405);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let app = common::trivia();
    assert_error(&post(&app, "/questions", json!(["not", "an", "object"])).await?, 400);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = common::trivia();
    let res = get(&app, "/health").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], json!("ok"));
    Ok(())
}
