use anyhow::Result;
use httpmock::prelude::*;
use konekte::{
    Category, Directory, Field, FieldError, HttpDirectoryClient, KonekteError, Locale, ReviewDraft,
    SearchFilter, ServiceDraft,
};
use serde_json::json;
use std::time::Duration;

fn directory(server: &MockServer) -> Directory<HttpDirectoryClient> {
    Directory::new(HttpDirectoryClient::new(&server.base_url(), Duration::from_secs(5)).unwrap())
}

fn mock_users(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/api/users");
        then.status(200).json_body(json!([
            {"id": 1, "name": "Marie Jean-Baptiste"},
            {"id": 2, "name": "Pierre Louis"}
        ]));
    })
}

fn review_draft(comment: &str) -> ReviewDraft {
    ReviewDraft {
        rating: Some("5".to_string()),
        comment: Some(comment.to_string()),
        user_id: Some("2".to_string()),
    }
}

#[tokio::test]
async fn test_browse_filters_snapshot_locally() -> Result<()> {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/service-providers");
        then.status(200).json_body(json!([
            {
                "id": 1, "name": "Hôpital Général", "category": "Medical/Health",
                "description": "Hôpital public offrant des services médicaux",
                "location": "Delmas 33", "user_id": 1,
                "reviews": [
                    {"id": 1, "rating": 5, "comment": "Très efficace", "user_id": 2, "service_provider_id": 1},
                    {"id": 2, "rating": 3, "comment": "Attente longue", "user_id": 1, "service_provider_id": 1}
                ]
            },
            {
                "id": 2, "name": "École Primaire", "category": "Education",
                "description": "École publique primaire et secondaire",
                "location": "Carrefour", "user_id": 2, "reviews": []
            }
        ]));
    });

    let directory = directory(&server);

    let by_location = directory.browse(&SearchFilter::new(None, "33")).await?;
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].service.name, "Hôpital Général");
    assert_eq!(by_location[0].rating.average, 4.0);
    assert_eq!(by_location[0].rating.count, 2);

    let everything = directory.browse(&SearchFilter::default()).await?;
    let names: Vec<&str> = everything.iter().map(|l| l.service.name.as_str()).collect();
    assert_eq!(names, vec!["Hôpital Général", "École Primaire"]);

    list.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_browse_by_category_queries_server() -> Result<()> {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/api/service-providers")
            .query_param("category", "Medical/Health");
        then.status(200).json_body(json!([{
            "id": 1, "name": "Hôpital Général", "category": "Medical/Health",
            "description": "Hôpital public offrant des services médicaux",
            "location": "Delmas 33", "user_id": 1
        }]));
    });

    let listings = directory(&server)
        .browse(&SearchFilter::new(Some(Category::MedicalHealth), ""))
        .await?;

    list.assert();
    assert_eq!(listings.len(), 1);
    assert!(listings[0].rating.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_short_comment_never_reaches_server() -> Result<()> {
    let server = MockServer::start();
    let users = mock_users(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/reviews");
        then.status(201).json_body(json!({
            "id": 20, "rating": 5, "comment": "Super", "user_id": 2,
            "service_provider_id": 4, "created_at": "2025-03-01 09:15:00"
        }));
    });

    let directory = directory(&server);

    let outcome = directory.submit_review(4, &review_draft("Bien")).await?;
    let errors = outcome.errors().expect("four characters must be rejected");
    assert_eq!(errors.get(Field::Comment), Some(FieldError::TooShort { min: 5 }));
    assert_eq!(
        errors.messages(Locale::Fr)["comment"],
        "Le commentaire doit contenir au moins 5 caractères"
    );
    create.assert_hits(0);

    let outcome = directory.submit_review(4, &review_draft("Super")).await?;
    let review = outcome.created().expect("five characters are enough");
    assert_eq!(review.id, 20);
    assert!(review.created_at.is_some());
    create.assert_hits(1);
    users.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_review_body_matches_api_contract() -> Result<()> {
    let server = MockServer::start();
    mock_users(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/reviews").json_body(json!({
            "rating": 4,
            "comment": "Personnel aimable",
            "user_id": 1,
            "service_provider_id": 9
        }));
        then.status(201).json_body(json!({
            "id": 21, "rating": 4, "comment": "Personnel aimable", "user_id": 1,
            "service_provider_id": 9
        }));
    });

    let draft = ReviewDraft::from_json(json!({
        "rating": "4",
        "comment": "  Personnel aimable ",
        "user_id": 1
    }))?;
    let outcome = directory(&server).submit_review(9, &draft).await?;

    create.assert();
    assert!(outcome.created().is_some());
    Ok(())
}

#[tokio::test]
async fn test_stale_reference_rejected_remotely() -> Result<()> {
    let server = MockServer::start();
    mock_users(&server);
    server.mock(|when, then| {
        when.method(POST).path("/api/service-providers");
        then.status(400)
            .json_body(json!({"error": "Failed to create service provider"}));
    });

    let draft = ServiceDraft {
        name: Some("Bibliothèque Communautaire".to_string()),
        category: Some("Education".to_string()),
        description: Some("Bibliothèque publique avec accès internet".to_string()),
        location: Some("Rue Capois".to_string()),
        phone: Some("2234-5566".to_string()),
        hours: Some("Lundi-Vendredi: 8h-18h".to_string()),
        user_id: Some("1".to_string()),
    };

    let err = directory(&server)
        .submit_service(&draft)
        .await
        .expect_err("server rejection must surface");
    assert!(matches!(err, KonekteError::Rejected { status: 400, .. }));
    assert_eq!(err.user_friendly_message(), "Failed to create service provider");
    Ok(())
}

#[tokio::test]
async fn test_invalid_service_makes_no_create_call() -> Result<()> {
    let server = MockServer::start();
    mock_users(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/service-providers");
        then.status(201);
    });

    let draft = ServiceDraft {
        name: Some("Centre Culturel".to_string()),
        category: Some("Community Centers".to_string()),
        description: Some("Espace polyvalent pour événements".to_string()),
        location: Some("Rue Grégoire, Pétion-Ville".to_string()),
        phone: Some("29-40".to_string()),
        hours: None,
        user_id: Some("1".to_string()),
    };
    let outcome = directory(&server).submit_service(&draft).await?;

    let errors = outcome.errors().expect("phone is too short");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(Field::Phone),
        Some(FieldError::DigitCount { min: 8, max: 15 })
    );
    create.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_fractional_json_rating_is_not_a_number() -> Result<()> {
    let server = MockServer::start();
    mock_users(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/reviews");
        then.status(201);
    });

    let draft = ReviewDraft::from_json(json!({
        "rating": 4.0,
        "comment": "Personnel aimable",
        "user_id": 1
    }))?;
    let outcome = directory(&server).submit_review(9, &draft).await?;

    let errors = outcome.errors().expect("4.0 is not an integer rating");
    assert_eq!(errors.get(Field::Rating), Some(FieldError::NotANumber));
    assert_eq!(errors.messages(Locale::Fr)["rating"], "La note doit être un nombre");
    create.assert_hits(0);
    Ok(())
}
