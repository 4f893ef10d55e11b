//! Drives a live server through `MovieClient` and `Shelf`.

mod common;

use moviedex::{
    client::{ClientError, MovieClient, MovieInput, Shelf},
    uploads::UploadedImage,
};
use reqwest::StatusCode;

async fn serve() -> (MovieClient, common::TestApp) {
    let app = common::test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (MovieClient::new(reqwest::Client::new(), format!("http://{addr}")), app)
}

fn input(name: &str) -> MovieInput {
    MovieInput { name: name.to_string(), ..Default::default() }
}

#[tokio::test]
async fn health_round_trip() {
    let (client, _app) = serve().await;
    let health = client.health().await.unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn shelf_refetches_after_each_write() {
    let (client, _app) = serve().await;
    let mut shelf = Shelf::new(client);

    shelf.add(input("Cure")).await.unwrap();
    shelf
        .add(MovieInput {
            name: "Pulse".into(),
            kind: "2001".into(),
            rating: "7.2".into(),
            image: Some(UploadedImage { file_name: "pulse.webp".into(), bytes: vec![1, 2, 3] }),
            ..Default::default()
        })
        .await
        .unwrap();

    let names: Vec<&str> = shelf.movies().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Pulse", "Cure"]);
    let pulse = shelf.movies()[0].clone();
    assert_eq!(pulse.rating, Some(7.2));
    assert!(pulse.image_url.as_deref().unwrap().ends_with(".webp"));

    // No new image or link: the prior upload is kept.
    shelf.edit(&pulse, input("Kairo")).await.unwrap();
    assert_eq!(shelf.movies()[0].name, "Kairo");
    assert_eq!(shelf.movies()[0].image_url, pulse.image_url);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let (client, _app) = serve().await;
    let mut shelf = Shelf::new(client);
    shelf.add(input("Charisma")).await.unwrap();
    let id = shelf.movies()[0].id;

    assert!(!shelf.remove(id, || false).await.unwrap());
    assert_eq!(shelf.movies().len(), 1);

    assert!(shelf.remove(id, || true).await.unwrap());
    assert!(shelf.movies().is_empty());
}

#[tokio::test]
async fn server_errors_carry_message() {
    let (client, _app) = serve().await;
    let err = client.create(input("")).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Movie name is required");
        },
        other => panic!("unexpected error: {other}"),
    }
}
