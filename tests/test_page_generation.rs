use mockito::{Matcher, Mock, ServerGuard};
use recipe_pages::pages::{index, recipe};
use recipe_pages::{render, DeliveryClient, PageSettings, Redirect, SiteError};
use scraper::{Html, Selector};
use serde_json::{json, Value};

const ENTRIES_PATH: &str = "/spaces/space1/environments/master/entries";

fn recipe_json(id: &str, slug: &str, title: &str) -> Value {
    json!({
        "sys": { "id": id, "type": "Entry" },
        "fields": {
            "title": title,
            "slug": slug,
            "cookingTime": 30,
            "ingredients": ["water", "salt"],
            "method": {
                "nodeType": "document",
                "data": {},
                "content": [{
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [{ "nodeType": "text", "value": "Simmer gently.", "marks": [], "data": {} }]
                }]
            },
            "featuredImage": { "sys": { "type": "Link", "linkType": "Asset", "id": format!("img-{}", id) } }
        }
    })
}

fn asset_json(id: &str) -> Value {
    json!({
        "sys": { "id": id, "type": "Asset" },
        "fields": {
            "title": "Photo",
            "file": {
                "url": format!("//images.ctfassets.net/space1/{}/photo.jpg", id),
                "details": { "image": { "width": 150, "height": 100 } }
            }
        }
    })
}

fn entries_body(items: Vec<Value>, assets: Vec<Value>) -> String {
    json!({
        "sys": { "type": "Array" },
        "total": items.len(),
        "skip": 0,
        "limit": 100,
        "items": items,
        "includes": { "Asset": assets }
    })
    .to_string()
}

async fn mock_entries(server: &mut ServerGuard, query: &str, body: String) -> Mock {
    server
        .mock("GET", ENTRIES_PATH)
        .match_query(Matcher::Exact(query.to_string()))
        .match_header("authorization", "Bearer token1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn client(server: &ServerGuard) -> DeliveryClient {
    DeliveryClient::with_base_url("space1".to_string(), "token1".to_string(), server.url())
}

#[tokio::test]
async fn test_paths_for_two_recipes() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_entries(
        &mut server,
        "content_type=recipe",
        entries_body(
            vec![
                recipe_json("e1", "pancakes", "Pancakes"),
                recipe_json("e2", "soup", "Soup"),
            ],
            vec![],
        ),
    )
    .await;

    let paths = recipe::get_static_paths(&client(&server), &PageSettings::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&paths).unwrap(),
        json!({
            "paths": [
                { "params": { "slug": "pancakes" } },
                { "params": { "slug": "soup" } }
            ],
            "fallback": true
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_props_for_existing_slug() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_entries(
        &mut server,
        "content_type=recipe&fields.slug=soup&include=2",
        entries_body(vec![recipe_json("e2", "soup", "Soup")], vec![asset_json("img-e2")]),
    )
    .await;

    let result = recipe::get_static_props(&client(&server), &PageSettings::default(), "soup")
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["revalidate"], 1);
    assert_eq!(value["props"]["recipe"]["sys"]["id"], "e2");
    assert_eq!(value["props"]["recipe"]["fields"]["title"], "Soup");
    assert_eq!(value["props"]["recipe"]["fields"]["cookingTime"], 30);
    assert_eq!(
        value["props"]["recipe"]["fields"]["ingredients"],
        json!(["water", "salt"])
    );
    assert_eq!(value["props"]["recipe"]["fields"]["slug"], "soup");
    assert_eq!(
        value["props"]["recipe"]["fields"]["featuredImage"]["url"],
        "https://images.ctfassets.net/space1/img-e2/photo.jpg"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_props_for_unknown_slug() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_entries(
        &mut server,
        "content_type=recipe&fields.slug=unknown&include=2",
        entries_body(vec![], vec![]),
    )
    .await;

    let result = recipe::get_static_props(&client(&server), &PageSettings::default(), "unknown")
        .await
        .unwrap();

    assert_eq!(result.redirect(), Some(&Redirect::temporary("/")));
    assert!(result.props().is_none());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "redirect": { "destination": "/", "permanent": false } })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_props_repeatable_for_same_source() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", ENTRIES_PATH)
        .match_query(Matcher::Exact(
            "content_type=recipe&fields.slug=soup&include=2".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(entries_body(
            vec![recipe_json("e2", "soup", "Soup")],
            vec![asset_json("img-e2")],
        ))
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let settings = PageSettings::default();
    let first = recipe::get_static_props(&client, &settings, "soup").await.unwrap();
    let second = recipe::get_static_props(&client, &settings, "soup").await.unwrap();

    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_index_renders_no_cards() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_entries(
        &mut server,
        "content_type=recipe&include=2",
        entries_body(vec![], vec![]),
    )
    .await;

    let result = index::get_static_props(&client(&server), &PageSettings::default())
        .await
        .unwrap();
    let html = render::index_page(result.props().unwrap()).into_string();

    let document = Html::parse_document(&html);
    let cards = Selector::parse(".recipe-list .card").unwrap();
    let list = Selector::parse(".recipe-list").unwrap();
    assert_eq!(document.select(&list).count(), 1);
    assert_eq!(document.select(&cards).count(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_index_cards_keyed_by_entry_id() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_entries(
        &mut server,
        "content_type=recipe&include=2",
        entries_body(
            vec![
                recipe_json("e1", "pancakes", "Pancakes"),
                recipe_json("e2", "soup", "Soup"),
            ],
            vec![],
        ),
    )
    .await;

    let result = index::get_static_props(&client(&server), &PageSettings::default())
        .await
        .unwrap();
    let html = render::index_page(result.props().unwrap()).into_string();

    let document = Html::parse_document(&html);
    let cards = Selector::parse(".card").unwrap();
    let keys: Vec<&str> = document
        .select(&cards)
        .filter_map(|card| card.value().attr("data-key"))
        .collect();
    assert_eq!(keys, vec!["e1", "e2"]);

    let links = Selector::parse(".card .actions a").unwrap();
    let hrefs: Vec<&str> = document
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .collect();
    assert_eq!(hrefs, vec!["/recipes/pancakes", "/recipes/soup"]);
}

#[tokio::test]
async fn test_entry_without_featured_image() {
    let mut server = mockito::Server::new_async().await;
    let mut entry = recipe_json("e2", "soup", "Soup");
    entry["fields"].as_object_mut().unwrap().remove("featuredImage");
    let _mock = mock_entries(
        &mut server,
        "content_type=recipe&fields.slug=soup&include=2",
        entries_body(vec![entry], vec![]),
    )
    .await;

    let err = recipe::get_static_props(&client(&server), &PageSettings::default(), "soup")
        .await
        .unwrap_err();

    match err {
        SiteError::MalformedContent { entry_id, field, .. } => {
            assert_eq!(entry_id, "e2");
            assert_eq!(field, "featuredImage");
        }
        other => panic!("Expected malformed content, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_propagates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", ENTRIES_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = index::get_static_props(&client(&server), &PageSettings::default())
        .await
        .unwrap_err();

    match err {
        SiteError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}
