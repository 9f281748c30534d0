use pretty_assertions::assert_eq;
use serde_json::json;

mod common;
use common::{path_of, query_of, MockUpstream};

const ITEM: &str = "nineteeneightyfo00orwe";

fn inside() -> serde_json::Value {
    json!({
        "ia": ITEM,
        "q": "big brother",
        "indexed": true,
        "matches": [
            {"text": "{{{BIG BROTHER}}} IS WATCHING YOU, the caption beneath it ran.",
             "par": [{"page": 5, "page_width": 1656, "page_height": 2622,
                      "boxes": [{"r": 760, "b": 1412, "t": 1370, "l": 500}]}]},
            {"text": "the face of {{{Big Brother}}}",
             "par": [{"page": 17, "page_width": 1656, "page_height": 2622, "boxes": []}]}
        ]
    })
}

#[tokio::test]
async fn second_hop_uses_shard_and_dir_from_metadata() {
    let upstream = MockUpstream::start();
    upstream.respond_json(
        &format!("/metadata/{ITEM}"),
        &json!({
            "d1": "127.0.0.1",
            "d2": "ia600300.us.archive.org",
            "dir": "/27/items/nineteeneightyfo00orwe",
            "files": [{"name": "nineteeneightyfo00orwe_djvu.xml"}]
        }),
    );
    upstream.respond_json("/fulltext/inside.php", &inside());
    let (client, notifier) = upstream.client();

    let results = client.search_inside("big brother", ITEM).await.unwrap();

    assert_eq!(results.matches.len(), 2);
    assert_eq!(results.matches[0].page(), Some(5));
    assert_eq!(results.matches[1].par[0].boxes.len(), 0);
    assert_eq!(results.extra["indexed"], true);

    let hits = upstream.hits();
    assert_eq!(hits.len(), 2);
    assert_eq!(path_of(&hits[0]), format!("/metadata/{ITEM}"));
    assert_eq!(path_of(&hits[1]), "/fulltext/inside.php");
    assert_eq!(
        query_of(&hits[1]),
        vec![
            ("item_id".to_string(), ITEM.to_string()),
            ("doc".to_string(), ITEM.to_string()),
            ("path".to_string(), "/27/items/nineteeneightyfo00orwe".to_string()),
            ("q".to_string(), "big brother".to_string()),
        ]
    );
    assert_eq!(notifier.notices(), Vec::<String>::new());
}

#[tokio::test]
async fn missing_shard_stops_after_metadata() {
    let upstream = MockUpstream::start();
    upstream.respond_json(
        &format!("/metadata/{ITEM}"),
        &json!({"dir": "/27/items/nineteeneightyfo00orwe"}),
    );
    upstream.respond_json("/fulltext/inside.php", &inside());
    let (client, notifier) = upstream.client();

    assert_eq!(client.search_inside("big brother", ITEM).await, None);
    assert_eq!(upstream.hits().len(), 1);
    assert_eq!(notifier.notices(), Vec::<String>::new());
}

#[tokio::test]
async fn missing_dir_stops_after_metadata() {
    let upstream = MockUpstream::start();
    upstream.respond_json(&format!("/metadata/{ITEM}"), &json!({"d1": "127.0.0.1"}));
    upstream.respond_json("/fulltext/inside.php", &inside());
    let (client, _) = upstream.client();

    assert_eq!(client.search_inside("big brother", ITEM).await, None);
    assert_eq!(upstream.hits().len(), 1);
}

#[tokio::test]
async fn unknown_item_stops_after_metadata() {
    let upstream = MockUpstream::start();
    // archive.org answers unknown items with an empty object
    upstream.respond_json(&format!("/metadata/{ITEM}"), &json!({}));
    let (client, _) = upstream.client();

    assert_eq!(client.search_inside("big brother", ITEM).await, None);
    assert_eq!(upstream.hits().len(), 1);
}

#[tokio::test]
async fn metadata_failure() {
    let upstream = MockUpstream::start();
    upstream.respond(&format!("/metadata/{ITEM}"), 502, "Bad Gateway");
    let (client, notifier) = upstream.client();

    assert_eq!(client.search_inside("big brother", ITEM).await, None);
    assert_eq!(upstream.hits().len(), 1);
    assert_eq!(notifier.notices(), Vec::<String>::new());
}

#[tokio::test]
async fn fulltext_failure() {
    let upstream = MockUpstream::start();
    upstream.respond_json(
        &format!("/metadata/{ITEM}"),
        &json!({"d1": "127.0.0.1", "dir": "/27/items/nineteeneightyfo00orwe"}),
    );
    upstream.respond("/fulltext/inside.php", 500, "");
    let (client, notifier) = upstream.client();

    assert_eq!(client.search_inside("big brother", ITEM).await, None);
    assert_eq!(upstream.hits().len(), 2);
    assert_eq!(notifier.notices(), Vec::<String>::new());
}
