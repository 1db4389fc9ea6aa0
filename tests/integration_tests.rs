use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use movie_explorer::config::Config;
use movie_explorer::core::{
    rank_streams, spawn_extraction, CatalogClient, ExplorerError, ExtractionOutcome, Pager,
};
use movie_explorer::extractors::default_engine;

type Requests = Arc<Mutex<Vec<String>>>;

/// Serves canned responses on a local port. Each route is matched by path
/// prefix; the request target of every call is recorded.
async fn serve(routes: Vec<(&'static str, u16, String)>) -> Result<(String, Requests)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 16 * 1024];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(target.clone());

                let (status, body) = routes
                    .iter()
                    .find(|(prefix, _, _)| target.starts_with(prefix))
                    .map(|(_, status, body)| (*status, body.clone()))
                    .unwrap_or((404, "not found".to_string()));
                let response = format!(
                    "HTTP/1.1 {} OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Ok((format!("http://{}", addr), requests))
}

fn config_for(base: &str) -> Config {
    Config {
        browse_url: format!("{}/data/browse/", base),
        watch_url: format!("{}/data/watch/", base),
        timeout: 5,
        ..Config::default()
    }
}

const BROWSE_BODY: &str = r#"{
    "movies": [
        {"_id": "m1", "title": "Heat", "poster_path": "/heat.jpg"},
        {"_id": "m2", "title": "Ronin", "poster_path": null}
    ],
    "pager": {"page": 3}
}"#;

const WATCH_BODY: &str = r#"{
    "_id": "m1",
    "title": "Heat",
    "poster_path": "/heat.jpg",
    "streams": [
        {"stream": "https://voe.sx/e/aaa", "release": "Heat.1995"},
        {"stream": "https://savefiles.com/e/bbb"},
        {"stream": null}
    ]
}"#;

const LANDING_BODY: &str = r#"<html><head></head><body>
<div id="vplayer"></div>
<script type="text/javascript">
jwplayer("vplayer").setup({
    sources: [{file:"https:\/\/s3.savefiles.com\/hls2\/01\/00042\/bbb_n\/master.m3u8?t=abc&s=1700000000&e=10800"}],
    image: "https://s3.savefiles.com/i/bbb.jpg",
    width: "100%"
});
</script></body></html>"#;

#[tokio::test]
async fn test_fetch_catalog_query_and_mapping() -> Result<()> {
    let (base, requests) = serve(vec![("/data/browse/", 200, BROWSE_BODY.to_string())]).await?;
    let client = CatalogClient::new(config_for(&base))?;

    let mut pager = Pager::default();
    pager.next();
    pager.next();
    let entries = client.fetch_catalog(pager.page(), 20).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "m1");
    assert_eq!(entries[0].title, "Heat");
    assert_eq!(entries[1].poster_path, None);

    let requests = requests.lock().unwrap();
    assert_eq!(
        requests[0],
        "/data/browse/?lang=2&order_by=trending&page=3&limit=20"
    );
    Ok(())
}

#[tokio::test]
async fn test_fetch_catalog_page_floor() -> Result<()> {
    let (base, requests) = serve(vec![("/data/browse/", 200, r#"{"movies": []}"#.to_string())]).await?;
    let client = CatalogClient::new(config_for(&base))?;

    let entries = client.fetch_catalog(0, 10).await?;
    assert!(entries.is_empty());
    assert!(requests.lock().unwrap()[0].contains("page=1&limit=10"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_catalog_errors() -> Result<()> {
    let (base, _) = serve(vec![
        ("/data/browse/", 500, "oops".to_string()),
        ("/data/watch/", 200, "<html>not json</html>".to_string()),
    ])
    .await?;
    let client = CatalogClient::new(config_for(&base))?;

    let err = client.fetch_catalog(1, 20).await.unwrap_err();
    assert!(matches!(err, ExplorerError::HttpStatus { status: 500, .. }));

    let err = client.fetch_detail("m1").await.unwrap_err();
    assert!(matches!(err, ExplorerError::Json { .. }));
    Ok(())
}

#[tokio::test]
async fn test_fetch_detail_and_rank_streams() -> Result<()> {
    let (base, requests) = serve(vec![("/data/watch/", 200, WATCH_BODY.to_string())]).await?;
    let config = config_for(&base);
    let client = CatalogClient::new(config.clone())?;

    let detail = client.fetch_detail("m1").await?;
    assert_eq!(detail.title, "Heat");
    assert_eq!(detail.streams.len(), 3);
    assert_eq!(requests.lock().unwrap()[0], "/data/watch/?_id=m1");

    let ranked = rank_streams(&detail.streams, &config.playable_hosts);
    assert_eq!(ranked[0].link.url, "https://savefiles.com/e/bbb");
    assert!(ranked[0].playable);
    assert_eq!(ranked[1].host, "voe.sx");
    assert!(!ranked[1].playable);
    assert_eq!(ranked[2].host, "");
    Ok(())
}

#[tokio::test]
async fn test_extract_stream_url_from_landing_page() -> Result<()> {
    let (base, _) = serve(vec![
        ("/e/bbb", 200, LANDING_BODY.to_string()),
        ("/e/empty", 200, "<html><body>File was deleted</body></html>".to_string()),
    ])
    .await?;
    let engine = default_engine(&config_for(&base))?;

    assert_eq!(
        engine.extract_stream_url(&format!("{}/e/bbb", base)).await.as_deref(),
        Some("https://s3.savefiles.com/hls2/01/00042/bbb_n/master.m3u8?t=abc&s=1700000000&e=10800")
    );
    assert_eq!(engine.extract_stream_url(&format!("{}/e/empty", base)).await, None);
    assert_eq!(engine.extract_stream_url(&format!("{}/e/missing", base)).await, None);
    Ok(())
}

#[tokio::test]
async fn test_extract_searches_error_pages() -> Result<()> {
    let (base, _) = serve(vec![(
        "/e/forbidden",
        403,
        r#"<script>setup({file:"https://cdn/x/master.m3u8?t=1"})</script>"#.to_string(),
    )])
    .await?;
    let engine = default_engine(&config_for(&base))?;

    assert_eq!(
        engine.extract_stream_url(&format!("{}/e/forbidden", base)).await.as_deref(),
        Some("https://cdn/x/master.m3u8?t=1")
    );
    Ok(())
}

#[tokio::test]
async fn test_extract_unreachable_host_is_not_found() -> Result<()> {
    // Bind and drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let engine = default_engine(&Config::default())?;
    assert_eq!(engine.extract_stream_url(&format!("http://{}/e/x", addr)).await, None);
    Ok(())
}

#[tokio::test]
async fn test_background_extraction_delivers_once() -> Result<()> {
    let (base, requests) = serve(vec![("/e/bbb", 200, LANDING_BODY.to_string())]).await?;
    let engine = Arc::new(default_engine(&config_for(&base))?);

    let handle = spawn_extraction(engine, format!("{}/e/bbb", base));
    match handle.outcome().await {
        ExtractionOutcome::Found(url) => assert!(url.ends_with("e=10800")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(requests.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_config_file_overrides() -> Result<()> {
    use std::io::Write;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("explorer.toml");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "order_by = \"new\"")?;
    writeln!(file, "player_command = \"vlc {{URL}}\"")?;
    drop(file);

    let config = Config::load(Some(path.as_path()))?;
    assert_eq!(config.order_by, "new");
    assert_eq!(config.player_command, "vlc {URL}");
    assert_eq!(config.page_size, 20);
    Ok(())
}
