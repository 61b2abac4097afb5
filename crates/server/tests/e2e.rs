use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::sync::oneshot;
use uuid::Uuid;

struct TestServer {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

/// Run the real `server::run` entry point on an ephemeral port.
async fn start_server() -> anyhow::Result<TestServer> {
    // grab a free port, release it, then let the server bind it
    let spare = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    let port = spare.local_addr()?.port();
    drop(spare);

    let root = std::env::temp_dir().join(format!("phonebook_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = port;
    cfg.server.static_dir = root.join("build").display().to_string();
    cfg.database.url = format!("file:{}", root.join("persons.json").display());
    cfg.normalize_and_validate()?;

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        if let Err(e) = server::run(cfg, shutdown).await {
            eprintln!("server error: {}", e);
        }
        let _ = tokio::fs::remove_dir_all(&root).await;
    });

    let base_url = format!("http://127.0.0.1:{port}");
    // wait until the listener is up
    for _ in 0..50 {
        if reqwest::get(format!("{base_url}/api/persons")).await.is_ok() {
            return Ok(TestServer { base_url, stop: Some(tx), handle });
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    Err(anyhow::anyhow!("server did not start on port {port}"))
}

impl TestServer {
    async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        (&mut self.handle).await?;
        Ok(())
    }
}

#[tokio::test]
async fn e2e_phonebook_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/api/persons", app.base_url))
        .json(&json!({"name": "Arto Hellas", "number": "040-123456"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("id").to_string();

    let res = c.get(format!("{}/api/persons/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["number"], "040-123456");

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.contains("Phonebook has information for 1 people"));

    let res = c.delete(format!("{}/api/persons/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/api/persons/not-an-id", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"error": "malformatted id"}));

    let res = c.get(format!("{}/unknown/path", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"error": "unknown endpoint"}));

    app.shutdown().await
}
