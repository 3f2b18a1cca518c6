use ticket_core::config::Config;
use ticket_frontend::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Use random port for testing (port 0)
        let config = Config {
            port: 0,
            environment: "test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
