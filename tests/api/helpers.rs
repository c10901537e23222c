use std::net::TcpListener;

use reqwest::{Client, Method, Response};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use subscriptions_api::app;

pub const TEST_USER: &str = "60601fee-2bf1-4721-ae6f-7636e79a0cba";

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionBody {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<String>,
    pub start_date: Option<String>,
}

impl SubscriptionBody {
    pub fn new(service_name: &str, price: i64, start_date: &str) -> Self {
        Self {
            service_name: Some(service_name.into()),
            price: Some(price),
            user_id: Some(TEST_USER.into()),
            start_date: Some(start_date.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionRecord {
    pub id: i64,
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
}

#[derive(Debug, Deserialize)]
pub struct TotalStats {
    pub total: i64,
}

pub struct TestApp {
    addr: String,

    pub client: Client,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let server = app::run(listener, pool.clone()).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self { addr, client }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn subscription_create(&self, body: &SubscriptionBody) -> reqwest::Result<Response> {
        self.request(Method::POST, "subscriptions")
            .json(body)
            .send()
            .await
    }

    pub async fn subscription_list(&self, query: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("subscriptions?{}", query))
            .send()
            .await
    }

    pub async fn subscription_fetch(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("subscriptions/{}", id))
            .send()
            .await
    }

    pub async fn subscription_update(
        &self,
        id: &str,
        body: &SubscriptionBody,
    ) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("subscriptions/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn subscription_delete(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("subscriptions/{}", id))
            .send()
            .await
    }

    pub async fn subscription_total(&self, query: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("subscriptions/total?{}", query))
            .send()
            .await
    }

    /// Create a subscription that is expected to succeed
    pub async fn create_subscription(&self, body: &SubscriptionBody) -> SubscriptionRecord {
        self.subscription_create(body)
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to decode created subscription")
    }
}
