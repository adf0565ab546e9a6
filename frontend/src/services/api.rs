use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    CreateStudentRequest, ErrorResponse, Event, Notice, PaymentSync, Student, UpdatePaymentRequest,
};

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    #[allow(dead_code)]
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// All students with their payment history
    pub async fn get_students(&self) -> Result<Vec<Student>, String> {
        let url = format!("{}/api/students", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => read_json(response, "students").await,
            Err(e) => Err(format!("Failed to fetch students: {}", e)),
        }
    }

    pub async fn add_student(&self, request: &CreateStudentRequest) -> Result<Student, String> {
        let url = format!("{}/api/students", self.base_url);

        match Request::post(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response, "student").await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn update_payment(
        &self,
        student_id: i64,
        request: &UpdatePaymentRequest,
    ) -> Result<Student, String> {
        let url = format!("{}/api/students/{}/payment", self.base_url, student_id);

        match Request::put(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => read_json(response, "student").await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    pub async fn get_notices(&self) -> Result<Vec<Notice>, String> {
        let url = format!("{}/api/notices", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => read_json(response, "notices").await,
            Err(e) => Err(format!("Failed to fetch notices: {}", e)),
        }
    }

    pub async fn get_events(&self) -> Result<Vec<Event>, String> {
        let url = format!("{}/api/events", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => read_json(response, "events").await,
            Err(e) => Err(format!("Failed to fetch events: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PaymentSync for ApiClient {
    async fn update_payment(
        &self,
        student_id: i64,
        request: &UpdatePaymentRequest,
    ) -> Result<Student, String> {
        ApiClient::update_payment(self, student_id, request).await
    }
}

/// Decode a success body, or surface the server's `{error}` message
async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, String> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse {}: {}", what, e));
    }

    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(body.error),
        Err(_) => Err(format!("Request failed with status {}", status)),
    }
}
