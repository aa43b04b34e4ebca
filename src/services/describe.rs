//! Description assistant: draft an event description from name and date.
//! Fully outside the consistency core; when the key is missing or the upstream
//! call fails, callers get fallback text instead of an error so the creation
//! form keeps working.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

const DISABLED_FALLBACK: &str = "AI assistance is disabled. Please set your API key.";
const ERROR_FALLBACK: &str =
    "Something went wrong while drafting the description. Please try again or write it manually.";

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("reqwest client")
});

pub async fn generate_description(
    api_key: Option<&str>,
    event_name: &str,
    event_date: NaiveDate,
) -> String {
    let Some(key) = api_key else {
        return DISABLED_FALLBACK.to_string();
    };
    let prompt = format!(
        "Write a short, inviting description for an event named \"{}\" taking place on {}. \
         Keep it to 2-3 sentences that make people want to register.",
        event_name, event_date
    );
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key={}",
        key
    );
    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    match request_text(&url, body).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("description generation failed: {}", e);
            ERROR_FALLBACK.to_string()
        }
    }
}

async fn request_text(url: &str, body: serde_json::Value) -> Result<String, String> {
    let resp = CLIENT
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| e.to_string())?;
    if !status.is_success() {
        return Err(format!("{} - {}", status, text));
    }
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.pointer("/content/parts/0/text"))
        .and_then(|t| t.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| "no text in response".to_string())
}
