//! HTTP implementations of every [`FetchKind`] source.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{FetchError, FetchKind, FetchPayload, FetchSource};

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.json().await?)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    /// JSON source whose payload is a string at `pointer`.
    async fn text_source(
        &self,
        url: &str,
        pointer: &str,
    ) -> Result<Option<FetchPayload>, FetchError> {
        let json = self.get_json(url).await?;
        Ok(string_at(&json, pointer).map(FetchPayload::Text))
    }

    /// JSON source whose payload is an image URL at `pointer`; the image is
    /// fetched in a second request.
    async fn image_url_source(
        &self,
        kind: FetchKind,
        url: &str,
        pointer: &str,
    ) -> Result<Option<FetchPayload>, FetchError> {
        let json = self.get_json(url).await?;
        let Some(image_url) = string_at(&json, pointer) else {
            return Ok(None);
        };
        let bytes = self.get_bytes(&image_url).await?;
        Ok(Some(FetchPayload::Image {
            bytes,
            caption: kind.caption().map(String::from),
        }))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchSource for HttpFetcher {
    async fn fetch(&self, kind: FetchKind, arg: &str) -> Result<Option<FetchPayload>, FetchError> {
        debug!(?kind, arg, "fetching");
        match kind {
            FetchKind::Pickup => {
                let json = self
                    .get_json("https://o1swy96l80.execute-api.ap-south-1.amazonaws.com/api/random")
                    .await?;
                Ok(pickup_text(&json).map(FetchPayload::Text))
            }
            FetchKind::Insult => {
                self.text_source(
                    "https://evilinsult.com/generate_insult.php?lang=en&type=json",
                    "/insult",
                )
                .await
            }
            FetchKind::Cat => {
                let bytes = self.get_bytes("https://cataas.com/cat").await?;
                Ok(Some(FetchPayload::Image {
                    bytes,
                    caption: kind.caption().map(String::from),
                }))
            }
            FetchKind::Dog => {
                self.image_url_source(kind, "https://dog.ceo/api/breeds/image/random", "/message")
                    .await
            }
            FetchKind::CatFact => self.text_source("https://catfact.ninja/fact", "/fact").await,
            FetchKind::Joke => {
                let json = self
                    .get_json("https://v2.jokeapi.dev/joke/Any?type=single,twopart")
                    .await?;
                Ok(joke_text(&json).map(FetchPayload::Text))
            }
            FetchKind::Duck => {
                self.image_url_source(kind, "https://random-d.uk/api/v2/random", "/url")
                    .await
            }
            FetchKind::Fox => {
                self.image_url_source(kind, "https://randomfox.ca/floof/", "/image")
                    .await
            }
            FetchKind::Neko => {
                self.image_url_source(kind, "https://nekos.life/api/v2/img/neko", "/url")
                    .await
            }
            FetchKind::ChuckNorris => {
                self.text_source("https://api.chucknorris.io/jokes/random", "/value")
                    .await
            }
            FetchKind::Buzzword => {
                self.text_source("https://corporatebs-generator.sameerkumar.website/", "/phrase")
                    .await
            }
            FetchKind::UselessFact => {
                self.text_source("https://uselessfacts.jsph.pl/random.json?language=en", "/text")
                    .await
            }
            FetchKind::Techy => {
                self.text_source("https://techy-api.vercel.app/api/json", "/message")
                    .await
            }
            FetchKind::Truth => self.question("truth", arg).await,
            FetchKind::Dare => self.question("dare", arg).await,
            FetchKind::WouldYouRather => self.question("wyr", arg).await,
            FetchKind::NeverHaveIEver => self.question("nhie", arg).await,
            FetchKind::Paranoia => self.question("paranoia", arg).await,
            FetchKind::Palette => {
                let resp = self
                    .client
                    .post("http://colormind.io/api/")
                    .json(&serde_json::json!({ "model": "default" }))
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        url: "http://colormind.io/api/".to_string(),
                    });
                }
                let json: Value = resp.json().await?;
                Ok(palette_text(&json).map(FetchPayload::Text))
            }
        }
    }
}

impl HttpFetcher {
    async fn question(&self, path: &str, rating: &str) -> Result<Option<FetchPayload>, FetchError> {
        let url = format!(
            "https://api.truthordarebot.xyz/v1/{path}?rating={}",
            urlencode(rating)
        );
        self.text_source(&url, "/question").await
    }
}

fn string_at(json: &Value, pointer: &str) -> Option<String> {
    json.pointer(pointer)
        .and_then(Value::as_str)
        .map(String::from)
}

/// The pickup-line API wraps its payload in a `body` field that is sometimes
/// a JSON-encoded string.
fn pickup_text(json: &Value) -> Option<String> {
    let body = match json.get("body") {
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).ok()?,
        _ => json.clone(),
    };
    string_at(&body, "/pickupLine/text")
}

/// Single-part jokes carry `joke`; two-part jokes carry `setup` + `delivery`.
fn joke_text(json: &Value) -> Option<String> {
    if let Some(joke) = string_at(json, "/joke") {
        return Some(joke);
    }
    let setup = string_at(json, "/setup")?;
    let delivery = string_at(json, "/delivery")?;
    Some(format!("{setup}\n\n{delivery}"))
}

/// Render a colormind `result` (array of [r, g, b]) as hex lines.
fn palette_text(json: &Value) -> Option<String> {
    let colors = json.get("result")?.as_array()?;
    if colors.is_empty() {
        return None;
    }
    let mut out = String::from("Color Palette:\n");
    for color in colors {
        let rgb = color.as_array()?;
        let (r, g, b) = (
            rgb.first()?.as_u64()? as u8,
            rgb.get(1)?.as_u64()? as u8,
            rgb.get(2)?.as_u64()? as u8,
        );
        out.push_str(&format!("#{r:02x}{g:02x}{b:02x}\n"));
    }
    Some(out)
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joke_single_part() {
        let json = serde_json::json!({ "joke": "why did the crab cross the road" });
        assert_eq!(
            joke_text(&json).as_deref(),
            Some("why did the crab cross the road")
        );
    }

    #[test]
    fn joke_two_part() {
        let json = serde_json::json!({ "setup": "knock knock", "delivery": "who's there" });
        assert_eq!(joke_text(&json).as_deref(), Some("knock knock\n\nwho's there"));
    }

    #[test]
    fn joke_missing_fields_is_none() {
        let json = serde_json::json!({ "error": true });
        assert!(joke_text(&json).is_none());
    }

    #[test]
    fn pickup_unwraps_stringified_body() {
        let inner = r#"{"pickupLine":{"text":"hi there"}}"#;
        let json = serde_json::json!({ "body": inner });
        assert_eq!(pickup_text(&json).as_deref(), Some("hi there"));
    }

    #[test]
    fn pickup_direct_object_body() {
        let json = serde_json::json!({ "pickupLine": { "text": "direct" } });
        assert_eq!(pickup_text(&json).as_deref(), Some("direct"));
    }

    #[test]
    fn palette_renders_hex_lines() {
        let json = serde_json::json!({ "result": [[255, 0, 0], [0, 128, 255]] });
        let text = palette_text(&json).unwrap();
        assert!(text.starts_with("Color Palette:\n"));
        assert!(text.contains("#ff0000"));
        assert!(text.contains("#0080ff"));
    }

    #[test]
    fn empty_palette_is_none() {
        let json = serde_json::json!({ "result": [] });
        assert!(palette_text(&json).is_none());
    }

    #[test]
    fn urlencode_passes_safe_chars() {
        assert_eq!(urlencode("pg13"), "pg13");
        assert_eq!(urlencode("r rated"), "r%20rated");
    }
}
