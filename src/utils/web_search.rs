//! Web search suggestions
//!
//! Builds search engine queries and lists free lookup APIs for a number.
//! Nothing here performs a network request.

use serde::Serialize;

const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// One suggested search with its ready-to-open URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub url: String,
}

/// A lookup API the user may query themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiHint {
    pub name: String,
    pub url: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSuggestions {
    pub queries: Vec<SearchQuery>,
    pub apis: Vec<ApiHint>,
}

/// Build the suggested queries and API hints for a number as typed
pub fn suggestions(phone_number: &str) -> WebSuggestions {
    let queries = [
        format!("\"{}\"", phone_number),
        format!("phone number {}", phone_number),
        format!("telephone {}", phone_number),
        format!("contact {}", phone_number),
    ]
    .into_iter()
    .map(|query| SearchQuery {
        url: format!("{}{}", SEARCH_URL, percent_encode(&query)),
        query,
    })
    .collect();

    let encoded = percent_encode(phone_number);
    let apis = vec![
        ApiHint {
            name: "NumVerify".to_string(),
            url: format!("http://apilayer.net/api/validate?access_key=YOUR_KEY&number={}", encoded),
            note: "Requires free API key".to_string(),
        },
        ApiHint {
            name: "AbstractAPI".to_string(),
            url: format!("https://phonevalidation.abstractapi.com/v1/?api_key=YOUR_KEY&phone={}", encoded),
            note: "Requires free API key".to_string(),
        },
    ];

    WebSuggestions { queries, apis }
}

/// Percent-encode everything except unreserved characters and '/'
pub fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
