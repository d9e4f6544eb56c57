use url::{form_urlencoded, Url};

/// Where the front end should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Upload,
    Chat { doc_id: String, filename: String },
}

impl Route {
    /// Location string with navigation parameters, e.g. `/chat?docId=d1&filename=f.pdf`.
    pub fn location(&self) -> String {
        match self {
            Route::Upload => "/upload".to_string(),
            Route::Chat { doc_id, filename } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("docId", doc_id)
                    .append_pair("filename", filename)
                    .finish();
                format!("/chat?{query}")
            }
        }
    }

    /// Navigation parameters the chat screen is opened with.
    pub fn chat_query(&self) -> Option<ChatQuery> {
        match self {
            Route::Upload => None,
            Route::Chat { doc_id, filename } => Some(ChatQuery {
                doc_id: Some(doc_id.clone()),
                filename: Some(filename.clone()),
            }),
        }
    }
}

/// Navigation parameters of the chat screen. Absent values fall back to the
/// stored last upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatQuery {
    pub doc_id: Option<String>,
    pub filename: Option<String>,
}

impl ChatQuery {
    pub fn new(doc_id: Option<String>, filename: Option<String>) -> Self {
        Self { doc_id, filename }
    }

    /// Parses the query part of a chat location. Unparseable input yields an
    /// empty query.
    pub fn from_location(location: &str) -> Self {
        let Ok(base) = Url::parse("http://pdfchat.local/") else {
            return Self::default();
        };
        let Ok(parsed) = base.join(location.trim()) else {
            return Self::default();
        };

        let mut query = Self::default();
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "docId" => query.doc_id = Some(value.into_owned()),
                "filename" => query.filename = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    /// The doc id, when present and non-empty.
    pub(crate) fn effective_doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref().filter(|id| !id.is_empty())
    }
}
