use serde::{Deserialize, Serialize};

/// Error body returned by the review service on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
}

/// The `detail` field is a plain message for server-side failures and a
/// list of message objects for request validation failures. Any other shape
/// is kept as raw JSON so decoding the body never fails on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ErrorItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_detail_shape() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"System encountered an error."}"#).expect("string");
        assert!(matches!(body.detail, Some(ErrorDetail::Message(ref m)) if m == "System encountered an error."));

        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","title"],"msg":"a","type":"x"},{"msg":"b"}]}"#,
        )
        .expect("list");
        let Some(ErrorDetail::Items(items)) = body.detail else {
            panic!("expected item list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].msg, "b");

        let body: ErrorBody = serde_json::from_str(r#"{"detail":42}"#).expect("other");
        assert!(matches!(body.detail, Some(ErrorDetail::Other(_))));

        let body: ErrorBody = serde_json::from_str(r#"{"errors":[]}"#).expect("missing");
        assert!(body.detail.is_none());
    }
}
