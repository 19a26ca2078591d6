use crate::error::{Result, ShellError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Execution context of a single command.
///
/// The token is a child of the shell's root token and is cancelled once the
/// shell stops.
#[derive(Debug, Clone)]
pub struct Context {
    line: u64,
    cancellation: CancellationToken,
}

impl Context {
    pub fn new(line: u64, cancellation: CancellationToken) -> Self {
        Self { line, cancellation }
    }

    /// 1-based number of the input line this command was read from.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(0, CancellationToken::new())
    }
}

/// A parsed command handed to a [`Handler`](crate::Handler).
///
/// The parameters travel as a JSON object of strings; each handler decodes
/// it into its own typed shape with [`Request::decode`].
#[derive(Debug, Clone)]
pub struct Request {
    ctx: Context,
    action: String,
    body: Value,
}

impl Request {
    pub fn new(ctx: Context, action: impl Into<String>, params: HashMap<String, String>) -> Self {
        let body = params
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<String, Value>>();

        Self {
            ctx,
            action: action.into(),
            body: Value::Object(body),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Decodes the request body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.body).map_err(|e| ShellError::Decode(e.to_string()))
    }
}

/// The payload a handler produced for a command.
#[derive(Debug, Clone)]
pub struct Response {
    ctx: Context,
    body: Value,
}

impl Response {
    /// Builds a response from any serializable payload.
    ///
    /// Struct fields keep their declaration order on the wire.
    pub fn respond<T: Serialize>(ctx: &Context, body: &T) -> Result<Self> {
        let body = serde_json::to_value(body).map_err(|e| ShellError::Encode(e.to_string()))?;
        Ok(Self {
            ctx: ctx.clone(),
            body,
        })
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Compact JSON rendering of the body, without a trailing newline.
    pub fn to_line(&self) -> String {
        self.body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        #[serde(default)]
        left: String,
        #[serde(default)]
        right: String,
    }

    #[test]
    fn decode_into_typed_request() {
        let req = Request::new(
            Context::default(),
            "PAIR",
            params(&[("left", "a"), ("right", "b"), ("extra", "ignored")]),
        );

        let pair: Pair = req.decode().unwrap();
        assert_eq!(
            pair,
            Pair {
                left: "a".into(),
                right: "b".into()
            }
        );
        assert_eq!(req.action(), "PAIR");
    }

    #[test]
    fn decode_missing_fields_default() {
        let req = Request::new(Context::default(), "PAIR", params(&[("left", "a")]));

        let pair: Pair = req.decode().unwrap();
        assert_eq!(pair.right, "");
    }

    #[test]
    fn decode_type_mismatch_is_validation_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Numeric {
            value: u64,
        }

        let req = Request::new(Context::default(), "NUM", params(&[("value", "12")]));

        let err = req.decode::<Numeric>().unwrap_err();
        assert!(matches!(err, ShellError::Decode(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
    }

    #[test]
    fn response_keeps_field_order() {
        #[derive(Serialize)]
        struct Metrics {
            id: u64,
            url: &'static str,
            count: u64,
            inactive: bool,
        }

        let resp = Response::respond(
            &Context::default(),
            &Metrics {
                id: 1,
                url: "example.com",
                count: 1,
                inactive: false,
            },
        )
        .unwrap();

        assert_eq!(
            resp.to_line(),
            r#"{"id":1,"url":"example.com","count":1,"inactive":false}"#
        );
    }

    #[test]
    fn response_carries_request_context() {
        let ctx = Context::new(4, CancellationToken::new());
        let resp = Response::respond(&ctx, &serde_json::json!({"msg": "ok"})).unwrap();
        assert_eq!(resp.context().line(), 4);
    }
}
