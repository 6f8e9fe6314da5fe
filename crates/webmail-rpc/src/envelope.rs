//! JSON-RPC 2.0 request and response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, RemoteError, Result};

/// Protocol version string carried in every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request envelope.
///
/// `token` and `params` are left out of the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request<P> {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Remote method, e.g. `Session.login`.
    pub method: String,
    /// Request id.
    pub id: u64,
    /// Session token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

impl<P> Request<P> {
    /// Creates a request envelope.
    #[must_use]
    pub fn new(id: u64, method: impl Into<String>, token: Option<String>, params: Option<P>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            id,
            token,
            params,
        }
    }
}

impl<P: Serialize> Request<P> {
    /// Serializes the envelope to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail to serialize.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Successful response envelope, carrying only the `result` member.
#[derive(Debug, Deserialize)]
struct Response {
    result: Value,
}

/// Decodes the `result` member of a response body.
///
/// Object members set to `null` are dropped before decoding, so they read
/// as absent and take their default.
///
/// # Errors
///
/// Returns an error if the body is not JSON, has no `result` member, or
/// `result` does not match `R`.
pub fn decode_result<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    let Response { mut result } = serde_json::from_slice(body)?;
    drop_null_members(&mut result);
    Ok(R::deserialize(result)?)
}

fn drop_null_members(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(drop_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_null_members),
        _ => {}
    }
}

/// Inspects a response body for a top-level error object.
///
/// The body is an error only when `error.code` is non-zero or
/// `error.message` is non-empty. Members of the error object are read one
/// by one: a member that is missing, `null` or of the wrong type takes its
/// zero value without hiding the others. Bodies that are not a JSON object
/// count as error-free; decoding of the result reports them.
///
/// # Errors
///
/// Returns [`Error::Remote`] carrying code, message and parameters.
pub fn check_error(body: &[u8]) -> Result<()> {
    let envelope: Value = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(?e, "response body is not JSON");
            return Ok(());
        }
    };

    let Some(error) = envelope.get("error").filter(|error| error.is_object()) else {
        return Ok(());
    };

    let code = error
        .get("code")
        .and_then(Value::as_i64)
        .and_then(|code| i32::try_from(code).ok())
        .unwrap_or_default();
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if code == 0 && message.is_empty() {
        return Ok(());
    }

    let params = error.pointer("/data/messageParameters");
    let parameters = params
        .and_then(|params| params.get("positionalParameters"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|value| value.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default();
    let plurality = params
        .and_then(|params| params.get("plurality"))
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or_default();

    Err(Error::Remote(RemoteError {
        code,
        message: message.to_string(),
        parameters,
        plurality,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_absent_members() {
        let request: Request<Value> = Request::new(1, "Session.whoAmI", None, None);
        let value: Value = serde_json::from_slice(&request.to_vec().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "Session.whoAmI", "id": 1})
        );
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("token"));
        assert!(!object.contains_key("params"));
    }

    #[test]
    fn test_envelope_with_token_and_params() {
        let params = json!({"folderIds": ["a"]});
        let request = Request::new(7, "Mails.get", Some("tok".to_string()), Some(&params));
        let value: Value = serde_json::from_slice(&request.to_vec().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "Mails.get",
                "id": 7,
                "token": "tok",
                "params": {"folderIds": ["a"]}
            })
        );
    }

    #[test]
    fn test_envelope_deserialize() {
        let request: Request<Value> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"Folders.get","id":3}"#).unwrap();
        assert_eq!(request.id, 3);
        assert_eq!(request.method, "Folders.get");
        assert!(request.token.is_none());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_check_error_success_forms() {
        assert!(check_error(br#"{"result":{"a":1}}"#).is_ok());
        assert!(check_error(br#"{"error":{"code":0,"message":""},"result":{}}"#).is_ok());
        assert!(check_error(br#"{"error":null,"result":{}}"#).is_ok());
    }

    #[test]
    fn test_check_error_remote() {
        let err = check_error(br#"{"error":{"code":1002,"message":"Not found"}}"#).unwrap_err();
        let remote = err.as_remote().unwrap();
        assert_eq!(remote.code, 1002);
        assert_eq!(remote.message, "Not found");
    }

    #[test]
    fn test_check_error_message_only() {
        let err = check_error(br#"{"error":{"code":0,"message":"odd"}}"#).unwrap_err();
        assert_eq!(err.as_remote().unwrap().code, 0);
    }

    #[test]
    fn test_check_error_parameters() {
        let body = json!({
            "error": {
                "code": 1000,
                "message": "Cannot delete %1",
                "data": {
                    "messageParameters": {
                        "positionalParameters": ["Inbox"],
                        "plurality": 1
                    }
                }
            }
        });
        let err = check_error(&serde_json::to_vec(&body).unwrap()).unwrap_err();
        let remote = err.as_remote().unwrap();
        assert_eq!(remote.parameters, vec!["Inbox".to_string()]);
        assert_eq!(remote.plurality, 1);
        assert_eq!(remote.rendered_message(), "Cannot delete Inbox");
    }

    #[test]
    fn test_check_error_malformed_body() {
        assert!(check_error(b"<html>bad gateway</html>").is_ok());
        assert!(check_error(b"").is_ok());
        assert!(check_error(br#"{"error":"text"}"#).is_ok());
    }

    #[test]
    fn test_check_error_null_members() {
        let body = br#"{"error":{"code":1002,"message":"No such entity","data":{"messageParameters":{"positionalParameters":null,"plurality":1}}}}"#;
        let remote = check_error(body).unwrap_err().as_remote().cloned().unwrap();
        assert_eq!(remote.code, 1002);
        assert_eq!(remote.message, "No such entity");
        assert!(remote.parameters.is_empty());
        assert_eq!(remote.plurality, 1);

        let err = check_error(br#"{"error":{"code":1002,"message":null}}"#).unwrap_err();
        assert_eq!(err.code(), Some(crate::ErrorCode::NoSuchEntity));
        assert_eq!(err.as_remote().unwrap().message, "");

        let body = br#"{"error":{"code":1004,"message":"Denied","data":null}}"#;
        let err = check_error(body).unwrap_err();
        assert_eq!(err.code(), Some(crate::ErrorCode::AccessDenied));
    }

    #[test]
    fn test_check_error_mistyped_members() {
        let body = br#"{"error":{"code":"x","message":"Odd","data":{"messageParameters":{"plurality":"many"}}}}"#;
        let remote = check_error(body).unwrap_err().as_remote().cloned().unwrap();
        assert_eq!(remote.code, 0);
        assert_eq!(remote.message, "Odd");
        assert_eq!(remote.plurality, 0);

        assert!(check_error(br#"{"error":{"code":null,"message":null}}"#).is_ok());
    }

    #[test]
    fn test_decode_result_drops_null_members() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct Reply {
            list: Vec<String>,
            name: String,
            total: i64,
        }

        let body = br#"{"result":{"list":null,"name":null,"total":3}}"#;
        let reply: Reply = decode_result(body).unwrap();
        assert!(reply.list.is_empty());
        assert_eq!(reply.name, "");
        assert_eq!(reply.total, 3);

        let body = br#"{"result":[{"list":["a"],"name":null}]}"#;
        let nested: Vec<Reply> = decode_result(body).unwrap();
        assert_eq!(nested[0].list, vec!["a".to_string()]);

        let nothing: Option<u32> = decode_result(br#"{"result":null}"#).unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn test_decode_result() {
        let n: u32 = decode_result(br#"{"jsonrpc":"2.0","id":1,"result":5}"#).unwrap();
        assert_eq!(n, 5);

        let err = decode_result::<u32>(b"not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = decode_result::<u32>(br#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
