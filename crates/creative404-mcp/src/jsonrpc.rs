//! JSON-RPC 2.0 envelope types for MCP communication.

use serde::{Deserialize, Serialize};

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request.
    pub fn new(id: u64, method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response with a typed `result`.
///
/// Exactly one of `result`/`error` is expected; both absent is a protocol
/// violation the caller has to handle.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_request_with_params() {
        let req = JsonRpcRequest::new(
            1,
            "initialize",
            serde_json::json!({"protocolVersion": "2024-11-05", "capabilities": {}}),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 1);
        assert_eq!(json["method"], "initialize");
        assert!(json["params"]["capabilities"].is_object());
    }

    #[test]
    fn serialize_request_with_empty_params() {
        let req = JsonRpcRequest::new(2, "tools/list", serde_json::json!({}));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["params"], serde_json::json!({}));
    }

    #[test]
    fn deserialize_response_with_result() {
        let json = r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[]}}"#;
        let resp: JsonRpcResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id, Some(1));
        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[test]
    fn deserialize_response_with_error() {
        let json =
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#;
        let resp: JsonRpcResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(resp.result.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not found");
        assert!(err.data.is_none());
    }

    #[test]
    fn deserialize_response_with_neither() {
        let resp: JsonRpcResponse<serde_json::Value> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7}"#).unwrap();
        assert!(resp.result.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn deserialize_typed_result() {
        #[derive(Deserialize)]
        struct Named {
            name: String,
        }
        let resp: JsonRpcResponse<Named> =
            serde_json::from_str(r#"{"id":2,"result":{"name":"x"}}"#).unwrap();
        assert_eq!(resp.result.unwrap().name, "x");
    }
}
