//! Response - リモート endpoint の応答を解釈する
//!
//! - 成功のシグナルは `{"data": true}` のみ
//! - HTTP status は成否の判定に使わない（失敗メッセージに載せるだけ）

use crate::domain::RunError;
use crate::ports::HttpResponse;

pub fn interpret(response: &HttpResponse) -> Result<(), RunError> {
    let body: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
        RunError::ResponseMalformed(format!("{e} (http {})", response.status))
    })?;

    match body.get("data") {
        Some(serde_json::Value::Bool(true)) => Ok(()),
        Some(other) => Err(RunError::SemanticFailure(format!(
            "data={other} (http {})",
            response.status
        ))),
        None => Err(RunError::SemanticFailure(format!(
            "no data field (http {})",
            response.status
        ))),
    }
}
