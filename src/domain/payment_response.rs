use super::payment_request::query_params;
use serde::Serialize;

/// Outcome reported by the UPI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Submitted,
    Failure,
}

/// The response string a UPI application hands back once the user leaves it,
/// e.g. `txnId=AX12&responseCode=00&Status=SUCCESS&txnRef=42`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResponse {
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub response_code: Option<String>,
    pub approval_ref: Option<String>,
    pub transaction_ref: Option<String>,
    pub raw: String,
}

impl PaymentResponse {
    /// Parses a response string. Keys are matched case-insensitively.
    ///
    /// An empty response, a missing `Status`, or an unrecognised one all count
    /// as [`PaymentStatus::Failure`]: apps that are backed out of report nothing.
    pub fn parse(raw: &str) -> Self {
        let mut response = Self {
            status: PaymentStatus::Failure,
            transaction_id: None,
            response_code: None,
            approval_ref: None,
            transaction_ref: None,
            raw: raw.to_string(),
        };

        let Ok(params) = query_params(raw.trim()) else {
            return response;
        };

        for (key, value) in params {
            if value.is_empty() {
                continue;
            }
            match key.to_ascii_lowercase().as_str() {
                "status" => {
                    response.status = match value.to_ascii_uppercase().as_str() {
                        "SUCCESS" => PaymentStatus::Success,
                        "SUBMITTED" => PaymentStatus::Submitted,
                        _ => PaymentStatus::Failure,
                    }
                }
                "txnid" => response.transaction_id = Some(value),
                "responsecode" => response.response_code = Some(value),
                "approvalrefno" => response.approval_ref = Some(value),
                "txnref" => response.transaction_ref = Some(value),
                _ => {}
            }
        }
        response
    }

    pub fn cancelled() -> Self {
        Self::parse("")
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let response = PaymentResponse::parse(
            "txnId=AXI123&responseCode=00&Status=SUCCESS&ApprovalRefNo=998877&txnRef=42",
        );

        assert!(response.is_success());
        assert_eq!(response.transaction_id.as_deref(), Some("AXI123"));
        assert_eq!(response.response_code.as_deref(), Some("00"));
        assert_eq!(response.approval_ref.as_deref(), Some("998877"));
        assert_eq!(response.transaction_ref.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let response = PaymentResponse::parse("TXNID=1&status=submitted");
        assert_eq!(response.status, PaymentStatus::Submitted);
        assert_eq!(response.transaction_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_response_is_failure() {
        let response = PaymentResponse::cancelled();
        assert_eq!(response.status, PaymentStatus::Failure);
        assert!(response.transaction_id.is_none());

        let unknown = PaymentResponse::parse("Status=PENDING");
        assert_eq!(unknown.status, PaymentStatus::Failure);
    }
}
