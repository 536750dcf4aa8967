use nq_core::Error;

pub const MODEL_LOADING: &str = "The AI model is currently loading. Please wait a moment and try again.";
pub const RATE_LIMITED: &str = "Rate limit exceeded. Please wait a moment and try again.";
pub const MODEL_PAUSED: &str = "The AI model is currently paused. Please try again later or contact support.";
pub const ENDPOINT_GONE: &str = "The API endpoint has changed. Please contact support.";
pub const MODEL_UNAVAILABLE: &str =
    "The selected AI model is not available. Please try a different model or contact support.";
pub const PROVIDER_NOT_ENABLED: &str = "The selected AI model is not supported by your enabled providers. \
Please enable providers in your Hugging Face account settings or try a different model.";
pub const GENERIC_FAILURE: &str =
    "I apologize, but I encountered an error while generating the answer. Please try again.";
pub const EMPTY_ANSWER: &str = "I apologize, but I could not generate a response. Please try again.";

/// User-facing text for a failed completion. The first matching rule wins.
pub fn llm_error_message(error: &Error) -> &'static str {
    let status = error.status();
    let message = match error {
        Error::Provider { message, .. } => message.to_lowercase(),
        other => other.to_string().to_lowercase(),
    };

    if status == Some(503) || message.contains("loading") {
        MODEL_LOADING
    } else if status == Some(429) || message.contains("rate limit") {
        RATE_LIMITED
    } else if status == Some(400) && message.contains("paused") {
        MODEL_PAUSED
    } else if status == Some(410) || message.contains("no longer supported") {
        ENDPOINT_GONE
    } else if message.contains("inference provider") {
        MODEL_UNAVAILABLE
    } else if message.contains("not supported by any provider") || error.code() == Some("model_not_supported") {
        PROVIDER_NOT_ENABLED
    } else {
        GENERIC_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(status: Option<u16>, message: &str) -> Error {
        Error::provider(status, message)
    }

    #[test]
    fn test_status_rules() {
        assert_eq!(llm_error_message(&provider(Some(503), "Service Unavailable")), MODEL_LOADING);
        assert_eq!(llm_error_message(&provider(Some(429), "Too Many Requests")), RATE_LIMITED);
        assert_eq!(llm_error_message(&provider(Some(410), "Gone")), ENDPOINT_GONE);
    }

    #[test]
    fn test_message_rules() {
        assert_eq!(llm_error_message(&provider(None, "Model is loading")), MODEL_LOADING);
        assert_eq!(llm_error_message(&provider(Some(500), "Rate limit reached")), RATE_LIMITED);
        assert_eq!(
            llm_error_message(&provider(Some(404), "This endpoint is no longer supported")),
            ENDPOINT_GONE
        );
        assert_eq!(
            llm_error_message(&provider(Some(400), "No Inference Provider available for model")),
            MODEL_UNAVAILABLE
        );
        assert_eq!(
            llm_error_message(&provider(Some(400), "The model is not supported by any provider you have enabled")),
            PROVIDER_NOT_ENABLED
        );
    }

    #[test]
    fn test_paused_needs_bad_request() {
        assert_eq!(llm_error_message(&provider(Some(400), "Model is paused")), MODEL_PAUSED);
        assert_eq!(llm_error_message(&provider(Some(500), "Model is paused")), GENERIC_FAILURE);
    }

    #[test]
    fn test_rule_order() {
        // 503 wins over a rate-limit message
        assert_eq!(llm_error_message(&provider(Some(503), "rate limit")), MODEL_LOADING);
        // 429 wins over a paused message
        assert_eq!(llm_error_message(&provider(Some(429), "paused")), RATE_LIMITED);
    }

    #[test]
    fn test_structured_code() {
        let error = Error::Provider {
            status: Some(400),
            message: "Bad request".to_string(),
            code: Some("model_not_supported".to_string()),
        };
        assert_eq!(llm_error_message(&error), PROVIDER_NOT_ENABLED);
    }

    #[test]
    fn test_anything_else() {
        assert_eq!(llm_error_message(&Error::Inference("boom".to_string())), GENERIC_FAILURE);
        assert_eq!(llm_error_message(&provider(Some(500), "Internal error")), GENERIC_FAILURE);
    }
}
