//! Process command - send code and prompt to be echoed

use anyhow::{Context, Result};
use flow_client::{FlowClient, ProcessRequest};

use crate::output::{or_null, OutputContext};

/// Build the request; `message` fills whichever of code and prompt is unset,
/// and `default_prompt` fills the prompt if it is still unset
pub fn build_request(
    code: Option<&str>,
    prompt: Option<&str>,
    message: Option<&str>,
    default_prompt: Option<&str>,
) -> ProcessRequest {
    ProcessRequest {
        code: code.or(message).map(String::from),
        prompt: prompt.or(message).or(default_prompt).map(String::from),
    }
}

/// Send a process request and show what came back
pub async fn process(
    client: &FlowClient,
    request: &ProcessRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let response = client
        .process_request(request)
        .await
        .context("Failed to process request")?;

    let pairs = vec![
        ("Code", or_null(response.received_data.code.as_deref())),
        ("Prompt", or_null(response.received_data.prompt.as_deref())),
    ];

    ctx.print_kv(&pairs, &response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_fills_both_fields() {
        let req = build_request(None, None, Some("hi"), None);
        assert_eq!(req.code.as_deref(), Some("hi"));
        assert_eq!(req.prompt.as_deref(), Some("hi"));
    }

    #[test]
    fn test_explicit_fields_win_over_message() {
        let req = build_request(Some("x = 1"), None, Some("hi"), Some("cfg"));
        assert_eq!(req.code.as_deref(), Some("x = 1"));
        assert_eq!(req.prompt.as_deref(), Some("hi"));
    }

    #[test]
    fn test_nothing_set() {
        assert_eq!(build_request(None, None, None, None), ProcessRequest::default());
    }

    #[test]
    fn test_configured_prompt_is_last_resort() {
        let req = build_request(Some("x = 1"), None, None, Some("Explain this code"));
        assert_eq!(req.prompt.as_deref(), Some("Explain this code"));

        let req = build_request(None, Some("flag"), None, Some("Explain this code"));
        assert_eq!(req.prompt.as_deref(), Some("flag"));
        assert_eq!(req.code, None);
    }
}
