use async_graphql::ErrorExtensions;

use shelfgate_core::GatewayError;

/// Convert a gateway failure into a GraphQL field error.
///
/// The message is the error's display text; `extensions.code` carries the
/// stable machine-readable code.
pub fn gateway_error_to_graphql(err: GatewayError) -> async_graphql::Error {
    tracing::warn!(code = err.code(), error = %err, "product operation failed");
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfgate_core::UpstreamService;

    fn code_of(err: &async_graphql::Error) -> Option<String> {
        let ext = serde_json::to_value(err.extensions.as_ref()?).ok()?;
        ext["code"].as_str().map(str::to_string)
    }

    #[test]
    fn not_found_keeps_message_and_code() {
        let err = gateway_error_to_graphql(GatewayError::not_found("no catalog product with code 9"));
        assert_eq!(err.message, "not found: no catalog product with code 9");
        assert_eq!(code_of(&err).as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn transport_failures_are_flagged_unavailable() {
        let err = gateway_error_to_graphql(GatewayError::transport(
            UpstreamService::Catalog,
            "connection refused",
        ));
        assert_eq!(code_of(&err).as_deref(), Some("UPSTREAM_UNAVAILABLE"));
        assert!(err.message.contains("catalog"));
    }
}
