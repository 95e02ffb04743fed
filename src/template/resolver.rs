// Template resolver - two-stage rendering pipeline
//
// Stage one renders the locator template and fetches the content it
// points at; stage two renders that content against the same context and
// decodes it into the typed payload. Both stages share one handlebars
// registry in strict mode, so an unresolved placeholder fails the message
// instead of producing a half-filled notification.

use crate::template::fetcher::{EmbeddedFetcher, HttpFetcher, TemplateFetcher};
use crate::NagError;
use handlebars::Handlebars;
use serde::de::DeserializeOwned;
use url::Url;

/// Resolves locator templates to content and renders typed payloads.
pub struct TemplateResolver {
    handlebars: Handlebars<'static>,
    fetchers: Vec<Box<dyn TemplateFetcher>>,
    fallback: Box<dyn TemplateFetcher>,
}

impl TemplateResolver {
    /// Create a resolver with the embedded fetcher registered and HTTP as
    /// the fallback for unmatched schemes.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Output is YAML payload text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            handlebars,
            fetchers: vec![Box::new(EmbeddedFetcher::new())],
            fallback: Box::new(HttpFetcher::new()),
        }
    }

    /// Register an additional scheme fetcher
    pub fn with_fetcher(mut self, fetcher: Box<dyn TemplateFetcher>) -> Self {
        self.fetchers.push(fetcher);
        self
    }

    /// Render the locator template and fetch the template text it
    /// points at.
    pub async fn resolve_text(
        &self,
        locator_template: &str,
        context: &serde_json::Value,
    ) -> Result<String, NagError> {
        let locator = self.render_str(locator_template, context)?;
        let url = Url::parse(&locator).map_err(|source| NagError::InvalidLocator {
            locator: locator.clone(),
            source,
        })?;

        let fetcher = self
            .fetchers
            .iter()
            .find(|f| f.scheme() == url.scheme())
            .unwrap_or(&self.fallback);

        fetcher.fetch(&url).await
    }

    /// Render template text against the context and decode the result
    /// into the payload shape.
    pub fn render_payload<T: DeserializeOwned>(
        &self,
        template_text: &str,
        context: &serde_json::Value,
    ) -> Result<T, NagError> {
        let rendered = self.render_str(template_text, context)?;
        Ok(serde_yaml::from_str(&rendered)?)
    }

    /// Resolve the locator and render the payload in one call.
    pub async fn resolve_payload<T: DeserializeOwned>(
        &self,
        locator_template: &str,
        context: &serde_json::Value,
    ) -> Result<T, NagError> {
        let template_text = self.resolve_text(locator_template, context).await?;
        self.render_payload(&template_text, context)
    }

    fn render_str(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, NagError> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ChatMessage, EmailSendRequest};
    use serde_json::json;

    fn context() -> serde_json::Value {
        json!({
            "notification_method": "email",
            "username": "alice",
            "email_to": "alice@example.com",
            "email_from": "nagbot@example.com",
            "notification": {
                "credential": "password",
                "category": "expired",
                "days_over": 10,
            },
        })
    }

    #[tokio::test]
    async fn test_locator_rendering_selects_bundled_template() {
        let resolver = TemplateResolver::new();
        let text = resolver
            .resolve_text(
                "embedded://self/{{notification_method}}/{{notification.credential}}-{{notification.category}}.yml",
                &context(),
            )
            .await
            .unwrap();

        assert!(text.contains("{{notification.days_over}}"));
    }

    #[tokio::test]
    async fn test_unresolvable_key_is_resource_not_found() {
        let resolver = TemplateResolver::new();
        let err = resolver
            .resolve_text("embedded://self/email/certificate-expired.yml", &context())
            .await
            .unwrap_err();

        assert!(matches!(err, NagError::ResourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_unknown_locator_placeholder() {
        let resolver = TemplateResolver::new();
        let err = resolver
            .resolve_text("embedded://self/{{no_such_key}}.yml", &context())
            .await
            .unwrap_err();

        assert!(matches!(err, NagError::TemplateRender(_)));
    }

    #[tokio::test]
    async fn test_unparseable_locator() {
        let resolver = TemplateResolver::new();
        let err = resolver
            .resolve_text("{{notification.credential}}-no-scheme", &context())
            .await
            .unwrap_err();

        assert!(matches!(err, NagError::InvalidLocator { .. }));
    }

    #[test]
    fn test_render_payload_decodes_email_request() {
        let resolver = TemplateResolver::new();
        let template = "from: \"{{email_from}}\"\nto: \"{{email_to}}\"\nsubject: \"password expired {{notification.days_over}} day(s) ago\"\ntext_body: \"Rotate it, {{username}}.\"\n";

        let request: EmailSendRequest = resolver.render_payload(template, &context()).unwrap();

        assert_eq!(request.to, "alice@example.com");
        assert_eq!(request.subject, "password expired 10 day(s) ago");
        assert_eq!(request.text_body, "Rotate it, alice.");
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let resolver = TemplateResolver::new();
        let ctx = json!({ "username": "<root_account>" });

        let rendered: String = resolver
            .render_payload("\"password for {{username}}\"", &ctx)
            .unwrap();
        assert_eq!(rendered, "password for <root_account>");
    }

    #[test]
    fn test_render_payload_shape_mismatch_is_decode_error() {
        let resolver = TemplateResolver::new();
        // Renders fine but lacks the required "to" field
        let template = "from: \"{{email_from}}\"\nsubject: oops\n";

        let err = resolver
            .render_payload::<EmailSendRequest>(template, &context())
            .unwrap_err();
        assert!(matches!(err, NagError::Decode(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_payload_from_bundled_template() {
        let resolver = TemplateResolver::new();
        let ctx = json!({
            "notification_method": "slack",
            "username": "bob",
            "slack_to": "#security",
            "notification": {
                "credential": "accessKey",
                "category": "warning",
                "access_key_id": "AccessKey_1",
                "days_left": 3,
            },
        });

        let message: ChatMessage = resolver
            .resolve_payload(
                "embedded://self/{{notification_method}}/{{notification.credential}}-{{notification.category}}.yml",
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(message.channel, "#security");
        assert!(message.text.contains("AccessKey_1"));
        assert!(message.text.contains('3'));
    }

    #[tokio::test]
    async fn test_unregistered_scheme_falls_through_to_http() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("text: fallback"))
            .mount(&server)
            .await;

        // An http URL has no registered fetcher, so it takes the fallback
        let resolver = TemplateResolver::new();
        let text = resolver
            .resolve_text(&format!("{}/anything.yml", server.uri()), &context())
            .await
            .unwrap();

        assert_eq!(text, "text: fallback");
    }
}
