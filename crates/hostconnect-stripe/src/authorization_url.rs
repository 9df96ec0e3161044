// Authorization URL builder for Stripe Connect.
//
// https://connect.stripe.com/oauth/authorize?response_type=code&client_id=..&scope=read_write&state=<group id>

use crate::config::StripeConnectOptions;
use crate::error::StripeError;

/// Build the authorize redirect for `state` (the group id).
pub fn create_authorization_url(
    options: &StripeConnectOptions,
    state: &str,
) -> Result<url::Url, StripeError> {
    let mut url = url::Url::parse(&options.authorize_url)
        .map_err(|e| StripeError::InvalidUrl(e.to_string()))?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", &options.client_id)
            .append_pair("scope", &options.scope);
        if let Some(redirect) = &options.redirect_uri {
            query.append_pair("redirect_uri", redirect);
        }
        query.append_pair("state", state);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_url() {
        let options = StripeConnectOptions::new("ca_abc123", "sk_test_platform");
        let url = create_authorization_url(&options, "group-42").unwrap();
        let url_str = url.to_string();

        assert!(url_str.starts_with("https://connect.stripe.com/oauth/authorize?"));
        assert!(url_str.contains("response_type=code"));
        assert!(url_str.contains("client_id=ca_abc123"));
        assert!(url_str.contains("scope=read_write"));
        assert!(url_str.contains("state=group-42"));
        assert!(!url_str.contains("redirect_uri"));
    }

    #[test]
    fn test_redirect_uri_is_encoded() {
        let mut options = StripeConnectOptions::new("ca_abc123", "sk_test_platform");
        options.redirect_uri = Some("http://localhost:3060/stripe/oauth/callback".into());

        let url = create_authorization_url(&options, "g1").unwrap();
        let redirect = url
            .query_pairs()
            .find(|(k, _)| k == "redirect_uri")
            .map(|(_, v)| v.into_owned());
        assert_eq!(
            redirect.as_deref(),
            Some("http://localhost:3060/stripe/oauth/callback")
        );
        assert!(url
            .as_str()
            .contains("redirect_uri=http%3A%2F%2Flocalhost%3A3060%2Fstripe%2Foauth%2Fcallback"));
    }

    #[test]
    fn test_never_secret_in_url() {
        let options = StripeConnectOptions::new("ca_abc123", "sk_test_platform");
        let url = create_authorization_url(&options, "g1").unwrap();
        assert!(!url.as_str().contains("sk_test_platform"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut options = StripeConnectOptions::new("ca_abc123", "sk");
        options.authorize_url = "/oauth/authorize".into();
        assert!(matches!(
            create_authorization_url(&options, "g1"),
            Err(StripeError::InvalidUrl(_))
        ));
    }
}
