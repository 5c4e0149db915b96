//! Request URL construction.

use url::Url;

use crate::{SumoLogicError, SumoLogicResult};

/// API version placed in every path.
pub const API_VERSION: &str = "v1";

/// Page size of paged endpoints. The API default and maximum.
pub const PAGE_SIZE: u32 = 100;

/// Renders `template` against `base` and appends the query string.
///
/// Every `{name}` placeholder is replaced by the percent-escaped value of
/// `path_params`; a placeholder without a value is an error and nothing is
/// built. Empty, `.` and `..` values are rejected since the URL parser would
/// collapse them as dot segments and address a different endpoint. Query parameters come in a fixed order: `token` (when non-empty),
/// `limit` (paged endpoints only), then `query_params` as given.
///
/// # Errors
///
/// Returns [`SumoLogicError::PathTemplate`] for unmatched placeholders,
/// [`SumoLogicError::PathParameter`] for values that are not a single path
/// segment and [`SumoLogicError::Url`] if the rendered URL does not parse.
pub fn build_url(
    base: &Url,
    template: &str,
    path_params: &[(&str, &str)],
    query_params: &[(&str, &str)],
    page_token: Option<&str>,
    page_size: Option<u32>,
) -> SumoLogicResult<Url> {
    let path = render_path(template, path_params)?;

    let mut url = base.clone();
    let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    url.set_query(None);

    let token = page_token.filter(|t| !t.is_empty());
    if token.is_some() || page_size.is_some() || !query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        if let Some(token) = token {
            pairs.append_pair("token", token);
        }
        if let Some(limit) = page_size {
            pairs.append_pair("limit", &limit.to_string());
        }
        for (key, value) in query_params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

fn render_path(template: &str, path_params: &[(&str, &str)]) -> SumoLogicResult<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(unresolved(template, after));
        };
        let name = &after[..end];
        let value = path_params
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
            .ok_or_else(|| unresolved(template, name))?;
        if matches!(value, "" | "." | "..") {
            return Err(SumoLogicError::PathParameter {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        rendered.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }
    rendered.push_str(rest);

    Ok(rendered)
}

fn unresolved(template: &str, placeholder: &str) -> SumoLogicError {
    SumoLogicError::PathTemplate {
        template: template.to_string(),
        placeholder: placeholder.to_string(),
    }
}
