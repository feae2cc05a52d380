use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

use super::jwt::SESSION_TTL_DAYS;

pub const ORGANISER_COOKIE: &str = "organiser_token";
pub const ADMIN_COOKIE: &str = "adminToken";

/// Build a Set-Cookie header for a session token: httpOnly, SameSite
/// Lax, 7-day max-age. `Secure` is left to the TLS terminator.
pub fn session_cookie(name: &str, token: &str) -> HeaderValue {
    let value = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        name,
        token,
        SESSION_TTL_DAYS * 24 * 60 * 60
    );
    HeaderValue::from_str(&value).expect("cookie value contains no invalid characters")
}

/// Expire a session cookie immediately.
pub fn clear_cookie(name: &str) -> HeaderValue {
    let value = format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", name);
    HeaderValue::from_str(&value).expect("cookie value contains no invalid characters")
}

/// Pull a named cookie out of the request headers.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Attach a Set-Cookie header to a response header map.
pub fn set_cookie(headers: &mut HeaderMap, cookie: HeaderValue) {
    headers.append(SET_COOKIE, cookie);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cookie_finds_named_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("foo=bar; organiser_token=abc.def.ghi; x=y"),
        );

        assert_eq!(
            extract_cookie(&headers, ORGANISER_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_cookie(&headers, ADMIN_COOKIE), None);
    }

    #[test]
    fn test_session_cookie_is_http_only_with_week_ttl() {
        let cookie = session_cookie(ADMIN_COOKIE, "tok");
        let s = cookie.to_str().unwrap();
        assert!(s.starts_with("adminToken=tok;"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Max-Age=604800"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_cookie(ORGANISER_COOKIE);
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
    }
}
