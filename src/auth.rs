//! Basic and Digest (RFC 2617) credential construction (§4.4).

use base64::Engine;
use md5::{Digest, Md5};
use rand::RngCore;

use crate::error::{err_msg, Result};
use crate::headers::Challenge;
use crate::request::Request;

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn random_cnonce() -> String {
    let mut bytes = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `add_credentials(request, challenge, username, password)`.
///
/// `cnonce_override` exists purely to make Digest construction
/// deterministic in tests (§8 scenario 5); production call sites pass
/// `None` and get a fresh random cnonce.
pub fn add_credentials(
    req: &mut Request,
    challenge: &Challenge,
    username: &str,
    password: &str,
    cnonce_override: Option<&str>,
) -> Result<()> {
    if challenge.auth_scheme.eq_ignore_ascii_case("basic") {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", username, password));
        req.add_header("Authorization", &format!("Basic {}", encoded));
        return Ok(());
    }

    if challenge.auth_scheme.eq_ignore_ascii_case("digest") {
        let realm = challenge.params.get("realm").ok_or_else(|| err_msg("missing realm"))?;
        let nonce = challenge.params.get("nonce").ok_or_else(|| err_msg("missing nonce"))?;
        let opaque = challenge.params.get("opaque");
        let qop = challenge.params.get("qop");
        let algorithm = challenge.params.get("algorithm");

        if let Some(qop) = qop {
            if qop != "auth" {
                return Err(err_msg(format!("unsupported quality of protection '{}'", qop)));
            }
        }
        if let Some(algorithm) = algorithm {
            if !algorithm.eq_ignore_ascii_case("MD5") && !algorithm.eq_ignore_ascii_case("MD5-sess") {
                return Err(err_msg(format!("unsupported algorithm '{}'", algorithm)));
            }
        }

        let mut a1 = md5_hex(&format!("{}:{}:{}", username, realm, password));
        let mut cnonce = cnonce_override.map(|s| s.to_string());

        if algorithm.map(|a| a.eq_ignore_ascii_case("MD5-sess")).unwrap_or(false) {
            let cn = cnonce.clone().unwrap_or_else(random_cnonce);
            a1 = md5_hex(&format!("{}:{}:{}", a1, nonce, cn));
            cnonce = Some(cn);
        }

        let a2 = md5_hex(&format!("{}:/{}", req.method.as_str(), req.escaped_resource));

        let response = if qop == Some("auth") {
            let cn = cnonce.clone().unwrap_or_else(random_cnonce);
            cnonce = Some(cn.clone());
            md5_hex(&format!("{}:{}:00000001:{}:auth:{}", a1, nonce, cn, a2))
        } else {
            md5_hex(&format!("{}:{}:{}", a1, nonce, a2))
        };

        let mut line = format!(
            "Authorization: Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"/{}\", response=\"{}\"",
            username, realm, nonce, req.escaped_resource, response
        );

        if qop == Some("auth") {
            line.push_str(&format!(", qop=auth, nc=00000001, cnonce=\"{}\"", cnonce.unwrap()));
        }
        if let Some(opaque) = opaque {
            line.push_str(&format!(", opaque=\"{}\"", opaque));
        }
        if let Some(algorithm) = algorithm {
            line.push_str(&format!(", algorithm={}", algorithm));
        }

        req.add_header_line(line);
        return Ok(());
    }

    Err(err_msg(format!("unsupported auth scheme '{}'", challenge.auth_scheme)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::uri::Uri;
    use std::str::FromStr;

    fn challenge(extra: &str) -> Challenge {
        crate::headers::challenge::parse(&format!(
            "Digest realm=\"r\", nonce=\"n\"{}",
            extra
        ))
    }

    #[test]
    fn basic_auth_encodes_user_pass() {
        let mut req = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        let c = crate::headers::challenge::parse("Basic realm=\"r\"");
        add_credentials(&mut req, &c, "u", "p", None).unwrap();
        assert_eq!(req.header_lines[0], "Authorization: Basic dTpw");
    }

    #[test]
    fn digest_auth_matches_fixed_cnonce_vector() {
        let mut req = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        let c = challenge(", qop=\"auth\", algorithm=MD5");
        add_credentials(&mut req, &c, "u", "p", Some("00000000")).unwrap();

        let a1 = md5_hex("u:r:p");
        let a2 = md5_hex("GET:/x");
        let expected_response = md5_hex(&format!("{}:n:00000001:00000000:auth:{}", a1, a2));
        let expected = format!(
            "Authorization: Digest username=\"u\", realm=\"r\", nonce=\"n\", uri=\"/x\", response=\"{}\", qop=auth, nc=00000001, cnonce=\"00000000\", algorithm=MD5",
            expected_response
        );
        assert_eq!(req.header_lines[0], expected);
    }

    #[test]
    fn digest_is_deterministic_given_fixed_cnonce() {
        let c = challenge(", qop=\"auth\", algorithm=MD5");
        let mut req1 = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        let mut req2 = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        add_credentials(&mut req1, &c, "u", "p", Some("aaaaaaaa")).unwrap();
        add_credentials(&mut req2, &c, "u", "p", Some("aaaaaaaa")).unwrap();
        assert_eq!(req1.header_lines, req2.header_lines);
    }

    #[test]
    fn rejects_unsupported_qop() {
        let mut req = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        let c = challenge(", qop=\"auth-int\"");
        assert!(add_credentials(&mut req, &c, "u", "p", None).is_err());
    }

    #[test]
    fn rejects_unsupported_algorithm() {
        let mut req = Request::new(Method::Get, &Uri::from_str("http://h/x").unwrap());
        let c = challenge(", algorithm=SHA-256");
        assert!(add_credentials(&mut req, &c, "u", "p", None).is_err());
    }
}
