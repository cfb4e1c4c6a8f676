#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }

    /// True for methods that per spec never carry a response body,
    /// regardless of headers (used by the body-absence shortcut).
    pub fn never_has_response_body(&self) -> bool {
        matches!(self, Method::Head)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::convert::TryFrom<&[u8]> for Method {
    type Error = crate::error::Error;

    fn try_from(value: &[u8]) -> crate::error::Result<Self> {
        Ok(match value {
            b"GET" => Method::Get,
            b"HEAD" => Method::Head,
            b"POST" => Method::Post,
            b"PUT" => Method::Put,
            b"DELETE" => Method::Delete,
            b"CONNECT" => Method::Connect,
            b"OPTIONS" => Method::Options,
            b"TRACE" => Method::Trace,
            b"PATCH" => Method::Patch,
            _ => return Err(crate::error::err_msg("invalid method")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn round_trips_through_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::try_from(b"GET".as_ref()).unwrap(), Method::Get);
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Method::try_from(b"FOO".as_ref()).is_err());
    }

    #[test]
    fn head_never_has_a_response_body() {
        assert!(Method::Head.never_has_response_body());
        assert!(!Method::Get.never_has_response_body());
    }
}
