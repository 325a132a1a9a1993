use bytes::{Bytes, BytesMut};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Response, StatusCode};
use http_body_util::Full;
use std::io;

/// The sink a handler chain writes its response into.
///
/// This is the crate's view of the platform response writer: a status line, a
/// header map and a byte stream. Handlers receive it as `&mut dyn
/// ResponseWriter`, so any transport that can offer these three operations
/// can drive a chain; [`ResponseBuffer`] is the buffered implementation used
/// by the bundled hyper [`service`](crate::service) layer and by tests.
pub trait ResponseWriter {
    /// Replaces the response status code. The status starts out as `200 OK`.
    fn set_status(&mut self, status: StatusCode);

    /// Sets a response header, replacing any previous value under the same
    /// name.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Appends bytes to the response body, returning how many were written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

/// A [`ResponseWriter`] that accumulates the response in memory.
///
/// Once the chain has run, [`into_response`](ResponseBuffer::into_response)
/// converts the buffered status, headers and body into an
/// `http::Response<Full<Bytes>>` ready to hand to hyper.
pub struct ResponseBuffer {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseBuffer {
    pub fn new() -> ResponseBuffer {
        ResponseBuffer {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }

    /// The status code written so far.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The headers written so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the buffer into a hyper-servable response.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for ResponseBuffer {
    fn default() -> ResponseBuffer {
        ResponseBuffer::new()
    }
}

impl ResponseWriter for ResponseBuffer {
    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn starts_at_ok_with_empty_body() {
        let res = ResponseBuffer::new();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.body().is_empty());
        assert!(res.headers().is_empty());
    }

    #[test]
    fn writes_append() {
        let mut res = ResponseBuffer::new();
        assert_eq!(res.write(b"abcd").unwrap(), 4);
        assert_eq!(res.write(b"efgh").unwrap(), 4);
        assert_eq!(res.body(), b"abcdefgh");
    }

    #[test]
    fn set_header_replaces_previous_value() {
        let mut res = ResponseBuffer::new();
        res.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn into_response_preserves_everything() {
        let mut res = ResponseBuffer::new();
        res.set_status(StatusCode::CREATED);
        res.set_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        res.write(b"created").unwrap();

        let response = res.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }
}
