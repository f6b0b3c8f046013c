use super::*;
use std::cell::Cell;
use std::io::Cursor;
use std::rc::Rc;

/// Reader that records how many bytes were pulled and whether it was dropped.
struct TrackedBody {
    inner: Cursor<Vec<u8>>,
    consumed: Rc<Cell<usize>>,
    dropped: Rc<Cell<bool>>,
}

impl TrackedBody {
    fn new(data: &[u8]) -> (Self, Rc<Cell<usize>>, Rc<Cell<bool>>) {
        let consumed = Rc::new(Cell::new(0));
        let dropped = Rc::new(Cell::new(false));
        let body = Self {
            inner: Cursor::new(data.to_vec()),
            consumed: consumed.clone(),
            dropped: dropped.clone(),
        };
        (body, consumed, dropped)
    }
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed.set(self.consumed.get() + n);
        Ok(n)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

struct FailingBody;

impl Read for FailingBody {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
    }
}

mod body_guard_tests {
    use super::*;

    #[test]
    fn test_read_all_returns_every_byte() {
        let mut guard = BodyGuard::new(Cursor::new(b"{\"a\":1}".to_vec()));
        let bytes = guard.read_all().unwrap();
        assert_eq!(&bytes[..], b"{\"a\":1}");
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let mut guard = BodyGuard::new(Cursor::new(Vec::new()));
        let err = guard.read_all().unwrap_err();
        assert!(matches!(
            err,
            ParseError::EmptyOrUnreadableBody { source: None }
        ));
    }

    #[test]
    fn test_second_read_is_rejected() {
        let mut guard = BodyGuard::new(Cursor::new(b"x".to_vec()));
        guard.read_all().unwrap();
        assert!(matches!(
            guard.read_all(),
            Err(ParseError::EmptyOrUnreadableBody { .. })
        ));
    }

    #[test]
    fn test_reader_failure_carries_io_source() {
        let mut guard = BodyGuard::new(FailingBody);
        let err = guard.read_all().unwrap_err();
        match err {
            ParseError::EmptyOrUnreadableBody { source: Some(io) } => {
                assert_eq!(io.kind(), io::ErrorKind::ConnectionReset);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unread_body_is_drained_and_released_on_drop() {
        let (body, consumed, dropped) = TrackedBody::new(&[7u8; 20_000]);

        {
            let _guard = BodyGuard::new(body);
        }

        assert_eq!(consumed.get(), 20_000);
        assert!(dropped.get());
    }

    #[test]
    fn test_read_body_is_released_immediately() {
        let (body, _consumed, dropped) = TrackedBody::new(b"payload");
        let mut guard = BodyGuard::new(body);

        guard.read_all().unwrap();

        assert!(dropped.get());
    }
}

mod raw_request_tests {
    use super::*;

    #[test]
    fn test_from_http_request_keeps_method_headers_and_body() {
        let request = http::Request::builder()
            .method(Method::PUT)
            .header("X-Gitea-Event", "push")
            .body(Cursor::new(b"{}".to_vec()))
            .unwrap();

        let raw = RawRequest::from(request);

        assert_eq!(raw.method(), Method::PUT);
        assert_eq!(header_str(raw.headers(), "x-gitea-event"), Some("push"));
        let (_, _, body) = raw.into_parts();
        assert_eq!(body.into_inner(), b"{}".to_vec());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Event-Key", "repo:push".parse().unwrap());

        assert_eq!(header_str(&headers, "x-event-key"), Some("repo:push"));
        assert_eq!(header_str(&headers, "X-EVENT-KEY"), Some("repo:push"));
    }

    #[test]
    fn test_empty_header_value_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Event-Key", "".parse().unwrap());

        assert_eq!(header_str(&headers, "X-Event-Key"), None);
        assert_eq!(header_str(&headers, "X-Other"), None);
    }
}
