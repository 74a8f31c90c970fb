//! Minimal `multipart/form-data` encoder for single-file uploads.

/// An encoded multipart body and its boundary.
#[derive(Clone, Debug)]
pub(crate) struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encode one file part under `field`.
    pub(crate) fn single_file(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        let boundary = format!("----telepredict{:016x}", rand::random::<u64>());
        Self::with_boundary(boundary, field, file_name, content_type, data)
    }

    fn with_boundary(
        boundary: String,
        field: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Self {
        let mut bytes = Vec::with_capacity(data.len() + 256);
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(field),
                escape_quoted(file_name)
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Self { boundary, bytes }
    }

    /// Value for the request `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_file_part() {
        let body = MultipartBody::with_boundary(
            "XYZ".to_string(),
            "file",
            "train.csv",
            "text/csv",
            b"a,b\n1,2\n",
        );
        let text = String::from_utf8(body.bytes().to_vec()).unwrap();
        assert_eq!(
            text,
            "--XYZ\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"train.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             a,b\n1,2\n\r\n--XYZ--\r\n"
        );
        assert_eq!(body.content_type(), "multipart/form-data; boundary=XYZ");
    }

    #[test]
    fn escapes_quotes_and_newlines_in_file_name() {
        let body = MultipartBody::with_boundary("B".into(), "file", "a\"b\r\n.csv", "text/csv", b"");
        let text = String::from_utf8(body.bytes().to_vec()).unwrap();
        assert!(text.contains("filename=\"a%22b%0D%0A.csv\""));
    }

    #[test]
    fn random_boundaries_differ() {
        let first = MultipartBody::single_file("file", "a.csv", "text/csv", b"x");
        let second = MultipartBody::single_file("file", "a.csv", "text/csv", b"x");
        assert_ne!(first.content_type(), second.content_type());
    }
}
