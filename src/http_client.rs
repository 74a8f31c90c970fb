//! Shared HTTP agent construction and bounded response helpers.

use std::io::{self, Read};

use crate::config::ApiSettings;

/// Build an agent with the configured timeouts.
///
/// Only the connect phase is bounded by default; reads and writes wait as long
/// as the server keeps the connection open unless `read_timeout_secs` is set.
pub fn agent(settings: &ApiSettings) -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new()
        .timeout_connect(settings.connect_timeout())
        .user_agent(concat!("telepredict/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = settings.read_timeout() {
        builder = builder.timeout_read(timeout).timeout_write(timeout);
    }
    builder.build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Read a response as UTF-8 text, enforcing a maximum byte size.
pub(crate) fn read_response_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, io::Error> {
    let bytes = read_response_bytes(response, max_bytes)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}
