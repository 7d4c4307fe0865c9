//! Response body decoding by `Content-Encoding`
//!
//! The backend compresses some responses and not others. The HTTP client is
//! built without automatic decompression, so bodies arrive exactly as sent and
//! are decoded here.

use std::io::{self, Read};

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

/// Supported content encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
    Brotli,
}

impl ContentEncoding {
    /// Parse a single encoding token (case-insensitive)
    pub fn parse(token: &str) -> io::Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "" | "identity" => Ok(ContentEncoding::Identity),
            "gzip" | "x-gzip" => Ok(ContentEncoding::Gzip),
            "deflate" => Ok(ContentEncoding::Deflate),
            "br" => Ok(ContentEncoding::Brotli),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported content encoding '{}'", other),
            )),
        }
    }
}

/// Decode a response body according to its `Content-Encoding` header value.
///
/// Multiple encodings (`gzip, br`) are undone in reverse order of application.
pub fn decode_body(content_encoding: Option<&str>, body: &[u8]) -> io::Result<Vec<u8>> {
    let Some(header) = content_encoding else {
        return Ok(body.to_vec());
    };

    let encodings = header
        .split(',')
        .map(ContentEncoding::parse)
        .collect::<io::Result<Vec<_>>>()?;

    let mut data = body.to_vec();
    for encoding in encodings.into_iter().rev() {
        data = decode_once(encoding, &data)?;
    }
    Ok(data)
}

fn decode_once(encoding: ContentEncoding, body: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    match encoding {
        ContentEncoding::Identity => out.extend_from_slice(body),
        ContentEncoding::Gzip => {
            GzDecoder::new(body).read_to_end(&mut out)?;
        }
        ContentEncoding::Deflate => {
            // HTTP "deflate" is zlib-wrapped, but some servers send raw deflate
            if ZlibDecoder::new(body).read_to_end(&mut out).is_err() {
                out.clear();
                DeflateDecoder::new(body).read_to_end(&mut out)?;
            }
        }
        ContentEncoding::Brotli => {
            brotli::Decompressor::new(body, 4096).read_to_end(&mut out)?;
        }
    }
    Ok(out)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const BODY: &[u8] = br#"{"status":"success","body":true}"#;

    #[test]
    fn test_identity_passthrough() {
        assert_eq!(decode_body(None, BODY).unwrap(), BODY);
        assert_eq!(decode_body(Some("identity"), BODY).unwrap(), BODY);
    }

    #[test]
    fn test_gzip() {
        assert_eq!(decode_body(Some("gzip"), &gzip(BODY)).unwrap(), BODY);
    }

    #[test]
    fn test_deflate_zlib_wrapped() {
        assert_eq!(decode_body(Some("deflate"), &zlib(BODY)).unwrap(), BODY);
    }

    #[test]
    fn test_brotli() {
        assert_eq!(decode_body(Some("br"), &brotli(BODY)).unwrap(), BODY);
    }

    #[test]
    fn test_encoding_is_case_insensitive() {
        assert_eq!(decode_body(Some("GZIP"), &gzip(BODY)).unwrap(), BODY);
    }

    #[test]
    fn test_stacked_encodings_reverse_order() {
        let stacked = brotli(&gzip(BODY));
        assert_eq!(decode_body(Some("gzip, br"), &stacked).unwrap(), BODY);
    }

    #[test]
    fn test_corrupt_gzip_is_error() {
        assert!(decode_body(Some("gzip"), b"definitely not gzip").is_err());
    }

    #[test]
    fn test_unknown_encoding_is_error() {
        let err = decode_body(Some("zstd"), BODY).unwrap_err();
        assert!(err.to_string().contains("zstd"));
    }
}
