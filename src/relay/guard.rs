use crate::error::RelayError;

/// Declared content types must start with this prefix to be relayed.
pub const JPEG_CONTENT_TYPE_PREFIX: &str = "image/jpeg";

/// Accept only objects declared as JPEG.
///
/// This is a prefix match on the declared type, so parameters such as
/// `image/jpeg; charset=binary` pass. The bytes themselves are not sniffed.
pub fn check_content_type(content_type: &str) -> Result<(), RelayError> {
    if content_type.starts_with(JPEG_CONTENT_TYPE_PREFIX) {
        Ok(())
    } else {
        Err(RelayError::InvalidContentType {
            content_type: content_type.to_string(),
        })
    }
}
