//! Custom fabrication requests.
//!
//! The form only checks that every dimension was filled in. Values are kept
//! as typed; a manager reads them, so free text such as `600 (по месту)` is
//! accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// File types accepted as drawings or photos.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "dwg", "dxf", "jpg", "jpeg", "png"];

/// Default attachment size cap (10 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomOrderError {
    /// Names of the empty fields, in form order.
    #[error("please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("file type of '{0}' is not accepted")]
    UnsupportedFileType(String),
    #[error("file is {size} bytes, the limit is {max} bytes")]
    AttachmentTooLarge { size: u64, max: u64 },
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomOrderForm {
    pub width: String,
    pub height: String,
    pub depth: String,
}

/// Reference to an uploaded file. The content itself is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl Attachment {
    /// Check the extension against [`ALLOWED_EXTENSIONS`] and the size against `max_bytes`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFileType` or `AttachmentTooLarge`.
    pub fn check(
        file_name: &str,
        content_type: &str,
        size_bytes: u64,
        max_bytes: u64,
    ) -> Result<Self, CustomOrderError> {
        let accepted = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
        if !accepted {
            return Err(CustomOrderError::UnsupportedFileType(file_name.to_owned()));
        }
        if size_bytes > max_bytes {
            return Err(CustomOrderError::AttachmentTooLarge {
                size: size_bytes,
                max: max_bytes,
            });
        }
        Ok(Self {
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            size_bytes,
        })
    }
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderRequest {
    pub width: String,
    pub height: String,
    pub depth: String,
    pub attachment: Option<Attachment>,
}

impl CustomOrderForm {
    /// Validate the form.
    ///
    /// ```
    /// use facade_shop_core::custom_order::{CustomOrderError, CustomOrderForm};
    ///
    /// let form = CustomOrderForm {
    ///     width: "198".into(),
    ///     height: String::new(),
    ///     depth: "91".into(),
    /// };
    /// assert_eq!(
    ///     form.validate(None),
    ///     Err(CustomOrderError::MissingFields(vec!["height"]))
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// `MissingFields` lists every empty field.
    pub fn validate(self, attachment: Option<Attachment>) -> Result<CustomOrderRequest, CustomOrderError> {
        let missing: Vec<&'static str> = [
            ("width", &self.width),
            ("height", &self.height),
            ("depth", &self.depth),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(CustomOrderError::MissingFields(missing));
        }

        Ok(CustomOrderRequest {
            width: self.width,
            height: self.height,
            depth: self.depth,
            attachment,
        })
    }
}

/// Acknowledgment handed back to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderReceipt {
    pub reference: Uuid,
    pub request: CustomOrderRequest,
    pub received_at: DateTime<Utc>,
}

impl CustomOrderReceipt {
    #[must_use]
    pub fn new(request: CustomOrderRequest, received_at: DateTime<Utc>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            request,
            received_at,
        }
    }

    /// First eight hex digits of the reference, upper-case.
    #[must_use]
    pub fn short_reference(&self) -> String {
        self.reference
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_ascii_uppercase()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(width: &str, height: &str, depth: &str) -> CustomOrderForm {
        CustomOrderForm {
            width: width.to_owned(),
            height: height.to_owned(),
            depth: depth.to_owned(),
        }
    }

    #[test]
    fn test_all_fields_filled() {
        let request = form("198", "720", "91").validate(None).unwrap();
        assert_eq!(request.height, "720");
        assert!(request.attachment.is_none());
    }

    #[test]
    fn test_non_numeric_values_are_accepted() {
        assert!(form("около 600", "720", "по месту").validate(None).is_ok());
    }

    #[test]
    fn test_any_empty_field_fails() {
        assert_eq!(
            form("198", "", "91").validate(None),
            Err(CustomOrderError::MissingFields(vec!["height"]))
        );
        assert_eq!(
            form("", "", "").validate(None),
            Err(CustomOrderError::MissingFields(vec!["width", "height", "depth"]))
        );
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        assert!(form(" ", "1", "1").validate(None).is_ok());
    }

    #[test]
    fn test_attachment_extensions() {
        let max = DEFAULT_MAX_ATTACHMENT_BYTES;
        assert!(Attachment::check("kitchen.DWG", "application/acad", 10, max).is_ok());
        assert!(Attachment::check("photo.jpeg", "image/jpeg", 10, max).is_ok());
        assert_eq!(
            Attachment::check("notes.docx", "application/msword", 10, max),
            Err(CustomOrderError::UnsupportedFileType("notes.docx".to_owned()))
        );
        assert!(Attachment::check("pdf", "application/pdf", 10, max).is_err());
    }

    #[test]
    fn test_attachment_size_cap() {
        assert_eq!(
            Attachment::check("plan.pdf", "application/pdf", 11, 10),
            Err(CustomOrderError::AttachmentTooLarge { size: 11, max: 10 })
        );
        assert!(Attachment::check("plan.pdf", "application/pdf", 10, 10).is_ok());
    }

    #[test]
    fn test_receipt_reference() {
        let request = form("1", "2", "3").validate(None).unwrap();
        let receipt = CustomOrderReceipt::new(request, Utc::now());
        assert_eq!(receipt.short_reference().len(), 8);
        assert_eq!(receipt.reference.get_version_num(), 4);
    }
}
