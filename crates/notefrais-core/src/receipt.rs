use thiserror::Error;

/// Extensions the receipt picker accepts, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("receipt file has a missing or invalid extension")]
    MissingExtension,
    #[error("receipt files of type '{extension}' are not accepted (jpg, jpeg or png only)")]
    UnsupportedExtension { extension: String },
}

/// A receipt that passed validation and was handed to the upload collaborator.
/// Keeping the name and url in one struct guarantees a bill never carries one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedReceipt {
    pub file_name: String,
    pub file_url: String,
}

pub fn validate_receipt_filename(file_name: &str) -> Result<(), ReceiptError> {
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return Err(ReceiptError::MissingExtension);
    };

    if stem.is_empty() || extension.is_empty() {
        return Err(ReceiptError::MissingExtension);
    }

    let lowered = extension.to_ascii_lowercase();
    if ACCEPTED_EXTENSIONS.contains(&lowered.as_str()) {
        Ok(())
    } else {
        Err(ReceiptError::UnsupportedExtension { extension: lowered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allow_listed_extensions_case_insensitively() {
        assert!(validate_receipt_filename("x.png").is_ok());
        assert!(validate_receipt_filename("x.JPG").is_ok());
        assert!(validate_receipt_filename("x.jpeg").is_ok());
        assert!(validate_receipt_filename("preview-facture-free-201801-pdf-1.jpg").is_ok());
    }

    #[test]
    fn rejects_unsupported_extensions() {
        assert_eq!(
            validate_receipt_filename("x.exe"),
            Err(ReceiptError::UnsupportedExtension {
                extension: "exe".to_string()
            })
        );
        assert_eq!(
            validate_receipt_filename("archive.tar.gz"),
            Err(ReceiptError::UnsupportedExtension {
                extension: "gz".to_string()
            })
        );
    }

    #[test]
    fn rejects_names_without_an_extension() {
        assert_eq!(
            validate_receipt_filename("x"),
            Err(ReceiptError::MissingExtension)
        );
        assert_eq!(
            validate_receipt_filename(""),
            Err(ReceiptError::MissingExtension)
        );
        assert_eq!(
            validate_receipt_filename("x."),
            Err(ReceiptError::MissingExtension)
        );
        assert_eq!(
            validate_receipt_filename(".png"),
            Err(ReceiptError::MissingExtension)
        );
    }
}
