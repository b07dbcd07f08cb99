/// Header carrying the McLeod company identifier.
pub const COMPANY_ID_HEADER: &str = "X-com.mcleodsoftware.CompanyID";

/// Content type sent with every uploaded document.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Row type segment for order documents.
pub const DEFAULT_ROW_TYPE: &str = "o";

/// Document type segment for this deployment's image category.
pub const DEFAULT_DOCUMENT_TYPE: &str = "3";

/// Where documents are attached in the TMS.
///
/// The row type and document type are classification codes fixed per
/// deployment; only the order id varies between requests.
#[derive(Debug, Clone)]
pub struct DocumentTarget {
    base_url: String,
    row_type: String,
    document_type: String,
}

impl DocumentTarget {
    /// Target rooted at `base_url` with the default row and document types.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            row_type: DEFAULT_ROW_TYPE.to_string(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
        }
    }

    /// Set the row type segment.
    pub fn with_row_type(mut self, row_type: impl Into<String>) -> Self {
        self.row_type = row_type.into();
        self
    }

    /// Set the document type segment.
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn row_type(&self) -> &str {
        &self.row_type
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Upload URL for documents of `order_id`.
    ///
    /// The order id is percent-encoded so it always forms a single path segment.
    pub fn url_for(&self, order_id: &str) -> String {
        format!(
            "{}/images/{}/{}/{}",
            self.base_url,
            self.row_type,
            urlencoding::encode(order_id),
            self.document_type
        )
    }
}

/// Build the `Content-Disposition` value the TMS expects for a JPEG document.
///
/// The file name doubles as the document id.
pub fn content_disposition(file_name: &str) -> String {
    format!(
        r#"file; filename="{}"; documentid={}; fileExtension="jpg""#,
        file_name, file_name
    )
}
