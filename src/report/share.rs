/// Share payloads for a contractor report
use crate::report::ContractorReport;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareFile {
    pub name: String,
    pub mime: String,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

/// `{title, text, files?}` for a native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ShareFile>>,
}

/// Files are attached only when the host accepts file shares and at least
/// one photo resolved.
pub fn share_payload(
    report: &ContractorReport,
    title: &str,
    file_date: &str,
    can_share_files: bool,
) -> SharePayload {
    let files = if can_share_files && !report.photos.is_empty() {
        Some(
            report
                .photos
                .iter()
                .map(|photo| ShareFile {
                    name: photo.filename(file_date),
                    mime: crate::core::photo::JPEG_MIME.to_string(),
                    bytes: photo.bytes.clone(),
                })
                .collect(),
        )
    } else {
        None
    };

    SharePayload {
        title: title.to_string(),
        text: report.text.clone(),
        files,
    }
}

/// Marks left unescaped in a URI component but escaped by form encoding
const COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%7E", "~"),
];

/// Text-only share link: `<base>?text=<percent-encoded text>`, encoded as a
/// URI component.
pub fn fallback_link(base_url: &str, text: &str) -> String {
    let form: String = url::form_urlencoded::byte_serialize(text.as_bytes()).collect();
    // form encoding writes spaces as '+'; a literal '+' is already %2B
    let encoded = COMPONENT_MARKS
        .iter()
        .fold(form.replace('+', "%20"), |acc, (escaped, mark)| {
            acc.replace(escaped, mark)
        });
    format!("{}?text={}", base_url, encoded)
}
