use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Local};
use uuid::Uuid;

const BASE64_LINE_LEN: usize = 76;

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl EmailMessage {
    pub fn new(from: &str, to: &str, subject: &str, body: &str) -> Self {
        EmailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// RFC 5322 payload ready for the DATA command.
    pub fn to_rfc5322(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.render(&Local::now(), &id)
    }

    fn render(&self, date: &DateTime<Local>, id: &str) -> String {
        let domain = self
            .from
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("localhost");

        let mut headers = vec![
            format!("From: {}", self.from),
            format!("To: {}", self.to),
            format!("Subject: {}", encode_header(&self.subject)),
            format!("Date: {}", date.to_rfc2822()),
            format!("Message-ID: <{}@{}>", id, domain),
            "MIME-Version: 1.0".to_string(),
        ];

        let text_headers = [
            "Content-Type: text/plain; charset=utf-8".to_string(),
            "Content-Transfer-Encoding: 8bit".to_string(),
        ];
        let body = to_crlf(&self.body);

        match &self.attachment {
            None => {
                headers.extend(text_headers);
                format!("{}\r\n\r\n{}\r\n", headers.join("\r\n"), body)
            }
            Some(attachment) => {
                let boundary = format!("=_{}", id);
                headers.push(format!(
                    "Content-Type: multipart/mixed; boundary=\"{}\"",
                    boundary
                ));

                let mut parts = vec![
                    headers.join("\r\n"),
                    String::new(),
                    format!("--{}", boundary),
                    text_headers.join("\r\n"),
                    String::new(),
                    body,
                    format!("--{}", boundary),
                    "Content-Type: application/octet-stream".to_string(),
                    "Content-Transfer-Encoding: base64".to_string(),
                    format!(
                        "Content-Disposition: attachment; filename=\"{}\"",
                        attachment.filename.replace(['"', '\\'], "_")
                    ),
                    String::new(),
                ];
                parts.extend(wrap_base64(&attachment.content));
                parts.push(format!("--{}--", boundary));
                parts.push(String::new());

                parts.join("\r\n")
            }
        }
    }
}

/// RFC 2047 encoded-word for non-ASCII header values.
fn encode_header(value: &str) -> String {
    match value.is_ascii() {
        true => value.to_string(),
        false => format!("=?utf-8?B?{}?=", STANDARD.encode(value)),
    }
}

fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

fn wrap_base64(content: &[u8]) -> Vec<String> {
    let encoded = STANDARD.encode(content);
    encoded
        .as_bytes()
        .chunks(BASE64_LINE_LEN)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}
