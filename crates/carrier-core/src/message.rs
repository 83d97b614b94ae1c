use crate::Result;
use std::path::Path;
use url::Url;

/// The static message text sent to every recipient in a batch.
///
/// The body is held with real newlines; the client's URL-triggered composer
/// only honors newlines delivered as `%0A`, which percent-encoding produces
/// when the deep link is composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    text: String,
}

impl MessageBody {
    /// Create a message body, normalizing Windows line endings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().replace("\r\n", "\n"),
        }
    }

    /// Read the message body from a text file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Compose the deep link that opens the client's composer pre-filled with
/// one recipient and the message text.
///
/// Shape: `<client>/send?phone=<recipient>&text=<message>`, with both query
/// values percent-encoded so newlines travel as `%0A` and a leading `+`
/// as `%2B`. The recipient is trimmed of surrounding whitespace; nothing
/// else about it is validated.
pub fn compose_send_link(client_url: &Url, recipient: &str, body: &MessageBody) -> Result<String> {
    let endpoint = client_url.join("send")?;

    Ok(format!(
        "{}?phone={}&text={}",
        endpoint,
        urlencoding::encode(recipient.trim()),
        urlencoding::encode(body.as_str())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn client() -> Url {
        Url::parse("https://web.whatsapp.com").unwrap()
    }

    #[test]
    fn test_compose_send_link_shape() {
        let body = MessageBody::new("Hello there");
        let link = compose_send_link(&client(), "15551230001", &body).unwrap();

        assert_eq!(
            link,
            "https://web.whatsapp.com/send?phone=15551230001&text=Hello%20there"
        );
    }

    #[test]
    fn test_compose_send_link_encodes_newlines_as_percent_0a() {
        let body = MessageBody::new("First line\nSecond line");
        let link = compose_send_link(&client(), "15551230001", &body).unwrap();

        assert!(link.contains("text=First%20line%0ASecond%20line"));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_compose_send_link_encodes_plus_prefix() {
        let body = MessageBody::new("hi");
        let link = compose_send_link(&client(), "+15551230001", &body).unwrap();

        assert!(link.contains("phone=%2B15551230001"));
    }

    #[test]
    fn test_compose_send_link_trims_recipient_whitespace() {
        let body = MessageBody::new("hi");
        let link = compose_send_link(&client(), "  15551230001 ", &body).unwrap();

        assert!(link.contains("phone=15551230001&"));
    }

    #[test]
    fn test_message_body_normalizes_crlf() {
        let body = MessageBody::new("one\r\ntwo");

        assert_eq!(body.as_str(), "one\ntwo");
    }

    #[test]
    fn test_message_body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"From a file\nwith two lines").unwrap();
        file.flush().unwrap();

        let body = MessageBody::from_file(file.path()).unwrap();

        assert_eq!(body.as_str(), "From a file\nwith two lines");
        assert!(!body.is_empty());
    }
}
