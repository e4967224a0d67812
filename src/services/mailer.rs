use std::{path::Path, sync::Arc, time::Duration};

use async_smtp::{
    authentication::{Credentials, Mechanism},
    extension::{ClientId, ServerInfo},
    EmailAddress, Envelope, SendableEmail, SmtpClient, SmtpTransport,
};
use tokio::{io::BufStream, net::TcpStream};
use tokio_rustls::{
    rustls::{pki_types::ServerName, ClientConfig, RootCertStore},
    TlsConnector,
};

use crate::{
    configuration::EmailSettings,
    domain::email::{Attachment, EmailMessage},
    error::ScoutError,
};

const AUTH_MECHANISMS: [Mechanism; 2] = [Mechanism::Plain, Mechanism::Login];

pub struct Mailer {
    settings: EmailSettings,
    tls: TlsConnector,
}

impl Mailer {
    /// Verifies the SMTP server against the webpki root store.
    pub fn new(settings: &EmailSettings) -> Self {
        Self::with_tls(settings, tls_connector())
    }

    pub fn with_tls(settings: &EmailSettings, tls: TlsConnector) -> Self {
        Mailer {
            settings: settings.clone(),
            tls,
        }
    }

    /// Sends one message to the configured recipient, attaching the file at
    /// `attachment_path` when it exists.
    pub async fn send(
        &self,
        subject: &str,
        body: &str,
        attachment_path: Option<&Path>,
    ) -> Result<(), ScoutError> {
        let message = self.compose(subject, body, attachment_path).await?;
        let email = self.sendable(&message)?;

        let timeout = Duration::from_secs(self.settings.timeout_seconds);
        match tokio::time::timeout(timeout, self.deliver(email)).await {
            Ok(result) => result,
            Err(_) => Err(ScoutError::Transport(format!(
                "SMTP session with {} timed out after {}s",
                self.settings.smtp_host, self.settings.timeout_seconds
            ))),
        }
    }

    pub async fn compose(
        &self,
        subject: &str,
        body: &str,
        attachment_path: Option<&Path>,
    ) -> Result<EmailMessage, ScoutError> {
        let message = EmailMessage::new(
            &self.settings.sender,
            &self.settings.recipient,
            subject,
            body,
        );

        let Some(path) = attachment_path else {
            return Ok(message);
        };
        if !tokio::fs::try_exists(path).await? {
            log::warn!("Attachment {} does not exist, sending without it", path.display());
            return Ok(message);
        }

        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        log::info!("Attaching {} ({} bytes)", filename, content.len());

        Ok(message.with_attachment(Attachment { filename, content }))
    }

    fn sendable(&self, message: &EmailMessage) -> Result<SendableEmail, ScoutError> {
        let from = EmailAddress::new(message.from.clone())
            .map_err(|e| ScoutError::Config(format!("invalid sender address: {}", e)))?;
        let to = EmailAddress::new(message.to.clone())
            .map_err(|e| ScoutError::Config(format!("invalid recipient address: {}", e)))?;
        let envelope = Envelope::new(Some(from), vec![to])
            .map_err(|e| ScoutError::Config(format!("invalid envelope: {}", e)))?;

        Ok(SendableEmail::new(envelope, message.to_rfc5322()))
    }

    async fn deliver(&self, email: SendableEmail) -> Result<(), ScoutError> {
        let address = format!("{}:{}", self.settings.smtp_host, self.settings.smtp_port);
        log::info!("Connecting to SMTP server {}", address);

        let stream = TcpStream::connect(&address)
            .await
            .map_err(|e| ScoutError::Transport(format!("could not connect to {}: {}", address, e)))?;
        let transport = SmtpTransport::new(SmtpClient::new(), BufStream::new(stream))
            .await
            .map_err(|e| ScoutError::Transport(format!("SMTP greeting failed: {}", e)))?;

        let stream = transport
            .starttls()
            .await
            .map_err(|e| ScoutError::Transport(format!("STARTTLS failed: {}", e)))?;
        let server_name = ServerName::try_from(self.settings.smtp_host.clone())
            .map_err(|e| ScoutError::Config(format!("invalid SMTP host: {}", e)))?;
        let tls_stream = self
            .tls
            .connect(server_name, stream.into_inner())
            .await
            .map_err(|e| ScoutError::Transport(format!("TLS handshake failed: {}", e)))?;
        log::info!("Upgraded SMTP session to TLS");

        let mut transport = SmtpTransport::new(
            SmtpClient::new().without_greeting(),
            BufStream::new(tls_stream),
        )
        .await
        .map_err(|e| ScoutError::Transport(format!("EHLO after STARTTLS failed: {}", e)))?;

        // The transport keeps its EHLO capabilities private, so ask again.
        let ehlo = transport
            .get_mut()
            .ehlo(ClientId::default())
            .await
            .map_err(|e| ScoutError::Transport(format!("EHLO after STARTTLS failed: {}", e)))?;
        let server_info = ServerInfo::from_response(&ehlo)
            .map_err(|e| ScoutError::Transport(format!("unreadable EHLO response: {}", e)))?;
        let mechanism = AUTH_MECHANISMS
            .into_iter()
            .find(|mechanism| server_info.supports_auth_mechanism(*mechanism))
            .ok_or_else(|| {
                ScoutError::Auth("server offers no supported AUTH mechanism".to_string())
            })?;

        let credentials = Credentials::new(
            self.settings.sender.clone(),
            self.settings.password.clone(),
        );
        transport
            .auth(mechanism, &credentials)
            .await
            .map_err(|e| ScoutError::Auth(e.to_string()))?;
        log::info!("Authenticated with {}", self.settings.smtp_host);

        let response = transport
            .send(email)
            .await
            .map_err(|e| ScoutError::Delivery(e.to_string()))?;
        log::info!("Message accepted: {:?}", response);

        if let Err(e) = transport.quit().await {
            log::warn!("SMTP QUIT failed after delivery: {}", e);
        }

        Ok(())
    }
}

fn tls_connector() -> TlsConnector {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}
