/// SMTP delivery of grocery lists
///
/// Thin wrapper over lettre's async SMTP transport. The mailer is built
/// once at startup from configuration and shared through application state.
///
/// When no SMTP host is configured the mailer runs disabled: sends succeed
/// immediately and the rendered list is written to the log instead, which
/// keeps local development working without a mail server.
///
/// # Example
///
/// ```no_run
/// use shelfhelp_shared::mail::Mailer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mailer = Mailer::smtp(
///     "smtp.example.com",
///     587,
///     Some(("user".to_string(), "pass".to_string())),
///     "ShelfHelp <noreply@shelfhelp.com>",
/// )?;
///
/// mailer.send_grocery_list("jane@example.com", "Hello Jane, ...").await?;
/// # Ok(())
/// # }
/// ```

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

/// Subject line for the grocery-list email
const SUBJECT: &str = "Your ShelfHelp Grocery List";

/// Error type for mail operations
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// A sender or recipient address failed to parse
    #[error("Invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    /// The message could not be assembled
    #[error("Failed to build message: {0}")]
    BuildError(#[from] lettre::error::Error),

    /// The SMTP transport rejected or failed the send
    #[error("SMTP delivery failed: {0}")]
    TransportError(#[from] lettre::transport::smtp::Error),
}

/// Outbound mailer
pub enum Mailer {
    /// Deliver over SMTP (STARTTLS relay)
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },

    /// No SMTP configured: log the message body instead of sending
    Disabled,
}

impl Mailer {
    /// Creates an SMTP mailer against a STARTTLS relay
    ///
    /// `credentials` is (username, password); pass None for an open relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host or `from` address is invalid.
    pub fn smtp(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from: &str,
    ) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(port);

        if let Some((username, password)) = credentials {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Mailer::Smtp {
            transport: builder.build(),
            from: from.parse()?,
        })
    }

    /// Creates a disabled mailer that only logs
    pub fn disabled() -> Self {
        Mailer::Disabled
    }

    /// Sends a rendered grocery list to `to`
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient address is invalid or the SMTP
    /// transport fails. A disabled mailer never fails.
    pub async fn send_grocery_list(&self, to: &str, body: &str) -> Result<(), MailError> {
        match self {
            Mailer::Smtp { transport, from } => {
                let message = Message::builder()
                    .from(from.clone())
                    .to(to.parse()?)
                    .subject(SUBJECT)
                    .header(ContentType::TEXT_PLAIN)
                    .body(body.to_string())?;

                let response = transport.send(message).await?;
                debug!(code = %response.code(), "SMTP accepted grocery list");
                Ok(())
            }
            Mailer::Disabled => {
                info!(recipient = %to, "Mailer disabled; grocery list not sent:\n{}", body);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_mailer_construction() {
        let mailer = Mailer::smtp(
            "smtp.example.com",
            587,
            Some(("user".to_string(), "pass".to_string())),
            "ShelfHelp <noreply@shelfhelp.com>",
        );
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_invalid_from_address_rejected() {
        let mailer = Mailer::smtp("smtp.example.com", 587, None, "not an address");
        assert!(matches!(mailer, Err(MailError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_disabled_mailer_always_succeeds() {
        let mailer = Mailer::disabled();
        let result = mailer
            .send_grocery_list("jane@example.com", "Hello Jane")
            .await;
        assert!(result.is_ok());
    }
}
