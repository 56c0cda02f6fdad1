//! Reqwest-backed contact gateway.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::dto::UpdateContactDto;
use super::routes::Endpoint;
use super::transport::HttpTransport;
use crate::domain::ports::ContactGateway;
use crate::domain::{Contact, ContactId, GatewayError, ValidatedContact};

/// [`ContactGateway`] over the service's JSON API.
#[derive(Debug, Clone)]
pub struct HttpContactGateway {
    transport: HttpTransport,
}

impl HttpContactGateway {
    /// Gateway sharing `transport`.
    #[must_use]
    pub const fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ContactGateway for HttpContactGateway {
    async fn list(&self) -> Result<Vec<Contact>, GatewayError> {
        let request = self.transport.request(Method::GET, Endpoint::ListContacts)?;
        let response = self.transport.send(request).await?;
        response.decode("contact list")
    }

    async fn fetch_one(&self, id: &ContactId) -> Result<Contact, GatewayError> {
        let request = self.transport.request(Method::GET, Endpoint::Contact(id))?;
        let response = self.transport.send(request).await?;
        response.decode("contact")
    }

    async fn create(&self, contact: &ValidatedContact) -> Result<Contact, GatewayError> {
        let request = self
            .transport
            .request(Method::POST, Endpoint::CreateContact)?
            .json(contact);
        let response = self.transport.send(request).await?;
        response.decode("created contact")
    }

    async fn update(
        &self,
        id: &ContactId,
        contact: &ValidatedContact,
    ) -> Result<Contact, GatewayError> {
        let body = UpdateContactDto {
            contact_id: id,
            fields: contact.fields(),
        };
        let request = self
            .transport
            .request(Method::PUT, Endpoint::Contact(id))?
            .json(&body);
        let response = self.transport.send(request).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(echo(id, contact));
        }
        match response.decode("updated contact") {
            Ok(updated) => Ok(updated),
            Err(error) => {
                debug!(%id, %error, "update response was not a contact; echoing submitted record");
                Ok(echo(id, contact))
            }
        }
    }

    async fn remove(&self, id: &ContactId) -> Result<(), GatewayError> {
        let request = self.transport.request(Method::DELETE, Endpoint::Contact(id))?;
        self.transport.send(request).await?;
        Ok(())
    }
}

fn echo(id: &ContactId, contact: &ValidatedContact) -> Contact {
    Contact::new(id.clone(), contact.fields().clone())
}
