//! Server middlewares.

#![allow(clippy::type_complexity)]

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::BytesMut,
    Error, HttpMessage,
};
use codeagent_config::Config;
use codeagent_crypto::verify_webhook_signature;
use futures::{
    future::{ok, Ready},
    stream::StreamExt,
    Future,
};
use tracing::warn;

use super::constants::GITHUB_SIGNATURE_HEADER;
use crate::ServerError;

/// Signature verification configuration.
pub struct VerifySignature {
    enabled: bool,
    secret: String,
}

impl VerifySignature {
    /// Create a new configuration.
    pub fn new(config: &Config) -> Self {
        let mut enabled = !config.server.disable_webhook_signature;
        if !enabled {
            warn!("Signature verification is disabled. This can be a security concern.");
        } else if config.server.webhook_secret.is_empty() {
            warn!("Environment variable 'BOT_SERVER_WEBHOOK_SECRET' is not set. Disabling signature verification.");
            enabled = false;
        }

        Self {
            enabled,
            secret: config.server.webhook_secret.clone(),
        }
    }
}

// Middleware factory is `Transform` trait from actix-service crate
// `S` - type of the next service
// `B` - type of response's body
impl<S, B> Transform<S, ServiceRequest> for VerifySignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = VerifySignatureMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(VerifySignatureMiddleware {
            enabled: self.enabled,
            secret: self.secret.clone(),
            service: Rc::new(service),
        })
    }
}

/// Signature verification middleware.
pub struct VerifySignatureMiddleware<S> {
    enabled: bool,
    secret: String,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for VerifySignatureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let enabled = self.enabled;
        let secret = self.secret.clone();

        Box::pin(async move {
            if enabled && req.method() == Method::POST {
                let signature = match req.headers().get(GITHUB_SIGNATURE_HEADER) {
                    Some(value) => value
                        .to_str()
                        .map(ToOwned::to_owned)
                        .map_err(|_| ServerError::InvalidWebhookSignature)?,
                    None => return Err(ServerError::MissingWebhookSignature.into()),
                };

                let mut body = BytesMut::new();
                let mut stream = req.take_payload();

                while let Some(chunk) = stream.next().await {
                    body.extend_from_slice(&chunk.map_err(|_| ServerError::BadPayload)?);
                }

                if !verify_webhook_signature(Some(&signature), &body, &secret) {
                    warn!("Rejected webhook with an invalid signature");
                    return Err(ServerError::InvalidWebhookSignature.into());
                }

                // Thanks https://github.com/actix/actix-web/issues/1457#issuecomment-617342438
                let (_, mut payload) = actix_http::h1::Payload::create(true);
                payload.unread_data(body.freeze());
                req.set_payload(payload.into());
            }

            svc.call(req).await
        })
    }
}
