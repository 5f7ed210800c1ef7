//! Gatekeeper HTTP endpoint
//!
//! Answers allowance checks at POST /isAllowed with a status code and a
//! plain-text reason. Uses hyper for the HTTP server.

use crate::domain::types::EmailRequest;
use crate::services::allowance::AllowanceService;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .expect("static response should not fail")
}

/// Handle HTTP requests
async fn handle_request(
    req: Request<hyper::body::Incoming>,
    allowance: Arc<AllowanceService>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::POST, "/isAllowed") => {
            // A present but garbled header must not fall through to the
            // missing-header case
            let authorization = req
                .headers()
                .get("authorization")
                .map(|v| v.to_str().unwrap_or("").to_string());

            let email = match req.into_body().collect().await {
                Ok(body) => serde_json::from_slice::<EmailRequest>(&body.to_bytes())
                    .ok()
                    .map(|r| r.email),
                Err(_) => None,
            };

            let decision = allowance.evaluate(authorization.as_deref(), email.as_deref());
            info!(
                status = %decision.status.as_u16(),
                reason = %decision.reason,
                "allowance_decision"
            );
            Ok(text_response(decision.status, decision.reason))
        }
        (&Method::GET, "/health") => Ok(text_response(StatusCode::OK, "ok")),
        _ => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
    }
}

/// Run the gatekeeper HTTP server on an already-bound listener until the
/// shutdown signal fires.
pub async fn start_gatekeeper_server(
    listener: TcpListener,
    allowance: Arc<AllowanceService>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!(addr = %addr, "gatekeeper_server_started");

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let io = TokioIo::new(stream);
                        let allowance = allowance.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let allowance = allowance.clone();
                                async move { handle_request(req, allowance).await }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "gatekeeper_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "gatekeeper_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("gatekeeper_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}
