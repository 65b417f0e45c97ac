//! Request handling on top of the price ledger.
//!
//! `StockService` is stateless: it validates a request, delegates to the shared
//! `PriceLedger`, and turns the outcome into a `Response`. Validation runs before
//! the ledger is touched, so a malformed request never reaches the store.

use crate::error::LedgerError;
use crate::ledger::PriceLedger;
use crate::model::validation::{validate_name, validate_price};
use log::{error, info, warn};
use stock_common::{ErrorCode, PriceUpdate, Request, Response, SecurityName};
use std::sync::Arc;

/// Adapts protocol requests to ledger calls.
#[derive(Debug, Clone)]
pub struct StockService {
    ledger: Arc<PriceLedger>,
}

impl StockService {
    /// Build a service over a shared ledger.
    pub fn new(ledger: Arc<PriceLedger>) -> Self {
        Self { ledger }
    }

    /// The ledger this service writes to.
    pub fn ledger(&self) -> &Arc<PriceLedger> {
        &self.ledger
    }

    /// Dispatch a decoded request to its handler.
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Create(update) => self.handle_create(update),
            Request::Update(update) => self.handle_update(update),
            Request::Get(name) => self.handle_get(name),
        }
    }

    /// Register a new security.
    pub fn handle_create(&self, request: PriceUpdate) -> Response {
        if let Err(e) = validate_update(&request) {
            return reject("create", e);
        }
        match self.ledger.create(&request.name, request.price) {
            Ok(point) => {
                info!(
                    "Created security {} at price {} (ts {})",
                    request.name, point.price, point.timestamp
                );
                Response::Ok
            }
            Err(e) => reject("create", e),
        }
    }

    /// Append a price to an existing security.
    pub fn handle_update(&self, request: PriceUpdate) -> Response {
        if let Err(e) = validate_update(&request) {
            return reject("update", e);
        }
        match self.ledger.update(&request.name, request.price) {
            Ok(point) => {
                info!(
                    "Updated security {} to price {} (ts {})",
                    request.name, point.price, point.timestamp
                );
                Response::Ok
            }
            Err(e) => reject("update", e),
        }
    }

    /// Fetch a security with its full history.
    pub fn handle_get(&self, request: SecurityName) -> Response {
        if let Err(e) = validate_name(&request.name) {
            return reject("get", e);
        }
        match self.ledger.get(&request.name) {
            Ok(snapshot) if snapshot.latest().is_some() => Response::Security(snapshot),
            Ok(snapshot) => {
                error!("Security {} has an empty history", snapshot.name);
                Response::error(
                    ErrorCode::Internal,
                    format!("security {} has no price history", snapshot.name),
                )
            }
            Err(e) => reject("get", e),
        }
    }
}

fn validate_update(request: &PriceUpdate) -> Result<(), LedgerError> {
    validate_name(&request.name)?;
    validate_price(request.price)
}

fn reject(op: &str, err: LedgerError) -> Response {
    warn!("Rejected {}: {}", op, err);
    Response::Error((&err).into())
}
