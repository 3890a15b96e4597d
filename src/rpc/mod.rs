//! Procedure table: binds procedure names to an input shape and a handler.
//!
//! Queries take no input. Mutations validate their payload into a typed input
//! before the handler runs. Actor mutations additionally need the caller's
//! session identity, which is passed to the handler separately from the
//! payload.

mod procedures;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::auth::Actor;
use crate::error::ApiError;
use crate::schema::FromPayload;
use crate::state::AppState;

pub use procedures::procedures;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl ProcedureKind {
    /// HTTP method a procedure of this kind is invoked with.
    pub fn method(&self) -> &'static str {
        match self {
            ProcedureKind::Query => "GET",
            ProcedureKind::Mutation => "POST",
        }
    }
}

/// One remote invocation: raw input plus the resolved session identity.
#[derive(Debug, Clone)]
pub struct Call {
    pub input: Value,
    pub actor: Option<Actor>,
}

type Output = BoxFuture<'static, Result<Value, ApiError>>;
type Handler = Arc<dyn Fn(AppState, Call) -> Output + Send + Sync>;

#[derive(Clone)]
pub struct Procedure {
    pub name: &'static str,
    pub kind: ProcedureKind,
    /// Payload key the actor is stamped into, if any.
    pub actor_field: Option<&'static str>,
    handler: Handler,
}

impl Procedure {
    pub fn requires_actor(&self) -> bool {
        self.actor_field.is_some()
    }
}

impl std::fmt::Debug for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("actor_field", &self.actor_field)
            .finish()
    }
}

/// Immutable name → procedure mapping, in registration order.
#[derive(Default)]
pub struct ProcedureTable {
    procedures: Vec<Procedure>,
    by_name: HashMap<&'static str, usize>,
}

impl ProcedureTable {
    pub fn builder() -> ProcedureTableBuilder {
        ProcedureTableBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.by_name.get(name).map(|&index| &self.procedures[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.iter()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Runs `name` if it exists and is of the `invoked_as` kind.
    pub async fn dispatch(
        &self,
        state: AppState,
        name: &str,
        invoked_as: ProcedureKind,
        call: Call,
    ) -> Result<Value, ApiError> {
        let procedure = self
            .get(name)
            .ok_or_else(|| ApiError::not_found(format!("No procedure named '{}'", name)))?;

        if procedure.kind != invoked_as {
            return Err(ApiError::method_not_allowed(format!(
                "'{}' is a {:?} and must be called with {}",
                name,
                procedure.kind,
                procedure.kind.method()
            )));
        }

        (procedure.handler)(state, call).await
    }
}

/// Collects procedures into a [`ProcedureTable`].
///
/// # Panics
///
/// `query`, `mutation` and `actor_mutation` panic when `name` is already
/// registered.
#[derive(Default)]
pub struct ProcedureTableBuilder {
    table: ProcedureTable,
}

impl ProcedureTableBuilder {
    /// Read-only procedure without input.
    pub fn query<F, Fut, T>(self, name: &'static str, handler: F) -> Self
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let handler: Handler = Arc::new(move |state: AppState, _call: Call| -> Output {
            let fut = handler(state);
            Box::pin(async move { to_output(fut.await?) })
        });
        self.register(name, ProcedureKind::Query, None, handler)
    }

    /// Procedure whose payload is validated into `I` first.
    pub fn mutation<I, F, Fut, T>(self, name: &'static str, handler: F) -> Self
    where
        I: FromPayload + Send + 'static,
        F: Fn(AppState, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let handler: Handler = Arc::new(move |state: AppState, call: Call| -> Output {
            match I::from_payload(&call.input) {
                Ok(input) => {
                    let fut = handler(state, input);
                    Box::pin(async move { to_output(fut.await?) })
                }
                Err(failure) => Box::pin(futures::future::ready(Err(failure.into()))),
            }
        });
        self.register(name, ProcedureKind::Mutation, None, handler)
    }

    /// Mutation stamped with the caller's identity under `actor_field`.
    /// Calls without an actor are refused; a client-supplied `actor_field`
    /// is ignored.
    pub fn actor_mutation<I, F, Fut, T>(self, name: &'static str, actor_field: &'static str, handler: F) -> Self
    where
        I: FromPayload + Send + 'static,
        F: Fn(AppState, I, Actor) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let handler: Handler = Arc::new(move |state: AppState, call: Call| -> Output {
            let Some(actor) = call.actor else {
                return Box::pin(futures::future::ready(Err(ApiError::unauthorized(format!(
                    "'{}' requires an authenticated actor",
                    name
                )))));
            };

            if call.input.get(actor_field).is_some() {
                warn!(procedure = name, field = actor_field, actor_id = actor.id, "Ignoring client-supplied actor field");
            }

            match I::from_payload(&call.input) {
                Ok(input) => {
                    let fut = handler(state, input, actor);
                    Box::pin(async move { to_output(fut.await?) })
                }
                Err(failure) => Box::pin(futures::future::ready(Err(failure.into()))),
            }
        });
        self.register(name, ProcedureKind::Mutation, Some(actor_field), handler)
    }

    fn register(
        mut self,
        name: &'static str,
        kind: ProcedureKind,
        actor_field: Option<&'static str>,
        handler: Handler,
    ) -> Self {
        let index = self.table.procedures.len();
        if self.table.by_name.insert(name, index).is_some() {
            panic!("procedure '{}' registered twice", name);
        }
        self.table.procedures.push(Procedure {
            name,
            kind,
            actor_field,
            handler,
        });
        self
    }

    pub fn build(self) -> ProcedureTable {
        self.table
    }
}

fn to_output<T: Serialize>(output: T) -> Result<Value, ApiError> {
    serde_json::to_value(output).map_err(|e| {
        tracing::error!("Failed to serialize procedure output: {}", e);
        ApiError::internal_server_error("Failed to format response")
    })
}
