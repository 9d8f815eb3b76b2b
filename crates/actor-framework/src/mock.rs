//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out the same `ResourceClient<T>` as the production actor
//! but answers from a queue of expectations instead of a store. It lets you drive the
//! orchestration code around a client (the rental coordinator, for instance) without
//! spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Client Logic Test (Pure Mock)</b></summary>
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Dock { id: u64, occupied: bool }
//! #[derive(Debug)] struct DockCreate;
//! #[derive(Debug)] struct DockUpdate;
//! #[derive(Debug)] enum DockAction { Occupy }
//! #[derive(Debug, thiserror::Error)] #[error("Dock error")] struct DockError;
//!
//! #[async_trait]
//! impl ActorEntity for Dock {
//!     type Id = u64; type Create = DockCreate; type Update = DockUpdate;
//!     type Action = DockAction; type ActionResult = bool; type Context = (); type Error = DockError;
//!     fn assign_id(_: &DockCreate, sequence: u64) -> u64 { sequence }
//!     fn from_create_params(id: u64, _: DockCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, occupied: false })
//!     }
//!     async fn on_update(&mut self, _: DockUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: DockAction, _: &()) -> Result<bool, Self::Error> {
//!         Ok(true)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Dock>::new();
//!     mock.expect_get(1).return_ok(Some(Dock { id: 1, occupied: false }));
//!     mock.expect_action(1).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(!client.get(1).await.unwrap().unwrap().occupied);
//!     let result = client.perform_action(1, DockAction::Occupy).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Channel Inspection</b></summary>
//!
//! When the test needs to look at the payload the code under test sent (the password a
//! coordinator forwarded, the cost it asked an account to hold), use [`create_mock_client`]
//! and the `expect_*` helpers, which hand back the request and its responder.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Full System Integration Test</b></summary>
//!
//! Spawn the real actors through the crate's lifecycle type and drive them end to end.
//! See `tests/integration_test.rs` in the bike-share crate.
//! </details>

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock client and the response it gets.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Exists(Result<bool, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Rekey(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::List(_) => "list",
            Expectation::Exists(_) => "exists",
            Expectation::Create(_) => "create",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
            Expectation::Rekey(_) => "rekey",
            Expectation::Action(_) => "action",
        }
    }
}

/// A keyed expectation: the request must also carry the expected id.
struct Queued<T: ActorEntity> {
    id: Option<T::Id>,
    expectation: Expectation<T>,
}

type ExpectationQueue<T> = Arc<Mutex<VecDeque<Queued<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that does not
/// match the next expectation (wrong kind or wrong id) panics the mock task, which the
/// caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: ExpectationQueue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn reply<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: ExpectationQueue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some(Queued { id: expected_id, expectation }) = next else {
                    panic!("Unexpected request: no expectations left");
                };

                let request_id = match &request {
                    ResourceRequest::Get { id, .. }
                    | ResourceRequest::Exists { id, .. }
                    | ResourceRequest::Update { id, .. }
                    | ResourceRequest::Delete { id, .. }
                    | ResourceRequest::Rekey { id, .. }
                    | ResourceRequest::Action { id, .. } => Some(id.clone()),
                    ResourceRequest::Create { .. } | ResourceRequest::List { .. } => None,
                };
                if let (Some(expected), Some(actual)) = (&expected_id, &request_id) {
                    assert_eq!(expected, actual, "Unexpected id for {}", expectation.kind());
                }

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Expectation::Get(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::List { respond_to }, Expectation::List(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Exists { respond_to, .. }, Expectation::Exists(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Create { respond_to, .. }, Expectation::Create(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Update { respond_to, .. }, Expectation::Update(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Expectation::Delete(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Rekey { respond_to, .. }, Expectation::Rekey(r)) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Action { respond_to, .. }, Expectation::Action(r)) => {
                        reply(respond_to, r)
                    }
                    (_, expectation) => {
                        panic!("Expectation mismatch: expected {}", expectation.kind());
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), Expectation::Get)
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, Expectation::List)
    }

    /// Expects an `exists` operation.
    pub fn expect_exists(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.builder(Some(id), Expectation::Exists)
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, Expectation::Create)
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), Expectation::Update)
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), Expectation::Delete)
    }

    /// Expects a `rekey` of `id`.
    pub fn expect_rekey(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), Expectation::Rekey)
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), Expectation::Action)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Records the response for one expected request; `R` is what the request returns.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Queued {
            id: self.id,
            expectation: (self.wrap)(response),
        });
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value))
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error))
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// Use this instead of [`MockClient`] when the test needs the payload the code under test
/// sent. The test reads requests off `receiver` and answers them through the responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Member {
        id: String,
        email: String,
    }

    #[derive(Debug)]
    struct MemberCreate {
        id: String,
        email: String,
    }

    #[derive(Debug)]
    struct MemberUpdate;

    #[derive(Debug)]
    enum MemberAction {
        Touch,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Member error")]
    struct MemberError;

    #[async_trait]
    impl ActorEntity for Member {
        type Id = String;
        type Create = MemberCreate;
        type Update = MemberUpdate;
        type Action = MemberAction;
        type ActionResult = u32;
        type Context = ();
        type Error = MemberError;

        fn assign_id(params: &MemberCreate, _sequence: u64) -> String {
            params.id.clone()
        }

        fn from_create_params(id: String, params: MemberCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                email: params.email,
            })
        }

        async fn on_update(
            &mut self,
            _update: MemberUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: MemberAction,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            Ok(0)
        }
    }

    fn member(id: &str) -> Member {
        Member {
            id: id.to_string(),
            email: format!("{id}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Member>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(MemberCreate {
                    id: "M-1".to_string(),
                    email: "a@example.com".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.email, "a@example.com");
        responder.send(Ok(payload.id)).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap(), "M-1");
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Member>::new();

        mock.expect_create().return_ok("M-1".to_string());
        mock.expect_get("M-1".to_string()).return_ok(Some(member("M-1")));
        mock.expect_exists("M-2".to_string()).return_ok(false);
        mock.expect_list().return_ok(vec![member("M-1")]);
        mock.expect_action("M-1".to_string()).return_ok(7);
        mock.expect_rekey("M-1".to_string()).return_ok(());
        mock.expect_delete("M-1".to_string())
            .return_err(FrameworkError::NotFound("M-1".to_string()));

        let client = mock.client();

        let id = client
            .create(MemberCreate {
                id: "M-1".to_string(),
                email: "M-1@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, "M-1");

        let fetched = client.get(id.clone()).await.unwrap();
        assert_eq!(fetched.unwrap().email, "M-1@example.com");
        assert!(!client.exists("M-2".to_string()).await.unwrap());
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert_eq!(client.perform_action(id.clone(), MemberAction::Touch).await.unwrap(), 7);
        client.rekey(id.clone(), "M-9".to_string()).await.unwrap();
        assert!(matches!(
            client.delete(id).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_responder() {
        let mut mock = MockClient::<Member>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get("M-1".to_string()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
